//! Hosted API credential.

use super::TranslationDomainError;
use std::fmt;

/// Bearer credential for the hosted completion API.
///
/// `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wraps a trimmed, non-empty key.
    ///
    /// # Errors
    ///
    /// Returns [`TranslationDomainError::EmptyApiKey`] for blank input.
    pub fn new(value: impl Into<String>) -> Result<Self, TranslationDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TranslationDomainError::EmptyApiKey);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Exposes the secret for building the `Authorization` header.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}
