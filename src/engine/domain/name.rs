//! Validated engine display name.

use super::EngineDomainError;
use serde::Serialize;
use std::fmt;

/// Separator between the namespace and the label of a display name.
const NAMESPACE_SEPARATOR: char = '/';

/// User-facing engine label of the form `Namespace/Label`.
///
/// The namespace is everything before the first `/`; the rest may itself
/// contain further `/` characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub struct EngineName(String);

impl EngineName {
    /// Creates a validated display name.
    ///
    /// The input is trimmed but otherwise kept verbatim; matching is
    /// case-sensitive.
    ///
    /// # Errors
    ///
    /// Returns [`EngineDomainError::EmptyDisplayName`] for blank input,
    /// [`EngineDomainError::MissingNamespace`] when there is no `/`, or
    /// [`EngineDomainError::MalformedDisplayName`] when the namespace or the
    /// label is blank.
    pub fn new(value: impl Into<String>) -> Result<Self, EngineDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            return Err(EngineDomainError::EmptyDisplayName);
        }

        let Some((namespace, label)) = trimmed.split_once(NAMESPACE_SEPARATOR) else {
            return Err(EngineDomainError::MissingNamespace(trimmed.to_owned()));
        };

        if namespace.trim().is_empty() || label.trim().is_empty() {
            return Err(EngineDomainError::MalformedDisplayName(trimmed.to_owned()));
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the namespace part, before the first `/`.
    #[must_use]
    pub fn namespace(&self) -> &str {
        self.0
            .split_once(NAMESPACE_SEPARATOR)
            .map_or(self.0.as_str(), |(namespace, _)| namespace)
    }

    /// Returns the full display name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for EngineName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for EngineName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<EngineName> for String {
    fn from(value: EngineName) -> Self {
        value.0
    }
}
