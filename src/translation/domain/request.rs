//! Translation request value.

use super::{TargetLanguage, TranslationDomainError};
use serde::Serialize;
use std::fmt;
use uuid::Uuid;

/// Correlation identifier attached to every request for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct RequestId(Uuid);

impl RequestId {
    /// Creates a new random request identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the wrapped UUID.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Text to translate and the language to translate it into.
///
/// The source language is never supplied; the backend model detects it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranslationRequest {
    id: RequestId,
    source_text: String,
    target_language: TargetLanguage,
}

impl TranslationRequest {
    /// Creates a request.
    ///
    /// The text is kept verbatim; it is only checked for content.
    ///
    /// # Errors
    ///
    /// Returns [`TranslationDomainError::EmptySourceText`] when the text is
    /// empty or whitespace only.
    pub fn new(
        source_text: impl Into<String>,
        target_language: TargetLanguage,
    ) -> Result<Self, TranslationDomainError> {
        let text = source_text.into();
        if text.trim().is_empty() {
            return Err(TranslationDomainError::EmptySourceText);
        }
        Ok(Self {
            id: RequestId::new(),
            source_text: text,
            target_language,
        })
    }

    /// Creates a request from raw user input, parsing the language name.
    ///
    /// # Errors
    ///
    /// Returns [`TranslationDomainError::UnsupportedLanguage`] or
    /// [`TranslationDomainError::EmptySourceText`].
    pub fn from_input(
        source_text: impl Into<String>,
        language: &str,
    ) -> Result<Self, TranslationDomainError> {
        let target = TargetLanguage::parse(language)?;
        Self::new(source_text, target)
    }

    /// Returns the correlation identifier.
    #[must_use]
    pub const fn id(&self) -> RequestId {
        self.id
    }

    /// Returns the text to translate.
    #[must_use]
    pub fn source_text(&self) -> &str {
        &self.source_text
    }

    /// Returns the target language.
    #[must_use]
    pub const fn target_language(&self) -> TargetLanguage {
        self.target_language
    }
}
