//! Error types for translation domain validation.

use thiserror::Error;

/// Errors returned while constructing translation domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TranslationDomainError {
    /// The source text is empty or whitespace only.
    #[error("source text must not be empty")]
    EmptySourceText,

    /// The target language is not in the supported list.
    #[error("unsupported target language: {0}")]
    UnsupportedLanguage(String),

    /// The API key is empty after trimming.
    #[error("API key must not be empty")]
    EmptyApiKey,

    /// A prompt template failed to compile or render.
    #[error("prompt template '{template}' failed: {reason}")]
    Prompt {
        /// Template name.
        template: &'static str,
        /// Renderer message.
        reason: String,
    },
}
