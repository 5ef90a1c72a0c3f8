//! Supported target languages.

use super::TranslationDomainError;
use serde::{Serialize, Serializer};
use std::fmt;

/// Target languages offered to callers, in presentation order.
///
/// The spelling here is exactly what the prompt templates receive.
pub const SUPPORTED_LANGUAGES: &[&str] = &[
    "Japanese",
    "English (United States)",
    "Spanish",
    "Slovak",
    "Slovenian",
    "Czech",
    "Danish",
    "German",
    "Turkish",
    "Norwegian (Bokmål)",
    "Hungarian",
    "Finnish",
    "French",
    "Bulgarian",
    "Polish",
    "Portuguese",
    "Portuguese (Brazil)",
    "Latvian",
    "Lithuanian",
    "Romanian",
    "Russian",
    "English (United Kingdom)",
    "Korean",
    "Chinese (Simplified)",
    "Chinese (Traditional)",
    "Arabic",
    "Italian",
    "Indonesian",
    "Ukrainian",
    "Estonian",
    "Dutch",
    "Greek",
    "Swedish",
];

/// A language from [`SUPPORTED_LANGUAGES`].
///
/// Only values from the fixed list can be constructed, so nothing a caller
/// types can reach the instruction template except one of these names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TargetLanguage(&'static str);

impl TargetLanguage {
    /// Parses a language name, ignoring case and surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`TranslationDomainError::UnsupportedLanguage`] when the name is
    /// not in [`SUPPORTED_LANGUAGES`].
    pub fn parse(value: &str) -> Result<Self, TranslationDomainError> {
        let wanted = value.trim();
        let folded = wanted.to_lowercase();
        SUPPORTED_LANGUAGES
            .iter()
            .find(|known| known.to_lowercase() == folded)
            .map(|&known| Self(known))
            .ok_or_else(|| TranslationDomainError::UnsupportedLanguage(wanted.to_owned()))
    }

    /// Returns every supported language in presentation order.
    pub fn all() -> impl Iterator<Item = Self> {
        SUPPORTED_LANGUAGES.iter().map(|&name| Self(name))
    }

    /// Returns the canonical language name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        self.0
    }
}

impl fmt::Display for TargetLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl Serialize for TargetLanguage {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.0)
    }
}

impl TryFrom<&str> for TargetLanguage {
    type Error = TranslationDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}
