//! Catalogue source port: where display-name to model-id mappings come from.

use camino::Utf8PathBuf;
use std::sync::Arc;
use thiserror::Error;

/// Result type for catalogue source operations.
pub type CatalogSourceResult<T> = Result<T, CatalogSourceError>;

/// One raw `display name -> model id` pair, exactly as written in the source.
///
/// Entries are unvalidated. Duplicates are kept so the registry can reject
/// them instead of a parser silently keeping the last one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    /// Display name as written.
    pub display_name: String,
    /// Model identifier as written.
    pub model_id: String,
}

impl CatalogEntry {
    /// Creates a raw catalogue entry.
    #[must_use]
    pub fn new(display_name: impl Into<String>, model_id: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            model_id: model_id.into(),
        }
    }
}

/// Supplier of raw catalogue entries.
pub trait CatalogSource: Send + Sync {
    /// Reads every entry in source order.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogSourceError`] when the source cannot be read or is not
    /// a flat string-to-string mapping.
    fn read_entries(&self) -> CatalogSourceResult<Vec<CatalogEntry>>;
}

/// Errors returned by catalogue source adapters.
#[derive(Debug, Clone, Error)]
pub enum CatalogSourceError {
    /// The catalogue file could not be opened or read.
    #[error("failed to read engine catalogue {path}: {source}")]
    Read {
        /// Path that was being read.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        source: Arc<std::io::Error>,
    },

    /// The catalogue file extension does not name a supported format.
    #[error("unsupported engine catalogue format for {0} (expected .yaml, .yml or .json)")]
    UnsupportedFormat(Utf8PathBuf),

    /// The catalogue content is not a flat string-to-string mapping.
    #[error("malformed engine catalogue: {0}")]
    Malformed(String),
}

impl CatalogSourceError {
    /// Wraps an I/O error raised while reading `path`.
    pub fn read(path: impl Into<Utf8PathBuf>, err: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source: Arc::new(err),
        }
    }

    /// Wraps a parser error.
    pub fn malformed(err: impl std::fmt::Display) -> Self {
        Self::Malformed(err.to_string())
    }
}
