//! File-backed catalogue source.
//!
//! Reads a flat YAML or JSON mapping such as:
//!
//! ```yaml
//! OpenAI/GPT-4o-mini: gpt-4o-mini
//! Ollama/gemma-3-4b-it-gguf: gemma3:4b-it-q4_K_M
//! ```
//!
//! The file is opened through a capability handle on its parent directory.

use crate::engine::ports::{CatalogEntry, CatalogSource, CatalogSourceError, CatalogSourceResult};
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use std::fmt;

/// Serialization format of a catalogue document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    /// YAML mapping (`.yaml`, `.yml`).
    Yaml,
    /// JSON object (`.json`).
    Json,
}

impl CatalogFormat {
    /// Picks the format from a file extension, case-insensitively.
    #[must_use]
    pub fn from_path(path: &Utf8Path) -> Option<Self> {
        let extension = path.extension()?.to_ascii_lowercase();
        match extension.as_str() {
            "yaml" | "yml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Catalogue source reading a mapping file from disk on every call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileCatalogSource {
    path: Utf8PathBuf,
}

impl FileCatalogSource {
    /// Creates a source for the given path.
    #[must_use]
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the configured path.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    fn read_to_string(&self) -> CatalogSourceResult<String> {
        let parent = match self.path.parent() {
            Some(dir) if !dir.as_str().is_empty() => dir,
            _ => Utf8Path::new("."),
        };
        let file_name = self
            .path
            .file_name()
            .ok_or_else(|| CatalogSourceError::UnsupportedFormat(self.path.clone()))?;

        let dir = Dir::open_ambient_dir(parent, ambient_authority())
            .map_err(|err| CatalogSourceError::read(self.path.clone(), err))?;
        dir.read_to_string(file_name)
            .map_err(|err| CatalogSourceError::read(self.path.clone(), err))
    }
}

impl CatalogSource for FileCatalogSource {
    fn read_entries(&self) -> CatalogSourceResult<Vec<CatalogEntry>> {
        let format = CatalogFormat::from_path(&self.path)
            .ok_or_else(|| CatalogSourceError::UnsupportedFormat(self.path.clone()))?;
        let contents = self.read_to_string()?;
        parse_catalog(&contents, format)
    }
}

/// Parses catalogue text into raw entries, preserving order and duplicates.
///
/// # Errors
///
/// Returns [`CatalogSourceError::Malformed`] when the document is not a
/// mapping of strings to strings.
pub fn parse_catalog(contents: &str, format: CatalogFormat) -> CatalogSourceResult<Vec<CatalogEntry>> {
    let document = match format {
        CatalogFormat::Yaml => {
            serde_yaml::from_str::<CatalogDocument>(contents).map_err(CatalogSourceError::malformed)?
        }
        CatalogFormat::Json => {
            serde_json::from_str::<CatalogDocument>(contents).map_err(CatalogSourceError::malformed)?
        }
    };
    Ok(document.0)
}

/// Ordered mapping that keeps repeated keys instead of collapsing them.
struct CatalogDocument(Vec<CatalogEntry>);

impl<'de> Deserialize<'de> for CatalogDocument {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(CatalogVisitor)
    }
}

struct CatalogVisitor;

impl<'de> Visitor<'de> for CatalogVisitor {
    type Value = CatalogDocument;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a mapping of engine display names to model identifiers")
    }

    fn visit_unit<E>(self) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(CatalogDocument(Vec::new()))
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((display_name, model_id)) = access.next_entry::<String, String>()? {
            entries.push(CatalogEntry::new(display_name, model_id));
        }
        Ok(CatalogDocument(entries))
    }
}
