//! In-memory catalogue source.

use crate::engine::ports::{CatalogEntry, CatalogSource, CatalogSourceResult};

/// Catalogue source backed by a fixed list of pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticCatalogSource {
    entries: Vec<CatalogEntry>,
}

impl StaticCatalogSource {
    /// Creates a source from `(display name, model id)` pairs, kept in order.
    #[must_use]
    pub fn new<N, M>(pairs: impl IntoIterator<Item = (N, M)>) -> Self
    where
        N: Into<String>,
        M: Into<String>,
    {
        Self {
            entries: pairs
                .into_iter()
                .map(|(name, model)| CatalogEntry::new(name, model))
                .collect(),
        }
    }
}

impl CatalogSource for StaticCatalogSource {
    fn read_entries(&self) -> CatalogSourceResult<Vec<CatalogEntry>> {
        Ok(self.entries.clone())
    }
}
