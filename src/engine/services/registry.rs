//! Model registry: the immutable, validated engine catalogue.
//!
//! Provides [`ModelRegistry`], built once at startup from a
//! [`CatalogSource`] and shared read-only afterwards.

use crate::engine::{
    domain::{BackendKind, EngineDescriptor, EngineDomainError, EngineName},
    ports::{CatalogEntry, CatalogSource, CatalogSourceError},
};
use std::collections::HashMap;
use thiserror::Error;

/// Errors raised while loading or querying the registry.
#[derive(Debug, Clone, Error)]
pub enum RegistryError {
    /// The catalogue source could not be read or parsed.
    #[error(transparent)]
    Source(#[from] CatalogSourceError),

    /// The catalogue contains no engines.
    #[error("engine catalogue is empty")]
    EmptyCatalog,

    /// An entry failed domain validation.
    #[error("invalid engine catalogue entry: {0}")]
    InvalidEntry(#[from] EngineDomainError),

    /// Two entries share a display name.
    #[error("duplicate engine display name: {0}")]
    DuplicateDisplayName(EngineName),

    /// The requested display name is not in the registry.
    #[error("unknown translation engine: {0}")]
    UnknownEngine(String),
}

impl RegistryError {
    /// Returns whether the error is a load-time configuration failure, as
    /// opposed to a lookup miss.
    #[must_use]
    pub const fn is_config_error(&self) -> bool {
        !matches!(self, Self::UnknownEngine(_))
    }
}

/// Result type for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Immutable mapping from display name to [`EngineDescriptor`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelRegistry {
    engines: Vec<EngineDescriptor>,
    index: HashMap<EngineName, usize>,
}

impl ModelRegistry {
    /// Loads and validates every entry from `source`.
    ///
    /// Either every entry is accepted or no registry is returned.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Source`] when the source fails,
    /// [`RegistryError::EmptyCatalog`] when it has no entries,
    /// [`RegistryError::InvalidEntry`] when an entry is malformed or its
    /// namespace is unknown, or [`RegistryError::DuplicateDisplayName`] when a
    /// display name repeats.
    pub fn load(source: &impl CatalogSource) -> RegistryResult<Self> {
        Self::from_entries(source.read_entries()?)
    }

    /// Builds a registry from raw entries.
    ///
    /// # Errors
    ///
    /// See [`ModelRegistry::load`].
    pub fn from_entries(entries: Vec<CatalogEntry>) -> RegistryResult<Self> {
        if entries.is_empty() {
            return Err(RegistryError::EmptyCatalog);
        }

        let mut engines = Vec::with_capacity(entries.len());
        let mut index = HashMap::with_capacity(entries.len());

        for CatalogEntry {
            display_name,
            model_id,
        } in entries
        {
            let descriptor = EngineDescriptor::from_entry(display_name, model_id)?;
            if index.contains_key(descriptor.name()) {
                return Err(RegistryError::DuplicateDisplayName(
                    descriptor.name().clone(),
                ));
            }
            index.insert(descriptor.name().clone(), engines.len());
            engines.push(descriptor);
        }

        Ok(Self { engines, index })
    }

    /// Resolves a display name to its descriptor.
    ///
    /// Surrounding whitespace in `display_name` is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnknownEngine`] when no engine has that name.
    pub fn resolve(&self, display_name: &str) -> RegistryResult<&EngineDescriptor> {
        EngineName::new(display_name)
            .ok()
            .and_then(|name| self.index.get(&name))
            .and_then(|&position| self.engines.get(position))
            .ok_or_else(|| RegistryError::UnknownEngine(display_name.trim().to_owned()))
    }

    /// Returns every engine in catalogue order.
    #[must_use]
    pub fn engines(&self) -> &[EngineDescriptor] {
        &self.engines
    }

    /// Returns every display name in catalogue order.
    pub fn display_names(&self) -> impl Iterator<Item = &EngineName> {
        self.engines.iter().map(EngineDescriptor::name)
    }

    /// Returns whether at least one engine needs the hosted API credential.
    #[must_use]
    pub fn has_hosted_engines(&self) -> bool {
        self.engines
            .iter()
            .any(|engine| engine.kind() == BackendKind::HostedApi)
    }

    /// Returns the number of configured engines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.engines.len()
    }

    /// Returns whether the registry is empty. Loaded registries never are.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.engines.is_empty()
    }
}
