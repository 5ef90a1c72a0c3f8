//! Engine descriptor: the resolved form of a catalogue entry.

use super::{BackendKind, EngineDomainError, EngineName, ModelId};
use serde::Serialize;

/// A configured translation engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EngineDescriptor {
    name: EngineName,
    kind: BackendKind,
    model_id: ModelId,
}

impl EngineDescriptor {
    /// Builds a descriptor from a raw catalogue entry.
    ///
    /// # Errors
    ///
    /// Returns [`EngineDomainError`] when the display name is invalid, its
    /// namespace is unknown, or the model identifier is blank.
    pub fn from_entry(
        raw_display_name: impl Into<String>,
        raw_model_id: impl Into<String>,
    ) -> Result<Self, EngineDomainError> {
        let name = EngineName::new(raw_display_name)?;
        let kind = BackendKind::infer(&name)?;
        let model_id = ModelId::new(raw_model_id)
            .ok_or_else(|| EngineDomainError::EmptyModelId(name.as_str().to_owned()))?;
        Ok(Self {
            name,
            kind,
            model_id,
        })
    }

    /// Returns the display name.
    #[must_use]
    pub const fn name(&self) -> &EngineName {
        &self.name
    }

    /// Returns the backend kind inferred at load time.
    #[must_use]
    pub const fn kind(&self) -> BackendKind {
        self.kind
    }

    /// Returns the backend model identifier.
    #[must_use]
    pub const fn model_id(&self) -> &ModelId {
        &self.model_id
    }
}
