//! Error types for engine domain validation.

use thiserror::Error;

/// Errors returned while constructing engine domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EngineDomainError {
    /// The display name is empty after trimming.
    #[error("engine display name must not be empty")]
    EmptyDisplayName,

    /// The display name has no `/` separating namespace and label.
    #[error("engine display name '{0}' has no namespace (expected 'Namespace/Label')")]
    MissingNamespace(String),

    /// The namespace or the label part of the display name is blank.
    #[error("engine display name '{0}' has an empty namespace or label")]
    MalformedDisplayName(String),

    /// The namespace does not map to any known backend kind.
    #[error("engine '{display_name}' uses unknown namespace '{namespace}' (known: {known})")]
    UnknownNamespace {
        /// Offending display name.
        display_name: String,
        /// Namespace extracted from the display name.
        namespace: String,
        /// Comma-separated list of accepted namespaces.
        known: String,
    },

    /// The backend model identifier is empty after trimming.
    #[error("model identifier for engine '{0}' must not be empty")]
    EmptyModelId(String),
}
