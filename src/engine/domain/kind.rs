//! Backend kind and the namespace convention that selects it.

use super::{EngineDomainError, EngineName};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which adapter serves an engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    /// Hosted completion API reached over the internet with a credential.
    HostedApi,
    /// Locally reachable inference server, no authentication.
    LocalServer,
}

/// Namespace table used to infer a [`BackendKind`] from a display name.
///
/// Matching is exact and case-sensitive. Anything not listed here is rejected
/// when the catalogue is loaded.
const NAMESPACES: &[(&str, BackendKind)] = &[
    ("OpenAI", BackendKind::HostedApi),
    ("Ollama", BackendKind::LocalServer),
];

impl BackendKind {
    /// Infers the backend kind from the namespace of a display name.
    ///
    /// The namespace is the text before the first `/`: `OpenAI` selects
    /// [`BackendKind::HostedApi`] and `Ollama` selects
    /// [`BackendKind::LocalServer`].
    ///
    /// # Errors
    ///
    /// Returns [`EngineDomainError::UnknownNamespace`] for any other
    /// namespace.
    pub fn infer(name: &EngineName) -> Result<Self, EngineDomainError> {
        let namespace = name.namespace();
        NAMESPACES
            .iter()
            .find(|(known, _)| *known == namespace)
            .map(|&(_, kind)| kind)
            .ok_or_else(|| EngineDomainError::UnknownNamespace {
                display_name: name.as_str().to_owned(),
                namespace: namespace.to_owned(),
                known: Self::known_namespaces().join(", "),
            })
    }

    /// Returns the namespaces accepted by [`BackendKind::infer`].
    #[must_use]
    pub fn known_namespaces() -> Vec<&'static str> {
        NAMESPACES.iter().map(|(namespace, _)| *namespace).collect()
    }

    /// Returns the canonical string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::HostedApi => "hosted_api",
            Self::LocalServer => "local_server",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
