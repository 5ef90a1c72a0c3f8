//! Backend port: one translation request against one model.

use crate::engine::domain::ModelId;
use crate::translation::domain::{FailureKind, TargetLanguage, TranslationFailure};
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Result type for backend calls.
pub type BackendResult<T> = Result<T, BackendError>;

/// A translation backend reachable by model identifier.
///
/// Implementations make exactly one request per call and never retry; retry
/// and timeout policy belong to the dispatcher.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TranslationBackend: Send + Sync {
    /// Translates `source_text` into `target_language` with `model_id`.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] classified by cause.
    async fn translate(
        &self,
        model_id: &ModelId,
        source_text: &str,
        target_language: TargetLanguage,
    ) -> BackendResult<String>;
}

/// Errors returned by backend adapters.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BackendError {
    /// The hosted credential is missing or was rejected.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// The backend signalled throttling.
    #[error("rate limited: {message}")]
    RateLimited {
        /// Backend message.
        message: String,
        /// Delay requested by the backend, if any.
        retry_after: Option<Duration>,
    },

    /// The local inference server could not be reached.
    #[error("local inference server at {endpoint} is unreachable: {reason}")]
    ServerUnreachable {
        /// Endpoint that was dialled.
        endpoint: String,
        /// Transport error.
        reason: String,
    },

    /// The local inference server does not have the model.
    #[error("model '{0}' is not installed on the local server; fetch it with `ollama pull {0}`")]
    ModelNotFound(ModelId),

    /// The call did not complete in time.
    #[error("backend did not respond within {0:?}")]
    Timeout(Duration),

    /// Any other backend failure.
    #[error("backend error: {0}")]
    Backend(String),
}

impl BackendError {
    /// Returns the failure classification.
    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::Auth(_) => FailureKind::Auth,
            Self::RateLimited { .. } => FailureKind::RateLimit,
            Self::ServerUnreachable { .. } => FailureKind::ServerUnreachable,
            Self::ModelNotFound(_) => FailureKind::ModelNotFound,
            Self::Timeout(_) => FailureKind::Timeout,
            Self::Backend(_) => FailureKind::Backend,
        }
    }

    /// Wraps any displayable cause as [`BackendError::Backend`].
    pub fn backend(err: impl std::fmt::Display) -> Self {
        Self::Backend(err.to_string())
    }
}

impl From<&BackendError> for TranslationFailure {
    fn from(err: &BackendError) -> Self {
        Self::new(err.kind(), err.to_string())
    }
}
