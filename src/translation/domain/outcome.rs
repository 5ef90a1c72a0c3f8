//! Per-engine translation outcome.

use serde::{Serialize, Serializer};
use std::fmt;
use std::time::Duration;

/// Classification of a failed translation.
///
/// The presentation layer keys its guidance off this value, so every kind
/// names a distinct remedy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Configuration is missing or malformed.
    Config,
    /// The selected engine is not in the registry.
    UnknownEngine,
    /// The hosted credential is missing or was rejected.
    Auth,
    /// The backend is throttling requests.
    RateLimit,
    /// The local inference server could not be reached.
    ServerUnreachable,
    /// The local inference server does not have the model installed.
    ModelNotFound,
    /// Any other backend failure.
    Backend,
    /// The call did not finish within the configured timeout.
    Timeout,
}

impl FailureKind {
    /// Returns whether the dispatcher may retry this failure.
    #[must_use]
    pub const fn is_retryable(self) -> bool {
        matches!(self, Self::RateLimit)
    }

    /// Returns the canonical string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Config => "config",
            Self::UnknownEngine => "unknown_engine",
            Self::Auth => "auth",
            Self::RateLimit => "rate_limit",
            Self::ServerUnreachable => "server_unreachable",
            Self::ModelNotFound => "model_not_found",
            Self::Backend => "backend",
            Self::Timeout => "timeout",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified failure with a human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranslationFailure {
    kind: FailureKind,
    message: String,
}

impl TranslationFailure {
    /// Creates a failure.
    #[must_use]
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Returns the failure classification.
    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        self.kind
    }

    /// Returns the failure message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for TranslationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

/// Success or failure of one engine call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TranslationOutcome {
    /// The backend returned a translation.
    Success {
        /// Translated text.
        text: String,
    },
    /// The call failed.
    Failure(TranslationFailure),
}

/// The result of dispatching one request to one engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranslationResult {
    engine: String,
    outcome: TranslationOutcome,
    attempts: u32,
    #[serde(rename = "elapsed_ms", serialize_with = "serialize_millis")]
    elapsed: Duration,
}

impl TranslationResult {
    /// Creates a successful result.
    #[must_use]
    pub fn success(engine: impl Into<String>, text: impl Into<String>) -> Self {
        Self::with_outcome(engine, TranslationOutcome::Success { text: text.into() })
    }

    /// Creates a failed result.
    #[must_use]
    pub fn failure(engine: impl Into<String>, failure: TranslationFailure) -> Self {
        Self::with_outcome(engine, TranslationOutcome::Failure(failure))
    }

    fn with_outcome(engine: impl Into<String>, outcome: TranslationOutcome) -> Self {
        Self {
            engine: engine.into(),
            outcome,
            attempts: 0,
            elapsed: Duration::ZERO,
        }
    }

    /// Records how many backend attempts were made.
    #[must_use]
    pub const fn with_attempts(mut self, attempts: u32) -> Self {
        self.attempts = attempts;
        self
    }

    /// Records the wall time spent on the engine.
    #[must_use]
    pub const fn with_elapsed(mut self, elapsed: Duration) -> Self {
        self.elapsed = elapsed;
        self
    }

    /// Returns the engine display name as requested by the caller.
    #[must_use]
    pub fn engine(&self) -> &str {
        &self.engine
    }

    /// Returns the outcome.
    #[must_use]
    pub const fn outcome(&self) -> &TranslationOutcome {
        &self.outcome
    }

    /// Returns the translated text when the call succeeded.
    #[must_use]
    pub fn translated_text(&self) -> Option<&str> {
        match &self.outcome {
            TranslationOutcome::Success { text } => Some(text),
            TranslationOutcome::Failure(_) => None,
        }
    }

    /// Returns the failure when the call failed.
    #[must_use]
    pub const fn failure_details(&self) -> Option<&TranslationFailure> {
        match &self.outcome {
            TranslationOutcome::Success { .. } => None,
            TranslationOutcome::Failure(failure) => Some(failure),
        }
    }

    /// Returns whether the call succeeded.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self.outcome, TranslationOutcome::Success { .. })
    }

    /// Returns the number of backend attempts; zero when no backend was
    /// called.
    #[must_use]
    pub const fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Returns the wall time spent on the engine.
    #[must_use]
    pub const fn elapsed(&self) -> Duration {
        self.elapsed
    }
}

fn serialize_millis<S>(elapsed: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_u64(u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX))
}
