//! Engine dispatcher: one request, one engine, one classified result.
//!
//! Provides [`EngineDispatcher`], which resolves a display name through the
//! [`ModelRegistry`], routes the call to the adapter for the engine's backend
//! kind, and converts every error into a [`TranslationResult`] failure.

use crate::engine::{
    domain::{BackendKind, EngineDescriptor},
    services::{ModelRegistry, RegistryError},
};
use crate::translation::{
    domain::{FailureKind, TranslationFailure, TranslationRequest, TranslationResult},
    ports::{BackendError, BackendResult, TranslationBackend},
};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{Instrument, debug, info, info_span, warn};

/// Bounded retry policy for rate-limited calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    initial_backoff: Duration,
    max_backoff: Duration,
}

impl RetryPolicy {
    /// Default number of attempts, counting the first call.
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

    /// Largest number of attempts a policy allows.
    pub const MAX_ATTEMPTS: u32 = 10;

    /// Creates a policy allowing `max_attempts` total attempts, clamped to
    /// `1..=MAX_ATTEMPTS`, with the default backoff.
    #[must_use]
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.clamp(1, Self::MAX_ATTEMPTS),
            ..Self::default()
        }
    }

    /// Sets the first backoff delay and the cap applied to every delay.
    #[must_use]
    pub const fn with_backoff(mut self, initial: Duration, max: Duration) -> Self {
        self.initial_backoff = initial;
        self.max_backoff = max;
        self
    }

    /// Returns the total number of attempts allowed.
    #[must_use]
    pub const fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Returns the delay before the attempt following `attempt`.
    ///
    /// The delay doubles per attempt from the initial backoff. A delay
    /// requested by the backend replaces the computed one. Both are capped.
    #[must_use]
    pub fn backoff_for(&self, attempt: u32, requested: Option<Duration>) -> Duration {
        let exponent = attempt.saturating_sub(1).min(16);
        let computed = self.initial_backoff.saturating_mul(1_u32 << exponent);
        requested.unwrap_or(computed).min(self.max_backoff)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: Self::DEFAULT_MAX_ATTEMPTS,
            initial_backoff: Duration::from_millis(500),
            max_backoff: Duration::from_secs(8),
        }
    }
}

/// Timeout and retry settings applied to every dispatched call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchPolicy {
    timeout: Duration,
    retry: RetryPolicy,
}

impl DispatchPolicy {
    /// Default per-attempt timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

    /// Creates a policy with the given per-attempt timeout and default
    /// retries.
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            retry: RetryPolicy::default(),
        }
    }

    /// Replaces the retry policy.
    #[must_use]
    pub const fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Returns the per-attempt timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the retry policy.
    #[must_use]
    pub const fn retry(&self) -> RetryPolicy {
        self.retry
    }
}

impl Default for DispatchPolicy {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TIMEOUT)
    }
}

/// Routes requests to the hosted (`H`) or local (`L`) backend.
pub struct EngineDispatcher<H, L>
where
    H: TranslationBackend,
    L: TranslationBackend,
{
    registry: Arc<ModelRegistry>,
    hosted: Arc<H>,
    local: Arc<L>,
    policy: DispatchPolicy,
}

impl<H, L> EngineDispatcher<H, L>
where
    H: TranslationBackend,
    L: TranslationBackend,
{
    /// Creates a dispatcher over an immutable registry and two adapters.
    #[must_use]
    pub const fn new(
        registry: Arc<ModelRegistry>,
        hosted: Arc<H>,
        local: Arc<L>,
        policy: DispatchPolicy,
    ) -> Self {
        Self {
            registry,
            hosted,
            local,
            policy,
        }
    }

    /// Returns the registry used for resolution.
    #[must_use]
    pub fn registry(&self) -> &ModelRegistry {
        &self.registry
    }

    /// Returns the dispatch policy.
    #[must_use]
    pub const fn policy(&self) -> &DispatchPolicy {
        &self.policy
    }

    /// Translates `request` with the engine named `display_name`.
    ///
    /// Never fails: resolution errors, adapter errors and timeouts all come
    /// back as a failed [`TranslationResult`]. An unknown engine produces no
    /// backend call.
    pub async fn dispatch(
        &self,
        display_name: &str,
        request: &TranslationRequest,
    ) -> TranslationResult {
        let engine = display_name.trim();
        let span = info_span!("dispatch", request_id = %request.id(), engine);
        self.dispatch_resolved(engine, request).instrument(span).await
    }

    async fn dispatch_resolved(&self, engine: &str, request: &TranslationRequest) -> TranslationResult {
        let started = Instant::now();

        let descriptor = match self.registry.resolve(engine) {
            Ok(descriptor) => descriptor,
            Err(err) => {
                warn!(error = %err, "engine resolution failed");
                return TranslationResult::failure(engine, registry_failure(&err))
                    .with_elapsed(started.elapsed());
            }
        };

        let (outcome, attempts) = self.call_with_retry(descriptor, request).await;
        let result = match outcome {
            Ok(text) => {
                info!(attempts, "translation succeeded");
                TranslationResult::success(engine, text.trim())
            }
            Err(err) => {
                warn!(attempts, kind = %err.kind(), error = %err, "translation failed");
                TranslationResult::failure(engine, TranslationFailure::from(&err))
            }
        };
        result
            .with_attempts(attempts)
            .with_elapsed(started.elapsed())
    }

    async fn call_with_retry(
        &self,
        descriptor: &EngineDescriptor,
        request: &TranslationRequest,
    ) -> (BackendResult<String>, u32) {
        let retry = self.policy.retry();
        let mut attempt = 0_u32;
        loop {
            attempt = attempt.saturating_add(1);
            match self.call_once(descriptor, request, attempt).await {
                Err(BackendError::RateLimited { retry_after, .. })
                    if attempt < retry.max_attempts() =>
                {
                    let delay = retry.backoff_for(attempt, retry_after);
                    warn!(attempt, ?delay, "backend rate limited; backing off");
                    tokio::time::sleep(delay).await;
                }
                outcome => return (outcome, attempt),
            }
        }
    }

    async fn call_once(
        &self,
        descriptor: &EngineDescriptor,
        request: &TranslationRequest,
        attempt: u32,
    ) -> BackendResult<String> {
        let backend: &dyn TranslationBackend = match descriptor.kind() {
            BackendKind::HostedApi => self.hosted.as_ref(),
            BackendKind::LocalServer => self.local.as_ref(),
        };
        debug!(
            attempt,
            kind = %descriptor.kind(),
            model = %descriptor.model_id(),
            "calling backend"
        );

        let timeout = self.policy.timeout();
        tokio::time::timeout(
            timeout,
            backend.translate(
                descriptor.model_id(),
                request.source_text(),
                request.target_language(),
            ),
        )
        .await
        .unwrap_or_else(|_| Err(BackendError::Timeout(timeout)))
    }
}

fn registry_failure(err: &RegistryError) -> TranslationFailure {
    let kind = if err.is_config_error() {
        FailureKind::Config
    } else {
        FailureKind::UnknownEngine
    };
    TranslationFailure::new(kind, err.to_string())
}
