//! Application facade used by the presentation layer.
//!
//! [`TranslatorApp`] wires a loaded [`ModelRegistry`] to the hosted and local
//! adapters and exposes the handful of operations a user interface needs:
//! list engines, list languages, translate with one engine, compare several.

use crate::config::{API_KEY_VAR, AppConfig, ConfigError};
use crate::engine::{
    adapters::FileCatalogSource,
    domain::EngineDescriptor,
    services::{ModelRegistry, RegistryError},
};
use crate::translation::{
    adapters::{HostedApiBackend, LocalServerBackend},
    domain::{
        ComparisonResult, TargetLanguage, TranslationDomainError, TranslationRequest,
        TranslationResult,
    },
    ports::{BackendError, TranslationBackend},
    services::{ComparisonAggregator, DispatchPolicy, EngineDispatcher},
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Errors raised while starting the application or building a request.
#[derive(Debug, Clone, Error)]
pub enum AppError {
    /// Environment configuration is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The model catalogue could not be loaded.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// A backend adapter could not be constructed.
    #[error(transparent)]
    Backend(#[from] BackendError),

    /// The request input is invalid.
    #[error(transparent)]
    Request(#[from] TranslationDomainError),
}

/// Translation application over a hosted (`H`) and a local (`L`) backend.
pub struct TranslatorApp<H = HostedApiBackend, L = LocalServerBackend>
where
    H: TranslationBackend,
    L: TranslationBackend,
{
    aggregator: ComparisonAggregator<H, L>,
}

impl TranslatorApp {
    /// Builds the application from configuration.
    ///
    /// The catalogue is read once here. A missing hosted credential is not an
    /// error; it is logged once and reported per engine on use.
    ///
    /// # Errors
    ///
    /// Returns [`AppError`] when the catalogue is invalid or an adapter cannot
    /// be constructed.
    pub fn from_config(config: &AppConfig) -> Result<Self, AppError> {
        let registry =
            ModelRegistry::load(&FileCatalogSource::new(config.catalog_path().to_owned()))?;
        info!(
            engines = registry.len(),
            catalogue = %config.catalog_path(),
            "model catalogue loaded"
        );
        if registry.has_hosted_engines() && !config.hosted().has_api_key() {
            warn!("{API_KEY_VAR} is not set; hosted engines will report an authentication error");
        }

        let hosted = HostedApiBackend::new(config.hosted().clone())?;
        let local = LocalServerBackend::new(config.local().clone())?;
        Ok(Self::with_backends(
            registry,
            hosted,
            local,
            config.dispatch(),
        ))
    }
}

impl<H, L> TranslatorApp<H, L>
where
    H: TranslationBackend + 'static,
    L: TranslationBackend + 'static,
{
    /// Builds the application over explicit backends.
    #[must_use]
    pub fn with_backends(
        registry: ModelRegistry,
        hosted: H,
        local: L,
        policy: DispatchPolicy,
    ) -> Self {
        let dispatcher = EngineDispatcher::new(
            Arc::new(registry),
            Arc::new(hosted),
            Arc::new(local),
            policy,
        );
        Self {
            aggregator: ComparisonAggregator::new(Arc::new(dispatcher)),
        }
    }

    /// Limits how many engines a comparison calls at once; `None` removes
    /// the limit.
    #[must_use]
    pub fn with_max_in_flight(self, limit: Option<usize>) -> Self {
        Self {
            aggregator: self.aggregator.with_max_in_flight(limit),
        }
    }

    /// Returns the configured engine display names, in catalogue order.
    pub fn engine_names(&self) -> impl Iterator<Item = &str> {
        self.aggregator
            .dispatcher()
            .registry()
            .display_names()
            .map(|name| name.as_str())
    }

    /// Returns the configured engines, in catalogue order.
    #[must_use]
    pub fn engines(&self) -> &[EngineDescriptor] {
        self.aggregator.dispatcher().registry().engines()
    }

    /// Returns the supported target languages, in presentation order.
    #[expect(
        clippy::unused_self,
        reason = "languages are listed alongside engines on the same facade"
    )]
    pub fn languages(&self) -> impl Iterator<Item = TargetLanguage> {
        TargetLanguage::all()
    }

    /// Translates with one engine.
    pub async fn translate(&self, engine: &str, request: &TranslationRequest) -> TranslationResult {
        self.aggregator.dispatcher().dispatch(engine, request).await
    }

    /// Translates with every engine in `engines`, keeping their order.
    pub async fn compare<I, S>(&self, engines: I, request: &TranslationRequest) -> ComparisonResult
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.aggregator.compare_all(engines, request).await
    }
}
