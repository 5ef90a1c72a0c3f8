//! Shared world state for engine comparison BDD scenarios.

use honyaku::app::TranslatorApp;
use honyaku::engine::{adapters::StaticCatalogSource, services::ModelRegistry};
use honyaku::translation::{
    adapters::InMemoryTranslationBackend,
    domain::{ComparisonResult, TranslationResult},
    services::DispatchPolicy,
};
use rstest::fixture;
use std::time::Duration;

/// Application type used by the BDD world.
pub type ScenarioApp = TranslatorApp<InMemoryTranslationBackend, InMemoryTranslationBackend>;

/// Scenario world for engine comparison behaviour tests.
#[derive(Default)]
pub struct ComparisonWorld {
    /// Scripted hosted backend; clones share state with the app's copy.
    pub hosted: InMemoryTranslationBackend,
    /// Scripted local backend; clones share state with the app's copy.
    pub local: InMemoryTranslationBackend,
    /// Application under test, built from the catalogue step.
    pub app: Option<ScenarioApp>,
    /// Results of the last translate or compare step, in order.
    pub results: Vec<TranslationResult>,
}

impl ComparisonWorld {
    /// Builds the application over the given catalogue pairs.
    pub fn load_catalogue(&mut self, pairs: [(String, String); 2]) -> Result<(), eyre::Report> {
        let registry = ModelRegistry::load(&StaticCatalogSource::new(pairs))
            .map_err(|err| eyre::eyre!("catalogue rejected: {err}"))?;
        self.app = Some(TranslatorApp::with_backends(
            registry,
            self.hosted.clone(),
            self.local.clone(),
            DispatchPolicy::new(Duration::from_secs(5)),
        ));
        Ok(())
    }

    /// Returns the application or an error when no catalogue was loaded.
    pub fn app(&self) -> Result<&ScenarioApp, eyre::Report> {
        self.app
            .as_ref()
            .ok_or_else(|| eyre::eyre!("no catalogue loaded in scenario world"))
    }

    /// Records a comparison as the scenario's results.
    pub fn record_comparison(&mut self, comparison: ComparisonResult) {
        self.results = comparison.into_results();
    }

    /// Finds the recorded result for one engine.
    pub fn result_for(&self, engine: &str) -> Result<&TranslationResult, eyre::Report> {
        self.results
            .iter()
            .find(|result| result.engine() == engine)
            .ok_or_else(|| eyre::eyre!("no result recorded for '{engine}'"))
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> ComparisonWorld {
    ComparisonWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

/// Splits a comma-separated list of display names.
pub fn split_names(names: &str) -> Vec<String> {
    names.split(',').map(|name| name.trim().to_owned()).collect()
}
