//! Comparison aggregator: one request, several engines, input order kept.

use super::EngineDispatcher;
use crate::translation::{
    domain::{
        ComparisonResult, FailureKind, TranslationFailure, TranslationRequest, TranslationResult,
    },
    ports::TranslationBackend,
};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{Instrument, info, info_span, warn};

/// Fans a request out to several engines in parallel.
///
/// Engine calls run as independent tasks; results are placed back into the
/// selection order whatever order they complete in. Dropping the future
/// returned by [`ComparisonAggregator::compare_all`] aborts the outstanding
/// tasks.
pub struct ComparisonAggregator<H, L>
where
    H: TranslationBackend,
    L: TranslationBackend,
{
    dispatcher: Arc<EngineDispatcher<H, L>>,
    max_in_flight: Option<usize>,
}

impl<H, L> ComparisonAggregator<H, L>
where
    H: TranslationBackend + 'static,
    L: TranslationBackend + 'static,
{
    /// Creates an aggregator with no limit on concurrent engine calls.
    #[must_use]
    pub const fn new(dispatcher: Arc<EngineDispatcher<H, L>>) -> Self {
        Self {
            dispatcher,
            max_in_flight: None,
        }
    }

    /// Limits how many engine calls run at once; `None` removes the limit.
    /// Zero is treated as one.
    #[must_use]
    pub const fn with_max_in_flight(mut self, limit: Option<usize>) -> Self {
        self.max_in_flight = limit;
        self
    }

    /// Returns the dispatcher used for each engine.
    #[must_use]
    pub fn dispatcher(&self) -> &EngineDispatcher<H, L> {
        &self.dispatcher
    }

    /// Translates `request` with every engine in `display_names`.
    ///
    /// Names are trimmed and repeated names are kept only at their first
    /// position. The result has exactly one entry per remaining name, in that
    /// order; a failing engine yields a failed entry and never affects the
    /// others.
    pub async fn compare_all<I, S>(
        &self,
        display_names: I,
        request: &TranslationRequest,
    ) -> ComparisonResult
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let selection = ordered_selection(display_names);
        let span = info_span!("compare", request_id = %request.id(), engines = selection.len());
        let permits = self
            .max_in_flight
            .map_or(Semaphore::MAX_PERMITS, |limit| limit.clamp(1, Semaphore::MAX_PERMITS));
        let limiter = Arc::new(Semaphore::new(permits));

        let mut tasks = JoinSet::new();
        for (index, name) in selection.iter().enumerate() {
            let dispatcher = Arc::clone(&self.dispatcher);
            let task_request = request.clone();
            let engine = name.clone();
            let semaphore = Arc::clone(&limiter);
            tasks.spawn(
                async move {
                    let _permit = semaphore.acquire_owned().await;
                    (index, dispatcher.dispatch(&engine, &task_request).await)
                }
                .instrument(span.clone()),
            );
        }

        let mut slots: Vec<Option<TranslationResult>> = selection.iter().map(|_| None).collect();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, result)) => {
                    if let Some(slot) = slots.get_mut(index) {
                        *slot = Some(result);
                    }
                }
                Err(err) => {
                    warn!(parent: &span, error = %err, "comparison task did not complete");
                }
            }
        }

        let results: Vec<TranslationResult> = selection
            .into_iter()
            .zip(slots)
            .map(|(engine, slot)| {
                slot.unwrap_or_else(|| {
                    TranslationResult::failure(
                        engine,
                        TranslationFailure::new(
                            FailureKind::Backend,
                            "engine task was cancelled before producing a result",
                        ),
                    )
                })
            })
            .collect();

        let comparison = ComparisonResult::new(results);
        info!(
            parent: &span,
            succeeded = comparison.success_count(),
            total = comparison.len(),
            "comparison finished"
        );
        comparison
    }
}

fn ordered_selection<I, S>(display_names: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    display_names
        .into_iter()
        .map(|name| name.as_ref().trim().to_owned())
        .filter(|name| seen.insert(name.clone()))
        .collect()
}
