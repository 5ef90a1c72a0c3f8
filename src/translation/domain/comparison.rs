//! Ordered comparison of several engines on one request.

use super::TranslationResult;
use serde::Serialize;

/// Results of one request fanned out to several engines.
///
/// Entries follow the caller's selection order and each engine appears once.
/// Only the comparison service builds values of this type.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct ComparisonResult(Vec<TranslationResult>);

impl ComparisonResult {
    pub(crate) const fn new(results: Vec<TranslationResult>) -> Self {
        Self(results)
    }

    /// Returns the results in selection order.
    #[must_use]
    pub fn results(&self) -> &[TranslationResult] {
        &self.0
    }

    /// Returns the result for one engine.
    #[must_use]
    pub fn get(&self, engine: &str) -> Option<&TranslationResult> {
        self.0.iter().find(|result| result.engine() == engine)
    }

    /// Returns the engine names in selection order.
    pub fn engines(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(TranslationResult::engine)
    }

    /// Returns how many engines produced a translation.
    #[must_use]
    pub fn success_count(&self) -> usize {
        self.0.iter().filter(|result| result.is_success()).count()
    }

    /// Returns the number of engines compared.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether no engine was selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consumes the comparison, returning the ordered results.
    #[must_use]
    pub fn into_results(self) -> Vec<TranslationResult> {
        self.0
    }
}

impl<'a> IntoIterator for &'a ComparisonResult {
    type Item = &'a TranslationResult;
    type IntoIter = std::slice::Iter<'a, TranslationResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
