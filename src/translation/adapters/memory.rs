//! In-memory scripted backend for tests and offline runs.

use crate::engine::domain::ModelId;
use crate::translation::{
    domain::TargetLanguage,
    ports::{BackendError, BackendResult, TranslationBackend},
};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, RwLock};
use std::time::Duration;

/// One scripted backend reply, optionally delayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptedReply {
    result: BackendResult<String>,
    delay: Duration,
}

impl ScriptedReply {
    /// A reply that returns `text`.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            result: Ok(text.into()),
            delay: Duration::ZERO,
        }
    }

    /// A reply that fails with `error`.
    #[must_use]
    pub const fn error(error: BackendError) -> Self {
        Self {
            result: Err(error),
            delay: Duration::ZERO,
        }
    }

    /// Delays the reply by `delay`.
    #[must_use]
    pub const fn after(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

/// A call observed by [`InMemoryTranslationBackend`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    /// Model the call was addressed to.
    pub model_id: ModelId,
    /// Source text passed in.
    pub source_text: String,
    /// Target language passed in.
    pub target_language: TargetLanguage,
}

/// Backend that answers from per-model scripts without any network access.
///
/// Each model has a queue of replies; the last reply repeats once the queue
/// is down to one entry. Models without a script behave like a local server
/// that has not installed them.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTranslationBackend {
    state: Arc<RwLock<ScriptState>>,
}

#[derive(Debug, Default)]
struct ScriptState {
    replies: HashMap<ModelId, VecDeque<ScriptedReply>>,
    calls: Vec<RecordedCall>,
}

impl InMemoryTranslationBackend {
    /// Creates a backend with no scripts.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the reply queue for `model_id`.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::Backend`] when the model id is blank, the
    /// reply list is empty, or the lock is poisoned.
    pub fn script(
        &self,
        model_id: impl Into<String>,
        replies: impl IntoIterator<Item = ScriptedReply>,
    ) -> BackendResult<()> {
        let model = ModelId::new(model_id)
            .ok_or_else(|| BackendError::Backend("model identifier must not be empty".to_owned()))?;
        let queue: VecDeque<ScriptedReply> = replies.into_iter().collect();
        if queue.is_empty() {
            return Err(BackendError::Backend(format!(
                "no scripted replies for model '{model}'"
            )));
        }
        let mut state = self.state.write().map_err(BackendError::backend)?;
        state.replies.insert(model, queue);
        Ok(())
    }

    /// Returns every call received so far, in arrival order.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::Backend`] when the lock is poisoned.
    pub fn calls(&self) -> BackendResult<Vec<RecordedCall>> {
        let state = self.state.read().map_err(BackendError::backend)?;
        Ok(state.calls.clone())
    }

    /// Returns how many calls were received; zero if the lock is poisoned.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.state.read().map_or(0, |state| state.calls.len())
    }

    fn next_reply(
        &self,
        model_id: &ModelId,
        source_text: &str,
        target_language: TargetLanguage,
    ) -> BackendResult<ScriptedReply> {
        let mut state = self.state.write().map_err(BackendError::backend)?;
        state.calls.push(RecordedCall {
            model_id: model_id.clone(),
            source_text: source_text.to_owned(),
            target_language,
        });

        let Some(queue) = state.replies.get_mut(model_id) else {
            return Ok(ScriptedReply::error(BackendError::ModelNotFound(
                model_id.clone(),
            )));
        };
        let reply = if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        };
        reply.ok_or_else(|| BackendError::Backend(format!("script for '{model_id}' is exhausted")))
    }
}

#[async_trait]
impl TranslationBackend for InMemoryTranslationBackend {
    async fn translate(
        &self,
        model_id: &ModelId,
        source_text: &str,
        target_language: TargetLanguage,
    ) -> BackendResult<String> {
        let reply = self.next_reply(model_id, source_text, target_language)?;
        if !reply.delay.is_zero() {
            tokio::time::sleep(reply.delay).await;
        }
        reply.result
    }
}
