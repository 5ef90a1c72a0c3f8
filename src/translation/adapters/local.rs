//! Local inference server adapter (Ollama chat API).

use super::http::{ErrorDetails, build_client, join_url};
use crate::engine::domain::ModelId;
use crate::translation::{
    domain::{PromptTemplates, TargetLanguage},
    ports::{BackendError, BackendResult, TranslationBackend},
};
use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Default address of the local inference server.
pub const DEFAULT_LOCAL_ENDPOINT: &str = "http://127.0.0.1:11434";

/// Connection settings for [`LocalServerBackend`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalServerSettings {
    endpoint: Url,
    timeout: Duration,
}

impl LocalServerSettings {
    /// Creates settings for `endpoint` with the given per-request timeout.
    #[must_use]
    pub const fn new(endpoint: Url, timeout: Duration) -> Self {
        Self { endpoint, timeout }
    }

    /// Returns the server address.
    #[must_use]
    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Returns the per-request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[derive(Serialize)]
struct LocalChatRequest<'a> {
    model: &'a str,
    messages: [LocalChatMessage<'a>; 1],
    stream: bool,
}

#[derive(Serialize)]
struct LocalChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct LocalChatResponse {
    message: LocalChatResponseMessage,
}

#[derive(Deserialize)]
struct LocalChatResponseMessage {
    content: String,
}

/// Translation backend calling a locally running inference server.
#[derive(Debug, Clone)]
pub struct LocalServerBackend {
    client: reqwest::Client,
    settings: LocalServerSettings,
    prompts: PromptTemplates,
}

impl LocalServerBackend {
    /// Creates the adapter. The server is not contacted until the first call.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::Backend`] when the HTTP client or the prompt
    /// templates cannot be initialised.
    pub fn new(settings: LocalServerSettings) -> BackendResult<Self> {
        let client = build_client(settings.timeout)?;
        let prompts = PromptTemplates::new().map_err(BackendError::backend)?;
        Ok(Self {
            client,
            settings,
            prompts,
        })
    }

    /// Returns the adapter settings.
    #[must_use]
    pub const fn settings(&self) -> &LocalServerSettings {
        &self.settings
    }

    fn classify_transport(&self, err: &reqwest::Error) -> BackendError {
        classify_transport(err, self.settings.endpoint.as_str(), self.settings.timeout)
    }
}

#[async_trait]
impl TranslationBackend for LocalServerBackend {
    async fn translate(
        &self,
        model_id: &ModelId,
        source_text: &str,
        target_language: TargetLanguage,
    ) -> BackendResult<String> {
        let prompt = self
            .prompts
            .local_prompt(source_text, target_language)
            .map_err(BackendError::backend)?;
        let body = LocalChatRequest {
            model: model_id.as_str(),
            messages: [LocalChatMessage {
                role: "user",
                content: &prompt,
            }],
            stream: false,
        };

        let url = join_url(&self.settings.endpoint, "api/chat");
        debug!(model = %model_id, %url, "sending local translation request");

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|err| self.classify_transport(&err))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|err| self.classify_transport(&err))?;

        if !status.is_success() {
            return Err(classify_status(status, &text, model_id));
        }

        extract_translation(&text)
    }
}

/// Maps a non-success HTTP status from the local server to a backend error.
///
/// A 404 is only a missing model when the body says so; a 404 from a
/// misrouted endpoint is a plain backend error.
pub(crate) fn classify_status(status: StatusCode, body: &str, model_id: &ModelId) -> BackendError {
    let details = ErrorDetails::parse(body);
    if status == StatusCode::NOT_FOUND && reports_missing_model(&details.message, model_id) {
        return BackendError::ModelNotFound(model_id.clone());
    }
    if details.message.is_empty() {
        BackendError::Backend(format!("local server returned {status}"))
    } else {
        BackendError::Backend(format!("local server returned {status}: {}", details.message))
    }
}

fn reports_missing_model(message: &str, model_id: &ModelId) -> bool {
    let lowered = message.to_lowercase();
    lowered.contains("pull")
        || (lowered.contains("not found") && message.contains(model_id.as_str()))
}

/// Extracts the assistant message from a non-streaming chat body.
pub(crate) fn extract_translation(body: &str) -> BackendResult<String> {
    let parsed: LocalChatResponse = serde_json::from_str(body)
        .map_err(|err| BackendError::Backend(format!("unexpected local server response: {err}")))?;
    if parsed.message.content.trim().is_empty() {
        return Err(BackendError::Backend(
            "local server returned no translated text".to_owned(),
        ));
    }
    Ok(parsed.message.content)
}

/// Connection failures mean the server is absent; they are never a timeout
/// even when the connect phase timed out.
fn classify_transport(err: &reqwest::Error, endpoint: &str, timeout: Duration) -> BackendError {
    if err.is_connect() {
        BackendError::ServerUnreachable {
            endpoint: endpoint.to_owned(),
            reason: err.to_string(),
        }
    } else if err.is_timeout() {
        BackendError::Timeout(timeout)
    } else {
        BackendError::Backend(format!("request to local server failed: {err}"))
    }
}
