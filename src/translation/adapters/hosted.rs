//! Hosted completion API adapter (OpenAI-compatible chat completions).

use super::http::{ErrorDetails, build_client, join_url, retry_after};
use crate::engine::domain::ModelId;
use crate::translation::{
    domain::{ApiKey, PromptTemplates, TargetLanguage},
    ports::{BackendError, BackendResult, TranslationBackend},
};
use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Default base URL of the hosted completion API.
pub const DEFAULT_HOSTED_BASE_URL: &str = "https://api.openai.com/v1";

/// Error code the hosted API uses when the account has no remaining quota.
const INSUFFICIENT_QUOTA: &str = "insufficient_quota";

/// Connection settings for [`HostedApiBackend`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostedApiSettings {
    base_url: Url,
    api_key: Option<ApiKey>,
    timeout: Duration,
}

impl HostedApiSettings {
    /// Creates settings for `base_url` with no credential and the given
    /// per-request timeout.
    #[must_use]
    pub const fn new(base_url: Url, timeout: Duration) -> Self {
        Self {
            base_url,
            api_key: None,
            timeout,
        }
    }

    /// Sets the credential.
    #[must_use]
    pub fn with_api_key(mut self, api_key: Option<ApiKey>) -> Self {
        self.api_key = api_key;
        self
    }

    /// Returns the base URL.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Returns the credential, if one is configured.
    #[must_use]
    pub const fn api_key(&self) -> Option<&ApiKey> {
        self.api_key.as_ref()
    }

    /// Returns whether a credential is configured.
    #[must_use]
    pub const fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Returns the per-request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

/// Translation backend calling a hosted chat-completions endpoint.
#[derive(Debug, Clone)]
pub struct HostedApiBackend {
    client: reqwest::Client,
    settings: HostedApiSettings,
    prompts: PromptTemplates,
}

impl HostedApiBackend {
    /// Creates the adapter.
    ///
    /// A missing credential is not an error here; it is reported as
    /// [`BackendError::Auth`] when a hosted engine is first invoked.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::Backend`] when the HTTP client or the prompt
    /// templates cannot be initialised.
    pub fn new(settings: HostedApiSettings) -> BackendResult<Self> {
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
    pub const fn settings(&self) -> &HostedApiSettings {
        &self.settings
    }
}

#[async_trait]
impl TranslationBackend for HostedApiBackend {
    async fn translate(
        &self,
        model_id: &ModelId,
        source_text: &str,
        target_language: TargetLanguage,
    ) -> BackendResult<String> {
        let api_key = self.settings.api_key.as_ref().ok_or_else(|| {
            BackendError::Auth("OPENAI_API_KEY is not set; hosted engines are unavailable".to_owned())
        })?;

        let instruction = self
            .prompts
            .instruction(target_language)
            .map_err(BackendError::backend)?;
        let body = ChatRequest {
            model: model_id.as_str(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &instruction,
                },
                ChatMessage {
                    role: "user",
                    content: source_text,
                },
            ],
        };

        let url = join_url(&self.settings.base_url, "chat/completions");
        debug!(model = %model_id, %url, "sending hosted translation request");

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key.expose())
            .json(&body)
            .send()
            .await
            .map_err(|err| classify_transport(&err, self.settings.timeout))?;

        let status = response.status();
        let requested_delay = retry_after(response.headers());
        let text = response
            .text()
            .await
            .map_err(|err| classify_transport(&err, self.settings.timeout))?;

        if !status.is_success() {
            return Err(classify_status(status, &text, requested_delay));
        }

        extract_translation(&text)
    }
}

/// Maps a non-success HTTP status from the hosted API to a backend error.
pub(crate) fn classify_status(
    status: StatusCode,
    body: &str,
    retry_after: Option<Duration>,
) -> BackendError {
    let details = ErrorDetails::parse(body);
    let message = if details.message.is_empty() {
        status.to_string()
    } else {
        format!("{status}: {}", details.message)
    };

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => BackendError::Auth(message),
        StatusCode::TOO_MANY_REQUESTS if details.code.as_deref() == Some(INSUFFICIENT_QUOTA) => {
            BackendError::Backend(message)
        }
        StatusCode::TOO_MANY_REQUESTS => BackendError::RateLimited {
            message,
            retry_after,
        },
        _ => BackendError::Backend(message),
    }
}

/// Extracts the first choice's content from a chat-completions body.
pub(crate) fn extract_translation(body: &str) -> BackendResult<String> {
    let parsed: ChatResponse = serde_json::from_str(body)
        .map_err(|err| BackendError::Backend(format!("unexpected hosted API response: {err}")))?;
    parsed
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .filter(|content| !content.trim().is_empty())
        .ok_or_else(|| BackendError::Backend("hosted API returned no translated text".to_owned()))
}

fn classify_transport(err: &reqwest::Error, timeout: Duration) -> BackendError {
    if err.is_timeout() {
        BackendError::Timeout(timeout)
    } else {
        BackendError::Backend(format!("request to hosted API failed: {err}"))
    }
}
