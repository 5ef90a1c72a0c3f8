//! HTTP plumbing shared by the hosted and local adapters.

use crate::translation::ports::{BackendError, BackendResult};
use reqwest::header::{HeaderMap, RETRY_AFTER};
use serde::Deserialize;
use std::time::Duration;

/// Upper bound on the TCP connect phase, below the overall call timeout.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Longest error body excerpt carried into a failure message.
const MAX_BODY_EXCERPT: usize = 200;

/// Builds a client whose every request is bounded by `timeout`.
pub(crate) fn build_client(timeout: Duration) -> BackendResult<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .connect_timeout(timeout.min(CONNECT_TIMEOUT))
        .build()
        .map_err(|err| BackendError::Backend(format!("failed to build HTTP client: {err}")))
}

/// Reads a `Retry-After` header expressed in whole seconds.
pub(crate) fn retry_after(headers: &HeaderMap) -> Option<Duration> {
    headers
        .get(RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse::<u64>()
        .ok()
        .map(Duration::from_secs)
}

/// Joins a path onto a base URL without doubling or dropping slashes.
pub(crate) fn join_url(base: &reqwest::Url, path: &str) -> String {
    format!(
        "{}/{}",
        base.as_str().trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Error details extracted from a non-success response body.
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct ErrorDetails {
    pub(crate) message: String,
    pub(crate) code: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ErrorBody {
    Text(String),
    Detail {
        message: Option<String>,
        code: Option<String>,
        #[serde(rename = "type")]
        kind: Option<String>,
    },
}

impl ErrorDetails {
    /// Parses `{"error": "..."}` or `{"error": {"message": ..., "code": ...}}`
    /// bodies, falling back to a trimmed excerpt of the raw body.
    pub(crate) fn parse(body: &str) -> Self {
        match serde_json::from_str::<ErrorEnvelope>(body) {
            Ok(ErrorEnvelope {
                error: ErrorBody::Text(message),
            }) => Self {
                message,
                code: None,
            },
            Ok(ErrorEnvelope {
                error:
                    ErrorBody::Detail {
                        message,
                        code,
                        kind,
                    },
            }) => Self {
                message: message.unwrap_or_default(),
                code: code.or(kind),
            },
            Err(_) => Self {
                message: excerpt(body),
                code: None,
            },
        }
    }
}

fn excerpt(body: &str) -> String {
    let trimmed = body.trim();
    match trimmed.char_indices().nth(MAX_BODY_EXCERPT) {
        Some((cut, _)) => trimmed.get(..cut).map_or_else(String::new, |head| format!("{head}...")),
        None => trimmed.to_owned(),
    }
}
