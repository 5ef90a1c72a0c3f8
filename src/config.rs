//! Environment-driven application configuration.
//!
//! [`AppConfig::from_env`] is the only place the process environment is read.
//! Parsing goes through [`AppConfig::from_lookup`], which takes any lookup
//! function so the rules can be exercised without touching global state.

use crate::translation::{
    adapters::{DEFAULT_HOSTED_BASE_URL, DEFAULT_LOCAL_ENDPOINT, HostedApiSettings, LocalServerSettings},
    domain::ApiKey,
    services::{DispatchPolicy, RetryPolicy},
};
use camino::{Utf8Path, Utf8PathBuf};
use reqwest::Url;
use std::ops::RangeInclusive;
use std::time::Duration;
use thiserror::Error;

/// Catalogue path variable.
pub const MODELS_VAR: &str = "HONYAKU_MODELS";
/// Hosted API credential variable.
pub const API_KEY_VAR: &str = "OPENAI_API_KEY";
/// Hosted API base URL variable.
pub const BASE_URL_VAR: &str = "OPENAI_BASE_URL";
/// Local server address variable.
pub const LOCAL_HOST_VAR: &str = "OLLAMA_HOST";
/// Per-call timeout variable, in seconds.
pub const TIMEOUT_VAR: &str = "HONYAKU_TIMEOUT_SECS";
/// Rate-limit attempt bound variable.
pub const RATE_LIMIT_ATTEMPTS_VAR: &str = "HONYAKU_RATE_LIMIT_ATTEMPTS";

/// Catalogue used when [`MODELS_VAR`] is unset.
pub const DEFAULT_CATALOG_PATH: &str = "configs/avail_models.yaml";

/// Errors raised while reading configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A URL variable does not parse.
    #[error("{var} is not a valid URL ('{value}'): {reason}")]
    InvalidUrl {
        /// Variable name.
        var: &'static str,
        /// Raw value.
        value: String,
        /// Parser message.
        reason: String,
    },

    /// A numeric variable is not a whole number.
    #[error("{var} must be a whole number, got '{value}'")]
    InvalidNumber {
        /// Variable name.
        var: &'static str,
        /// Raw value.
        value: String,
    },

    /// A numeric variable is below its minimum.
    #[error("{var} must be at least {min}, got {value}")]
    BelowMinimum {
        /// Variable name.
        var: &'static str,
        /// Parsed value.
        value: u64,
        /// Smallest accepted value.
        min: u64,
    },

    /// A numeric variable is above its maximum.
    #[error("{var} must be at most {max}, got {value}")]
    AboveMaximum {
        /// Variable name.
        var: &'static str,
        /// Parsed value.
        value: u64,
        /// Largest accepted value.
        max: u64,
    },
}

/// Fully resolved settings for one run of the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    catalog_path: Utf8PathBuf,
    hosted: HostedApiSettings,
    local: LocalServerSettings,
    dispatch: DispatchPolicy,
}

impl AppConfig {
    /// Reads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads configuration through `lookup`. Blank values count as unset.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is set to an invalid value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };

        let catalog_path =
            Utf8PathBuf::from(read(MODELS_VAR).unwrap_or_else(|| DEFAULT_CATALOG_PATH.to_owned()));

        let timeout_secs = parse_bounded(
            TIMEOUT_VAR,
            read(TIMEOUT_VAR),
            DispatchPolicy::DEFAULT_TIMEOUT.as_secs(),
            1..=u64::MAX,
        )?;
        let timeout = Duration::from_secs(timeout_secs);

        let attempts = parse_bounded(
            RATE_LIMIT_ATTEMPTS_VAR,
            read(RATE_LIMIT_ATTEMPTS_VAR),
            u64::from(RetryPolicy::DEFAULT_MAX_ATTEMPTS),
            1..=u64::from(RetryPolicy::MAX_ATTEMPTS),
        )?;
        let max_attempts = u32::try_from(attempts).unwrap_or(RetryPolicy::MAX_ATTEMPTS);

        let base_url = parse_url(
            BASE_URL_VAR,
            read(BASE_URL_VAR).as_deref().unwrap_or(DEFAULT_HOSTED_BASE_URL),
        )?;
        let api_key = read(API_KEY_VAR).and_then(|value| ApiKey::new(value).ok());

        let endpoint = parse_url(
            LOCAL_HOST_VAR,
            &with_scheme(read(LOCAL_HOST_VAR).as_deref().unwrap_or(DEFAULT_LOCAL_ENDPOINT)),
        )?;

        Ok(Self {
            catalog_path,
            hosted: HostedApiSettings::new(base_url, timeout).with_api_key(api_key),
            local: LocalServerSettings::new(endpoint, timeout),
            dispatch: DispatchPolicy::new(timeout).with_retry(RetryPolicy::new(max_attempts)),
        })
    }

    /// Overrides the catalogue path.
    #[must_use]
    pub fn with_catalog_path(mut self, path: impl Into<Utf8PathBuf>) -> Self {
        self.catalog_path = path.into();
        self
    }

    /// Overrides the per-call timeout everywhere it applies.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        let retry = self.dispatch.retry();
        self.hosted = HostedApiSettings::new(self.hosted.base_url().clone(), timeout)
            .with_api_key(self.hosted.api_key().cloned());
        self.local = LocalServerSettings::new(self.local.endpoint().clone(), timeout);
        self.dispatch = DispatchPolicy::new(timeout).with_retry(retry);
        self
    }

    /// Returns the catalogue path.
    #[must_use]
    pub fn catalog_path(&self) -> &Utf8Path {
        &self.catalog_path
    }

    /// Returns the hosted adapter settings.
    #[must_use]
    pub const fn hosted(&self) -> &HostedApiSettings {
        &self.hosted
    }

    /// Returns the local adapter settings.
    #[must_use]
    pub const fn local(&self) -> &LocalServerSettings {
        &self.local
    }

    /// Returns the dispatch policy.
    #[must_use]
    pub const fn dispatch(&self) -> DispatchPolicy {
        self.dispatch
    }
}

fn parse_bounded(
    var: &'static str,
    raw: Option<String>,
    default: u64,
    bounds: RangeInclusive<u64>,
) -> Result<u64, ConfigError> {
    let Some(text) = raw else {
        return Ok(default);
    };
    let Ok(value) = text.parse::<u64>() else {
        return Err(ConfigError::InvalidNumber { var, value: text });
    };
    let (min, max) = bounds.into_inner();
    if value < min {
        return Err(ConfigError::BelowMinimum { var, value, min });
    }
    if value > max {
        return Err(ConfigError::AboveMaximum { var, value, max });
    }
    Ok(value)
}

fn parse_url(var: &'static str, raw: &str) -> Result<Url, ConfigError> {
    Url::parse(raw).map_err(|err| ConfigError::InvalidUrl {
        var,
        value: raw.to_owned(),
        reason: err.to_string(),
    })
}

fn with_scheme(raw: &str) -> String {
    if raw.contains("://") {
        raw.to_owned()
    } else {
        format!("http://{raw}")
    }
}
