//! Intake configuration parsed from environment variables.
//!
//! `from_env` loads a `.env` file first when one exists. Tests build configs
//! through [`IntakeConfig::from_lookup`] so they never touch process state.

use std::str::FromStr;
use std::time::Duration;

use tracing::warn;

use crate::retry::{DEFAULT_RETRY_ATTEMPTS, DEFAULT_RETRY_BASE_MS, RetryPolicy};

pub const DEFAULT_STORAGE_BUCKET: &str = "uploads";
pub const DEFAULT_SUBMISSIONS_TABLE: &str = "submissions";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required env var {0}")]
    Missing(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntakeConfig {
    /// Project URL without a trailing slash.
    pub supabase_url: String,
    pub supabase_anon_key: String,
    pub storage_bucket: String,
    pub submissions_table: String,
    pub resend_api_key: String,
    /// Sender address for every outgoing email.
    pub mail_from: String,
    /// Team inbox notified of new submissions. Optional.
    pub notify_email: Option<String>,
    pub retry: RetryPolicy,
    pub http_timeout: Duration,
}

impl IntakeConfig {
    /// Build config from the process environment.
    ///
    /// Required:
    /// - `SUPABASE_URL`, `SUPABASE_ANON_KEY`
    /// - `RESEND_API_KEY`, `MAIL_FROM`
    ///
    /// Optional:
    /// - `STORAGE_BUCKET`: default `uploads`
    /// - `SUBMISSIONS_TABLE`: default `submissions`
    /// - `NOTIFY_EMAIL`: team notification address
    /// - `UPLOAD_ATTEMPTS`: default 3, counting the first try
    /// - `RETRY_BASE_MS`: default 1000
    /// - `HTTP_TIMEOUT_SECS`: default 30
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] when a required variable is unset or blank.
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                warn!(error = %e, ".env present but unreadable; using process env only");
            }
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] when a required key is absent or blank.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_owned()).filter(|v| !v.is_empty());
        let require = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));

        let supabase_url = require("SUPABASE_URL")?.trim_end_matches('/').to_owned();
        let supabase_anon_key = require("SUPABASE_ANON_KEY")?;
        let resend_api_key = require("RESEND_API_KEY")?;
        let mail_from = require("MAIL_FROM")?;

        let retry = RetryPolicy {
            attempts: parse_or(get("UPLOAD_ATTEMPTS"), DEFAULT_RETRY_ATTEMPTS),
            base: Duration::from_millis(parse_or(get("RETRY_BASE_MS"), DEFAULT_RETRY_BASE_MS)),
        };

        Ok(Self {
            supabase_url,
            supabase_anon_key,
            storage_bucket: get("STORAGE_BUCKET").unwrap_or_else(|| DEFAULT_STORAGE_BUCKET.to_owned()),
            submissions_table: get("SUBMISSIONS_TABLE").unwrap_or_else(|| DEFAULT_SUBMISSIONS_TABLE.to_owned()),
            resend_api_key,
            mail_from,
            notify_email: get("NOTIFY_EMAIL"),
            retry,
            http_timeout: Duration::from_secs(parse_or(get("HTTP_TIMEOUT_SECS"), DEFAULT_HTTP_TIMEOUT_SECS)),
        })
    }
}

/// Parse `raw`, falling back to `default` when it is absent or malformed.
fn parse_or<T: FromStr>(raw: Option<String>, default: T) -> T {
    raw.and_then(|v| v.parse::<T>().ok()).unwrap_or(default)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
