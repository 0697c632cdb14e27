//! Backend adapters for the submission seams.
//!
//! [`supabase::SupabaseClient`] implements file storage and the submissions
//! table over the Supabase HTTP APIs. [`resend::ResendMailer`] sends email
//! through Resend. Both are built from an [`IntakeConfig`].

pub mod resend;
pub mod supabase;

use crate::config::IntakeConfig;

/// Errors produced by backend calls.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// The HTTP request could not be sent or its body could not be read.
    #[error("request failed: {0}")]
    Request(String),

    /// The backend answered with a non-success status.
    #[error("backend responded with status {status}: {body}")]
    Response { status: u16, body: String },

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),

    /// Email delivery was rejected.
    #[error("email delivery failed: {0}")]
    Email(String),
}

impl BackendError {
    /// Whether a later attempt could plausibly succeed.
    #[must_use]
    pub fn retryable(&self) -> bool {
        matches!(self, Self::Request(_) | Self::Email(_) | Self::Response { status: 408 | 429 | 500..=599, .. })
    }
}

/// Production backends wired from config.
pub struct Backends {
    pub supabase: supabase::SupabaseClient,
    pub mailer: resend::ResendMailer,
}

impl Backends {
    /// Build every backend client.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::HttpClientBuild`] if the HTTP client fails to build.
    pub fn from_config(config: &IntakeConfig) -> Result<Self, BackendError> {
        Ok(Self {
            supabase: supabase::SupabaseClient::new(config)?,
            mailer: resend::ResendMailer::new(&config.resend_api_key, &config.mail_from),
        })
    }
}
