//! Submission pipeline: upload attachments, store the lead, send emails.
//!
//! DESIGN
//! ======
//! Each backend sits behind an async trait so the pipeline can be driven by
//! in-memory mocks in tests. Every network call is wrapped in linear-backoff
//! retry.
//!
//! ERROR HANDLING
//! ==============
//! Upload and insert failures abort the submission: a lead without its files
//! or without a stored row is not a submission. Email failures are logged and
//! reported in the receipt but never fail the submission, since the lead is
//! already saved by then.

use async_trait::async_trait;
use canvas::units::Unit;
use serde::Serialize;
use time::OffsetDateTime;
use tracing::{info, warn};
use uuid::Uuid;

use crate::backend::BackendError;
use crate::retry::{RetryPolicy, retry_linear_when};
use crate::space::SpaceRecord;
use crate::wizard::{WizardError, WizardState};

const CONFIRMATION_TEMPLATE: &str = include_str!("../templates/submission_confirmation.html");

// =============================================================================
// SEAMS
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub to: Vec<String>,
    pub subject: String,
    pub html: String,
}

/// Sends HTML email.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// # Errors
    ///
    /// Returns a [`BackendError`] if the provider rejects the message.
    async fn send(&self, email: &OutgoingEmail) -> Result<(), BackendError>;
}

/// Stores uploaded files.
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Store `bytes` under `path` and return a URL for the stored object.
    ///
    /// # Errors
    ///
    /// Returns a [`BackendError`] if the upload fails.
    async fn upload(&self, path: &str, content_type: &str, bytes: &[u8]) -> Result<String, BackendError>;
}

/// Persists submission rows.
#[async_trait]
pub trait SubmissionStore: Send + Sync {
    /// # Errors
    ///
    /// Returns a [`BackendError`] if the row can't be stored.
    async fn insert(&self, record: &SubmissionRecord) -> Result<(), BackendError>;
}

// =============================================================================
// TYPES
// =============================================================================

/// A submission row as stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRecord {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub unit: Unit,
    pub spaces: Vec<SpaceRecord>,
    pub meeting_date: String,
    pub meeting_slot: String,
    pub notes: String,
    /// Unix timestamp, seconds.
    pub submitted_at: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionReceipt {
    pub id: Uuid,
    pub uploaded_files: usize,
    /// The customer confirmation went out.
    pub email_sent: bool,
    /// The team inbox was notified. False when no inbox is configured.
    pub team_notified: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("form incomplete: {0}")]
    Incomplete(#[from] WizardError),
    #[error("upload of {file} failed: {source}")]
    Upload {
        file: String,
        #[source]
        source: BackendError,
    },
    #[error("saving submission failed: {0}")]
    Insert(#[source] BackendError),
}

// =============================================================================
// PIPELINE
// =============================================================================

pub struct Submitter<'a> {
    files: &'a dyn FileStore,
    store: &'a dyn SubmissionStore,
    mailer: &'a dyn Mailer,
    retry: RetryPolicy,
    notify_email: Option<String>,
}

impl<'a> Submitter<'a> {
    #[must_use]
    pub fn new(files: &'a dyn FileStore, store: &'a dyn SubmissionStore, mailer: &'a dyn Mailer) -> Self {
        Self { files, store, mailer, retry: RetryPolicy::default(), notify_email: None }
    }

    #[must_use]
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    #[must_use]
    pub fn with_notify_email(mut self, notify_email: Option<String>) -> Self {
        self.notify_email = notify_email;
        self
    }

    /// Validate the form, upload its files, store it and send emails.
    ///
    /// # Errors
    ///
    /// Returns [`SubmitError::Incomplete`] before any network call if the form
    /// doesn't validate, and [`SubmitError::Upload`] or [`SubmitError::Insert`]
    /// once retries are exhausted.
    pub async fn submit(&self, state: &WizardState) -> Result<SubmissionReceipt, SubmitError> {
        state.validate_all()?;
        let meeting = state.meeting.as_ref().ok_or(WizardError::NoMeeting)?;
        let id = Uuid::new_v4();

        let mut spaces = Vec::with_capacity(state.spaces.len());
        let mut uploaded_files = 0;
        for space in &state.spaces {
            let mut urls = Vec::with_capacity(space.attachments.len());
            for attachment in &space.attachments {
                let path = format!("{id}/{}/{}", space.id, attachment.storage_name());
                let url = retry_linear_when(self.retry, "upload", BackendError::retryable, |_| {
                    self.files
                        .upload(&path, &attachment.content_type, &attachment.bytes)
                })
                .await
                .map_err(|source| SubmitError::Upload { file: attachment.file_name.clone(), source })?;
                urls.push(url);
                uploaded_files += 1;
            }
            spaces.push(space.record(state.unit, urls));
        }

        let record = SubmissionRecord {
            id,
            name: state.contact.name.trim().to_owned(),
            email: state.contact.email.trim().to_owned(),
            phone: state.contact.phone.trim().to_owned(),
            address: state.contact.address.trim().to_owned(),
            unit: state.unit,
            spaces,
            meeting_date: meeting.date.to_string(),
            meeting_slot: meeting.slot.clone(),
            notes: state.notes.clone(),
            submitted_at: OffsetDateTime::now_utc().unix_timestamp(),
        };
        retry_linear_when(self.retry, "insert submission", BackendError::retryable, |_| {
            self.store.insert(&record)
        })
        .await
        .map_err(SubmitError::Insert)?;
        info!(submission = %id, spaces = record.spaces.len(), uploaded_files, "submission stored");

        let html = render_confirmation_email(&record);
        let email_sent = self
            .deliver(OutgoingEmail {
                to: vec![record.email.clone()],
                subject: "We received your design request".to_owned(),
                html: html.clone(),
            })
            .await;
        let team_notified = match &self.notify_email {
            Some(inbox) => {
                self.deliver(OutgoingEmail {
                    to: vec![inbox.clone()],
                    subject: format!("New design request from {}", record.name),
                    html,
                })
                .await
            }
            None => false,
        };

        Ok(SubmissionReceipt { id, uploaded_files, email_sent, team_notified })
    }

    /// Send with retry. Failure is logged, never propagated.
    async fn deliver(&self, email: OutgoingEmail) -> bool {
        match retry_linear_when(self.retry, "send email", BackendError::retryable, |_| self.mailer.send(&email)).await {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, to = ?email.to, "email not sent; submission kept");
                false
            }
        }
    }
}

// =============================================================================
// EMAIL
// =============================================================================

#[must_use]
pub fn render_confirmation_email(record: &SubmissionRecord) -> String {
    let spaces = record
        .spaces
        .iter()
        .map(|s| {
            format!(
                "                  <li>{} ({}), ceiling {} {}</li>",
                escape_html(&s.name),
                s.kind,
                escape_html(&s.ceiling_height),
                s.unit
            )
        })
        .collect::<Vec<_>>()
        .join("\n");
    CONFIRMATION_TEMPLATE
        .replace("{{NAME}}", &escape_html(&record.name))
        .replace("{{MEETING}}", &format!("{} at {}", record.meeting_date, escape_html(&record.meeting_slot)))
        .replace("{{SPACES}}", &spaces)
        .replace("{{REFERENCE}}", &record.id.to_string())
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
#[path = "submit_test.rs"]
mod tests;
