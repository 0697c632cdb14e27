//! Resend-backed [`Mailer`].

use async_trait::async_trait;
use resend_rs::Resend;
use resend_rs::types::CreateEmailBaseOptions;
use tracing::debug;

use super::BackendError;
use crate::submit::{Mailer, OutgoingEmail};

pub struct ResendMailer {
    client: Resend,
    from: String,
}

impl ResendMailer {
    #[must_use]
    pub fn new(api_key: &str, from: &str) -> Self {
        Self { client: Resend::new(api_key), from: from.to_owned() }
    }

    #[must_use]
    pub fn from_address(&self) -> &str {
        &self.from
    }
}

#[async_trait]
impl Mailer for ResendMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), BackendError> {
        let message = CreateEmailBaseOptions::new(&self.from, email.to.clone(), &email.subject).with_html(&email.html);
        self.client
            .emails
            .send(message)
            .await
            .map_err(|e| BackendError::Email(e.to_string()))?;
        debug!(recipients = email.to.len(), subject = %email.subject, "email accepted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "resend_test.rs"]
mod tests;
