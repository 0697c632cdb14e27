//! Contact email verification by one-time code.
//!
//! Issues short-lived six-character codes linked to an email and checks
//! them. Only the SHA-256 hash of a code is kept. A code expires after ten
//! minutes or after five wrong guesses, whichever comes first.

use std::collections::HashMap;

use rand::Rng;
use sha2::{Digest, Sha256};
use time::{Duration, OffsetDateTime};
use tracing::{info, warn};

use crate::submit::{Mailer, OutgoingEmail};

const CODE_LEN: usize = 6;
const CODE_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";
const MAX_FAILED_ATTEMPTS: u32 = 5;
const CODE_TTL_MINUTES: i64 = 10;
const VERIFICATION_TEMPLATE: &str = include_str!("../templates/verification_code.html");

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum VerifyError {
    #[error("invalid email")]
    InvalidEmail,
    #[error("invalid code")]
    InvalidCode,
    #[error("expired or incorrect code")]
    VerificationFailed,
    #[error("email delivery failed: {0}")]
    EmailDelivery(String),
}

#[must_use]
pub fn normalize_email(email: &str) -> Option<String> {
    let normalized = email.trim().to_ascii_lowercase();
    let (local, domain) = normalized.split_once('@')?;
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return None;
    }
    Some(normalized)
}

#[must_use]
pub fn normalize_code(code: &str) -> Option<String> {
    let normalized = code.trim().to_ascii_uppercase();
    if normalized.len() != CODE_LEN || !normalized.bytes().all(|b| CODE_ALPHABET.contains(&b)) {
        return None;
    }
    Some(normalized)
}

#[must_use]
pub fn generate_code() -> String {
    let mut rng = rand::rng();
    (0..CODE_LEN)
        .map(|_| char::from(CODE_ALPHABET[rng.random_range(0..CODE_ALPHABET.len())]))
        .collect()
}

#[must_use]
pub fn hash_code(code: &str) -> String {
    let digest = Sha256::digest(code.as_bytes());
    digest.iter().map(|b| format!("{b:02x}")).collect()
}

#[must_use]
pub fn render_verification_email(email: &str, code: &str) -> String {
    VERIFICATION_TEMPLATE
        .replace("{{EMAIL}}", email)
        .replace("{{CODE}}", code)
}

#[derive(Debug, Clone)]
struct PendingCode {
    code_hash: String,
    expires_at: OffsetDateTime,
    failed_attempts: u32,
}

/// Outstanding codes, at most one per email.
#[derive(Debug, Default)]
pub struct CodeStore {
    pending: HashMap<String, PendingCode>,
}

impl CodeStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a fresh code for `email`, replacing any outstanding one.
    ///
    /// # Errors
    ///
    /// Returns [`VerifyError::InvalidEmail`] if the address is malformed.
    pub fn issue(&mut self, email: &str) -> Result<String, VerifyError> {
        self.issue_at(email, OffsetDateTime::now_utc())
    }

    /// [`Self::issue`] with an explicit clock.
    ///
    /// # Errors
    ///
    /// Returns [`VerifyError::InvalidEmail`] if the address is malformed.
    pub fn issue_at(&mut self, email: &str, now: OffsetDateTime) -> Result<String, VerifyError> {
        let normalized = normalize_email(email).ok_or(VerifyError::InvalidEmail)?;
        let code = generate_code();
        self.pending.insert(
            normalized,
            PendingCode {
                code_hash: hash_code(&code),
                expires_at: now + Duration::minutes(CODE_TTL_MINUTES),
                failed_attempts: 0,
            },
        );
        Ok(code)
    }

    /// Check `code` against the outstanding code for `email`. A match
    /// consumes the code.
    ///
    /// # Errors
    ///
    /// Returns [`VerifyError::InvalidEmail`] or [`VerifyError::InvalidCode`]
    /// for malformed input, and [`VerifyError::VerificationFailed`] when no
    /// live code matches.
    pub fn verify(&mut self, email: &str, code: &str) -> Result<(), VerifyError> {
        self.verify_at(email, code, OffsetDateTime::now_utc())
    }

    /// [`Self::verify`] with an explicit clock.
    ///
    /// # Errors
    ///
    /// See [`Self::verify`].
    pub fn verify_at(&mut self, email: &str, code: &str, now: OffsetDateTime) -> Result<(), VerifyError> {
        let normalized_email = normalize_email(email).ok_or(VerifyError::InvalidEmail)?;
        let normalized_code = normalize_code(code).ok_or(VerifyError::InvalidCode)?;

        let Some(pending) = self.pending.get_mut(&normalized_email) else {
            return Err(VerifyError::VerificationFailed);
        };
        if pending.expires_at <= now {
            self.pending.remove(&normalized_email);
            return Err(VerifyError::VerificationFailed);
        }
        if pending.code_hash == hash_code(&normalized_code) {
            self.pending.remove(&normalized_email);
            info!(email = %normalized_email, "email verified");
            return Ok(());
        }

        pending.failed_attempts += 1;
        if pending.failed_attempts >= MAX_FAILED_ATTEMPTS {
            warn!(email = %normalized_email, "too many failed attempts; code revoked");
            self.pending.remove(&normalized_email);
        }
        Err(VerifyError::VerificationFailed)
    }

    #[must_use]
    pub fn has_pending(&self, email: &str) -> bool {
        normalize_email(email).is_some_and(|e| self.pending.contains_key(&e))
    }

    /// Issue a code and email it.
    ///
    /// # Errors
    ///
    /// Returns [`VerifyError::InvalidEmail`] for a malformed address and
    /// [`VerifyError::EmailDelivery`] if sending fails. A code that could
    /// not be delivered is withdrawn.
    pub async fn request_code(&mut self, mailer: &dyn Mailer, email: &str) -> Result<(), VerifyError> {
        let code = self.issue(email)?;
        let normalized = normalize_email(email).ok_or(VerifyError::InvalidEmail)?;
        let message = OutgoingEmail {
            to: vec![normalized.clone()],
            subject: "Your verification code".to_owned(),
            html: render_verification_email(&normalized, &code),
        };
        if let Err(e) = mailer.send(&message).await {
            self.pending.remove(&normalized);
            return Err(VerifyError::EmailDelivery(e.to_string()));
        }
        info!(email = %normalized, "verification code sent");
        Ok(())
    }
}

#[cfg(test)]
#[path = "verify_test.rs"]
mod tests;
