//! Supabase client: storage uploads and submissions-table inserts.
//!
//! Talks to the project's HTTP APIs with the anon key:
//! - `POST {url}/storage/v1/object/{bucket}/{path}` for files
//! - `POST {url}/rest/v1/{table}` for rows

use async_trait::async_trait;
use tracing::debug;

use super::BackendError;
use crate::config::IntakeConfig;
use crate::submit::{FileStore, SubmissionRecord, SubmissionStore};

pub struct SupabaseClient {
    http: reqwest::Client,
    base_url: String,
    anon_key: String,
    bucket: String,
    table: String,
}

impl SupabaseClient {
    /// # Errors
    ///
    /// Returns [`BackendError::HttpClientBuild`] if the HTTP client fails to build.
    pub fn new(config: &IntakeConfig) -> Result<Self, BackendError> {
        let http = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .build()
            .map_err(|e| BackendError::HttpClientBuild(e.to_string()))?;
        Ok(Self {
            http,
            base_url: config.supabase_url.trim_end_matches('/').to_owned(),
            anon_key: config.supabase_anon_key.clone(),
            bucket: config.storage_bucket.clone(),
            table: config.submissions_table.clone(),
        })
    }

    #[must_use]
    pub fn object_url(&self, path: &str) -> String {
        format!("{}/storage/v1/object/{}/{}", self.base_url, self.bucket, path.trim_start_matches('/'))
    }

    /// URL a stored object is served from when the bucket is public.
    #[must_use]
    pub fn public_url(&self, path: &str) -> String {
        format!("{}/storage/v1/object/public/{}/{}", self.base_url, self.bucket, path.trim_start_matches('/'))
    }

    #[must_use]
    pub fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, self.table)
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<String, BackendError> {
        let response = request
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
            .send()
            .await
            .map_err(|e| BackendError::Request(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| BackendError::Request(e.to_string()))?;
        check_status(status, body)
    }
}

/// Map a response to `Ok(body)` on 2xx and [`BackendError::Response`] otherwise.
pub(crate) fn check_status(status: u16, body: String) -> Result<String, BackendError> {
    if (200..300).contains(&status) {
        Ok(body)
    } else {
        Err(BackendError::Response { status, body })
    }
}

#[async_trait]
impl FileStore for SupabaseClient {
    async fn upload(&self, path: &str, content_type: &str, bytes: &[u8]) -> Result<String, BackendError> {
        let request = self
            .http
            .post(self.object_url(path))
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .header("x-upsert", "true")
            .body(bytes.to_vec());
        self.send(request).await?;
        debug!(path, bytes = bytes.len(), "object uploaded");
        Ok(self.public_url(path))
    }
}

#[async_trait]
impl SubmissionStore for SupabaseClient {
    async fn insert(&self, record: &SubmissionRecord) -> Result<(), BackendError> {
        let request = self
            .http
            .post(self.table_url())
            .header("Prefer", "return=minimal")
            .json(record);
        self.send(request).await?;
        debug!(submission = %record.id, table = %self.table, "row inserted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "supabase_test.rs"]
mod tests;
