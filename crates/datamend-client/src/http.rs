//! HTTP implementation of the modification service.
//!
//! Builds requests over `reqwest`, normalizes every failure surface into a
//! [`DatamendError`], and decodes the backend's JSON shapes into the core
//! domain types.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, Response, multipart};
use serde::de::DeserializeOwned;

use datamend_core::error::{DatamendError, GENERIC_API_ERROR, Result};
use datamend_core::file::{FileKind, FilePreview, LocalFile, UploadedFile, classify_kind};
use datamend_core::modification::{AppliedModification, ColumnModification, ModificationProposal};
use datamend_core::workflow::ModificationService;

use crate::config::ClientConfig;
use crate::endpoints::{self, FileAction};

/// Large uploads (up to 1 GB) need generous room.
const UPLOAD_TIMEOUT: Duration = Duration::from_secs(300);
/// Modify runs backend inference; apply rewrites the whole dataset.
const PROCESS_TIMEOUT: Duration = Duration::from_secs(120);
/// Everything else is a plain database read.
const READ_TIMEOUT: Duration = Duration::from_secs(30);

/// Headers for JSON-bodied requests.
///
/// Multipart requests must pass `false` so the transport can set its own
/// `Content-Type` with the form boundary.
pub fn json_headers(include_content_type: bool) -> HeaderMap {
    let mut headers = HeaderMap::new();
    if include_content_type {
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    }
    headers
}

/// Normalizes a failure response body into a single message.
///
/// Reads the `error` field of a JSON body when present and non-empty;
/// anything else (missing field, empty value, non-JSON body) collapses to
/// the generic fallback. Never fails.
pub fn extract_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("error")
                .and_then(|error| error.as_str())
                .map(str::to_owned)
        })
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| GENERIC_API_ERROR.to_string())
}

/// The reqwest-backed [`ModificationService`].
#[derive(Clone)]
pub struct HttpModificationService {
    client: Client,
    config: ClientConfig,
}

impl HttpModificationService {
    /// Creates a service with the provided configuration.
    pub fn new(config: ClientConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// Creates a service configured from the environment.
    pub fn from_env() -> Self {
        Self::new(ClientConfig::from_env())
    }

    fn base(&self) -> &str {
        &self.config.api_url
    }

    /// Turns a non-success response into the normalized Api error.
    async fn api_error(response: Response) -> DatamendError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        DatamendError::api(Some(status), extract_error_message(&body))
    }

    async fn decode<T: DeserializeOwned>(response: Response, what: &str) -> Result<T> {
        response
            .json::<T>()
            .await
            .map_err(|e| DatamendError::transport(format!("failed to decode {what}: {e}")))
    }
}

#[async_trait]
impl ModificationService for HttpModificationService {
    async fn upload_file(&self, file: &LocalFile) -> Result<UploadedFile> {
        let kind = classify_kind(&file.name);
        tracing::debug!(name = %file.name, size = file.size(), kind = %kind, "uploading file");

        let part = multipart::Part::bytes(file.bytes.clone()).file_name(file.name.clone());
        let form = multipart::Form::new()
            .part("file", part)
            .text("file_type", kind.as_str());

        // No JSON content type here: the transport sets the multipart
        // boundary itself.
        let response = self
            .client
            .post(endpoints::upload_url(self.base()))
            .headers(json_headers(false))
            .multipart(form)
            .timeout(UPLOAD_TIMEOUT)
            .send()
            .await
            .map_err(|e| DatamendError::transport(format!("upload request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(Self::api_error(response).await);
        }
        Self::decode(response, "upload response").await
    }

    async fn fetch_preview(&self, file_id: i64, rows: Option<u32>) -> Result<FilePreview> {
        let url = endpoints::file_action_url(self.base(), file_id, FileAction::Preview);
        let mut request = self.client.get(url).timeout(READ_TIMEOUT);
        if let Some(rows) = rows {
            // The backend clamps the window to 1..=100; pass it through
            request = request.query(&[("rows", rows)]);
        }

        let response = request
            .send()
            .await
            .map_err(|e| DatamendError::transport(format!("preview request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(Self::api_error(response).await);
        }
        Self::decode(response, "preview response").await
    }

    async fn request_modification(
        &self,
        file_id: i64,
        instruction: &str,
    ) -> Result<ModificationProposal> {
        tracing::debug!(file_id, instruction, "requesting modification");
        let url = endpoints::file_action_url(self.base(), file_id, FileAction::Modify);

        let response = self
            .client
            .post(url)
            .headers(json_headers(true))
            .json(&serde_json::json!({ "instruction": instruction }))
            .timeout(PROCESS_TIMEOUT)
            .send()
            .await
            .map_err(|e| DatamendError::transport(format!("modify request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(Self::api_error(response).await);
        }
        Self::decode(response, "modify response").await
    }

    async fn apply_modification(
        &self,
        file_id: i64,
        modification: &ColumnModification,
    ) -> Result<AppliedModification> {
        tracing::debug!(file_id, column = %modification.column_name, "applying modification");
        let url = endpoints::file_action_url(self.base(), file_id, FileAction::Apply);

        let response = self
            .client
            .post(url)
            .headers(json_headers(true))
            .json(&serde_json::json!({ "modification": modification }))
            .timeout(PROCESS_TIMEOUT)
            .send()
            .await
            .map_err(|e| DatamendError::transport(format!("apply request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(Self::api_error(response).await);
        }
        Self::decode(response, "apply response").await
    }

    async fn list_files(&self, kind: Option<FileKind>) -> Result<Vec<UploadedFile>> {
        let mut request = self
            .client
            .get(endpoints::files_url(self.base()))
            .timeout(READ_TIMEOUT);
        if let Some(kind) = kind {
            request = request.query(&[("file_type", kind.as_str())]);
        }

        let response = request
            .send()
            .await
            .map_err(|e| DatamendError::transport(format!("list request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(Self::api_error(response).await);
        }
        Self::decode(response, "file list response").await
    }

    async fn delete_file(&self, file_id: i64) -> Result<()> {
        let response = self
            .client
            .delete(endpoints::file_url(self.base(), file_id))
            .timeout(READ_TIMEOUT)
            .send()
            .await
            .map_err(|e| DatamendError::transport(format!("delete request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(Self::api_error(response).await);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_error_reads_error_field() {
        assert_eq!(extract_error_message(r#"{"error":"bad pattern"}"#), "bad pattern");
    }

    #[test]
    fn extract_error_falls_back_without_error_field() {
        assert_eq!(extract_error_message(r#"{"message":"x"}"#), GENERIC_API_ERROR);
    }

    #[test]
    fn extract_error_falls_back_on_non_json_body() {
        assert_eq!(extract_error_message("<html>502</html>"), GENERIC_API_ERROR);
        assert_eq!(extract_error_message(""), GENERIC_API_ERROR);
    }

    #[test]
    fn extract_error_ignores_empty_or_non_string_error() {
        assert_eq!(extract_error_message(r#"{"error":""}"#), GENERIC_API_ERROR);
        assert_eq!(extract_error_message(r#"{"error":42}"#), GENERIC_API_ERROR);
    }

    #[test]
    fn json_headers_toggle_content_type() {
        let with = json_headers(true);
        assert_eq!(
            with.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()),
            Some("application/json")
        );

        let without = json_headers(false);
        assert!(without.is_empty());
    }
}
