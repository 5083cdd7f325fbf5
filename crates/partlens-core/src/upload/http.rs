//! Multipart upload to the detection service over HTTP.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use std::time::{Duration, Instant};

use super::backend::DetectionBackend;
use crate::config::UploadConfig;
use crate::error::UploadError;
use crate::preprocess::EncodedBlob;
use crate::types::DetectionResult;

/// Posts photos to `POST {base_url}/upload` as multipart form data.
pub struct HttpBackend {
    endpoint: String,
    field_name: String,
    file_name: String,
    timeout: Option<Duration>,
    client: reqwest::Client,
}

impl HttpBackend {
    pub fn new(config: &UploadConfig) -> Self {
        Self {
            endpoint: config.endpoint(),
            field_name: config.field_name.clone(),
            file_name: config.file_name.clone(),
            timeout: config.timeout_ms.map(Duration::from_millis),
            client: reqwest::Client::new(),
        }
    }

    /// The full URL photos are posted to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl DetectionBackend for HttpBackend {
    fn name(&self) -> &str {
        "http"
    }

    async fn detect(&self, blob: &EncodedBlob) -> Result<DetectionResult, UploadError> {
        let start = Instant::now();

        let part = Part::bytes(blob.bytes.clone())
            .file_name(self.file_name.clone())
            .mime_str(EncodedBlob::MEDIA_TYPE)
            .map_err(|e| UploadError::Transport(format!("Invalid multipart part: {e}")))?;
        let form = Form::new().part(self.field_name.clone(), part);

        let mut request = self.client.post(&self.endpoint).multipart(form);
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        let resp = request
            .send()
            .await
            .map_err(|e| UploadError::Transport(format!("POST {} failed: {e}", self.endpoint)))?;

        let status = resp.status().as_u16();
        let body = resp
            .text()
            .await
            .map_err(|e| UploadError::Transport(format!("Failed to read response body: {e}")))?;

        tracing::debug!(
            "Upload of {} bytes answered {} in {}ms",
            blob.bytes.len(),
            status,
            start.elapsed().as_millis()
        );

        parse_response(status, &body)
    }
}

/// Map an HTTP status and body onto a detection result or an upload error.
///
/// Non-2xx statuses become `Server`, keeping the backend's `{"error": ...}`
/// message when it sent one. A success body must be JSON and carry a
/// non-empty `result_image`.
pub fn parse_response(status: u16, body: &str) -> Result<DetectionResult, UploadError> {
    if !(200..300).contains(&status) {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string));
        return Err(UploadError::Server { status, message });
    }

    let value: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| UploadError::Protocol(format!("body is not JSON: {e}")))?;

    let has_image = value
        .get("result_image")
        .and_then(|v| v.as_str())
        .is_some_and(|s| !s.is_empty());
    if !has_image {
        return Err(UploadError::Protocol("missing result_image".to_string()));
    }

    serde_json::from_value(value)
        .map_err(|e| UploadError::Protocol(format!("unexpected field types: {e}")))
}
