//! Multipart uploader for the remote image host.

use crate::config::UploadConfig;
use crate::task::ports::{AttachmentUploadError, ImageUploader};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Prefix stripped from local references before reading the file.
const FILE_SCHEME_PREFIX: &str = "file://";

/// Uploads local image files to the configured image host.
#[derive(Debug, Clone)]
pub struct HttpImageUploader {
    client: reqwest::Client,
    endpoint: String,
    upload_preset: String,
    cloud_name: String,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: Option<String>,
}

impl HttpImageUploader {
    /// Creates an uploader from upload settings.
    ///
    /// The client enforces `timeout_secs` on each request.
    ///
    /// # Errors
    ///
    /// Returns [`AttachmentUploadError::Transport`] when the HTTP client
    /// cannot be built.
    pub fn new(config: &UploadConfig) -> Result<Self, AttachmentUploadError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(AttachmentUploadError::transport)?;
        Ok(Self {
            client,
            endpoint: config.resolved_endpoint(),
            upload_preset: config.upload_preset.clone(),
            cloud_name: config.cloud_name.clone(),
        })
    }

    /// Returns the upload endpoint.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn build_form(&self, local_ref: &str) -> Result<Form, AttachmentUploadError> {
        let path = local_ref
            .strip_prefix(FILE_SCHEME_PREFIX)
            .unwrap_or(local_ref);
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| AttachmentUploadError::Read {
                reference: local_ref.to_owned(),
                source: Arc::new(source),
            })?;
        let file_name = file_name_of(path);
        let part = Part::bytes(bytes)
            .mime_str(&content_type_for(&file_name))
            .map_err(AttachmentUploadError::transport)?
            .file_name(file_name);

        Ok(Form::new()
            .part("file", part)
            .text("upload_preset", self.upload_preset.clone())
            .text("cloud_name", self.cloud_name.clone()))
    }
}

#[async_trait]
impl ImageUploader for HttpImageUploader {
    async fn upload(&self, local_ref: &str) -> Result<String, AttachmentUploadError> {
        let form = self.build_form(local_ref).await?;
        debug!(endpoint = %self.endpoint, reference = local_ref, "uploading image");

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(AttachmentUploadError::transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AttachmentUploadError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let payload: UploadResponse = response
            .json()
            .await
            .map_err(AttachmentUploadError::transport)?;
        let url = payload
            .secure_url
            .filter(|url| !url.is_empty())
            .ok_or(AttachmentUploadError::MissingSecureUrl)?;
        info!(reference = local_ref, url = %url, "image uploaded");
        Ok(url)
    }
}

/// Returns the last path segment of `path`.
fn file_name_of(path: &str) -> String {
    path.rsplit(['/', '\\']).next().unwrap_or(path).to_owned()
}

/// Derives `image/<extension>` from a file name.
///
/// Names without a word-character extension fall back to
/// `application/octet-stream`.
fn content_type_for(file_name: &str) -> String {
    match file_name.rsplit_once('.') {
        Some((_, extension))
            if !extension.is_empty()
                && extension
                    .chars()
                    .all(|ch| ch.is_ascii_alphanumeric() || ch == '_') =>
        {
            format!("image/{extension}")
        }
        _ => "application/octet-stream".to_owned(),
    }
}
