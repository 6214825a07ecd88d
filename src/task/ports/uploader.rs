//! Upload port for turning local image references into durable URLs.

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Image hosting contract.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageUploader: Send + Sync {
    /// Uploads the file behind `local_ref` and returns its durable URL.
    ///
    /// # Errors
    ///
    /// Returns [`AttachmentUploadError`] when the file cannot be read, the
    /// request fails, or the response carries no durable URL.
    async fn upload(&self, local_ref: &str) -> Result<String, AttachmentUploadError>;
}

/// Errors returned by image uploaders.
#[derive(Debug, Clone, Error)]
pub enum AttachmentUploadError {
    /// The local file could not be read.
    #[error("cannot read local image '{reference}': {source}")]
    Read {
        /// Local reference that failed to load.
        reference: String,
        /// Underlying I/O error.
        source: Arc<std::io::Error>,
    },

    /// The request could not be sent or its body could not be read.
    #[error("upload request failed: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),

    /// The image host answered with a non-success status.
    #[error("image host rejected upload with HTTP {status}: {body}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Response body, for diagnostics.
        body: String,
    },

    /// The response did not contain a non-empty `secure_url`.
    #[error("image host response has no secure_url")]
    MissingSecureUrl,
}

impl AttachmentUploadError {
    /// Wraps a transport error.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }
}
