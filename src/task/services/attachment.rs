//! Reconciles picked image references with durable remote URLs.

use crate::task::{
    domain::{Attachment, is_remote_reference},
    ports::ImageUploader,
};
use std::sync::Arc;
use tracing::{debug, warn};

/// Converts local image references into remote ones before a save commits.
///
/// Each call uploads at most once and never retries. A failed upload keeps
/// the local reference as [`Attachment::PendingUpload`] so the save can
/// still go ahead.
#[derive(Debug)]
pub struct AttachmentResolver<U>
where
    U: ImageUploader,
{
    uploader: Arc<U>,
}

impl<U> Clone for AttachmentResolver<U>
where
    U: ImageUploader,
{
    fn clone(&self) -> Self {
        Self {
            uploader: Arc::clone(&self.uploader),
        }
    }
}

impl<U> AttachmentResolver<U>
where
    U: ImageUploader,
{
    /// Creates a resolver backed by `uploader`.
    #[must_use]
    pub const fn new(uploader: Arc<U>) -> Self {
        Self { uploader }
    }

    /// Resolves the attachment to persist.
    ///
    /// - No pick: `previous` is returned unchanged and nothing is uploaded.
    /// - A remote URL: returned as-is, so repeated saves are idempotent.
    /// - Anything else: uploaded once; the durable URL on success, the
    ///   original reference as pending on failure.
    pub async fn resolve(&self, picked: Option<&str>, previous: &Attachment) -> Attachment {
        match picked {
            None => previous.clone(),
            Some("") => Attachment::None,
            Some(reference) if is_remote_reference(reference) => {
                Attachment::Remote(reference.to_owned())
            }
            Some(reference) => self.upload(reference).await,
        }
    }

    /// Uploads a local reference, degrading to pending on failure.
    pub async fn upload(&self, local_ref: &str) -> Attachment {
        debug!(reference = local_ref, "resolving local attachment");
        match self.uploader.upload(local_ref).await {
            Ok(url) => Attachment::Remote(url),
            Err(err) => {
                warn!(
                    reference = local_ref,
                    error = %err,
                    "image upload failed; keeping local reference"
                );
                Attachment::PendingUpload(local_ref.to_owned())
            }
        }
    }
}
