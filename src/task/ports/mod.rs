//! Port contracts for task tracking.
//!
//! Ports define infrastructure-agnostic interfaces used by task services.

pub mod repository;
pub mod uploader;

pub use repository::{MutationOutcome, TaskRepository, TaskRepositoryError, TaskRepositoryResult};
pub use uploader::{AttachmentUploadError, ImageUploader};

#[cfg(test)]
pub use uploader::MockImageUploader;
