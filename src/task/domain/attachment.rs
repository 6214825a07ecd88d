//! Image attachment references.

use serde::{Deserialize, Serialize};

/// Classified `image_url` of a task.
///
/// Persisted values are either absent, a durable remote URL, or a local
/// reference whose upload has not yet succeeded. The last case is kept
/// distinct so callers can surface it and retry the upload instead of
/// mistaking it for a durable reference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "reference", rename_all = "snake_case")]
pub enum Attachment {
    /// No image is attached.
    #[default]
    None,
    /// Durable `http`/`https` URL on the image host.
    Remote(String),
    /// Device-local reference still awaiting upload.
    PendingUpload(String),
}

impl Attachment {
    /// Classifies a raw `image_url` value.
    ///
    /// `None` and the empty string both mean no attachment.
    #[must_use]
    pub fn classify(raw: Option<&str>) -> Self {
        match raw {
            None | Some("") => Self::None,
            Some(value) if is_remote_reference(value) => Self::Remote(value.to_owned()),
            Some(value) => Self::PendingUpload(value.to_owned()),
        }
    }

    /// Returns the value written to the `image_url` column.
    #[must_use]
    pub fn as_stored(&self) -> Option<&str> {
        match self {
            Self::None => None,
            Self::Remote(url) | Self::PendingUpload(url) => Some(url),
        }
    }

    /// Returns `true` when a local reference still awaits upload.
    #[must_use]
    pub const fn is_pending_upload(&self) -> bool {
        matches!(self, Self::PendingUpload(_))
    }
}

/// Returns `true` when `reference` uses the `http` or `https` scheme.
#[must_use]
pub fn is_remote_reference(reference: &str) -> bool {
    reference
        .split_once("://")
        .is_some_and(|(scheme, _)| {
            scheme.eq_ignore_ascii_case("http") || scheme.eq_ignore_ascii_case("https")
        })
}
