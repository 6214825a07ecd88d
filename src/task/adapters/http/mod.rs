//! HTTP adapters for image attachment uploads.

mod uploader;

pub use uploader::HttpImageUploader;
