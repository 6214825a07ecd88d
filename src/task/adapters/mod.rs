//! Adapter implementations for task tracking ports.
//!
//! - [`memory`]: in-process repository for tests and ephemeral use
//! - [`sqlite`]: durable Diesel-backed `SQLite` repository
//! - [`http`]: multipart image uploader for the remote image host

pub mod http;
pub mod memory;
pub mod sqlite;
