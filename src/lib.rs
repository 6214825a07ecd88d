//! Notelite: single-user task tracking with local persistence.
//!
//! This crate provides the persistence and state-transition core of a small
//! to-do application: the task schema and store, the display ordering
//! policy, the pending/done completion lifecycle, image attachment
//! resolution against a remote image host, and summary statistics.
//!
//! # Architecture
//!
//! Notelite follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, HTTP)
//!
//! # Modules
//!
//! - [`config`]: Layered configuration loading
//! - [`task`]: Task storage, ordering, completion, and attachments

pub mod config;
pub mod task;
