//! Task tracking for Notelite.
//!
//! This module stores tasks, orders them for display, drives the two-state
//! completion lifecycle, and makes sure an attached image is uploaded to
//! the image host before a task is saved whenever the host is reachable.
//! A failed upload leaves the task with an explicit pending-upload
//! attachment that can be retried. The module follows hexagonal
//! architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
