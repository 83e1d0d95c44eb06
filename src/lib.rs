//! CRM Lite - the domain-state layer of a small sales CRM
//!
//! This crate provides the stores, derived queries and navigation gate behind
//! the `crm` CLI.
//!
//! # Architecture
//!
//! - [`app`] - Application context owning every store
//! - [`store`] - Session, contact, task, opportunity and notification stores
//! - [`query`] - Pure filters and aggregates over store snapshots
//! - [`nav`] - Route table and the authentication gate
//! - [`model`] - Data types (Contact, Task, Opportunity, Notification, Settings)
//! - [`storage`] - Durable key-value storage (`SQLite` or in-memory)
//! - [`config`] - Paths, latency and display preferences
//! - [`export`] - Report and backup documents
//! - [`validate`] - Form validation and enum parsing with suggestions
//! - [`cli`] - Command-line interface using clap
//! - [`error`] - Error types and handling

#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod model;
pub mod nav;
pub mod query;
pub mod storage;
pub mod store;
pub mod validate;

pub use app::App;
pub use error::{Error, Result};

/// Global silent mode flag for `--silent` output.
///
/// When set, mutating commands print only the id or path they produced.
pub static SILENT: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(false);

/// Check if silent mode is active.
#[inline]
pub fn is_silent() -> bool {
    SILENT.load(std::sync::atomic::Ordering::Relaxed)
}
