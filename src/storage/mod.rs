//! Durable storage layer for CRM Lite.
//!
//! A flat string-keyed store, backed by SQLite on disk or a map in memory.
//!
//! # Submodules
//!
//! - [`kv`] - `KeyValueStore` trait and its SQLite / in-memory backends
//! - [`schema`] - Database schema definitions

pub mod kv;
pub mod schema;

pub use kv::{KeyValueStore, MemoryKv, SqliteKv, read_json, write_json};

/// Keys used in durable storage.
pub mod keys {
    /// `"true"` while logged in; absent otherwise.
    pub const LOGGED_IN: &str = "loggedIn";
    /// JSON array of opportunity records.
    pub const OPPORTUNITIES: &str = "crm_opportunities";
    /// `"light"` or `"dark"`.
    pub const THEME: &str = "theme";
    /// `"true"` / `"false"`; absent means expanded.
    pub const SIDEBAR_EXPANDED: &str = "sidebarExpanded";
    /// JSON settings object.
    pub const SETTINGS: &str = "crm_settings";

    // Never written by the stores, but included in backups and cleared with the data.
    pub const CLIENTS: &str = "crm_clients";
    pub const CONTACTS: &str = "crm_contacts";
    pub const TASKS: &str = "crm_tasks";

    /// Keys removed by "clear all data".
    pub const DATA_KEYS: [&str; 4] = [CLIENTS, CONTACTS, TASKS, OPPORTUNITIES];
}
