//! Configuration management.
//!
//! Resolves where the durable store lives and holds the runtime knobs that
//! are injected into [`App`](crate::app::App) instead of being hard-coded.
//!
//! # Layout
//!
//! - **Database**: `~/.crm-lite/data/crm.db` unless overridden
//! - **Exports**: reports and backups go to the current directory by default

mod preferences;

pub use preferences::Preferences;

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Error, Result};

/// Environment variable overriding the database path.
pub const DB_ENV: &str = "CRM_DB";

/// Environment variable setting the simulated latency, in milliseconds.
pub const LATENCY_ENV: &str = "CRM_LATENCY_MS";

/// Upper bound for the simulated latency.
pub const MAX_LATENCY_MS: u64 = 10_000;

/// The global CRM Lite directory, `~/.crm-lite/`.
#[must_use]
pub fn global_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".crm-lite"))
}

/// Resolve the database path.
///
/// Priority:
/// 1. If `explicit_path` is provided, use it directly
/// 2. `CRM_DB` environment variable
/// 3. Global location: `~/.crm-lite/data/crm.db`
///
/// Returns `None` only when no home directory can be found.
#[must_use]
pub fn resolve_db_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return Some(path.to_path_buf());
    }

    if let Ok(db_path) = std::env::var(DB_ENV) {
        if !db_path.trim().is_empty() {
            return Some(PathBuf::from(db_path));
        }
    }

    global_dir().map(|dir| dir.join("data").join("crm.db"))
}

/// Runtime settings for an [`App`](crate::app::App).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// Delay applied before add/update submissions. Zero disables it.
    pub latency: Duration,
}

impl AppConfig {
    /// Build a config from a latency in milliseconds.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the latency exceeds [`MAX_LATENCY_MS`].
    pub fn with_latency_ms(ms: u64) -> Result<Self> {
        if ms > MAX_LATENCY_MS {
            return Err(Error::Config(format!(
                "latency of {ms}ms exceeds the {MAX_LATENCY_MS}ms limit"
            )));
        }
        Ok(Self {
            latency: Duration::from_millis(ms),
        })
    }

    /// Block for the configured latency, if any.
    pub fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tracing::trace!(ms = self.latency.as_millis(), "Simulating latency");
            std::thread::sleep(self.latency);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_db_path_with_explicit() {
        let explicit = PathBuf::from("/custom/path/crm.db");
        assert_eq!(resolve_db_path(Some(&explicit)), Some(explicit));
    }

    #[test]
    fn test_default_path_is_global() {
        if std::env::var(DB_ENV).is_ok() {
            return;
        }
        let path = resolve_db_path(None).unwrap();
        assert!(path.ends_with("data/crm.db"));
        assert!(path.starts_with(global_dir().unwrap()));
    }

    #[test]
    fn test_latency_bounds() {
        assert_eq!(AppConfig::default().latency, Duration::ZERO);
        assert_eq!(
            AppConfig::with_latency_ms(500).unwrap().latency,
            Duration::from_millis(500)
        );
        assert!(matches!(
            AppConfig::with_latency_ms(MAX_LATENCY_MS + 1),
            Err(Error::Config(_))
        ));
    }
}
