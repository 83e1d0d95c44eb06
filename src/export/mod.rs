//! Report and backup documents.
//!
//! Both are pretty-printed JSON written with [`atomic_write`], so an
//! interrupted export never leaves a half-written file behind.
//!
//! # Submodules
//!
//! - [`report`] - analytics snapshot of every store
//! - [`backup`] - raw durable-storage values bundled for safekeeping

pub mod backup;
pub mod report;

pub use backup::Backup;
pub use report::{DateRange, Report};

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info};

use crate::error::Result;

/// `crm-report-YYYY-MM-DD.json`
#[must_use]
pub fn report_file_name(day: NaiveDate) -> String {
    format!("crm-report-{}.json", day.format("%Y-%m-%d"))
}

/// `crm-backup-YYYY-MM-DD.json`
#[must_use]
pub fn backup_file_name(day: NaiveDate) -> String {
    format!("crm-backup-{}.json", day.format("%Y-%m-%d"))
}

/// Write a file atomically: temp file, sync, then rename over the target.
///
/// If any step fails, the original file (if any) remains untouched and the
/// temp file is removed.
///
/// # Errors
///
/// Returns an error if any file operation fails.
pub fn atomic_write(path: &Path, content: &str) -> Result<()> {
    let temp_path = path.with_extension("json.tmp");

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let written = write_synced(&temp_path, content).and_then(|()| fs::rename(&temp_path, path));
    if let Err(e) = written {
        if let Err(cleanup) = fs::remove_file(&temp_path) {
            debug!(path = %temp_path.display(), error = %cleanup, "Temp file not removed");
        }
        return Err(e.into());
    }
    Ok(())
}

fn write_synced(path: &Path, content: &str) -> std::io::Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(content.as_bytes())?;
    writer.flush()?;
    writer.get_ref().sync_all()
}

/// Serialize `document` pretty-printed and write it to `dir/file_name`.
///
/// Returns the written path.
///
/// # Errors
///
/// Returns an error if serialization or the write fails.
pub fn write_document<T: Serialize>(dir: &Path, file_name: &str, document: &T) -> Result<PathBuf> {
    let path = dir.join(file_name);
    let mut content = serde_json::to_string_pretty(document)?;
    content.push('\n');
    atomic_write(&path, &content)?;
    info!(path = %path.display(), bytes = content.len(), "Exported document");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_names() {
        let day = NaiveDate::from_ymd_opt(2025, 3, 7).unwrap();
        assert_eq!(report_file_name(day), "crm-report-2025-03-07.json");
        assert_eq!(backup_file_name(day), "crm-backup-2025-03-07.json");
    }

    #[test]
    fn test_atomic_write_replaces_and_cleans_up() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("out.json");

        atomic_write(&path, "first").unwrap();
        atomic_write(&path, "second").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn test_failed_write_removes_temp_file() {
        let dir = TempDir::new().unwrap();
        // A non-empty directory at the target makes the final rename fail.
        let path = dir.path().join("out.json");
        fs::create_dir(&path).unwrap();
        fs::write(path.join("keep"), "x").unwrap();

        assert!(atomic_write(&path, "data").is_err());
        assert!(!path.with_extension("json.tmp").exists());
        assert!(path.join("keep").exists());
    }

    #[test]
    fn test_write_document_is_pretty() {
        let dir = TempDir::new().unwrap();
        let doc = serde_json::json!({ "a": 1, "b": [true] });
        let path = write_document(dir.path(), "doc.json", &doc).unwrap();

        let text = fs::read_to_string(path).unwrap();
        assert!(text.contains("\n  \"a\": 1"));
        let back: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(back, doc);
    }
}
