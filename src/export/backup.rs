//! Data backup bundle.
//!
//! Stored values are copied verbatim as strings, not re-parsed, so a backup
//! captures exactly what is on disk. There is no restore path.

use serde::Serialize;

use crate::error::Result;
use crate::storage::{KeyValueStore, keys};

/// Raw contents of each data key; `null` where the key is absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Backup {
    pub clients: Option<String>,
    pub contacts: Option<String>,
    pub tasks: Option<String>,
    pub opportunities: Option<String>,
    pub settings: Option<String>,
}

impl Backup {
    /// Read every data key from `kv`.
    ///
    /// # Errors
    ///
    /// Returns a storage error if a read fails.
    pub fn collect(kv: &dyn KeyValueStore) -> Result<Self> {
        Ok(Self {
            clients: kv.get(keys::CLIENTS)?,
            contacts: kv.get(keys::CONTACTS)?,
            tasks: kv.get(keys::TASKS)?,
            opportunities: kv.get(keys::OPPORTUNITIES)?,
            settings: kv.get(keys::SETTINGS)?,
        })
    }

    /// Number of keys that had a value.
    #[must_use]
    pub fn present(&self) -> usize {
        [
            &self.clients,
            &self.contacts,
            &self.tasks,
            &self.opportunities,
            &self.settings,
        ]
        .into_iter()
        .filter(|v| v.is_some())
        .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::{backup_file_name, write_document};
    use crate::storage::MemoryKv;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    #[test]
    fn test_collect_copies_raw_strings() {
        let kv = MemoryKv::new();
        kv.set(keys::OPPORTUNITIES, r#"[{"id":"1"}]"#).unwrap();
        kv.set(keys::SETTINGS, "{}").unwrap();
        kv.set(keys::THEME, "dark").unwrap();

        let backup = Backup::collect(&kv).unwrap();
        assert_eq!(backup.opportunities.as_deref(), Some(r#"[{"id":"1"}]"#));
        assert_eq!(backup.settings.as_deref(), Some("{}"));
        assert!(backup.clients.is_none());
        assert_eq!(backup.present(), 2);
    }

    #[test]
    fn test_written_backup_has_nulls() {
        let dir = TempDir::new().unwrap();
        let kv = MemoryKv::new();
        kv.set(keys::OPPORTUNITIES, "[]").unwrap();

        let day = NaiveDate::from_ymd_opt(2025, 10, 28).unwrap();
        let path = write_document(dir.path(), &backup_file_name(day), &Backup::collect(&kv).unwrap())
            .unwrap();
        assert!(path.ends_with("crm-backup-2025-10-28.json"));

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(json["opportunities"], "[]");
        assert!(json["clients"].is_null());
        assert!(json["tasks"].is_null());
    }
}
