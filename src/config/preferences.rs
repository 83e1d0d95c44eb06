//! Display preferences and the settings document.
//!
//! Theme and sidebar state are plain strings in durable storage; the settings
//! page saves a single JSON object.

use std::rc::Rc;

use serde_json::Value;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::model::{Settings, Theme};
use crate::storage::{KeyValueStore, keys, read_json, write_json};

/// Typed access to the preference keys.
#[derive(Clone)]
pub struct Preferences {
    kv: Rc<dyn KeyValueStore>,
}

impl Preferences {
    #[must_use]
    pub fn new(kv: Rc<dyn KeyValueStore>) -> Self {
        Self { kv }
    }

    /// Stored theme; light when unset.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the read fails.
    pub fn theme(&self) -> Result<Theme> {
        Ok(self
            .kv
            .get(keys::THEME)?
            .map_or_else(Theme::default, |s| Theme::from_stored(&s)))
    }

    /// # Errors
    ///
    /// Returns a storage error if the write fails.
    pub fn set_theme(&self, theme: Theme) -> Result<()> {
        self.kv.set(keys::THEME, theme.as_str())?;
        debug!(theme = theme.as_str(), "Saved theme");
        Ok(())
    }

    /// Flip the theme and return the new one.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the read or write fails.
    pub fn toggle_theme(&self) -> Result<Theme> {
        let next = self.theme()?.toggled();
        self.set_theme(next)?;
        Ok(next)
    }

    /// Whether the sidebar is expanded. Anything but `"false"` counts as
    /// expanded, including an absent key.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the read fails.
    pub fn sidebar_expanded(&self) -> Result<bool> {
        Ok(self.kv.get(keys::SIDEBAR_EXPANDED)?.as_deref() != Some("false"))
    }

    /// # Errors
    ///
    /// Returns a storage error if the write fails.
    pub fn set_sidebar_expanded(&self, expanded: bool) -> Result<()> {
        self.kv
            .set(keys::SIDEBAR_EXPANDED, if expanded { "true" } else { "false" })
    }

    /// Saved settings, or the defaults if none were saved.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CorruptValue`] if the saved document does not parse.
    pub fn settings(&self) -> Result<Settings> {
        Ok(read_json(self.kv.as_ref(), keys::SETTINGS)?.unwrap_or_default())
    }

    /// # Errors
    ///
    /// Returns a storage error if the write fails.
    pub fn save_settings(&self, settings: &Settings) -> Result<()> {
        write_json(self.kv.as_ref(), keys::SETTINGS, settings)?;
        info!("Settings saved");
        Ok(())
    }

    /// Set one settings field by its JSON name (e.g. `currency`,
    /// `weeklyReports`, `sessionTimeout`) and save.
    ///
    /// The raw value is read as the field's existing type.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for an unknown field or a value of
    /// the wrong type, or a storage error if saving fails.
    pub fn set_field(&self, field: &str, raw: &str) -> Result<Settings> {
        let current = self.settings()?;
        let mut doc = serde_json::to_value(&current)?;
        let Some(slot) = doc.as_object_mut().and_then(|map| map.get_mut(field)) else {
            return Err(Error::InvalidArgument(format!("Unknown setting: {field}")));
        };

        *slot = match *slot {
            Value::Bool(_) => raw
                .trim()
                .parse::<bool>()
                .map(Value::Bool)
                .map_err(|_| Error::InvalidArgument(format!("{field} expects true or false")))?,
            Value::Number(_) => raw
                .trim()
                .parse::<u32>()
                .map(Value::from)
                .map_err(|_| Error::InvalidArgument(format!("{field} expects a whole number")))?,
            _ => Value::String(raw.to_string()),
        };

        let updated: Settings = serde_json::from_value(doc)
            .map_err(|e| Error::InvalidArgument(format!("Invalid value for {field}: {e}")))?;
        self.save_settings(&updated)?;
        Ok(updated)
    }

    /// Remove every entity data key. Preferences and the session survive.
    ///
    /// Returns the keys that were present.
    ///
    /// # Errors
    ///
    /// Returns a storage error if a removal fails.
    pub fn clear_data(&self) -> Result<Vec<&'static str>> {
        let mut removed = Vec::new();
        for key in keys::DATA_KEYS {
            if self.kv.remove(key)? {
                removed.push(key);
            }
        }
        info!(count = removed.len(), "Cleared stored data");
        Ok(removed)
    }
}

impl std::fmt::Debug for Preferences {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Preferences").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryKv;

    fn prefs() -> Preferences {
        Preferences::new(Rc::new(MemoryKv::new()))
    }

    #[test]
    fn test_theme_defaults_and_toggles() {
        let prefs = prefs();
        assert_eq!(prefs.theme().unwrap(), Theme::Light);
        assert_eq!(prefs.toggle_theme().unwrap(), Theme::Dark);
        assert_eq!(prefs.theme().unwrap(), Theme::Dark);
    }

    #[test]
    fn test_sidebar_absent_means_expanded() {
        let prefs = prefs();
        assert!(prefs.sidebar_expanded().unwrap());
        prefs.set_sidebar_expanded(false).unwrap();
        assert!(!prefs.sidebar_expanded().unwrap());
        prefs.set_sidebar_expanded(true).unwrap();
        assert!(prefs.sidebar_expanded().unwrap());
    }

    #[test]
    fn test_settings_round_trip_and_field_update() {
        let prefs = prefs();
        assert_eq!(prefs.settings().unwrap(), Settings::default());

        let updated = prefs.set_field("currency", "USD").unwrap();
        assert_eq!(updated.currency, "USD");
        prefs.set_field("weeklyReports", "true").unwrap();
        prefs.set_field("sessionTimeout", "45").unwrap();

        let saved = prefs.settings().unwrap();
        assert_eq!(saved.currency, "USD");
        assert!(saved.weekly_reports);
        assert_eq!(saved.session_timeout, 45);
    }

    #[test]
    fn test_bad_field_updates() {
        let prefs = prefs();
        assert!(prefs.set_field("nope", "x").is_err());
        assert!(prefs.set_field("weeklyReports", "maybe").is_err());
        assert!(prefs.set_field("sessionTimeout", "-3").is_err());
        assert!(prefs.set_field("theme", "blue").is_err());
        assert_eq!(prefs.settings().unwrap(), Settings::default());
    }

    #[test]
    fn test_corrupt_settings_reported() {
        let kv: Rc<dyn KeyValueStore> = Rc::new(MemoryKv::new());
        kv.set(keys::SETTINGS, "{oops").unwrap();
        let err = Preferences::new(kv).settings().unwrap_err();
        assert!(matches!(err, Error::CorruptValue { .. }));
    }

    #[test]
    fn test_clear_data_keeps_preferences() {
        let kv: Rc<dyn KeyValueStore> = Rc::new(MemoryKv::new());
        kv.set(keys::OPPORTUNITIES, "[]").unwrap();
        kv.set(keys::CONTACTS, "[]").unwrap();
        kv.set(keys::LOGGED_IN, "true").unwrap();
        kv.set(keys::THEME, "dark").unwrap();

        let prefs = Preferences::new(Rc::clone(&kv));
        let mut removed = prefs.clear_data().unwrap();
        removed.sort_unstable();
        assert_eq!(removed, vec![keys::CONTACTS, keys::OPPORTUNITIES]);
        assert!(kv.get(keys::OPPORTUNITIES).unwrap().is_none());
        assert_eq!(kv.get(keys::LOGGED_IN).unwrap().as_deref(), Some("true"));
        assert_eq!(prefs.theme().unwrap(), Theme::Dark);
    }
}
