//! User settings and display preferences.

use serde::{Deserialize, Serialize};

/// UI colour scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Anything other than "dark" reads as light.
    #[must_use]
    pub fn from_stored(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case("dark") {
            Self::Dark
        } else {
            Self::Light
        }
    }

    #[must_use]
    pub const fn toggled(&self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::Light
    }
}

/// The settings page object, saved as one JSON document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    // Profile
    pub name: String,
    pub email: String,
    pub phone: String,
    pub role: String,

    // Preferences
    pub theme: Theme,
    pub language: String,
    pub timezone: String,
    pub date_format: String,
    pub currency: String,

    // Notifications
    pub email_notifications: bool,
    pub task_reminders: bool,
    pub opportunity_alerts: bool,
    pub weekly_reports: bool,

    // Security
    pub two_factor_auth: bool,
    /// Minutes.
    pub session_timeout: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            name: "John Smith".to_string(),
            email: "john.smith@example.com".to_string(),
            phone: "+65 1234 5678".to_string(),
            role: "Sales Manager".to_string(),
            theme: Theme::Light,
            language: "en".to_string(),
            timezone: "Asia/Singapore".to_string(),
            date_format: "DD/MM/YYYY".to_string(),
            currency: "SGD".to_string(),
            email_notifications: true,
            task_reminders: true,
            opportunity_alerts: true,
            weekly_reports: false,
            two_factor_auth: false,
            session_timeout: 30,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_settings_fill_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"theme":"dark","currency":"USD"}"#).unwrap();
        assert_eq!(settings.theme, Theme::Dark);
        assert_eq!(settings.currency, "USD");
        assert_eq!(settings.session_timeout, 30);
        assert!(settings.email_notifications);
    }

    #[test]
    fn test_theme_from_stored() {
        assert_eq!(Theme::from_stored("dark"), Theme::Dark);
        assert_eq!(Theme::from_stored("light"), Theme::Light);
        assert_eq!(Theme::from_stored("solarized"), Theme::Light);
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
    }
}
