//! Settings and display preferences.

use colored::Colorize;
use serde::Serialize;

use crate::app::App;
use crate::cli::SettingsCommands;
use crate::error::{Error, Result};
use crate::model::{Settings, Theme};
use crate::nav::Route;
use crate::validate;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SettingsOutput {
    settings: Settings,
    theme: Theme,
    sidebar_expanded: bool,
}

#[derive(Serialize)]
struct ClearOutput {
    removed: Vec<&'static str>,
}

/// Execute settings commands.
///
/// # Errors
///
/// Returns an error if logged out, a value is invalid, or storage fails.
pub fn execute(app: &mut App, command: &SettingsCommands, json: bool) -> Result<()> {
    app.require(Route::Settings)?;

    match command {
        SettingsCommands::Show => show(app, json),
        SettingsCommands::Theme { value } => theme(app, value.as_deref(), json),
        SettingsCommands::Sidebar { expanded } => sidebar(app, *expanded, json),
        SettingsCommands::Set { field, value } => set(app, field, value, json),
        SettingsCommands::ClearData { yes } => clear_data(app, *yes, json),
    }
}

fn show(app: &App, json: bool) -> Result<()> {
    let output = SettingsOutput {
        settings: app.preferences.settings()?,
        theme: app.preferences.theme()?,
        sidebar_expanded: app.preferences.sidebar_expanded()?,
    };

    if json {
        return super::print_json(&output);
    }

    let s = &output.settings;
    println!("{}", "Profile".bold());
    println!("  Name:      {}", s.name);
    println!("  Email:     {}", s.email);
    println!("  Phone:     {}", s.phone);
    println!("  Role:      {}", s.role);
    println!("{}", "Preferences".bold());
    println!("  Theme:     {}", output.theme.as_str());
    println!("  Sidebar:   {}", if output.sidebar_expanded { "expanded" } else { "collapsed" });
    println!("  Language:  {}", s.language);
    println!("  Timezone:  {}", s.timezone);
    println!("  Date fmt:  {}", s.date_format);
    println!("  Currency:  {}", s.currency);
    println!("{}", "Notifications".bold());
    println!("  Email notifications: {}", on_off(s.email_notifications));
    println!("  Task reminders:      {}", on_off(s.task_reminders));
    println!("  Opportunity alerts:  {}", on_off(s.opportunity_alerts));
    println!("  Weekly reports:      {}", on_off(s.weekly_reports));
    println!("{}", "Security".bold());
    println!("  Two-factor auth:     {}", on_off(s.two_factor_auth));
    println!("  Session timeout:     {} min", s.session_timeout);
    Ok(())
}

fn theme(app: &App, value: Option<&str>, json: bool) -> Result<()> {
    let theme = match value {
        Some(raw) => {
            let theme = validate::theme(raw)?;
            app.preferences.set_theme(theme)?;
            theme
        }
        None => app.preferences.toggle_theme()?,
    };

    // Keep the settings document in step with the display preference.
    let mut settings = app.preferences.settings()?;
    if settings.theme != theme {
        settings.theme = theme;
        app.preferences.save_settings(&settings)?;
    }

    if json {
        return super::print_json(&serde_json::json!({ "theme": theme }));
    }
    if crate::is_silent() {
        println!("{}", theme.as_str());
    } else {
        println!("Theme: {}", theme.as_str().bold());
    }
    Ok(())
}

fn sidebar(app: &App, expanded: Option<bool>, json: bool) -> Result<()> {
    if let Some(expanded) = expanded {
        app.preferences.set_sidebar_expanded(expanded)?;
    }
    let expanded = app.preferences.sidebar_expanded()?;

    if json {
        return super::print_json(&serde_json::json!({ "sidebarExpanded": expanded }));
    }
    println!("Sidebar: {}", if expanded { "expanded" } else { "collapsed" });
    Ok(())
}

fn set(app: &App, field: &str, value: &str, json: bool) -> Result<()> {
    let settings = if field == "theme" {
        let theme = validate::theme(value)?;
        app.preferences.set_theme(theme)?;
        app.preferences.set_field(field, theme.as_str())?
    } else {
        app.preferences.set_field(field, value)?
    };

    if json {
        return super::print_json(&settings);
    }
    if !crate::is_silent() {
        println!("{} {field} saved", "✓".green());
    }
    Ok(())
}

fn clear_data(app: &App, yes: bool, json: bool) -> Result<()> {
    if !yes {
        return Err(Error::InvalidArgument(
            "clear-data removes every stored record; pass --yes to confirm".to_string(),
        ));
    }
    let removed = app.preferences.clear_data()?;

    if json {
        return super::print_json(&ClearOutput { removed });
    }
    if !crate::is_silent() {
        println!("{} Removed {} stored key(s).", "✓".green(), removed.len());
    }
    Ok(())
}

const fn on_off(value: bool) -> &'static str {
    if value { "on" } else { "off" }
}
