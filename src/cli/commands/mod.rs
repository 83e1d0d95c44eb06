//! Command implementations.
//!
//! Each page-like command passes its route through [`App::require`] first,
//! so a logged-out session gets [`Error::NotAuthenticated`] rather than data.

pub mod backup;
pub mod calendar;
pub mod completions;
pub mod contact;
pub mod login;
pub mod notification;
pub mod opportunity;
pub mod report;
pub mod route;
pub mod settings;
pub mod shell;
pub mod status;
pub mod task;
pub mod version;

use chrono::{NaiveDate, NaiveDateTime, DateTime, Utc};
use serde::Serialize;

use crate::app::App;
use crate::cli::Commands;
use crate::error::{Error, Result};

/// Run one parsed command against `app`.
///
/// # Errors
///
/// Propagates the command's error.
pub fn dispatch(app: &mut App, command: &Commands, json: bool) -> Result<()> {
    match command {
        Commands::Login { email, password } => login::login(app, email, password, json),
        Commands::Logout => login::logout(app, json),
        Commands::Status => status::execute(app, json),
        Commands::Route { path } => route::execute(app, path, json),
        Commands::Contact { command } => contact::execute(app, command, json),
        Commands::Task { command } => task::execute(app, command, json),
        Commands::Opportunity { command } => opportunity::execute(app, command, json),
        Commands::Notification { command } => notification::execute(app, command, json),
        Commands::Calendar(args) => calendar::execute(app, args, json),
        Commands::Report(args) => report::execute(app, args, json),
        Commands::Backup { output } => backup::execute(app, output.as_deref(), json),
        Commands::Settings { command } => settings::execute(app, command, json),
        Commands::Shell => shell::execute(app, json),
        Commands::Completions { shell } => completions::execute(shell),
        Commands::Version => version::execute(json),
    }
}

/// Print an error the way the binary does: structured JSON, or the message
/// with its hint.
pub fn report_error(err: &Error, json: bool) {
    if json {
        eprintln!("{}", err.to_structured_json());
    } else if let Some(hint) = err.hint() {
        eprintln!("Error: {err}\n  Hint: {hint}");
    } else {
        eprintln!("Error: {err}");
    }
}

pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string(value)?);
    Ok(())
}

/// `YYYY-MM-DD`
pub(crate) fn parse_date(field: &'static str, raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| Error::InvalidFormat {
        field,
        message: format!("'{raw}' is not a YYYY-MM-DD date"),
    })
}

/// RFC 3339, `YYYY-MM-DDTHH:MM`, or a bare date (midnight UTC).
pub(crate) fn parse_datetime(field: &'static str, raw: &str) -> Result<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M") {
        return Ok(naive.and_utc());
    }
    if let Ok(day) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(day.and_hms_opt(0, 0, 0).unwrap_or_default().and_utc());
    }
    Err(Error::InvalidFormat {
        field,
        message: format!("'{raw}' is not a date or date-time"),
    })
}

/// Whole-dollar amount with thousands separators, e.g. `S$150,000`.
pub(crate) fn money(value: f64) -> String {
    #[allow(clippy::cast_possible_truncation)]
    let whole = value.round() as i64;
    let digits = whole.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    let sign = if whole < 0 { "-" } else { "" };
    format!("{sign}S${grouped}")
}

/// Shorten to `max` characters, adding an ellipsis.
pub(crate) fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let head: String = text.chars().take(max).collect();
        format!("{head}...")
    } else {
        text.to_string()
    }
}
