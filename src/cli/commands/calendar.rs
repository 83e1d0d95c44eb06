//! Calendar view: tasks grouped by due day, plus the upcoming agenda.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate, Utc};
use colored::Colorize;
use serde::Serialize;

use crate::app::App;
use crate::cli::CalendarArgs;
use crate::error::{Error, Result};
use crate::model::{Task, TaskStatus};
use crate::nav::Route;
use crate::query::tasks::{agenda, due_in_month, due_on};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CalendarOutput<'a> {
    /// `YYYY-MM` or `YYYY-MM-DD`, whichever was shown.
    period: String,
    days: BTreeMap<NaiveDate, Vec<&'a Task>>,
    agenda: Vec<&'a Task>,
}

/// Execute the calendar command.
///
/// # Errors
///
/// Returns an error if logged out or the month/day cannot be parsed.
pub fn execute(app: &App, args: &CalendarArgs, json: bool) -> Result<()> {
    app.require(Route::Calendar)?;
    let now = Utc::now();
    let tasks = app.tasks.list();

    let (period, days) = if let Some(raw) = &args.day {
        let day = super::parse_date("day", raw)?;
        let mut days = BTreeMap::new();
        let list = due_on(&tasks, day);
        if !list.is_empty() {
            days.insert(day, list);
        }
        (day.format("%Y-%m-%d").to_string(), days)
    } else {
        let (year, month) = match &args.month {
            Some(raw) => parse_month(raw)?,
            None => (now.year(), now.month()),
        };
        (format!("{year:04}-{month:02}"), due_in_month(&tasks, year, month))
    };
    let upcoming = agenda(&tasks, now, args.limit);

    if json {
        return super::print_json(&CalendarOutput {
            period,
            days,
            agenda: upcoming,
        });
    }

    println!("{}", format!("Calendar {period}").cyan().bold());
    if days.is_empty() {
        println!("  No tasks due.");
    }
    for (day, list) in &days {
        println!();
        println!("{}", day.format("%a %d %b").to_string().bold());
        for t in list {
            let title = if t.status == TaskStatus::Completed {
                t.title.dimmed()
            } else {
                t.title.normal()
            };
            println!(
                "  {} [{}] {title} ({})",
                t.due_date.format("%H:%M"),
                t.id,
                t.task_type.as_str()
            );
        }
    }

    println!();
    println!("{}", "Upcoming".yellow().bold());
    if upcoming.is_empty() {
        println!("  Nothing scheduled.");
    }
    for t in &upcoming {
        println!(
            "  {} [{}] {} ({})",
            t.due_date.format("%Y-%m-%d %H:%M"),
            t.id,
            t.title,
            t.assigned_to
        );
    }
    Ok(())
}

/// `YYYY-MM`
fn parse_month(raw: &str) -> Result<(i32, u32)> {
    NaiveDate::parse_from_str(&format!("{}-01", raw.trim()), "%Y-%m-%d")
        .map(|d| (d.year(), d.month()))
        .map_err(|_| Error::InvalidFormat {
            field: "month",
            message: format!("'{raw}' is not a YYYY-MM month"),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_month() {
        assert_eq!(parse_month("2025-10").unwrap(), (2025, 10));
        assert_eq!(parse_month(" 2026-01 ").unwrap(), (2026, 1));
        assert!(parse_month("2025-13").is_err());
        assert!(parse_month("October").is_err());
    }
}
