//! Report export.

use std::path::{Path, PathBuf};

use chrono::Utc;
use colored::Colorize;
use serde::Serialize;

use crate::app::App;
use crate::cli::ReportArgs;
use crate::error::Result;
use crate::export::{Report, report_file_name, write_document};
use crate::nav::Route;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportOutput {
    path: PathBuf,
    date_range: &'static str,
}

/// Build a report over the current stores and print or save it.
///
/// # Errors
///
/// Returns an error if logged out or the file cannot be written.
pub fn execute(app: &App, args: &ReportArgs, json: bool) -> Result<()> {
    app.require(Route::Reports)?;

    let now = Utc::now();
    let report = Report::build(
        &app.tasks.list(),
        &app.contacts.list(),
        &app.opportunities.list(),
        args.range,
        now,
    );

    if args.stdout {
        if json {
            return super::print_json(&report);
        }
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let dir = args.output.as_deref().unwrap_or_else(|| Path::new("."));
    let path = write_document(dir, &report_file_name(now.date_naive()), &report)?;

    if crate::is_silent() {
        println!("{}", path.display());
        return Ok(());
    }
    if json {
        return super::print_json(&ExportOutput {
            path,
            date_range: args.range.label(),
        });
    }
    println!(
        "{} Report ({}) written to {}",
        "✓".green(),
        args.range.label(),
        path.display()
    );
    Ok(())
}
