//! Backup export.

use std::path::{Path, PathBuf};

use chrono::Utc;
use colored::Colorize;
use serde::Serialize;

use crate::app::App;
use crate::error::Result;
use crate::export::{Backup, backup_file_name, write_document};
use crate::nav::Route;

#[derive(Serialize)]
struct BackupOutput {
    path: PathBuf,
    keys: usize,
}

/// Bundle the raw stored data into a dated backup file.
///
/// # Errors
///
/// Returns an error if logged out, storage cannot be read, or the file
/// cannot be written.
pub fn execute(app: &App, output: Option<&Path>, json: bool) -> Result<()> {
    app.require(Route::Settings)?;

    let backup = Backup::collect(app.kv())?;
    let dir = output.unwrap_or_else(|| Path::new("."));
    let path = write_document(dir, &backup_file_name(Utc::now().date_naive()), &backup)?;

    if crate::is_silent() {
        println!("{}", path.display());
        return Ok(());
    }
    if json {
        return super::print_json(&BackupOutput {
            keys: backup.present(),
            path,
        });
    }
    println!(
        "{} Backup of {} stored key(s) written to {}",
        "✓".green(),
        backup.present(),
        path.display()
    );
    Ok(())
}
