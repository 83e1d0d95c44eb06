//! Notification commands.
//!
//! Notifications belong to the page header, so they are gated like the
//! dashboard and live only as long as the process.

use colored::Colorize;
use serde::Serialize;

use crate::app::App;
use crate::cli::NotificationCommands;
use crate::error::{Error, Result};
use crate::model::{NewNotification, Notification, NotificationId, NotificationKind};
use crate::nav::Route;
use crate::validate;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NotificationListOutput<'a> {
    notifications: Vec<&'a Notification>,
    count: usize,
    unread_count: usize,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BulkOutput {
    affected: usize,
    unread_count: usize,
}

/// Execute notification commands.
///
/// # Errors
///
/// Returns an error if logged out, the type is invalid, or the id is unknown.
pub fn execute(app: &mut App, command: &NotificationCommands, json: bool) -> Result<()> {
    app.require(Route::Dashboard)?;

    match command {
        NotificationCommands::List { unread } => list(app, *unread, json),
        NotificationCommands::Add {
            title,
            message,
            kind,
        } => {
            validate::required("Title", title)?;
            let kind = validate::notification_kind(kind)?;
            let n = app
                .notifications
                .add(NewNotification::new(title, message, kind));
            print_one("Added", &n, json)
        }
        NotificationCommands::Read { id } => {
            let n = app
                .notifications
                .mark_as_read(*id)
                .ok_or_else(|| not_found(*id))?;
            print_one("Read", &n, json)
        }
        NotificationCommands::ReadAll => {
            let affected = app.notifications.list().iter().filter(|n| !n.read).count();
            app.notifications.mark_all_as_read();
            print_bulk(app, "Marked read", affected, json)
        }
        NotificationCommands::Delete { id } => {
            let n = app
                .notifications
                .delete_one(*id)
                .ok_or_else(|| not_found(*id))?;
            print_one("Deleted", &n, json)
        }
        NotificationCommands::Clear => {
            let affected = app.notifications.len();
            app.notifications.clear_all();
            print_bulk(app, "Cleared", affected, json)
        }
    }
}

fn list(app: &App, unread_only: bool, json: bool) -> Result<()> {
    let all = app.notifications.list();
    let notifications: Vec<&Notification> =
        all.iter().filter(|n| !unread_only || !n.read).collect();

    if json {
        return super::print_json(&NotificationListOutput {
            count: notifications.len(),
            unread_count: app.notifications.unread_count(),
            notifications,
        });
    }

    if notifications.is_empty() {
        println!("No notifications.");
        return Ok(());
    }

    println!(
        "Notifications ({} unread):",
        app.notifications.unread_count()
    );
    println!();
    for n in &notifications {
        let marker = if n.read { " ".normal() } else { "●".blue() };
        let kind = match n.kind {
            NotificationKind::Alert => n.kind.as_str().red(),
            NotificationKind::Task => n.kind.as_str().yellow(),
            NotificationKind::Update => n.kind.as_str().cyan(),
        };
        println!("{marker} [{}] {} ({kind}, {})", n.id, n.title.bold(), n.time);
        println!("    {}", super::truncate(&n.message, 70));
    }
    Ok(())
}

fn print_one(verb: &str, n: &Notification, json: bool) -> Result<()> {
    if crate::is_silent() {
        println!("{}", n.id);
        return Ok(());
    }
    if json {
        return super::print_json(n);
    }
    println!("{verb} notification {}: {}", n.id, n.title.bold());
    Ok(())
}

fn print_bulk(app: &App, verb: &str, affected: usize, json: bool) -> Result<()> {
    if json {
        return super::print_json(&BulkOutput {
            affected,
            unread_count: app.notifications.unread_count(),
        });
    }
    if !crate::is_silent() {
        println!("{verb} {affected} notification(s).");
    }
    Ok(())
}

fn not_found(id: NotificationId) -> Error {
    Error::NotificationNotFound { id: id.to_string() }
}
