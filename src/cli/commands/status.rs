//! Dashboard summary.

use chrono::Utc;
use colored::Colorize;
use serde::Serialize;

use crate::app::App;
use crate::error::Result;
use crate::model::Task;
use crate::nav::Route;
use crate::query::tasks::DEFAULT_UPCOMING_DAYS;
use crate::query::{ContactStats, PipelineStats, TaskStats};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DashboardOutput {
    contacts: ContactStats,
    tasks: TaskStats,
    pipeline: PipelineStats,
    unread_notifications: usize,
    overdue: Vec<Task>,
    upcoming: Vec<Task>,
}

/// Execute the status command.
///
/// # Errors
///
/// Returns [`Error::NotAuthenticated`](crate::Error::NotAuthenticated) when
/// logged out.
pub fn execute(app: &App, json: bool) -> Result<()> {
    app.require(Route::Dashboard)?;
    let now = Utc::now();

    let output = DashboardOutput {
        contacts: app.contacts.stats(),
        tasks: app.tasks.stats(now),
        pipeline: app.opportunities.pipeline_stats(),
        unread_notifications: app.notifications.unread_count(),
        overdue: app.tasks.overdue(now),
        upcoming: app.tasks.upcoming(now, DEFAULT_UPCOMING_DAYS),
    };

    if json {
        return super::print_json(&output);
    }

    println!("{}", "Dashboard".cyan().bold());
    println!(
        "  Contacts:       {} ({} leads, {} active)",
        output.contacts.total, output.contacts.leads, output.contacts.active
    );
    println!(
        "  Tasks:          {} ({} pending, {} in progress, {} completed)",
        output.tasks.total, output.tasks.pending, output.tasks.in_progress, output.tasks.completed
    );
    println!(
        "  Pipeline:       {} deals, {} total, {} weighted",
        output.pipeline.total,
        super::money(output.pipeline.total_value),
        super::money(output.pipeline.weighted_value)
    );
    println!("  Notifications:  {} unread", output.unread_notifications);

    if !output.overdue.is_empty() {
        println!();
        println!("{}", format!("Overdue ({})", output.overdue.len()).red().bold());
        for task in &output.overdue {
            println!(
                "  [{}] {} (due {})",
                task.id,
                task.title,
                task.due_date.format("%Y-%m-%d %H:%M")
            );
        }
    }

    if !output.upcoming.is_empty() {
        println!();
        println!("{}", format!("Next {DEFAULT_UPCOMING_DAYS} days").yellow().bold());
        for task in &output.upcoming {
            println!(
                "  [{}] {} (due {}, {})",
                task.id,
                task.title,
                task.due_date.format("%Y-%m-%d %H:%M"),
                task.assigned_to
            );
        }
    }

    Ok(())
}
