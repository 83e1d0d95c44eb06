//! Route evaluation.

use colored::Colorize;
use serde::Serialize;

use crate::app::App;
use crate::error::Result;
use crate::nav::{Navigation, Route};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RouteOutput {
    path: String,
    #[serde(flatten)]
    navigation: Navigation,
    /// For detail pages that render: whether the record exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    record_found: Option<bool>,
}

/// Execute the route command. Never fails on the gate's decision; it only
/// reports it.
///
/// # Errors
///
/// Returns a storage error if the session flag cannot be read.
pub fn execute(app: &App, path: &str, json: bool) -> Result<()> {
    let navigation = app.navigate(path)?;
    let record_found = match &navigation {
        Navigation::Render(route) => record_exists(app, route),
        _ => None,
    };

    if json {
        return super::print_json(&RouteOutput {
            path: path.to_string(),
            navigation,
            record_found,
        });
    }

    match &navigation {
        Navigation::Render(route) => {
            println!("{} {} ({})", "render".green(), route.path(), route.title());
            if record_found == Some(false) {
                println!("  {}", "record not found".yellow());
            }
        }
        Navigation::Redirect(to) => println!("{} {path} → {}", "redirect".yellow(), to.path()),
        Navigation::NotFound(_) => println!("{} {path}", "not found".red()),
    }
    Ok(())
}

fn record_exists(app: &App, route: &Route) -> Option<bool> {
    match route {
        Route::Contact(id) => Some(app.contacts.find(id).is_some()),
        Route::Task(id) => Some(app.tasks.find(id).is_some()),
        Route::Opportunity(id) => Some(app.opportunities.get_by_id(id).is_some()),
        _ => None,
    }
}
