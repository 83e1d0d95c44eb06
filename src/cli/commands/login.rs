//! Login and logout.

use colored::Colorize;
use serde::Serialize;

use crate::app::App;
use crate::error::Result;
use crate::nav::Route;
use crate::validate;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SessionOutput {
    authenticated: bool,
    /// Where the login page sends the user next.
    redirect: String,
    changed: bool,
}

/// Log in. Credentials are only checked for presence.
///
/// # Errors
///
/// Returns a validation error for a blank email or password, or a storage
/// error if the flag cannot be written.
pub fn login(app: &mut App, email: &str, password: &str, json: bool) -> Result<()> {
    validate::login(email, password)?;

    let already = app.session.persisted()?;
    if !already {
        app.session.login()?;
    }

    let output = SessionOutput {
        authenticated: true,
        redirect: Route::Dashboard.path(),
        changed: !already,
    };
    if json {
        return super::print_json(&output);
    }
    if crate::is_silent() {
        return Ok(());
    }
    if already {
        println!("Already logged in.");
    } else {
        println!("{} Logged in as {}", "✓".green(), email.bold());
    }
    Ok(())
}

/// Log out. Logging out twice is harmless.
///
/// # Errors
///
/// Returns a storage error if the flag cannot be removed.
pub fn logout(app: &mut App, json: bool) -> Result<()> {
    let was_logged_in = app.session.persisted()?;
    app.session.logout()?;

    let output = SessionOutput {
        authenticated: false,
        redirect: Route::Login.path(),
        changed: was_logged_in,
    };
    if json {
        return super::print_json(&output);
    }
    if !crate::is_silent() {
        println!("Logged out.");
    }
    Ok(())
}
