//! Version information.

use serde::Serialize;

use crate::error::Result;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct VersionOutput {
    name: &'static str,
    version: &'static str,
    profile: &'static str,
}

impl VersionOutput {
    const fn current() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            profile: if cfg!(debug_assertions) { "dev" } else { "release" },
        }
    }
}

/// Print the crate version.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn execute(json: bool) -> Result<()> {
    let info = VersionOutput::current();
    if json {
        return super::print_json(&info);
    }
    println!("crm version {} ({})", info.version, info.profile);
    Ok(())
}
