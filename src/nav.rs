//! Route table and the authentication gate.
//!
//! The gate is stateless: it takes the session flag as read at evaluation
//! time and decides whether a route renders, redirects, or is unknown.

use std::fmt;

use serde::Serialize;

/// Every navigable page.
///
/// Record ids are kept as the raw path segment; stores coerce them when
/// looking the record up.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "page", content = "id", rename_all = "kebab-case")]
pub enum Route {
    Login,
    Dashboard,
    Clients,
    AddClient,
    Client(String),
    Contacts,
    AddContact,
    Contact(String),
    Tasks,
    AddTask,
    Task(String),
    Opportunities,
    AddOpportunity,
    Opportunity(String),
    Reports,
    Calendar,
    Settings,
}

impl Route {
    /// Match a path against the route table.
    ///
    /// One trailing slash is ignored; query strings and fragments are not
    /// expected. Returns `None` for anything outside the table, including
    /// paths with empty segments such as `//`.
    #[must_use]
    pub fn parse(path: &str) -> Option<Self> {
        let rest = path.trim().strip_prefix('/')?;
        if rest.is_empty() {
            return Some(Self::Login);
        }
        let rest = rest.strip_suffix('/').unwrap_or(rest);
        let segments: Vec<&str> = rest.split('/').collect();
        if segments.iter().any(|s| s.is_empty()) {
            return None;
        }

        let route = match segments.as_slice() {
            ["dashboard"] => Self::Dashboard,
            ["reports"] => Self::Reports,
            ["calendar"] => Self::Calendar,
            ["settings"] => Self::Settings,
            ["clients"] => Self::Clients,
            ["clients", "add"] => Self::AddClient,
            ["clients", id] if !id.is_empty() => Self::Client((*id).to_string()),
            ["contacts"] => Self::Contacts,
            ["contacts", "add"] => Self::AddContact,
            ["contacts", id] if !id.is_empty() => Self::Contact((*id).to_string()),
            ["tasks"] => Self::Tasks,
            ["tasks", "add"] => Self::AddTask,
            ["tasks", id] if !id.is_empty() => Self::Task((*id).to_string()),
            ["opportunities"] => Self::Opportunities,
            ["opportunities", "add"] => Self::AddOpportunity,
            ["opportunities", id] if !id.is_empty() => Self::Opportunity((*id).to_string()),
            _ => return None,
        };
        Some(route)
    }

    /// The canonical path for this route.
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Login => "/".to_string(),
            Self::Dashboard => "/dashboard".to_string(),
            Self::Clients => "/clients".to_string(),
            Self::AddClient => "/clients/add".to_string(),
            Self::Client(id) => format!("/clients/{id}"),
            Self::Contacts => "/contacts".to_string(),
            Self::AddContact => "/contacts/add".to_string(),
            Self::Contact(id) => format!("/contacts/{id}"),
            Self::Tasks => "/tasks".to_string(),
            Self::AddTask => "/tasks/add".to_string(),
            Self::Task(id) => format!("/tasks/{id}"),
            Self::Opportunities => "/opportunities".to_string(),
            Self::AddOpportunity => "/opportunities/add".to_string(),
            Self::Opportunity(id) => format!("/opportunities/{id}"),
            Self::Reports => "/reports".to_string(),
            Self::Calendar => "/calendar".to_string(),
            Self::Settings => "/settings".to_string(),
        }
    }

    /// Everything except the login page needs a session.
    #[must_use]
    pub const fn is_protected(&self) -> bool {
        !matches!(self, Self::Login)
    }

    /// Page title shown in the header.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Login => "Login",
            Self::Dashboard => "Dashboard",
            Self::Clients => "Clients",
            Self::AddClient => "Add Client",
            Self::Client(_) => "Client Details",
            Self::Contacts => "Contacts & Leads",
            Self::AddContact => "Add Contact",
            Self::Contact(_) => "Contact Details",
            Self::Tasks => "Tasks",
            Self::AddTask => "Add Task",
            Self::Task(_) => "Task Details",
            Self::Opportunities => "Opportunities",
            Self::AddOpportunity => "Add Opportunity",
            Self::Opportunity(_) => "Opportunity Details",
            Self::Reports => "Reports",
            Self::Calendar => "Calendar",
            Self::Settings => "Settings",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Outcome of evaluating a path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "route", rename_all = "lowercase")]
pub enum Navigation {
    Render(Route),
    Redirect(Route),
    /// The path matched nothing in the table.
    NotFound(String),
}

/// Decide what a route shows for the given session state.
///
/// Protected routes redirect to the login page when logged out; the login
/// page redirects to the dashboard when logged in.
#[must_use]
pub fn gate(route: Route, authenticated: bool) -> Navigation {
    match (route, authenticated) {
        (Route::Login, true) => Navigation::Redirect(Route::Dashboard),
        (route, false) if route.is_protected() => Navigation::Redirect(Route::Login),
        (route, _) => Navigation::Render(route),
    }
}

/// Parse `path` and run it through [`gate`].
#[must_use]
pub fn evaluate(path: &str, authenticated: bool) -> Navigation {
    Route::parse(path).map_or_else(
        || Navigation::NotFound(path.to_string()),
        |route| gate(route, authenticated),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_PATHS: [&str; 17] = [
        "/",
        "/dashboard",
        "/clients",
        "/clients/add",
        "/clients/7",
        "/contacts",
        "/contacts/add",
        "/contacts/3",
        "/tasks",
        "/tasks/add",
        "/tasks/2",
        "/opportunities",
        "/opportunities/add",
        "/opportunities/1730000000000",
        "/reports",
        "/calendar",
        "/settings",
    ];

    #[test]
    fn test_every_path_parses_and_prints_back() {
        for path in ALL_PATHS {
            let route = Route::parse(path).unwrap_or_else(|| panic!("{path} did not parse"));
            assert_eq!(route.path(), path);
        }
    }

    #[test]
    fn test_parse_edges() {
        assert_eq!(Route::parse("/dashboard/"), Some(Route::Dashboard));
        assert_eq!(Route::parse("/contacts/abc"), Some(Route::Contact("abc".into())));
        assert_eq!(Route::parse("/contacts/add"), Some(Route::AddContact));
        assert!(Route::parse("dashboard").is_none());
        assert!(Route::parse("/nowhere").is_none());
        assert!(Route::parse("/tasks/1/edit").is_none());
        assert!(Route::parse("").is_none());
        assert_eq!(Route::parse("/"), Some(Route::Login));
        assert!(Route::parse("//").is_none());
        assert!(Route::parse("/dashboard//").is_none());
        assert!(Route::parse("//dashboard").is_none());
        assert!(Route::parse("/contacts//add").is_none());
    }

    #[test]
    fn test_gate_logged_out() {
        assert_eq!(
            evaluate("/dashboard", false),
            Navigation::Redirect(Route::Login)
        );
        assert_eq!(evaluate("/", false), Navigation::Render(Route::Login));
        for path in &ALL_PATHS[1..] {
            assert_eq!(evaluate(path, false), Navigation::Redirect(Route::Login));
        }
    }

    #[test]
    fn test_gate_logged_in() {
        assert_eq!(evaluate("/", true), Navigation::Redirect(Route::Dashboard));
        assert_eq!(
            evaluate("/tasks/2", true),
            Navigation::Render(Route::Task("2".into()))
        );
    }

    #[test]
    fn test_unknown_path() {
        assert_eq!(
            evaluate("/admin", true),
            Navigation::NotFound("/admin".into())
        );
    }

    #[test]
    fn test_navigation_json() {
        let json = serde_json::to_value(evaluate("/contacts/3", true)).unwrap();
        assert_eq!(json["outcome"], "render");
        assert_eq!(json["route"]["page"], "contact");
        assert_eq!(json["route"]["id"], "3");
    }
}
