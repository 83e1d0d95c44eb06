//! Error types for CRM Lite.
//!
//! Provides structured error handling with:
//! - Machine-readable error codes (`ErrorCode`)
//! - Category-based exit codes (2=storage, 3=not_found, 4=validation, 5=auth, etc.)
//! - Retryability flags for scripted callers
//! - Context-aware recovery hints
//! - Structured JSON output for piped / non-TTY consumers

use thiserror::Error;

/// Result type alias for CRM operations.
pub type Result<T> = std::result::Result<T, Error>;

// ── Error Code ────────────────────────────────────────────────

/// Machine-readable error codes grouped by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // Storage (exit 2)
    DatabaseError,
    CorruptValue,

    // Not Found (exit 3)
    ContactNotFound,
    TaskNotFound,
    OpportunityNotFound,
    NotificationNotFound,
    RouteNotFound,

    // Validation (exit 4)
    RequiredField,
    InvalidFormat,
    InvalidValue,
    InvalidArgument,

    // Auth (exit 5)
    NotAuthenticated,

    // Config (exit 7)
    ConfigError,

    // I/O (exit 8)
    IoError,
    JsonError,

    // Internal (exit 1)
    InternalError,
}

impl ErrorCode {
    /// Machine-readable SCREAMING_SNAKE code string.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        match self {
            Self::DatabaseError => "DATABASE_ERROR",
            Self::CorruptValue => "CORRUPT_VALUE",
            Self::ContactNotFound => "CONTACT_NOT_FOUND",
            Self::TaskNotFound => "TASK_NOT_FOUND",
            Self::OpportunityNotFound => "OPPORTUNITY_NOT_FOUND",
            Self::NotificationNotFound => "NOTIFICATION_NOT_FOUND",
            Self::RouteNotFound => "ROUTE_NOT_FOUND",
            Self::RequiredField => "REQUIRED_FIELD",
            Self::InvalidFormat => "INVALID_FORMAT",
            Self::InvalidValue => "INVALID_VALUE",
            Self::InvalidArgument => "INVALID_ARGUMENT",
            Self::NotAuthenticated => "NOT_AUTHENTICATED",
            Self::ConfigError => "CONFIG_ERROR",
            Self::IoError => "IO_ERROR",
            Self::JsonError => "JSON_ERROR",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }

    /// Category-based exit code (1-8).
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::InternalError => 1,
            Self::DatabaseError | Self::CorruptValue => 2,
            Self::ContactNotFound
            | Self::TaskNotFound
            | Self::OpportunityNotFound
            | Self::NotificationNotFound
            | Self::RouteNotFound => 3,
            Self::RequiredField
            | Self::InvalidFormat
            | Self::InvalidValue
            | Self::InvalidArgument => 4,
            Self::NotAuthenticated => 5,
            Self::ConfigError => 7,
            Self::IoError | Self::JsonError => 8,
        }
    }

    /// Whether a caller should retry with corrected input.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::RequiredField
                | Self::InvalidFormat
                | Self::InvalidValue
                | Self::InvalidArgument
                | Self::NotAuthenticated
                | Self::DatabaseError
        )
    }
}

// ── Error Enum ────────────────────────────────────────────────

/// Errors that can occur in CRM operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Not authenticated: {path} requires login")]
    NotAuthenticated { path: String },

    #[error("Contact not found: {id}")]
    ContactNotFound { id: String },

    #[error("Task not found: {id}")]
    TaskNotFound { id: String },

    #[error("Opportunity not found: {id}")]
    OpportunityNotFound { id: String },

    #[error("Notification not found: {id}")]
    NotificationNotFound { id: String },

    #[error("No page at {path}")]
    RouteNotFound { path: String },

    #[error("{field} is required")]
    RequiredField { field: &'static str },

    #[error("Please enter a valid {field}: {message}")]
    InvalidFormat { field: &'static str, message: String },

    #[error("Invalid {kind}: {value}")]
    InvalidValue {
        kind: &'static str,
        value: String,
        /// Closest valid value, when one is near enough to suggest.
        suggestion: Option<String>,
        /// Every accepted spelling, for the hint.
        valid: &'static [&'static str],
    },

    #[error("Stored value under '{key}' is corrupt: {source}")]
    CorruptValue {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Map this error to its structured `ErrorCode`.
    #[must_use]
    pub const fn error_code(&self) -> ErrorCode {
        match self {
            Self::NotAuthenticated { .. } => ErrorCode::NotAuthenticated,
            Self::ContactNotFound { .. } => ErrorCode::ContactNotFound,
            Self::TaskNotFound { .. } => ErrorCode::TaskNotFound,
            Self::OpportunityNotFound { .. } => ErrorCode::OpportunityNotFound,
            Self::NotificationNotFound { .. } => ErrorCode::NotificationNotFound,
            Self::RouteNotFound { .. } => ErrorCode::RouteNotFound,
            Self::RequiredField { .. } => ErrorCode::RequiredField,
            Self::InvalidFormat { .. } => ErrorCode::InvalidFormat,
            Self::InvalidValue { .. } => ErrorCode::InvalidValue,
            Self::CorruptValue { .. } => ErrorCode::CorruptValue,
            Self::Database(_) => ErrorCode::DatabaseError,
            Self::Io(_) => ErrorCode::IoError,
            Self::Json(_) => ErrorCode::JsonError,
            Self::InvalidArgument(_) => ErrorCode::InvalidArgument,
            Self::Config(_) => ErrorCode::ConfigError,
            Self::Other(_) => ErrorCode::InternalError,
        }
    }

    /// Category-based exit code, delegating to the `ErrorCode`.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        self.error_code().exit_code()
    }

    /// Context-aware recovery hint.
    ///
    /// Returns `None` if no actionable suggestion exists.
    #[must_use]
    pub fn hint(&self) -> Option<String> {
        match self {
            Self::NotAuthenticated { .. } => Some(
                "Log in first: crm login you@example.com --password <password>".to_string(),
            ),

            Self::ContactNotFound { id } => Some(format!(
                "No contact with ID '{id}'. Use `crm contact list` to see available contacts."
            )),
            Self::TaskNotFound { id } => Some(format!(
                "No task with ID '{id}'. Use `crm task list` to see available tasks."
            )),
            Self::OpportunityNotFound { id } => Some(format!(
                "No opportunity with ID '{id}'. Use `crm opportunity list` to see the pipeline."
            )),
            Self::NotificationNotFound { id } => Some(format!(
                "No notification with ID '{id}'. Use `crm notification list`."
            )),

            Self::RouteNotFound { .. } => Some(
                "Known pages: /, /dashboard, /clients, /contacts, /tasks, /opportunities, \
                 /reports, /calendar, /settings"
                    .to_string(),
            ),

            Self::InvalidValue {
                suggestion, valid, ..
            } => {
                let mut hint = format!("Valid values: {}", valid.join(", "));
                if let Some(s) = suggestion {
                    hint.push_str(&format!(". Did you mean '{s}'?"));
                }
                Some(hint)
            }

            Self::CorruptValue { key, .. } => Some(format!(
                "Remove the damaged entry with `crm settings clear-data` or delete key '{key}' \
                 from the database."
            )),

            Self::RequiredField { .. }
            | Self::InvalidFormat { .. }
            | Self::Database(_)
            | Self::Io(_)
            | Self::Json(_)
            | Self::InvalidArgument(_)
            | Self::Config(_)
            | Self::Other(_) => None,
        }
    }

    /// Structured JSON representation for machine consumption.
    #[must_use]
    pub fn to_structured_json(&self) -> serde_json::Value {
        let code = self.error_code();
        let mut obj = serde_json::json!({
            "error": {
                "code": code.as_str(),
                "message": self.to_string(),
                "retryable": code.is_retryable(),
                "exit_code": code.exit_code(),
            }
        });

        if let Some(hint) = self.hint() {
            obj["error"]["hint"] = serde_json::Value::String(hint);
        }

        obj
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_by_category() {
        assert_eq!(Error::ContactNotFound { id: "9".into() }.exit_code(), 3);
        assert_eq!(Error::RequiredField { field: "Email" }.exit_code(), 4);
        assert_eq!(
            Error::NotAuthenticated {
                path: "/tasks".into()
            }
            .exit_code(),
            5
        );
        assert_eq!(Error::Other("boom".into()).exit_code(), 1);
    }

    #[test]
    fn test_structured_json_includes_hint() {
        let err = Error::InvalidValue {
            kind: "stage",
            value: "won".into(),
            suggestion: Some("closed-won".into()),
            valid: &["prospecting", "closed-won"],
        };
        let json = err.to_structured_json();
        assert_eq!(json["error"]["code"], "INVALID_VALUE");
        assert_eq!(json["error"]["retryable"], true);
        let hint = json["error"]["hint"].as_str().unwrap();
        assert!(hint.contains("closed-won"));
    }

    #[test]
    fn test_required_field_message() {
        let err = Error::RequiredField { field: "First name" };
        assert_eq!(err.to_string(), "First name is required");
        assert!(err.hint().is_none());
    }
}
