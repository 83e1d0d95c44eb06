//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::export::DateRange;

pub mod commands;

/// CRM Lite - contacts, tasks and a sales pipeline from the terminal
#[derive(Parser, Debug)]
#[command(name = "crm", author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Database path (default: ~/.crm-lite/data/crm.db)
    #[arg(long, global = true, env = "CRM_DB")]
    pub db: Option<PathBuf>,

    /// Keep all state in memory for this run only
    #[arg(long, global = true)]
    pub ephemeral: bool,

    /// Simulated latency before add/update submissions, in milliseconds
    #[arg(long, global = true, env = "CRM_LATENCY_MS", default_value_t = 0)]
    pub latency_ms: u64,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Output only the ID/key of created or changed records
    #[arg(long, global = true)]
    pub silent: bool,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (no output except errors)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log in (any non-empty email and password)
    Login {
        /// Email address
        email: String,

        /// Password
        #[arg(long, short, env = "CRM_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Log out and forget the session
    Logout,

    /// Dashboard summary
    Status,

    /// Show what a path would render
    Route {
        /// Path such as /dashboard or /contacts/3
        path: String,
    },

    /// Contacts and leads
    Contact {
        #[command(subcommand)]
        command: ContactCommands,
    },

    /// Tasks
    Task {
        #[command(subcommand)]
        command: TaskCommands,
    },

    /// Sales opportunities
    Opportunity {
        #[command(subcommand)]
        command: OpportunityCommands,
    },

    /// Notifications
    Notification {
        #[command(subcommand)]
        command: NotificationCommands,
    },

    /// Tasks by day, plus the upcoming agenda
    Calendar(CalendarArgs),

    /// Export an analytics report
    Report(ReportArgs),

    /// Export a backup of stored data
    Backup {
        /// Directory to write into (default: current directory)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Preferences and settings
    Settings {
        #[command(subcommand)]
        command: SettingsCommands,
    },

    /// Interactive shell keeping one session alive
    Shell,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Print version information
    Version,
}

/// Supported shells for completions.
#[derive(clap::ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ============================================================================
// Contact Commands
// ============================================================================

#[derive(Subcommand, Debug)]
pub enum ContactCommands {
    /// List contacts
    List(ContactListArgs),

    /// Show one contact
    Show {
        /// Contact ID
        id: String,
    },

    /// Add a contact
    Add(ContactAddArgs),

    /// Update a contact
    Update(ContactUpdateArgs),

    /// Delete a contact
    Delete {
        /// Contact ID
        id: String,
    },
}

#[derive(Args, Debug, Default)]
pub struct ContactListArgs {
    /// Filter by type (contact, lead)
    #[arg(long = "type", short = 't')]
    pub kind: Option<String>,

    /// Filter by status (new, contacted, qualified, active, inactive)
    #[arg(long, short)]
    pub status: Option<String>,

    /// Search name, email, company or phone
    #[arg(long)]
    pub search: Option<String>,
}

#[derive(Args, Debug)]
pub struct ContactAddArgs {
    /// First name
    pub first_name: String,

    /// Last name
    pub last_name: String,

    #[arg(long, short)]
    pub email: String,

    #[arg(long, short)]
    pub company: String,

    #[arg(long, default_value = "")]
    pub phone: String,

    #[arg(long, default_value = "")]
    pub position: String,

    /// Type (contact, lead)
    #[arg(long = "type", short = 't', default_value = "contact")]
    pub kind: String,

    /// Status (new, contacted, qualified, active, inactive)
    #[arg(long, short, default_value = "new")]
    pub status: String,

    #[arg(long, default_value = "")]
    pub source: String,

    #[arg(long, default_value = "")]
    pub assigned_to: String,

    /// Comma-separated tags
    #[arg(long, value_delimiter = ',')]
    pub tags: Vec<String>,

    #[arg(long, default_value = "")]
    pub notes: String,
}

#[derive(Args, Debug)]
pub struct ContactUpdateArgs {
    /// Contact ID
    pub id: String,

    #[arg(long)]
    pub first_name: Option<String>,

    #[arg(long)]
    pub last_name: Option<String>,

    #[arg(long, short)]
    pub email: Option<String>,

    #[arg(long, short)]
    pub company: Option<String>,

    #[arg(long)]
    pub phone: Option<String>,

    #[arg(long)]
    pub position: Option<String>,

    #[arg(long = "type", short = 't')]
    pub kind: Option<String>,

    #[arg(long, short)]
    pub status: Option<String>,

    #[arg(long)]
    pub source: Option<String>,

    #[arg(long)]
    pub assigned_to: Option<String>,

    /// Replace tags (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub tags: Option<Vec<String>>,

    #[arg(long)]
    pub notes: Option<String>,

    /// Last contact date (YYYY-MM-DD)
    #[arg(long)]
    pub last_contact: Option<String>,
}

// ============================================================================
// Task Commands
// ============================================================================

#[derive(Subcommand, Debug)]
pub enum TaskCommands {
    /// List tasks
    List(TaskListArgs),

    /// Show one task
    Show {
        /// Task ID
        id: String,
    },

    /// Add a task
    Add(TaskAddArgs),

    /// Update a task
    Update(TaskUpdateArgs),

    /// Mark a task completed
    Complete {
        /// Task ID
        id: String,
    },

    /// Delete a task
    Delete {
        /// Task ID
        id: String,
    },
}

#[derive(Args, Debug, Default)]
pub struct TaskListArgs {
    /// Filter by status (pending, in-progress, completed, cancelled)
    #[arg(long, short)]
    pub status: Option<String>,

    /// Filter by priority (low, medium, high, urgent)
    #[arg(long, short)]
    pub priority: Option<String>,

    /// Filter by type (task, call, meeting, email, follow-up)
    #[arg(long = "type", short = 't')]
    pub task_type: Option<String>,

    /// Filter by assignee
    #[arg(long)]
    pub assignee: Option<String>,

    /// Filter by related contact ID
    #[arg(long)]
    pub contact: Option<u64>,

    /// Search title, description, assignee or contact
    #[arg(long)]
    pub search: Option<String>,

    /// Only open tasks past their due date
    #[arg(long, conflicts_with = "upcoming")]
    pub overdue: bool,

    /// Only open tasks due within this many days
    #[arg(long, num_args = 0..=1, default_missing_value = "7")]
    pub upcoming: Option<i64>,
}

#[derive(Args, Debug)]
pub struct TaskAddArgs {
    /// Task title
    pub title: String,

    /// Assignee
    #[arg(long, short)]
    pub assigned_to: String,

    /// Due date (YYYY-MM-DD, YYYY-MM-DDTHH:MM, or RFC 3339)
    #[arg(long, short)]
    pub due: String,

    #[arg(long, default_value = "")]
    pub description: String,

    /// Type (task, call, meeting, email, follow-up)
    #[arg(long = "type", short = 't', default_value = "task")]
    pub task_type: String,

    /// Status (pending, in-progress, completed, cancelled)
    #[arg(long, short, default_value = "pending")]
    pub status: String,

    /// Priority (low, medium, high, urgent)
    #[arg(long, short, default_value = "medium")]
    pub priority: String,

    /// Related contact ID
    #[arg(long)]
    pub contact: Option<u64>,

    #[arg(long, default_value = "")]
    pub notes: String,

    /// Comma-separated tags
    #[arg(long, value_delimiter = ',')]
    pub tags: Vec<String>,
}

#[derive(Args, Debug)]
pub struct TaskUpdateArgs {
    /// Task ID
    pub id: String,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long = "type", short = 't')]
    pub task_type: Option<String>,

    #[arg(long, short)]
    pub status: Option<String>,

    #[arg(long, short)]
    pub priority: Option<String>,

    #[arg(long, short)]
    pub assigned_to: Option<String>,

    /// Due date (YYYY-MM-DD, YYYY-MM-DDTHH:MM, or RFC 3339)
    #[arg(long, short)]
    pub due: Option<String>,

    /// Related contact ID
    #[arg(long, conflicts_with = "unlink_contact")]
    pub contact: Option<u64>,

    /// Remove the related contact
    #[arg(long)]
    pub unlink_contact: bool,

    #[arg(long)]
    pub notes: Option<String>,

    /// Replace tags (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub tags: Option<Vec<String>>,
}

// ============================================================================
// Opportunity Commands
// ============================================================================

#[derive(Subcommand, Debug)]
pub enum OpportunityCommands {
    /// List opportunities
    List {
        /// Filter by stage
        #[arg(long, short)]
        stage: Option<String>,

        /// Search name or client
        #[arg(long)]
        search: Option<String>,
    },

    /// Show one opportunity
    Show {
        /// Opportunity ID
        id: String,
    },

    /// Add an opportunity
    Add(OpportunityAddArgs),

    /// Update an opportunity
    Update(OpportunityUpdateArgs),

    /// Delete an opportunity
    Delete {
        /// Opportunity ID
        id: String,
    },

    /// Pipeline totals by stage
    Pipeline,
}

#[derive(Args, Debug)]
pub struct OpportunityAddArgs {
    /// Deal name
    pub name: String,

    #[arg(long, short)]
    pub client: String,

    /// Deal value
    #[arg(long)]
    pub value: f64,

    /// Expected close date (YYYY-MM-DD)
    #[arg(long, short = 'd')]
    pub close_date: String,

    #[arg(long, short)]
    pub owner: String,

    /// Stage (prospecting, qualification, proposal, negotiation, closed-won, closed-lost)
    #[arg(long, short, default_value = "prospecting")]
    pub stage: String,

    /// Win probability, 0-100
    #[arg(long, short, default_value_t = 20)]
    pub probability: u8,

    #[arg(long, default_value = "")]
    pub source: String,

    #[arg(long, default_value = "")]
    pub description: String,

    /// Comma-separated tags
    #[arg(long, value_delimiter = ',')]
    pub tags: Vec<String>,
}

#[derive(Args, Debug)]
pub struct OpportunityUpdateArgs {
    /// Opportunity ID
    pub id: String,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long, short)]
    pub client: Option<String>,

    #[arg(long)]
    pub value: Option<f64>,

    #[arg(long, short)]
    pub stage: Option<String>,

    #[arg(long, short)]
    pub probability: Option<u8>,

    /// Expected close date (YYYY-MM-DD)
    #[arg(long, short = 'd')]
    pub close_date: Option<String>,

    #[arg(long, short)]
    pub owner: Option<String>,

    #[arg(long)]
    pub source: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    /// Replace tags (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub tags: Option<Vec<String>>,
}

// ============================================================================
// Notification Commands
// ============================================================================

#[derive(Subcommand, Debug)]
pub enum NotificationCommands {
    /// List notifications, newest first
    List {
        /// Only unread ones
        #[arg(long)]
        unread: bool,
    },

    /// Add a notification
    Add {
        title: String,

        message: String,

        /// Type (task, update, alert)
        #[arg(long = "type", short = 't', default_value = "update")]
        kind: String,
    },

    /// Mark one notification read
    Read {
        /// Notification ID
        id: u64,
    },

    /// Mark every notification read
    ReadAll,

    /// Delete one notification
    Delete {
        /// Notification ID
        id: u64,
    },

    /// Delete every notification
    Clear,
}

// ============================================================================
// Calendar / Report
// ============================================================================

#[derive(Args, Debug, Default)]
pub struct CalendarArgs {
    /// Month to show (YYYY-MM, default: current month)
    #[arg(long, short, conflicts_with = "day")]
    pub month: Option<String>,

    /// Single day to show (YYYY-MM-DD)
    #[arg(long, short)]
    pub day: Option<String>,

    /// Maximum agenda entries
    #[arg(long, short, default_value_t = crate::query::tasks::AGENDA_LIMIT)]
    pub limit: usize,
}

#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Reporting window label
    #[arg(long, short, value_enum, default_value_t)]
    pub range: DateRange,

    /// Directory to write into (default: current directory)
    #[arg(long, short, conflicts_with = "stdout")]
    pub output: Option<PathBuf>,

    /// Print the report instead of writing a file
    #[arg(long)]
    pub stdout: bool,
}

// ============================================================================
// Settings Commands
// ============================================================================

#[derive(Subcommand, Debug)]
pub enum SettingsCommands {
    /// Show settings and display preferences
    Show,

    /// Set the theme, or toggle it when no value is given
    Theme {
        /// light or dark
        value: Option<String>,
    },

    /// Show or set whether the sidebar is expanded
    Sidebar {
        /// true or false
        #[arg(action = clap::ArgAction::Set)]
        expanded: Option<bool>,
    },

    /// Set one settings field by name (e.g. currency, weeklyReports)
    Set {
        field: String,
        value: String,
    },

    /// Remove stored clients, contacts, tasks and opportunities
    ClearData {
        /// Skip the confirmation requirement
        #[arg(long)]
        yes: bool,
    },
}
