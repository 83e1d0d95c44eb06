//! Task model.
//!
//! Tasks are follow-ups, calls, meetings and emails assigned to a team
//! member, optionally tied to a contact.
//!
//! `completed_date` is set exactly when `status` is [`TaskStatus::Completed`];
//! [`Task::settle_completion`] re-derives it after every change.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::contact::ContactId;

/// Numeric task identifier.
pub type TaskId = u64;

/// Kind of activity a task represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskType {
    Task,
    Call,
    Meeting,
    Email,
    FollowUp,
}

impl TaskType {
    pub const ALL: [Self; 5] = [
        Self::Task,
        Self::Call,
        Self::Meeting,
        Self::Email,
        Self::FollowUp,
    ];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Task => "task",
            Self::Call => "call",
            Self::Meeting => "meeting",
            Self::Email => "email",
            Self::FollowUp => "follow-up",
        }
    }

    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(s.trim()))
    }
}

impl Default for TaskType {
    fn default() -> Self {
        Self::Task
    }
}

/// Lifecycle state of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

impl TaskStatus {
    pub const ALL: [Self; 4] = [
        Self::Pending,
        Self::InProgress,
        Self::Completed,
        Self::Cancelled,
    ];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(s.trim()))
    }

    /// Completed and cancelled tasks are never overdue or upcoming.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        !matches!(self, Self::Completed | Self::Cancelled)
    }
}

impl Default for TaskStatus {
    fn default() -> Self {
        Self::Pending
    }
}

/// Task urgency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
    Urgent,
}

impl Priority {
    pub const ALL: [Self; 4] = [Self::Low, Self::Medium, Self::High, Self::Urgent];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Urgent => "urgent",
        }
    }

    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(s.trim()))
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self::Medium
    }
}

/// A unit of follow-up work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type")]
    pub task_type: TaskType,
    pub status: TaskStatus,
    pub priority: Priority,
    pub assigned_to: String,
    /// Denormalized display name of the related contact.
    #[serde(default)]
    pub related_contact: String,
    #[serde(default)]
    pub related_contact_id: Option<ContactId>,
    pub due_date: DateTime<Utc>,
    pub completed_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Task {
    /// Re-derive `completed_date` from `status`.
    ///
    /// Completed tasks keep an existing stamp or get `now`; any other status
    /// clears it.
    pub fn settle_completion(&mut self, now: DateTime<Utc>) {
        if self.status == TaskStatus::Completed {
            if self.completed_date.is_none() {
                self.completed_date = Some(now);
            }
        } else {
            self.completed_date = None;
        }
    }

    /// Open and due strictly before `now`.
    #[must_use]
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.status.is_open() && self.due_date < now
    }
}

/// Input for creating a task; the store assigns id and timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub task_type: TaskType,
    pub status: TaskStatus,
    pub priority: Priority,
    pub assigned_to: String,
    pub related_contact: String,
    pub related_contact_id: Option<ContactId>,
    pub due_date: DateTime<Utc>,
    pub notes: String,
    pub tags: Vec<String>,
}

impl NewTask {
    /// Create task input with the required form fields.
    pub fn new(title: &str, assigned_to: &str, due_date: DateTime<Utc>) -> Self {
        Self {
            title: title.to_string(),
            description: String::new(),
            task_type: TaskType::default(),
            status: TaskStatus::default(),
            priority: Priority::default(),
            assigned_to: assigned_to.to_string(),
            related_contact: String::new(),
            related_contact_id: None,
            due_date,
            notes: String::new(),
            tags: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_type(mut self, task_type: TaskType) -> Self {
        self.task_type = task_type;
        self
    }

    #[must_use]
    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    #[must_use]
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    /// Link to a contact by id, carrying its display name.
    #[must_use]
    pub fn with_contact(mut self, id: ContactId, name: &str) -> Self {
        self.related_contact_id = Some(id);
        self.related_contact = name.to_string();
        self
    }

    #[must_use]
    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    pub(crate) fn into_task(self, id: TaskId, now: DateTime<Utc>) -> Task {
        let mut task = Task {
            id,
            title: self.title,
            description: self.description,
            task_type: self.task_type,
            status: self.status,
            priority: self.priority,
            assigned_to: self.assigned_to,
            related_contact: self.related_contact,
            related_contact_id: self.related_contact_id,
            due_date: self.due_date,
            completed_date: None,
            created_at: now,
            notes: self.notes,
            tags: self.tags,
        };
        task.settle_completion(now);
        task
    }
}

/// Partial update for a task. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub task_type: Option<TaskType>,
    pub status: Option<TaskStatus>,
    pub priority: Option<Priority>,
    pub assigned_to: Option<String>,
    /// `Some(None)` unlinks the contact.
    pub related_contact: Option<Option<(ContactId, String)>>,
    pub due_date: Option<DateTime<Utc>>,
    pub completed_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl TaskPatch {
    /// Shorthand for a status-only change.
    #[must_use]
    pub fn status(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    /// Merge over `task` and settle the completion stamp against `now`.
    #[must_use]
    pub fn apply(self, task: &Task, now: DateTime<Utc>) -> Task {
        let mut next = task.clone();
        if let Some(v) = self.title {
            next.title = v;
        }
        if let Some(v) = self.description {
            next.description = v;
        }
        if let Some(v) = self.task_type {
            next.task_type = v;
        }
        if let Some(v) = self.status {
            next.status = v;
        }
        if let Some(v) = self.priority {
            next.priority = v;
        }
        if let Some(v) = self.assigned_to {
            next.assigned_to = v;
        }
        if let Some(link) = self.related_contact {
            match link {
                Some((id, name)) => {
                    next.related_contact_id = Some(id);
                    next.related_contact = name;
                }
                None => {
                    next.related_contact_id = None;
                    next.related_contact.clear();
                }
            }
        }
        if let Some(v) = self.due_date {
            next.due_date = v;
        }
        if let Some(v) = self.completed_date {
            next.completed_date = Some(v);
        }
        if let Some(v) = self.notes {
            next.notes = v;
        }
        if let Some(v) = self.tags {
            next.tags = v;
        }
        next.settle_completion(now);
        next
    }
}
