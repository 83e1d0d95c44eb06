//! Notification model.

use serde::{Deserialize, Serialize};

/// Time-derived numeric identifier (Unix milliseconds at creation).
pub type NotificationId = u64;

/// Label given to freshly added notifications.
pub const JUST_NOW: &str = "Just now";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Task,
    Update,
    Alert,
}

impl NotificationKind {
    pub const ALL: [Self; 3] = [Self::Task, Self::Update, Self::Alert];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Task => "task",
            Self::Update => "update",
            Self::Alert => "alert",
        }
    }

    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(s.trim()))
    }
}

impl Default for NotificationKind {
    fn default() -> Self {
        Self::Update
    }
}

/// An in-app notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    pub title: String,
    pub message: String,
    /// Relative-time label such as "5 minutes ago".
    pub time: String,
    pub read: bool,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
}

/// Input for a new notification. It is always stored unread.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewNotification {
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
}

impl NewNotification {
    pub fn new(title: &str, message: &str, kind: NotificationKind) -> Self {
        Self {
            title: title.to_string(),
            message: message.to_string(),
            kind,
        }
    }

    pub(crate) fn into_notification(self, id: NotificationId) -> Notification {
        Notification {
            id,
            title: self.title,
            message: self.message,
            time: JUST_NOW.to_string(),
            read: false,
            kind: self.kind,
        }
    }
}

/// Partial update for a notification.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationPatch {
    pub title: Option<String>,
    pub message: Option<String>,
    pub read: Option<bool>,
    pub kind: Option<NotificationKind>,
}

impl NotificationPatch {
    #[must_use]
    pub fn apply(self, n: &Notification) -> Notification {
        let mut next = n.clone();
        if let Some(v) = self.title {
            next.title = v;
        }
        if let Some(v) = self.message {
            next.message = v;
        }
        if let Some(v) = self.read {
            next.read = v;
        }
        if let Some(v) = self.kind {
            next.kind = v;
        }
        next
    }
}
