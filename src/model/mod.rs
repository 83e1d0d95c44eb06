//! Data models for CRM Lite.
//!
//! This module contains all domain records:
//! - Contact (contacts and leads)
//! - Task
//! - Opportunity
//! - Notification
//! - Settings and Theme

pub mod contact;
pub mod notification;
pub mod opportunity;
pub mod settings;
pub mod task;

pub use contact::{Contact, ContactId, ContactKind, ContactPatch, ContactStatus, NewContact};
pub use notification::{
    NewNotification, Notification, NotificationId, NotificationKind, NotificationPatch,
};
pub use opportunity::{NewOpportunity, Opportunity, OpportunityId, OpportunityPatch, Stage};
pub use settings::{Settings, Theme};
pub use task::{NewTask, Priority, Task, TaskId, TaskPatch, TaskStatus, TaskType};
