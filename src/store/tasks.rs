//! Task store.

use std::rc::Rc;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::model::{ContactId, NewTask, Priority, Task, TaskId, TaskPatch, TaskStatus, TaskType};
use crate::query::tasks::{self, TaskStats};
use crate::store::collection::{Collection, Record};
use crate::store::observer::{Change, SubscriptionId};
use crate::store::{parse_numeric_id, seed};

impl Record for Task {
    type Id = TaskId;

    fn id(&self) -> &TaskId {
        &self.id
    }
}

/// In-memory task collection. Not persisted.
#[derive(Debug)]
pub struct TaskStore {
    items: Collection<Task>,
}

impl TaskStore {
    #[must_use]
    pub fn seeded() -> Self {
        Self::with_records(seed::tasks())
    }

    #[must_use]
    pub fn with_records(records: Vec<Task>) -> Self {
        Self {
            items: Collection::new(records),
        }
    }

    #[must_use]
    pub fn list(&self) -> Rc<Vec<Task>> {
        self.items.snapshot()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Append a task with the next id and `createdAt` set to now.
    ///
    /// A task created as completed gets `completedDate = now`.
    pub fn add(&mut self, new: NewTask) -> Task {
        self.add_at(new, Utc::now())
    }

    pub(crate) fn add_at(&mut self, new: NewTask, now: DateTime<Utc>) -> Task {
        let id = self.next_id();
        let task = new.into_task(id, now);
        debug!(id, title = %task.title, "Adding task");
        self.items.push(task.clone());
        task
    }

    /// Merge `patch` into the task with `id`.
    ///
    /// Moving to completed stamps `completedDate`; moving away clears it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TaskNotFound`] if no task has that id.
    pub fn update(&mut self, id: TaskId, patch: TaskPatch) -> Result<Task> {
        self.update_at(id, patch, Utc::now())
    }

    pub(crate) fn update_at(&mut self, id: TaskId, patch: TaskPatch, now: DateTime<Utc>) -> Result<Task> {
        if let Some(updated) = self.items.replace(&id, |t| patch.apply(t, now)) {
            debug!(id, status = updated.status.as_str(), "Updated task");
            return Ok(updated);
        }
        warn!(id, "Update for unknown task");
        Err(Error::TaskNotFound { id: id.to_string() })
    }

    /// Shorthand for setting the status to completed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TaskNotFound`] if no task has that id.
    pub fn complete(&mut self, id: TaskId) -> Result<Task> {
        self.update(id, TaskPatch::status(TaskStatus::Completed))
    }

    pub fn remove(&mut self, id: TaskId) -> Option<Task> {
        let removed = self.items.remove(&id);
        if removed.is_some() {
            debug!(id, "Removed task");
        }
        removed
    }

    #[must_use]
    pub fn get_by_id(&self, id: TaskId) -> Option<Task> {
        self.items.get(&id).cloned()
    }

    /// Look up by a raw (e.g. route) id.
    #[must_use]
    pub fn find(&self, raw_id: &str) -> Option<Task> {
        parse_numeric_id(raw_id).and_then(|id| self.get_by_id(id))
    }

    #[must_use]
    pub fn by_status(&self, status: TaskStatus) -> Vec<Task> {
        owned(tasks::by_status(self.items.as_slice(), status))
    }

    #[must_use]
    pub fn by_priority(&self, priority: Priority) -> Vec<Task> {
        owned(tasks::by_priority(self.items.as_slice(), priority))
    }

    #[must_use]
    pub fn by_type(&self, task_type: TaskType) -> Vec<Task> {
        owned(tasks::by_type(self.items.as_slice(), task_type))
    }

    #[must_use]
    pub fn by_contact(&self, contact_id: ContactId) -> Vec<Task> {
        owned(tasks::by_contact(self.items.as_slice(), contact_id))
    }

    #[must_use]
    pub fn overdue(&self, now: DateTime<Utc>) -> Vec<Task> {
        owned(tasks::overdue(self.items.as_slice(), now))
    }

    #[must_use]
    pub fn upcoming(&self, now: DateTime<Utc>, days: i64) -> Vec<Task> {
        owned(tasks::upcoming(self.items.as_slice(), now, days))
    }

    #[must_use]
    pub fn stats(&self, now: DateTime<Utc>) -> TaskStats {
        TaskStats::from_tasks(self.items.as_slice(), now)
    }

    pub fn subscribe(&mut self, callback: impl Fn(&Change<TaskId>) + 'static) -> SubscriptionId {
        self.items.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.items.unsubscribe(id)
    }

    pub(crate) fn clear_subscribers(&mut self) {
        self.items.clear_subscribers();
    }

    fn next_id(&self) -> TaskId {
        self.items
            .as_slice()
            .iter()
            .map(|t| t.id)
            .max()
            .map_or(1, |max| max + 1)
    }
}

impl Default for TaskStore {
    fn default() -> Self {
        Self::seeded()
    }
}

fn owned(tasks: Vec<&Task>) -> Vec<Task> {
    tasks.into_iter().cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 10, 28, 0, 0, 0).unwrap()
    }

    fn call() -> NewTask {
        NewTask::new("Call Ada", "Sarah Johnson", now() + Duration::days(2))
            .with_type(TaskType::Call)
            .with_contact(1, "John Doe")
    }

    #[test]
    fn test_add_assigns_next_id() {
        let mut store = TaskStore::seeded();
        let task = store.add_at(call(), now());
        assert_eq!(task.id, 6);
        assert_eq!(task.created_at, now());
        assert_eq!(task.status, TaskStatus::Pending);
        assert!(task.completed_date.is_none());
        assert_eq!(store.get_by_id(6), Some(task));
    }

    #[test]
    fn test_add_completed_sets_completed_date() {
        let mut store = TaskStore::with_records(Vec::new());
        let task = store.add_at(call().with_status(TaskStatus::Completed), now());
        assert_eq!(task.id, 1);
        assert_eq!(task.completed_date, Some(now()));
    }

    #[test]
    fn test_completion_round_trip() {
        let mut store = TaskStore::seeded();
        let later = now() + Duration::hours(3);

        let done = store
            .update_at(1, TaskPatch::status(TaskStatus::Completed), later)
            .unwrap();
        assert_eq!(done.completed_date, Some(later));

        let reopened = store
            .update_at(1, TaskPatch::status(TaskStatus::InProgress), later)
            .unwrap();
        assert!(reopened.completed_date.is_none());
        assert_eq!(store.get_by_id(1).unwrap().status, TaskStatus::InProgress);
    }

    #[test]
    fn test_complete_and_missing() {
        let mut store = TaskStore::seeded();
        assert_eq!(store.complete(4).unwrap().status, TaskStatus::Completed);
        assert!(matches!(
            store.complete(40).unwrap_err(),
            Error::TaskNotFound { .. }
        ));
    }

    #[test]
    fn test_remove_and_find() {
        let mut store = TaskStore::seeded();
        assert_eq!(store.find("5").unwrap().title, "Quarterly review meeting");
        assert!(store.remove(5).is_some());
        assert!(store.find("5").is_none());
        assert!(store.remove(5).is_none());
        assert_eq!(store.len(), 4);
    }

    #[test]
    fn test_derived_queries() {
        let store = TaskStore::seeded();
        assert_eq!(store.by_status(TaskStatus::Pending).len(), 3);
        assert_eq!(store.by_priority(Priority::Urgent)[0].id, 2);
        assert_eq!(store.by_type(TaskType::Email)[0].id, 3);
        assert_eq!(store.by_contact(5)[0].id, 5);
        assert_eq!(store.overdue(now()).len(), 1);
        assert_eq!(store.upcoming(now(), 7).len(), 3);
        assert_eq!(store.stats(now()).total, 5);
    }
}
