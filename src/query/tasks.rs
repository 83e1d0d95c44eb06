//! Task filters, due-date windows and summary counts.
//!
//! Time-dependent queries take `now` explicitly so callers (and tests) pick
//! the reference instant.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use serde::Serialize;

use crate::model::{ContactId, Priority, Task, TaskStatus, TaskType};

/// Default window for [`upcoming`].
pub const DEFAULT_UPCOMING_DAYS: i64 = 7;

/// Default length of the calendar agenda.
pub const AGENDA_LIMIT: usize = 10;

#[must_use]
pub fn by_status(tasks: &[Task], status: TaskStatus) -> Vec<&Task> {
    tasks.iter().filter(|t| t.status == status).collect()
}

#[must_use]
pub fn by_priority(tasks: &[Task], priority: Priority) -> Vec<&Task> {
    tasks.iter().filter(|t| t.priority == priority).collect()
}

#[must_use]
pub fn by_type(tasks: &[Task], task_type: TaskType) -> Vec<&Task> {
    tasks.iter().filter(|t| t.task_type == task_type).collect()
}

#[must_use]
pub fn by_assignee<'a>(tasks: &'a [Task], assignee: &str) -> Vec<&'a Task> {
    tasks.iter().filter(|t| t.assigned_to == assignee).collect()
}

#[must_use]
pub fn by_contact(tasks: &[Task], contact_id: ContactId) -> Vec<&Task> {
    tasks
        .iter()
        .filter(|t| t.related_contact_id == Some(contact_id))
        .collect()
}

/// Open tasks due before `now`.
#[must_use]
pub fn overdue(tasks: &[Task], now: DateTime<Utc>) -> Vec<&Task> {
    tasks.iter().filter(|t| t.is_overdue(now)).collect()
}

/// Open tasks due between `now` and `now + days`, inclusive.
///
/// A window reaching past the representable range is clamped to it.
#[must_use]
pub fn upcoming(tasks: &[Task], now: DateTime<Utc>, days: i64) -> Vec<&Task> {
    let horizon = Duration::try_days(days)
        .and_then(|window| now.checked_add_signed(window))
        .unwrap_or(if days < 0 {
            DateTime::<Utc>::MIN_UTC
        } else {
            DateTime::<Utc>::MAX_UTC
        });
    tasks
        .iter()
        .filter(|t| t.status.is_open() && t.due_date >= now && t.due_date <= horizon)
        .collect()
}

/// Tasks whose due date falls on `day` (UTC).
#[must_use]
pub fn due_on(tasks: &[Task], day: NaiveDate) -> Vec<&Task> {
    tasks
        .iter()
        .filter(|t| t.due_date.date_naive() == day)
        .collect()
}

/// Tasks due in the given month, grouped by day.
#[must_use]
pub fn due_in_month(tasks: &[Task], year: i32, month: u32) -> BTreeMap<NaiveDate, Vec<&Task>> {
    let mut days: BTreeMap<NaiveDate, Vec<&Task>> = BTreeMap::new();
    for task in tasks {
        let day = task.due_date.date_naive();
        if day.year() == year && day.month() == month {
            days.entry(day).or_default().push(task);
        }
    }
    for list in days.values_mut() {
        list.sort_by_key(|t| t.due_date);
    }
    days
}

/// Not-yet-completed tasks due from `now` on, soonest first.
#[must_use]
pub fn agenda(tasks: &[Task], now: DateTime<Utc>, limit: usize) -> Vec<&Task> {
    let mut list: Vec<&Task> = tasks
        .iter()
        .filter(|t| t.due_date >= now && t.status != TaskStatus::Completed)
        .collect();
    list.sort_by_key(|t| t.due_date);
    list.truncate(limit);
    list
}

/// Case-insensitive match on title, description, assignee or related contact.
#[must_use]
pub fn matches_search(task: &Task, term: &str) -> bool {
    let needle = term.to_lowercase();
    task.title.to_lowercase().contains(&needle)
        || task.description.to_lowercase().contains(&needle)
        || task.assigned_to.to_lowercase().contains(&needle)
        || task.related_contact.to_lowercase().contains(&needle)
}

/// Combined list-page filter. Unset criteria match everything.
#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    pub status: Option<TaskStatus>,
    pub priority: Option<Priority>,
    pub task_type: Option<TaskType>,
    pub assignee: Option<String>,
    pub contact_id: Option<ContactId>,
    pub search: Option<String>,
}

impl TaskFilter {
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        self.status.is_none_or(|s| task.status == s)
            && self.priority.is_none_or(|p| task.priority == p)
            && self.task_type.is_none_or(|t| task.task_type == t)
            && self
                .assignee
                .as_deref()
                .is_none_or(|a| task.assigned_to == a)
            && self
                .contact_id
                .is_none_or(|id| task.related_contact_id == Some(id))
            && self
                .search
                .as_deref()
                .is_none_or(|term| matches_search(task, term))
    }

    #[must_use]
    pub fn apply<'a>(&self, tasks: &'a [Task]) -> Vec<&'a Task> {
        tasks.iter().filter(|t| self.matches(t)).collect()
    }
}

/// Task list header counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskStats {
    pub total: usize,
    pub pending: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub overdue: usize,
}

impl TaskStats {
    #[must_use]
    pub fn from_tasks(tasks: &[Task], now: DateTime<Utc>) -> Self {
        Self {
            total: tasks.len(),
            pending: by_status(tasks, TaskStatus::Pending).len(),
            in_progress: by_status(tasks, TaskStatus::InProgress).len(),
            completed: by_status(tasks, TaskStatus::Completed).len(),
            overdue: overdue(tasks, now).len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::seed;
    use chrono::TimeZone;

    fn at(d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 10, d, h, 0, 0).unwrap()
    }

    #[test]
    fn test_overdue_excludes_closed_tasks() {
        let tasks = seed::tasks();
        // Task 3 (completed) was due 26th 16:00, task 2 (in progress) 27th 14:00.
        let ids: Vec<u64> = overdue(&tasks, at(28, 0)).iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![2]);
    }

    #[test]
    fn test_upcoming_window() {
        let tasks = seed::tasks();
        let ids: Vec<u64> = upcoming(&tasks, at(28, 0), 1).iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1]);

        let week: Vec<u64> = upcoming(&tasks, at(28, 0), DEFAULT_UPCOMING_DAYS)
            .iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(week, vec![1, 4, 5]);
    }

    #[test]
    fn test_upcoming_huge_window_is_clamped() {
        let tasks = seed::tasks();
        let all: Vec<u64> = upcoming(&tasks, at(28, 0), 1_000_000_000)
            .iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(all, vec![1, 4, 5]);
        assert_eq!(upcoming(&tasks, at(28, 0), i64::MAX).len(), 3);
        assert!(upcoming(&tasks, at(28, 0), i64::MIN).is_empty());
    }

    #[test]
    fn test_agenda_sorted_and_limited() {
        let tasks = seed::tasks();
        let ids: Vec<u64> = agenda(&tasks, at(27, 0), 3).iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![2, 1, 4]);
    }

    #[test]
    fn test_calendar_grouping() {
        let tasks = seed::tasks();
        let month = due_in_month(&tasks, 2025, 10);
        assert_eq!(month.len(), 5);
        let day = NaiveDate::from_ymd_opt(2025, 10, 28).unwrap();
        assert_eq!(month[&day][0].id, 1);
        assert_eq!(due_on(&tasks, day).len(), 1);
        assert!(due_in_month(&tasks, 2025, 11).is_empty());
    }

    #[test]
    fn test_filter_and_stats() {
        let tasks = seed::tasks();
        let filter = TaskFilter {
            status: Some(TaskStatus::Pending),
            assignee: Some("Sarah Johnson".into()),
            ..TaskFilter::default()
        };
        assert_eq!(filter.apply(&tasks).len(), 2);

        let search = TaskFilter {
            search: Some("david".into()),
            ..TaskFilter::default()
        };
        assert_eq!(search.apply(&tasks)[0].id, 5);

        assert_eq!(by_contact(&tasks, 3)[0].id, 3);
        assert_eq!(by_priority(&tasks, Priority::Medium).len(), 2);
        assert_eq!(by_type(&tasks, TaskType::Meeting).len(), 2);

        let stats = TaskStats::from_tasks(&tasks, at(28, 0));
        assert_eq!(
            stats,
            TaskStats {
                total: 5,
                pending: 3,
                in_progress: 1,
                completed: 1,
                overdue: 1,
            }
        );
    }
}
