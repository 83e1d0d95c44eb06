//! Analytics report.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::model::{Contact, ContactKind, ContactStatus, Opportunity, Priority, Task, TaskStatus};
use crate::query::PipelineStats;
use crate::query::contacts::{by_kind, by_status as contacts_by_status};
use crate::query::tasks::{by_priority, by_status as tasks_by_status};

/// Reporting window label. It names the period the report was requested
/// for; counts always cover the whole collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, clap::ValueEnum)]
pub enum DateRange {
    #[serde(rename = "7days")]
    #[value(name = "7days")]
    Last7Days,
    #[default]
    #[serde(rename = "30days")]
    #[value(name = "30days")]
    Last30Days,
    #[serde(rename = "90days")]
    #[value(name = "90days")]
    Last90Days,
    #[serde(rename = "year")]
    #[value(name = "year")]
    ThisYear,
}

impl DateRange {
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Last7Days => "Last 7 Days",
            Self::Last30Days => "Last 30 Days",
            Self::Last90Days => "Last 90 Days",
            Self::ThisYear => "This Year",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_tasks: usize,
    pub total_contacts: usize,
    pub total_opportunities: usize,
    pub pipeline_value: f64,
    pub weighted_value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskStatusCounts {
    pub pending: usize,
    pub in_progress: usize,
    pub completed: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PriorityCounts {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
    pub urgent: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskBreakdown {
    pub by_status: TaskStatusCounts,
    pub by_priority: PriorityCounts,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TypeCounts {
    pub contacts: usize,
    pub leads: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ActivityCounts {
    pub active: usize,
    pub inactive: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactBreakdown {
    pub by_type: TypeCounts,
    pub by_status: ActivityCounts,
}

/// A point-in-time report over every store.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    /// RFC 3339 with milliseconds, UTC.
    pub generated_at: String,
    pub date_range: DateRange,
    pub summary: Summary,
    pub tasks: TaskBreakdown,
    pub contacts: ContactBreakdown,
    pub pipeline: PipelineStats,
}

impl Report {
    #[must_use]
    pub fn build(
        tasks: &[Task],
        contacts: &[Contact],
        opportunities: &[Opportunity],
        date_range: DateRange,
        now: DateTime<Utc>,
    ) -> Self {
        let pipeline = PipelineStats::from_opportunities(opportunities);
        let status = |s| tasks_by_status(tasks, s).len();
        let priority = |p| by_priority(tasks, p).len();

        Self {
            generated_at: now.to_rfc3339_opts(SecondsFormat::Millis, true),
            date_range,
            summary: Summary {
                total_tasks: tasks.len(),
                total_contacts: contacts.len(),
                total_opportunities: opportunities.len(),
                pipeline_value: pipeline.total_value,
                weighted_value: pipeline.weighted_value,
            },
            tasks: TaskBreakdown {
                by_status: TaskStatusCounts {
                    pending: status(TaskStatus::Pending),
                    in_progress: status(TaskStatus::InProgress),
                    completed: status(TaskStatus::Completed),
                },
                by_priority: PriorityCounts {
                    low: priority(Priority::Low),
                    medium: priority(Priority::Medium),
                    high: priority(Priority::High),
                    urgent: priority(Priority::Urgent),
                },
            },
            contacts: ContactBreakdown {
                by_type: TypeCounts {
                    contacts: by_kind(contacts, ContactKind::Contact).len(),
                    leads: by_kind(contacts, ContactKind::Lead).len(),
                },
                by_status: ActivityCounts {
                    active: contacts_by_status(contacts, ContactStatus::Active).len(),
                    inactive: contacts_by_status(contacts, ContactStatus::Inactive).len(),
                },
            },
            pipeline,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::seed;
    use chrono::TimeZone;

    fn report() -> Report {
        let now = Utc.with_ymd_and_hms(2025, 10, 28, 9, 30, 0).unwrap();
        Report::build(
            &seed::tasks(),
            &seed::contacts(),
            &seed::opportunities(),
            DateRange::default(),
            now,
        )
    }

    #[test]
    fn test_counts_from_seed() {
        let report = report();
        assert_eq!(report.summary.total_tasks, 5);
        assert_eq!(report.summary.total_contacts, 6);
        assert_eq!(report.summary.total_opportunities, 5);
        assert_eq!(
            report.tasks.by_status,
            TaskStatusCounts {
                pending: 3,
                in_progress: 1,
                completed: 1,
            }
        );
        assert_eq!(report.tasks.by_priority.urgent, 1);
        assert_eq!(report.contacts.by_type, TypeCounts { contacts: 3, leads: 3 });
        assert_eq!(report.contacts.by_status.active, 3);
        assert_eq!(report.contacts.by_status.inactive, 0);
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_value(report()).unwrap();
        assert_eq!(json["generatedAt"], "2025-10-28T09:30:00.000Z");
        assert_eq!(json["dateRange"], "30days");
        assert_eq!(json["summary"]["pipelineValue"], 565_000.0);
        assert_eq!(json["tasks"]["byStatus"]["inProgress"], 1);
        assert_eq!(json["contacts"]["byType"]["leads"], 3);
        assert_eq!(json["pipeline"]["byStage"]["proposal"]["count"], 1);
    }

    #[test]
    fn test_empty_stores() {
        let report = Report::build(&[], &[], &[], DateRange::ThisYear, Utc::now());
        assert_eq!(report.summary.total_tasks, 0);
        assert!(report.summary.pipeline_value.abs() < f64::EPSILON);
        assert_eq!(DateRange::ThisYear.label(), "This Year");
    }
}
