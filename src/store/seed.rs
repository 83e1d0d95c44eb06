//! Sample records loaded into fresh stores.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use crate::model::{
    Contact, ContactKind, ContactStatus, Notification, NotificationKind, Opportunity, Priority,
    Stage, Task, TaskStatus, TaskType,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, 0)
        .single()
        .unwrap_or_default()
}

fn tags(list: &[&str]) -> Vec<String> {
    list.iter().map(ToString::to_string).collect()
}

#[allow(clippy::too_many_arguments)]
fn contact(
    id: u64,
    (first_name, last_name): (&str, &str),
    email: &str,
    phone: &str,
    (company, position): (&str, &str),
    kind: ContactKind,
    status: ContactStatus,
    source: &str,
    assigned_to: &str,
    tag_list: &[&str],
    notes: &str,
    created_at: NaiveDate,
    last_contact: NaiveDate,
) -> Contact {
    Contact {
        id,
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        email: email.to_string(),
        phone: phone.to_string(),
        company: company.to_string(),
        position: position.to_string(),
        kind,
        status,
        source: source.to_string(),
        assigned_to: assigned_to.to_string(),
        tags: tags(tag_list),
        notes: notes.to_string(),
        created_at,
        last_contact,
    }
}

/// Six contacts and leads.
#[must_use]
pub fn contacts() -> Vec<Contact> {
    use ContactKind::{Contact as C, Lead as L};
    use ContactStatus::{Active, Contacted, New, Qualified};

    vec![
        contact(
            1,
            ("John", "Doe"),
            "john.doe@example.com",
            "555-0101",
            ("Tech Solutions Inc", "CTO"),
            C,
            Active,
            "website",
            "Sarah Johnson",
            &["vip", "decision-maker"],
            "Met at tech conference 2024",
            date(2024, 1, 15),
            date(2024, 10, 20),
        ),
        contact(
            2,
            ("Jane", "Smith"),
            "jane.smith@example.com",
            "555-0102",
            ("Global Industries", "Marketing Director"),
            L,
            Qualified,
            "referral",
            "Mike Chen",
            &["hot-lead", "enterprise"],
            "Interested in enterprise package",
            date(2024, 2, 10),
            date(2024, 10, 25),
        ),
        contact(
            3,
            ("Robert", "Johnson"),
            "robert.j@example.com",
            "555-0103",
            ("StartupX", "CEO"),
            L,
            New,
            "cold-call",
            "Sarah Johnson",
            &["startup"],
            "Follow up next week",
            date(2024, 10, 1),
            date(2024, 10, 15),
        ),
        contact(
            4,
            ("Emily", "Brown"),
            "emily.brown@example.com",
            "555-0104",
            ("Design Studio Co", "Lead Designer"),
            C,
            Active,
            "linkedin",
            "Mike Chen",
            &["creative"],
            "Potential partnership opportunity",
            date(2024, 3, 20),
            date(2024, 10, 22),
        ),
        contact(
            5,
            ("Michael", "Davis"),
            "michael.d@example.com",
            "555-0105",
            ("Finance Corp", "VP of Operations"),
            L,
            Contacted,
            "trade-show",
            "Sarah Johnson",
            &["finance", "qualified"],
            "Requested demo for next month",
            date(2024, 9, 5),
            date(2024, 10, 18),
        ),
        contact(
            6,
            ("Sarah", "Wilson"),
            "sarah.w@example.com",
            "555-0106",
            ("Health Systems Ltd", "IT Manager"),
            C,
            Active,
            "website",
            "Mike Chen",
            &["healthcare"],
            "Current customer since 2023",
            date(2023, 11, 10),
            date(2024, 10, 26),
        ),
    ]
}

#[allow(clippy::too_many_arguments)]
fn task(
    id: u64,
    (title, description): (&str, &str),
    task_type: TaskType,
    status: TaskStatus,
    priority: Priority,
    assigned_to: &str,
    (contact_id, contact_name): (u64, &str),
    due_date: DateTime<Utc>,
    completed_date: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    notes: &str,
    tag_list: &[&str],
) -> Task {
    Task {
        id,
        title: title.to_string(),
        description: description.to_string(),
        task_type,
        status,
        priority,
        assigned_to: assigned_to.to_string(),
        related_contact: contact_name.to_string(),
        related_contact_id: Some(contact_id),
        due_date,
        completed_date,
        created_at,
        notes: notes.to_string(),
        tags: tags(tag_list),
    }
}

/// Five tasks across every status but cancelled.
#[must_use]
pub fn tasks() -> Vec<Task> {
    vec![
        task(
            1,
            (
                "Follow up with John Smith",
                "Send proposal for new CRM system implementation",
            ),
            TaskType::FollowUp,
            TaskStatus::Pending,
            Priority::High,
            "Sarah Johnson",
            (1, "John Smith"),
            at(2025, 10, 28, 10, 0),
            None,
            at(2025, 10, 25, 8, 30),
            "Discussed budget and timeline during last meeting",
            &["sales", "proposal"],
        ),
        task(
            2,
            (
                "Schedule demo for Acme Corp",
                "Product demonstration for enterprise package",
            ),
            TaskType::Meeting,
            TaskStatus::InProgress,
            Priority::Urgent,
            "Michael Chen",
            (2, "Jane Doe"),
            at(2025, 10, 27, 14, 0),
            None,
            at(2025, 10, 24, 9, 15),
            "Prepare slides and demo environment",
            &["demo", "enterprise"],
        ),
        task(
            3,
            (
                "Send contract to Mike Johnson",
                "Final contract review and signature",
            ),
            TaskType::Email,
            TaskStatus::Completed,
            Priority::Medium,
            "Emily Davis",
            (3, "Mike Johnson"),
            at(2025, 10, 26, 16, 0),
            Some(at(2025, 10, 26, 15, 30)),
            at(2025, 10, 23, 11, 0),
            "Contract signed and filed",
            &["contract", "legal"],
        ),
        task(
            4,
            (
                "Cold call - Tech Startup Inc",
                "Initial outreach for new business opportunity",
            ),
            TaskType::Call,
            TaskStatus::Pending,
            Priority::Low,
            "Sarah Johnson",
            (4, "Sarah Williams"),
            at(2025, 10, 29, 9, 0),
            None,
            at(2025, 10, 25, 10, 0),
            "Found contact through LinkedIn",
            &["cold-call", "prospecting"],
        ),
        task(
            5,
            (
                "Quarterly review meeting",
                "Review Q4 performance and set Q1 goals",
            ),
            TaskType::Meeting,
            TaskStatus::Pending,
            Priority::Medium,
            "Michael Chen",
            (5, "David Brown"),
            at(2025, 10, 30, 11, 0),
            None,
            at(2025, 10, 25, 12, 0),
            "Prepare quarterly reports and analysis",
            &["review", "planning"],
        ),
    ]
}

#[allow(clippy::too_many_arguments)]
fn opportunity(
    id: &str,
    (name, client): (&str, &str),
    value: f64,
    stage: Stage,
    probability: u8,
    expected_close_date: NaiveDate,
    (owner, source): (&str, &str),
    description: &str,
    (created_at, last_updated): (NaiveDate, NaiveDate),
    tag_list: &[&str],
) -> Opportunity {
    Opportunity {
        id: id.to_string(),
        name: name.to_string(),
        client: client.to_string(),
        value,
        stage,
        probability,
        expected_close_date,
        owner: owner.to_string(),
        source: source.to_string(),
        description: description.to_string(),
        tags: tags(tag_list),
        created_at,
        last_updated,
    }
}

/// Five deals, one per open stage plus a won deal.
#[must_use]
pub fn opportunities() -> Vec<Opportunity> {
    vec![
        opportunity(
            "1",
            ("Acme Corp - Digital Transformation", "Acme Corporation"),
            150_000.0,
            Stage::Proposal,
            60,
            date(2025, 12, 15),
            ("John Smith", "Referral"),
            "Complete digital transformation project including cloud migration and process automation",
            (date(2025, 9, 15), date(2025, 10, 20)),
            &["enterprise", "technology"],
        ),
        opportunity(
            "2",
            ("Beta LLC - Financial Advisory", "Beta LLC"),
            75_000.0,
            Stage::Negotiation,
            80,
            date(2025, 11, 30),
            ("Sarah Johnson", "Direct"),
            "Ongoing financial advisory and investment management services",
            (date(2025, 8, 1), date(2025, 10, 25)),
            &["finance", "sme"],
        ),
        opportunity(
            "3",
            ("Globex Inc - Marketing Campaign", "Globex Inc"),
            45_000.0,
            Stage::Qualification,
            40,
            date(2026, 1, 20),
            ("Michael Chen", "Website"),
            "Comprehensive marketing campaign for Q1 2026 product launch",
            (date(2025, 10, 1), date(2025, 10, 26)),
            &["marketing", "campaign"],
        ),
        opportunity(
            "4",
            ("Delta Systems - Software License", "Delta Systems"),
            200_000.0,
            Stage::Prospecting,
            20,
            date(2026, 3, 1),
            ("Emily Wong", "Event"),
            "Enterprise software licensing and implementation services",
            (date(2025, 10, 10), date(2025, 10, 22)),
            &["software", "enterprise"],
        ),
        opportunity(
            "5",
            ("Omega Partners - Consulting Services", "Omega Partners"),
            95_000.0,
            Stage::ClosedWon,
            100,
            date(2025, 10, 15),
            ("David Lee", "Referral"),
            "Strategic consulting services for business expansion",
            (date(2025, 7, 20), date(2025, 10, 15)),
            &["consulting", "strategy"],
        ),
    ]
}

fn notification(id: u64, title: &str, message: &str, time: &str, kind: NotificationKind) -> Notification {
    Notification {
        id,
        title: title.to_string(),
        message: message.to_string(),
        time: time.to_string(),
        read: false,
        kind,
    }
}

/// Three unread notifications, most recent first.
#[must_use]
pub fn notifications() -> Vec<Notification> {
    vec![
        notification(
            1,
            "New Task Assigned",
            "Follow up with Acme Corp regarding contract renewal",
            "5 minutes ago",
            NotificationKind::Task,
        ),
        notification(
            2,
            "Client Update",
            "Globex Inc updated their KYC documents",
            "1 hour ago",
            NotificationKind::Update,
        ),
        notification(
            3,
            "Overdue Task",
            "Task \"Call Beta LLC\" is overdue",
            "2 hours ago",
            NotificationKind::Alert,
        ),
    ]
}
