//! Form-layer validation and forgiving enum parsing.
//!
//! Stores accept whatever they are given; the checks here run before a
//! mutation reaches them. Enumerations resolve in three tiers:
//! exact match → synonym lookup → error with a closest-match suggestion.

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::error::{Error, Result};
use crate::model::{
    ContactKind, ContactPatch, ContactStatus, NewContact, NewOpportunity, NewTask,
    NotificationKind, OpportunityPatch, Priority, Stage, TaskStatus, TaskType, Theme,
};

// ── Accepted spellings ───────────────────────────────────────

pub const CONTACT_KINDS: &[&str] = &["contact", "lead"];
pub const CONTACT_STATUSES: &[&str] = &["new", "contacted", "qualified", "active", "inactive"];
pub const TASK_TYPES: &[&str] = &["task", "call", "meeting", "email", "follow-up"];
pub const TASK_STATUSES: &[&str] = &["pending", "in-progress", "completed", "cancelled"];
pub const PRIORITIES: &[&str] = &["low", "medium", "high", "urgent"];
pub const STAGES: &[&str] = &[
    "prospecting",
    "qualification",
    "proposal",
    "negotiation",
    "closed-won",
    "closed-lost",
];
pub const NOTIFICATION_KINDS: &[&str] = &["task", "update", "alert"];
pub const THEMES: &[&str] = &["light", "dark"];

// ── Synonym maps ─────────────────────────────────────────────

static CONTACT_KIND_SYNONYMS: LazyLock<HashMap<&str, &str>> = LazyLock::new(|| {
    [
        ("prospect", "lead"),
        ("customer", "contact"),
        ("client", "contact"),
        ("person", "contact"),
    ]
    .into_iter()
    .collect()
});

static CONTACT_STATUS_SYNONYMS: LazyLock<HashMap<&str, &str>> = LazyLock::new(|| {
    [
        ("fresh", "new"),
        ("reached", "contacted"),
        ("touched", "contacted"),
        ("hot", "qualified"),
        ("engaged", "active"),
        ("customer", "active"),
        ("dormant", "inactive"),
        ("cold", "inactive"),
        ("lost", "inactive"),
    ]
    .into_iter()
    .collect()
});

static TASK_TYPE_SYNONYMS: LazyLock<HashMap<&str, &str>> = LazyLock::new(|| {
    [
        ("followup", "follow-up"),
        ("phone", "call"),
        ("phone-call", "call"),
        ("meet", "meeting"),
        ("demo", "meeting"),
        ("mail", "email"),
        ("e-mail", "email"),
        ("todo", "task"),
        ("item", "task"),
    ]
    .into_iter()
    .collect()
});

static TASK_STATUS_SYNONYMS: LazyLock<HashMap<&str, &str>> = LazyLock::new(|| {
    [
        ("done", "completed"),
        ("complete", "completed"),
        ("finished", "completed"),
        ("closed", "completed"),
        ("wip", "in-progress"),
        ("started", "in-progress"),
        ("working", "in-progress"),
        ("active", "in-progress"),
        ("todo", "pending"),
        ("open", "pending"),
        ("new", "pending"),
        ("canceled", "cancelled"),
        ("dropped", "cancelled"),
        ("abandoned", "cancelled"),
    ]
    .into_iter()
    .collect()
});

static PRIORITY_SYNONYMS: LazyLock<HashMap<&str, &str>> = LazyLock::new(|| {
    [
        ("critical", "urgent"),
        ("crit", "urgent"),
        ("asap", "urgent"),
        ("highest", "urgent"),
        ("important", "high"),
        ("normal", "medium"),
        ("default", "medium"),
        ("med", "medium"),
        ("minor", "low"),
        ("lowest", "low"),
    ]
    .into_iter()
    .collect()
});

static STAGE_SYNONYMS: LazyLock<HashMap<&str, &str>> = LazyLock::new(|| {
    [
        ("won", "closed-won"),
        ("win", "closed-won"),
        ("lost", "closed-lost"),
        ("loss", "closed-lost"),
        ("prospect", "prospecting"),
        ("lead", "prospecting"),
        ("qualify", "qualification"),
        ("qualified", "qualification"),
        ("quote", "proposal"),
        ("proposed", "proposal"),
        ("negotiating", "negotiation"),
    ]
    .into_iter()
    .collect()
});

static NO_SYNONYMS: LazyLock<HashMap<&str, &str>> = LazyLock::new(HashMap::new);

// ── Enum parsing ─────────────────────────────────────────────

/// Lowercase, trim, and fold spaces and underscores into hyphens.
fn canonical(input: &str) -> String {
    input
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| if c == ' ' || c == '_' { '-' } else { c })
        .collect()
}

fn resolve<T>(
    kind: &'static str,
    input: &str,
    valid: &'static [&'static str],
    synonyms: &HashMap<&str, &str>,
    parse: impl Fn(&str) -> Option<T>,
) -> Result<T> {
    let key = canonical(input);

    if let Some(value) = parse(&key) {
        return Ok(value);
    }
    if let Some(value) = synonyms.get(key.as_str()).and_then(|c| parse(c)) {
        return Ok(value);
    }

    Err(Error::InvalidValue {
        kind,
        value: input.to_string(),
        suggestion: find_closest_match(&key, valid, synonyms),
        valid,
    })
}

/// Parse a contact type.
///
/// # Errors
///
/// Returns [`Error::InvalidValue`] for an unknown value.
pub fn contact_kind(input: &str) -> Result<ContactKind> {
    resolve("contact type", input, CONTACT_KINDS, &CONTACT_KIND_SYNONYMS, ContactKind::parse)
}

/// Parse a contact status.
///
/// # Errors
///
/// Returns [`Error::InvalidValue`] for an unknown value.
pub fn contact_status(input: &str) -> Result<ContactStatus> {
    resolve(
        "contact status",
        input,
        CONTACT_STATUSES,
        &CONTACT_STATUS_SYNONYMS,
        ContactStatus::parse,
    )
}

/// Parse a task type.
///
/// # Errors
///
/// Returns [`Error::InvalidValue`] for an unknown value.
pub fn task_type(input: &str) -> Result<TaskType> {
    resolve("task type", input, TASK_TYPES, &TASK_TYPE_SYNONYMS, TaskType::parse)
}

/// Parse a task status.
///
/// # Errors
///
/// Returns [`Error::InvalidValue`] for an unknown value.
pub fn task_status(input: &str) -> Result<TaskStatus> {
    resolve("task status", input, TASK_STATUSES, &TASK_STATUS_SYNONYMS, TaskStatus::parse)
}

/// Parse a task priority.
///
/// # Errors
///
/// Returns [`Error::InvalidValue`] for an unknown value.
pub fn priority(input: &str) -> Result<Priority> {
    resolve("priority", input, PRIORITIES, &PRIORITY_SYNONYMS, Priority::parse)
}

/// Parse a pipeline stage.
///
/// # Errors
///
/// Returns [`Error::InvalidValue`] for an unknown value.
pub fn stage(input: &str) -> Result<Stage> {
    resolve("stage", input, STAGES, &STAGE_SYNONYMS, Stage::parse)
}

/// Parse a notification type.
///
/// # Errors
///
/// Returns [`Error::InvalidValue`] for an unknown value.
pub fn notification_kind(input: &str) -> Result<NotificationKind> {
    resolve(
        "notification type",
        input,
        NOTIFICATION_KINDS,
        &NO_SYNONYMS,
        NotificationKind::parse,
    )
}

/// Parse a theme name. Unlike the stored value, unknown names are rejected.
///
/// # Errors
///
/// Returns [`Error::InvalidValue`] for anything but light or dark.
pub fn theme(input: &str) -> Result<Theme> {
    resolve("theme", input, THEMES, &NO_SYNONYMS, |s| match s {
        "light" => Some(Theme::Light),
        "dark" => Some(Theme::Dark),
        _ => None,
    })
}

/// Closest valid value across the valid set and synonyms, within an edit
/// distance of 3.
fn find_closest_match(
    input: &str,
    valid: &[&str],
    synonyms: &HashMap<&str, &str>,
) -> Option<String> {
    let mut best: Option<(&str, usize)> = None;

    let mut synonym_keys: Vec<&str> = synonyms.keys().copied().collect();
    synonym_keys.sort_unstable();

    for v in valid.iter().copied().chain(synonym_keys) {
        let dist = levenshtein_distance(input, v);
        if dist <= 3 && best.is_none_or(|(_, d)| dist < d) {
            let target = synonyms.get(v).copied().unwrap_or(v);
            best = Some((target, dist));
        }
    }

    best.map(|(v, _)| v.to_string())
}

/// Levenshtein edit distance between two strings.
#[must_use]
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

// ── Field checks ─────────────────────────────────────────────

/// # Errors
///
/// Returns [`Error::RequiredField`] if `value` is blank.
pub fn required(field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::RequiredField { field });
    }
    Ok(())
}

/// Accepts `local@domain.tld` with no whitespace and a single `@`.
#[must_use]
pub fn is_valid_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    // Some dot must have text on both sides.
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

/// Digits, spaces, hyphens, parentheses and plus signs only.
#[must_use]
pub fn is_valid_phone(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '-' | '(' | ')' | '+'))
}

/// # Errors
///
/// Returns [`Error::RequiredField`] or [`Error::InvalidFormat`].
pub fn email(value: &str) -> Result<()> {
    required("Email", value)?;
    if !is_valid_email(value) {
        return Err(Error::InvalidFormat {
            field: "email address",
            message: format!("'{value}' is not of the form name@domain.tld"),
        });
    }
    Ok(())
}

/// An empty phone number is allowed.
///
/// # Errors
///
/// Returns [`Error::InvalidFormat`] for disallowed characters.
pub fn phone(value: &str) -> Result<()> {
    if !value.is_empty() && !is_valid_phone(value) {
        return Err(Error::InvalidFormat {
            field: "phone number",
            message: "use digits, spaces and - ( ) + only".to_string(),
        });
    }
    Ok(())
}

/// Any non-empty email/password pair is accepted.
///
/// # Errors
///
/// Returns [`Error::RequiredField`] if either is blank.
pub fn login(email: &str, password: &str) -> Result<()> {
    required("Email", email)?;
    required("Password", password)
}

fn deal_value(value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(Error::InvalidFormat {
            field: "value",
            message: "must be a non-negative amount".to_string(),
        });
    }
    Ok(())
}

fn probability(value: u8) -> Result<()> {
    if value > 100 {
        return Err(Error::InvalidFormat {
            field: "probability",
            message: "must be between 0 and 100".to_string(),
        });
    }
    Ok(())
}

// ── Forms ────────────────────────────────────────────────────

/// Checks run by the add-contact form, in form order.
///
/// # Errors
///
/// Returns the first failing check.
pub fn new_contact(input: &NewContact) -> Result<()> {
    required("First name", &input.first_name)?;
    required("Last name", &input.last_name)?;
    email(&input.email)?;
    phone(&input.phone)?;
    required("Company", &input.company)
}

/// # Errors
///
/// Returns the first failing check on a field the patch sets.
pub fn contact_patch(patch: &ContactPatch) -> Result<()> {
    if let Some(v) = &patch.first_name {
        required("First name", v)?;
    }
    if let Some(v) = &patch.last_name {
        required("Last name", v)?;
    }
    if let Some(v) = &patch.email {
        email(v)?;
    }
    if let Some(v) = &patch.phone {
        phone(v)?;
    }
    if let Some(v) = &patch.company {
        required("Company", v)?;
    }
    Ok(())
}

/// # Errors
///
/// Returns [`Error::RequiredField`] for a blank title or assignee.
pub fn new_task(input: &NewTask) -> Result<()> {
    required("Task title", &input.title)?;
    required("Assigned to", &input.assigned_to)
}

/// # Errors
///
/// Returns the first failing check.
pub fn new_opportunity(input: &NewOpportunity) -> Result<()> {
    required("Opportunity name", &input.name)?;
    required("Client", &input.client)?;
    deal_value(input.value)?;
    probability(input.probability)?;
    required("Owner", &input.owner)
}

/// # Errors
///
/// Returns the first failing check on a field the patch sets.
pub fn opportunity_patch(patch: &OpportunityPatch) -> Result<()> {
    if let Some(v) = &patch.name {
        required("Opportunity name", v)?;
    }
    if let Some(v) = &patch.client {
        required("Client", v)?;
    }
    if let Some(v) = patch.value {
        deal_value(v)?;
    }
    if let Some(v) = patch.probability {
        probability(v)?;
    }
    if let Some(v) = &patch.owner {
        required("Owner", v)?;
    }
    Ok(())
}
