//! Contact model.
//!
//! Contacts cover both established customers and leads; the distinction is
//! carried by [`ContactKind`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Numeric contact identifier.
pub type ContactId = u64;

/// Whether a person is an established contact or a sales lead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactKind {
    Contact,
    Lead,
}

impl ContactKind {
    pub const ALL: [Self; 2] = [Self::Contact, Self::Lead];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Contact => "contact",
            Self::Lead => "lead",
        }
    }

    /// Exact (case-insensitive) parse, no synonyms.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(s.trim()))
    }
}

impl Default for ContactKind {
    fn default() -> Self {
        Self::Contact
    }
}

/// Relationship status of a contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactStatus {
    New,
    Contacted,
    Qualified,
    Active,
    Inactive,
}

impl ContactStatus {
    pub const ALL: [Self; 5] = [
        Self::New,
        Self::Contacted,
        Self::Qualified,
        Self::Active,
        Self::Inactive,
    ];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Contacted => "contacted",
            Self::Qualified => "qualified",
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }

    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(s.trim()))
    }

    /// Statuses counted as "active" on the contact list summary.
    #[must_use]
    pub const fn is_engaged(&self) -> bool {
        matches!(self, Self::Active | Self::Qualified)
    }
}

impl Default for ContactStatus {
    fn default() -> Self {
        Self::New
    }
}

/// A person tracked by the CRM.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: ContactId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    pub company: String,
    #[serde(default)]
    pub position: String,
    #[serde(rename = "type")]
    pub kind: ContactKind,
    pub status: ContactStatus,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub assigned_to: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub notes: String,
    pub created_at: NaiveDate,
    pub last_contact: NaiveDate,
}

impl Contact {
    /// "First Last", as shown on lists and as the denormalized name on tasks.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Input for creating a contact; the store assigns id and dates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewContact {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
    pub position: String,
    #[serde(rename = "type")]
    pub kind: ContactKind,
    pub status: ContactStatus,
    pub source: String,
    pub assigned_to: String,
    pub tags: Vec<String>,
    pub notes: String,
}

impl NewContact {
    /// Create contact input with the required form fields.
    pub fn new(first_name: &str, last_name: &str, email: &str, company: &str) -> Self {
        Self {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email: email.to_string(),
            company: company.to_string(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_kind(mut self, kind: ContactKind) -> Self {
        self.kind = kind;
        self
    }

    #[must_use]
    pub fn with_status(mut self, status: ContactStatus) -> Self {
        self.status = status;
        self
    }

    #[must_use]
    pub fn with_phone(mut self, phone: &str) -> Self {
        self.phone = phone.to_string();
        self
    }

    #[must_use]
    pub fn with_assignee(mut self, assignee: &str) -> Self {
        self.assigned_to = assignee.to_string();
        self
    }

    #[must_use]
    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    /// Materialize into a stored record.
    pub(crate) fn into_contact(self, id: ContactId, today: NaiveDate) -> Contact {
        Contact {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone: self.phone,
            company: self.company,
            position: self.position,
            kind: self.kind,
            status: self.status,
            source: self.source,
            assigned_to: self.assigned_to,
            tags: self.tags,
            notes: self.notes,
            created_at: today,
            last_contact: today,
        }
    }
}

/// Partial update for a contact. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub position: Option<String>,
    pub kind: Option<ContactKind>,
    pub status: Option<ContactStatus>,
    pub source: Option<String>,
    pub assigned_to: Option<String>,
    pub tags: Option<Vec<String>>,
    pub notes: Option<String>,
    pub last_contact: Option<NaiveDate>,
}

impl ContactPatch {
    /// Merge the set fields over `contact`, producing the replacement record.
    #[must_use]
    pub fn apply(self, contact: &Contact) -> Contact {
        let mut next = contact.clone();
        if let Some(v) = self.first_name {
            next.first_name = v;
        }
        if let Some(v) = self.last_name {
            next.last_name = v;
        }
        if let Some(v) = self.email {
            next.email = v;
        }
        if let Some(v) = self.phone {
            next.phone = v;
        }
        if let Some(v) = self.company {
            next.company = v;
        }
        if let Some(v) = self.position {
            next.position = v;
        }
        if let Some(v) = self.kind {
            next.kind = v;
        }
        if let Some(v) = self.status {
            next.status = v;
        }
        if let Some(v) = self.source {
            next.source = v;
        }
        if let Some(v) = self.assigned_to {
            next.assigned_to = v;
        }
        if let Some(v) = self.tags {
            next.tags = v;
        }
        if let Some(v) = self.notes {
            next.notes = v;
        }
        if let Some(v) = self.last_contact {
            next.last_contact = v;
        }
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contact_json_shape() {
        let today = NaiveDate::from_ymd_opt(2024, 10, 20).unwrap();
        let contact = NewContact::new("Ada", "Lovelace", "ada@x.com", "Analytical Engines")
            .with_kind(ContactKind::Lead)
            .into_contact(7, today);

        let json = serde_json::to_value(&contact).unwrap();
        assert_eq!(json["firstName"], "Ada");
        assert_eq!(json["type"], "lead");
        assert_eq!(json["status"], "new");
        assert_eq!(json["createdAt"], "2024-10-20");
        assert_eq!(json["lastContact"], "2024-10-20");
    }

    #[test]
    fn test_patch_keeps_identity() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let contact = NewContact::new("A", "B", "a@b.co", "C").into_contact(3, today);
        let patch = ContactPatch {
            status: Some(ContactStatus::Active),
            company: Some("D".into()),
            ..ContactPatch::default()
        };
        let next = patch.apply(&contact);
        assert_eq!(next.id, 3);
        assert_eq!(next.status, ContactStatus::Active);
        assert_eq!(next.company, "D");
        assert_eq!(next.first_name, "A");
    }

    #[test]
    fn test_status_parse() {
        assert_eq!(ContactStatus::parse("Qualified"), Some(ContactStatus::Qualified));
        assert_eq!(ContactStatus::parse("bogus"), None);
        assert!(ContactStatus::Qualified.is_engaged());
        assert!(!ContactStatus::New.is_engaged());
    }
}
