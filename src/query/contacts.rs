//! Contact list filters and summary counts.

use serde::Serialize;

use crate::model::{Contact, ContactKind, ContactStatus, ContactId};

#[must_use]
pub fn by_kind(contacts: &[Contact], kind: ContactKind) -> Vec<&Contact> {
    contacts.iter().filter(|c| c.kind == kind).collect()
}

#[must_use]
pub fn by_status(contacts: &[Contact], status: ContactStatus) -> Vec<&Contact> {
    contacts.iter().filter(|c| c.status == status).collect()
}

#[must_use]
pub fn by_assignee<'a>(contacts: &'a [Contact], assignee: &str) -> Vec<&'a Contact> {
    contacts.iter().filter(|c| c.assigned_to == assignee).collect()
}

/// Case-insensitive match on name, email or company; substring match on phone.
#[must_use]
pub fn matches_search(contact: &Contact, term: &str) -> bool {
    let needle = term.to_lowercase();
    contact.first_name.to_lowercase().contains(&needle)
        || contact.last_name.to_lowercase().contains(&needle)
        || contact.email.to_lowercase().contains(&needle)
        || contact.company.to_lowercase().contains(&needle)
        || contact.phone.contains(term)
}

/// Combined list-page filter. Unset criteria match everything.
#[derive(Debug, Clone, Default)]
pub struct ContactFilter {
    pub kind: Option<ContactKind>,
    pub status: Option<ContactStatus>,
    pub search: Option<String>,
}

impl ContactFilter {
    #[must_use]
    pub fn matches(&self, contact: &Contact) -> bool {
        self.kind.is_none_or(|k| contact.kind == k)
            && self.status.is_none_or(|s| contact.status == s)
            && self
                .search
                .as_deref()
                .is_none_or(|term| matches_search(contact, term))
    }

    #[must_use]
    pub fn apply<'a>(&self, contacts: &'a [Contact]) -> Vec<&'a Contact> {
        contacts.iter().filter(|c| self.matches(c)).collect()
    }
}

/// Contact list header counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ContactStats {
    pub total: usize,
    pub leads: usize,
    pub contacts: usize,
    /// Active or qualified.
    pub active: usize,
}

impl ContactStats {
    #[must_use]
    pub fn from_contacts(contacts: &[Contact]) -> Self {
        Self {
            total: contacts.len(),
            leads: by_kind(contacts, ContactKind::Lead).len(),
            contacts: by_kind(contacts, ContactKind::Contact).len(),
            active: contacts.iter().filter(|c| c.status.is_engaged()).count(),
        }
    }
}

/// Display name for a contact id, used to denormalize task links.
#[must_use]
pub fn display_name(contacts: &[Contact], id: ContactId) -> Option<String> {
    contacts.iter().find(|c| c.id == id).map(Contact::full_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::seed;

    #[test]
    fn test_seed_stats() {
        let stats = ContactStats::from_contacts(&seed::contacts());
        assert_eq!(
            stats,
            ContactStats {
                total: 6,
                leads: 3,
                contacts: 3,
                active: 4,
            }
        );
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let contacts = seed::contacts();
        let hits = ContactFilter {
            search: Some("GLOBAL".into()),
            ..ContactFilter::default()
        }
        .apply(&contacts);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].last_name, "Smith");

        let by_phone = ContactFilter {
            search: Some("0105".into()),
            ..ContactFilter::default()
        }
        .apply(&contacts);
        assert_eq!(by_phone[0].first_name, "Michael");
    }

    #[test]
    fn test_combined_filter() {
        let contacts = seed::contacts();
        let filter = ContactFilter {
            kind: Some(ContactKind::Lead),
            status: Some(ContactStatus::New),
            search: None,
        };
        let hits = filter.apply(&contacts);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].company, "StartupX");
    }

    #[test]
    fn test_display_name() {
        let contacts = seed::contacts();
        assert_eq!(display_name(&contacts, 4).as_deref(), Some("Emily Brown"));
        assert!(display_name(&contacts, 99).is_none());
        assert_eq!(by_assignee(&contacts, "Mike Chen").len(), 3);
    }
}
