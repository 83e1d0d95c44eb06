//! Contact store.
//!
//! Holds contacts and leads for the lifetime of the running app; nothing is
//! written to durable storage.

use std::rc::Rc;

use chrono::Utc;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::model::{Contact, ContactId, ContactKind, ContactPatch, ContactStatus, NewContact};
use crate::query::contacts::{self, ContactStats};
use crate::store::collection::{Collection, Record};
use crate::store::observer::{Change, SubscriptionId};
use crate::store::{parse_numeric_id, seed};

impl Record for Contact {
    type Id = ContactId;

    fn id(&self) -> &ContactId {
        &self.id
    }
}

/// In-memory contact collection.
#[derive(Debug)]
pub struct ContactStore {
    items: Collection<Contact>,
}

impl ContactStore {
    /// A store seeded with sample contacts.
    #[must_use]
    pub fn seeded() -> Self {
        Self::with_records(seed::contacts())
    }

    #[must_use]
    pub fn with_records(records: Vec<Contact>) -> Self {
        Self {
            items: Collection::new(records),
        }
    }

    /// Current contacts in insertion order.
    #[must_use]
    pub fn list(&self) -> Rc<Vec<Contact>> {
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

    /// Append a contact, assigning the next id and stamping today's date as
    /// both creation and last-contact date.
    pub fn add(&mut self, new: NewContact) -> Contact {
        let id = self.next_id();
        let contact = new.into_contact(id, Utc::now().date_naive());
        debug!(id, name = %contact.full_name(), "Adding contact");
        self.items.push(contact.clone());
        contact
    }

    /// Merge `patch` into the contact with `id`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ContactNotFound`] if no contact has that id.
    pub fn update(&mut self, id: ContactId, patch: ContactPatch) -> Result<Contact> {
        match self.items.replace(&id, |c| patch.apply(c)) {
            Some(updated) => {
                debug!(id, "Updated contact");
                Ok(updated)
            }
            None => {
                warn!(id, "Update for unknown contact");
                Err(Error::ContactNotFound { id: id.to_string() })
            }
        }
    }

    /// Remove a contact; `None` if it was not present.
    ///
    /// Tasks linked to the contact are left untouched.
    pub fn remove(&mut self, id: ContactId) -> Option<Contact> {
        let removed = self.items.remove(&id);
        if removed.is_some() {
            debug!(id, "Removed contact");
        }
        removed
    }

    #[must_use]
    pub fn get_by_id(&self, id: ContactId) -> Option<Contact> {
        self.items.get(&id).cloned()
    }

    /// Look up by a raw (e.g. route) id, coerced to a number first.
    #[must_use]
    pub fn find(&self, raw_id: &str) -> Option<Contact> {
        parse_numeric_id(raw_id).and_then(|id| self.get_by_id(id))
    }

    #[must_use]
    pub fn by_kind(&self, kind: ContactKind) -> Vec<Contact> {
        contacts::by_kind(self.items.as_slice(), kind)
            .into_iter()
            .cloned()
            .collect()
    }

    #[must_use]
    pub fn by_status(&self, status: ContactStatus) -> Vec<Contact> {
        contacts::by_status(self.items.as_slice(), status)
            .into_iter()
            .cloned()
            .collect()
    }

    #[must_use]
    pub fn stats(&self) -> ContactStats {
        ContactStats::from_contacts(self.items.as_slice())
    }

    pub fn subscribe(&mut self, callback: impl Fn(&Change<ContactId>) + 'static) -> SubscriptionId {
        self.items.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.items.unsubscribe(id)
    }

    pub(crate) fn clear_subscribers(&mut self) {
        self.items.clear_subscribers();
    }

    fn next_id(&self) -> ContactId {
        self.items
            .as_slice()
            .iter()
            .map(|c| c.id)
            .max()
            .map_or(1, |max| max + 1)
    }
}

impl Default for ContactStore {
    fn default() -> Self {
        Self::seeded()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn ada() -> NewContact {
        NewContact::new("Ada", "Lovelace", "ada@x.com", "Analytical Engines")
    }

    #[test]
    fn test_add_scenario() {
        let mut store = ContactStore::seeded();
        let before = store.len();

        let added = store.add(ada());

        assert_eq!(store.len(), before + 1);
        assert_eq!(added.id, 7);
        let today = Utc::now().date_naive();
        assert_eq!(added.created_at, today);
        assert_eq!(added.last_contact, today);
        assert_eq!(store.get_by_id(added.id), Some(added.clone()));
        assert_eq!(store.list().last(), Some(&added));
    }

    #[test]
    fn test_ids_start_at_one_and_increase() {
        let mut store = ContactStore::with_records(Vec::new());
        let a = store.add(ada());
        let b = store.add(ada());
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);

        // Ids continue from the current maximum, not the count.
        store.remove(a.id);
        assert_eq!(store.add(ada()).id, 3);
    }

    #[test]
    fn test_update_and_missing_update() {
        let mut store = ContactStore::seeded();
        let updated = store
            .update(
                3,
                ContactPatch {
                    status: Some(ContactStatus::Contacted),
                    ..ContactPatch::default()
                },
            )
            .unwrap();
        assert_eq!(updated.status, ContactStatus::Contacted);
        assert_eq!(store.get_by_id(3).unwrap().status, ContactStatus::Contacted);

        let err = store.update(99, ContactPatch::default()).unwrap_err();
        assert!(matches!(err, Error::ContactNotFound { .. }));
    }

    #[test]
    fn test_remove_then_lookup() {
        let mut store = ContactStore::seeded();
        assert!(store.remove(2).is_some());
        assert!(store.get_by_id(2).is_none());
        assert!(store.list().iter().all(|c| c.id != 2));
        assert!(store.remove(2).is_none());
    }

    #[test]
    fn test_find_coerces_raw_id() {
        let store = ContactStore::seeded();
        assert_eq!(store.find("4").unwrap().first_name, "Emily");
        assert_eq!(store.find(" 4 ").unwrap().first_name, "Emily");
        assert!(store.find("four").is_none());
        assert!(store.find("44").is_none());
    }

    #[test]
    fn test_queries() {
        let store = ContactStore::seeded();
        assert_eq!(store.by_kind(ContactKind::Lead).len(), 3);
        assert_eq!(store.by_status(ContactStatus::Active).len(), 3);
        assert_eq!(store.stats().total, 6);
    }

    #[test]
    fn test_subscribers_see_mutations() {
        let mut store = ContactStore::seeded();
        let hits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&hits);
        let sub = store.subscribe(move |_| counter.set(counter.get() + 1));

        store.add(ada());
        store.update(1, ContactPatch::default()).unwrap();
        store.remove(1);
        assert_eq!(hits.get(), 3);

        assert!(store.unsubscribe(sub));
        store.add(ada());
        assert_eq!(hits.get(), 3);
    }
}
