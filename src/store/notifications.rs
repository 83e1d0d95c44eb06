//! Notification store.
//!
//! Newest first: added notifications go to the head of the list.

use std::rc::Rc;

use chrono::Utc;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::model::{NewNotification, Notification, NotificationId, NotificationPatch};
use crate::store::collection::{Collection, Record};
use crate::store::observer::{Change, SubscriptionId};
use crate::store::seed;

impl Record for Notification {
    type Id = NotificationId;

    fn id(&self) -> &NotificationId {
        &self.id
    }
}

#[derive(Debug)]
pub struct NotificationStore {
    items: Collection<Notification>,
}

impl NotificationStore {
    #[must_use]
    pub fn seeded() -> Self {
        Self::with_records(seed::notifications())
    }

    #[must_use]
    pub fn with_records(records: Vec<Notification>) -> Self {
        Self {
            items: Collection::new(records),
        }
    }

    #[must_use]
    pub fn list(&self) -> Rc<Vec<Notification>> {
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

    /// Insert an unread notification labelled "Just now" at the head.
    pub fn add(&mut self, new: NewNotification) -> Notification {
        let id = self.next_id(Utc::now().timestamp_millis());
        let notification = new.into_notification(id);
        debug!(id, title = %notification.title, "Adding notification");
        self.items.push_front(notification.clone());
        notification
    }

    /// # Errors
    ///
    /// Returns [`Error::NotificationNotFound`] if no notification has that id.
    pub fn update(&mut self, id: NotificationId, patch: NotificationPatch) -> Result<Notification> {
        self.items
            .replace(&id, |n| patch.apply(n))
            .ok_or_else(|| {
                warn!(id, "Update for unknown notification");
                Error::NotificationNotFound { id: id.to_string() }
            })
    }

    /// Mark one notification read. Unknown ids are ignored.
    pub fn mark_as_read(&mut self, id: NotificationId) -> Option<Notification> {
        self.items.replace(&id, |n| Notification {
            read: true,
            ..n.clone()
        })
    }

    /// Mark every notification read.
    pub fn mark_all_as_read(&mut self) {
        self.items.replace_all(|n| Notification {
            read: true,
            ..n.clone()
        });
        debug!(count = self.items.len(), "Marked all notifications read");
    }

    /// Delete one notification. Unknown ids are ignored.
    pub fn delete_one(&mut self, id: NotificationId) -> Option<Notification> {
        self.items.remove(&id)
    }

    pub fn clear_all(&mut self) {
        debug!(count = self.items.len(), "Clearing notifications");
        self.items.clear();
    }

    #[must_use]
    pub fn unread_count(&self) -> usize {
        self.items.as_slice().iter().filter(|n| !n.read).count()
    }

    #[must_use]
    pub fn get_by_id(&self, id: NotificationId) -> Option<Notification> {
        self.items.get(&id).cloned()
    }

    pub fn subscribe(
        &mut self,
        callback: impl Fn(&Change<NotificationId>) + 'static,
    ) -> SubscriptionId {
        self.items.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.items.unsubscribe(id)
    }

    pub(crate) fn clear_subscribers(&mut self) {
        self.items.clear_subscribers();
    }

    /// Current time in milliseconds, or one past the largest id if that is
    /// not already greater.
    fn next_id(&self, millis: i64) -> NotificationId {
        let now = u64::try_from(millis).unwrap_or_default();
        let floor = self
            .items
            .as_slice()
            .iter()
            .map(|n| n.id)
            .max()
            .map_or(0, |max| max + 1);
        now.max(floor)
    }
}

impl Default for NotificationStore {
    fn default() -> Self {
        Self::seeded()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NotificationKind;
    use crate::model::notification::JUST_NOW;
    use std::cell::RefCell;

    fn alert(title: &str) -> NewNotification {
        NewNotification::new(title, "Check the pipeline", NotificationKind::Alert)
    }

    #[test]
    fn test_add_goes_to_head_unread() {
        let mut store = NotificationStore::seeded();
        let added = store.add(alert("Deal slipped"));

        let list = store.list();
        assert_eq!(list[0], added);
        assert_eq!(list.len(), 4);
        assert!(!added.read);
        assert_eq!(added.time, JUST_NOW);
        assert_eq!(store.unread_count(), 4);
    }

    #[test]
    fn test_ids_unique_when_added_back_to_back() {
        let mut store = NotificationStore::with_records(Vec::new());
        let a = store.add(alert("a"));
        let b = store.add(alert("b"));
        assert!(b.id > a.id);
        let titles: Vec<String> = store.list().iter().map(|n| n.title.clone()).collect();
        assert_eq!(titles, vec!["b", "a"]);
    }

    #[test]
    fn test_mark_read_and_unread_count() {
        let mut store = NotificationStore::seeded();
        assert_eq!(store.unread_count(), 3);

        assert!(store.mark_as_read(2).unwrap().read);
        assert_eq!(store.unread_count(), 2);
        assert!(store.mark_as_read(99).is_none());
        assert_eq!(store.len(), 3);

        store.mark_all_as_read();
        assert_eq!(store.unread_count(), 0);
        assert!(store.list().iter().all(|n| n.read));
    }

    #[test]
    fn test_delete_and_clear() {
        let mut store = NotificationStore::seeded();
        assert!(store.delete_one(1).is_some());
        assert!(store.delete_one(1).is_none());
        assert_eq!(store.len(), 2);

        store.clear_all();
        assert!(store.is_empty());
        assert_eq!(store.unread_count(), 0);
    }

    #[test]
    fn test_update_patch() {
        let mut store = NotificationStore::seeded();
        let patch = NotificationPatch {
            title: Some("Renamed".into()),
            ..NotificationPatch::default()
        };
        assert_eq!(store.update(3, patch).unwrap().title, "Renamed");
        assert!(matches!(
            store.update(30, NotificationPatch::default()).unwrap_err(),
            Error::NotificationNotFound { .. }
        ));
    }

    #[test]
    fn test_subscribers_receive_changes() {
        let mut store = NotificationStore::seeded();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        store.subscribe(move |change| sink.borrow_mut().push(change.clone()));

        store.mark_all_as_read();
        store.delete_one(2);
        store.clear_all();

        assert_eq!(
            *seen.borrow(),
            vec![Change::UpdatedAll, Change::Removed(2), Change::Cleared]
        );
    }
}
