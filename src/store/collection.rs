//! Immutable-snapshot record collection.
//!
//! The current records live behind an `Rc<Vec<R>>`. A mutation never edits
//! that vector: it builds the next one, swaps it in, then notifies
//! subscribers. Snapshots handed out earlier stay valid and unchanged, and
//! `Rc::ptr_eq` on two snapshots tells whether anything was committed in
//! between.
//!
//! The `staged_*` methods compute the next vector without committing it, for
//! stores that must persist before the swap.

use std::fmt;
use std::rc::Rc;

use super::observer::{Change, SubscriptionId, Subscribers};

/// A record with a stable identity.
pub trait Record: Clone {
    type Id: PartialEq + Clone + fmt::Display + fmt::Debug;

    fn id(&self) -> &Self::Id;
}

/// Ordered, observable collection of one record kind.
pub struct Collection<R: Record> {
    items: Rc<Vec<R>>,
    subscribers: Subscribers<Change<R::Id>>,
}

impl<R: Record> Collection<R> {
    #[must_use]
    pub fn new(items: Vec<R>) -> Self {
        Self {
            items: Rc::new(items),
            subscribers: Subscribers::new(),
        }
    }

    /// Shared handle to the current records.
    #[must_use]
    pub fn snapshot(&self) -> Rc<Vec<R>> {
        Rc::clone(&self.items)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[R] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: &R::Id) -> Option<&R> {
        self.items.iter().find(|r| r.id() == id)
    }

    #[must_use]
    pub fn contains(&self, id: &R::Id) -> bool {
        self.get(id).is_some()
    }

    pub fn subscribe(&mut self, callback: impl Fn(&Change<R::Id>) + 'static) -> SubscriptionId {
        self.subscribers.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }

    pub fn clear_subscribers(&mut self) {
        self.subscribers.clear();
    }

    // ── Staging ──────────────────────────────────────────────

    /// Next vector with `record` appended.
    #[must_use]
    pub fn staged_push(&self, record: R) -> Vec<R> {
        let mut next = Vec::with_capacity(self.items.len() + 1);
        next.extend(self.items.iter().cloned());
        next.push(record);
        next
    }

    /// Next vector with `record` at the head.
    #[must_use]
    pub fn staged_push_front(&self, record: R) -> Vec<R> {
        let mut next = Vec::with_capacity(self.items.len() + 1);
        next.push(record);
        next.extend(self.items.iter().cloned());
        next
    }

    /// Next vector with the record matching `id` replaced by `f(old)`.
    ///
    /// Returns `None` if no record matches.
    pub fn staged_replace(&self, id: &R::Id, f: impl FnOnce(&R) -> R) -> Option<(Vec<R>, R)> {
        let pos = self.items.iter().position(|r| r.id() == id)?;
        let replacement = f(&self.items[pos]);
        let mut next = self.items.as_ref().clone();
        next[pos] = replacement.clone();
        Some((next, replacement))
    }

    /// Next vector without the record matching `id`.
    ///
    /// Returns `None` if no record matches.
    #[must_use]
    pub fn staged_remove(&self, id: &R::Id) -> Option<(Vec<R>, R)> {
        let pos = self.items.iter().position(|r| r.id() == id)?;
        let removed = self.items[pos].clone();
        let next = self
            .items
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != pos)
            .map(|(_, r)| r.clone())
            .collect();
        Some((next, removed))
    }

    /// Swap in `next` and notify subscribers with `change`.
    pub fn commit(&mut self, next: Vec<R>, change: &Change<R::Id>) {
        self.items = Rc::new(next);
        self.subscribers.notify(change);
    }

    // ── Direct mutation ──────────────────────────────────────

    pub fn push(&mut self, record: R) {
        let id = record.id().clone();
        let next = self.staged_push(record);
        self.commit(next, &Change::Added(id));
    }

    pub fn push_front(&mut self, record: R) {
        let id = record.id().clone();
        let next = self.staged_push_front(record);
        self.commit(next, &Change::Added(id));
    }

    /// Replace the record matching `id`; `None` (and no notification) if absent.
    pub fn replace(&mut self, id: &R::Id, f: impl FnOnce(&R) -> R) -> Option<R> {
        let (next, replacement) = self.staged_replace(id, f)?;
        self.commit(next, &Change::Updated(id.clone()));
        Some(replacement)
    }

    /// Rewrite every record.
    pub fn replace_all(&mut self, f: impl Fn(&R) -> R) {
        let next = self.items.iter().map(f).collect();
        self.commit(next, &Change::UpdatedAll);
    }

    /// Remove the record matching `id`; `None` (and no notification) if absent.
    pub fn remove(&mut self, id: &R::Id) -> Option<R> {
        let (next, removed) = self.staged_remove(id)?;
        self.commit(next, &Change::Removed(id.clone()));
        Some(removed)
    }

    pub fn clear(&mut self) {
        self.commit(Vec::new(), &Change::Cleared);
    }
}

impl<R: Record + fmt::Debug> fmt::Debug for Collection<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collection")
            .field("items", &self.items)
            .field("subscribers", &self.subscribers)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        id: u64,
        label: &'static str,
    }

    impl Record for Item {
        type Id = u64;

        fn id(&self) -> &u64 {
            &self.id
        }
    }

    fn item(id: u64, label: &'static str) -> Item {
        Item { id, label }
    }

    #[test]
    fn test_mutation_produces_new_snapshot() {
        let mut c = Collection::new(vec![item(1, "a")]);
        let before = c.snapshot();

        c.push(item(2, "b"));
        let after = c.snapshot();

        assert!(!Rc::ptr_eq(&before, &after));
        assert_eq!(before.len(), 1);
        assert_eq!(after.len(), 2);
    }

    #[test]
    fn test_missing_id_leaves_snapshot_untouched() {
        let mut c = Collection::new(vec![item(1, "a")]);
        let before = c.snapshot();

        assert!(c.replace(&9, |i| i.clone()).is_none());
        assert!(c.remove(&9).is_none());

        assert!(Rc::ptr_eq(&before, &c.snapshot()));
    }

    #[test]
    fn test_replace_and_remove_preserve_order() {
        let mut c = Collection::new(vec![item(1, "a"), item(2, "b"), item(3, "c")]);
        c.replace(&2, |i| Item { label: "B", ..i.clone() });
        assert_eq!(c.as_slice()[1].label, "B");

        let removed = c.remove(&1).unwrap();
        assert_eq!(removed.label, "a");
        let ids: Vec<u64> = c.as_slice().iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn test_push_front() {
        let mut c = Collection::new(vec![item(1, "a")]);
        c.push_front(item(2, "b"));
        assert_eq!(c.as_slice()[0].id, 2);
    }

    #[test]
    fn test_notifies_after_commit() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut c = Collection::new(Vec::<Item>::new());

        let sink = Rc::clone(&log);
        c.subscribe(move |change| sink.borrow_mut().push(change.clone()));

        c.push(item(1, "a"));
        c.replace(&1, Clone::clone);
        c.remove(&1);
        c.clear();

        assert_eq!(
            *log.borrow(),
            vec![
                Change::Added(1),
                Change::Updated(1),
                Change::Removed(1),
                Change::Cleared
            ]
        );
    }
}
