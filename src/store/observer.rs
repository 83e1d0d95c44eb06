//! Change notification for stores.
//!
//! Consumers register a callback and get a [`SubscriptionId`] back. Stores
//! call [`Subscribers::notify`] synchronously after each committed mutation,
//! so a callback always observes the settled collection.

use std::fmt;

/// Handle returned by `subscribe`, used to unsubscribe.
pub type SubscriptionId = u64;

/// What changed in an entity collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change<Id> {
    Added(Id),
    Updated(Id),
    Removed(Id),
    /// Every record was rewritten (e.g. mark all as read).
    UpdatedAll,
    Cleared,
}

type Callback<E> = Box<dyn Fn(&E)>;

/// Registry of change callbacks.
pub struct Subscribers<E> {
    next_id: SubscriptionId,
    callbacks: Vec<(SubscriptionId, Callback<E>)>,
}

impl<E> Subscribers<E> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_id: 1,
            callbacks: Vec::new(),
        }
    }

    /// Register a callback; it stays active until unsubscribed.
    pub fn subscribe(&mut self, callback: impl Fn(&E) + 'static) -> SubscriptionId {
        let id = self.next_id;
        self.next_id += 1;
        self.callbacks.push((id, Box::new(callback)));
        id
    }

    /// Remove a callback. Returns `false` if the id was unknown.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.callbacks.len();
        self.callbacks.retain(|(sid, _)| *sid != id);
        self.callbacks.len() != before
    }

    /// Invoke every callback in registration order.
    pub fn notify(&self, event: &E) {
        for (_, callback) in &self.callbacks {
            callback(event);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }

    /// Drop every callback.
    pub fn clear(&mut self) {
        self.callbacks.clear();
    }
}

impl<E> Default for Subscribers<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for Subscribers<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscribers")
            .field("count", &self.callbacks.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_subscribe_notify_unsubscribe() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut subs: Subscribers<Change<u64>> = Subscribers::new();

        let sink = Rc::clone(&seen);
        let id = subs.subscribe(move |c| sink.borrow_mut().push(c.clone()));
        assert_eq!(subs.len(), 1);

        subs.notify(&Change::Added(1));
        subs.notify(&Change::Removed(1));
        assert_eq!(*seen.borrow(), vec![Change::Added(1), Change::Removed(1)]);

        assert!(subs.unsubscribe(id));
        assert!(!subs.unsubscribe(id));
        subs.notify(&Change::Cleared);
        assert_eq!(seen.borrow().len(), 2);
    }

    #[test]
    fn test_ids_are_not_reused() {
        let mut subs: Subscribers<()> = Subscribers::new();
        let a = subs.subscribe(|()| {});
        subs.unsubscribe(a);
        let b = subs.subscribe(|()| {});
        assert_ne!(a, b);
    }
}
