//! Session state: a single "logged in" flag mirrored to durable storage.
//!
//! There are no credentials. Logging in with any non-empty input sets the
//! flag; logging out removes the persisted key.

use std::rc::Rc;

use tracing::info;

use crate::error::Result;
use crate::storage::{KeyValueStore, keys};
use crate::store::observer::{Subscribers, SubscriptionId};

/// Stored value meaning "logged in".
const LOGGED_IN_VALUE: &str = "true";

/// Session transitions delivered to subscribers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionChange {
    LoggedIn,
    LoggedOut,
}

pub struct SessionStore {
    kv: Rc<dyn KeyValueStore>,
    authenticated: bool,
    subscribers: Subscribers<SessionChange>,
}

impl SessionStore {
    /// Restore the session from durable storage.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the flag cannot be read.
    pub fn load(kv: Rc<dyn KeyValueStore>) -> Result<Self> {
        let authenticated = read_flag(kv.as_ref())?;
        info!(authenticated, "Restored session");
        Ok(Self {
            kv,
            authenticated,
            subscribers: Subscribers::new(),
        })
    }

    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// The flag as currently persisted, which may differ from the in-memory
    /// value if another process changed it.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the flag cannot be read.
    pub fn persisted(&self) -> Result<bool> {
        read_flag(self.kv.as_ref())
    }

    /// Mark the session authenticated and persist the flag.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the flag cannot be written.
    pub fn login(&mut self) -> Result<()> {
        self.kv.set(keys::LOGGED_IN, LOGGED_IN_VALUE)?;
        self.authenticated = true;
        info!("Logged in");
        self.subscribers.notify(&SessionChange::LoggedIn);
        Ok(())
    }

    /// Clear the session and remove the persisted flag.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the key cannot be removed.
    pub fn logout(&mut self) -> Result<()> {
        self.kv.remove(keys::LOGGED_IN)?;
        self.authenticated = false;
        info!("Logged out");
        self.subscribers.notify(&SessionChange::LoggedOut);
        Ok(())
    }

    pub fn subscribe(&mut self, callback: impl Fn(&SessionChange) + 'static) -> SubscriptionId {
        self.subscribers.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }

    pub(crate) fn clear_subscribers(&mut self) {
        self.subscribers.clear();
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("authenticated", &self.authenticated)
            .field("subscribers", &self.subscribers)
            .finish_non_exhaustive()
    }
}

/// Only the exact string `"true"` counts as logged in.
fn read_flag(kv: &dyn KeyValueStore) -> Result<bool> {
    Ok(kv.get(keys::LOGGED_IN)?.as_deref() == Some(LOGGED_IN_VALUE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryKv, SqliteKv};
    use std::cell::RefCell;
    use tempfile::TempDir;

    #[test]
    fn test_fresh_session_is_logged_out() {
        let session = SessionStore::load(Rc::new(MemoryKv::new())).unwrap();
        assert!(!session.is_authenticated());
        assert!(!session.persisted().unwrap());
    }

    #[test]
    fn test_login_logout_persist() {
        let kv: Rc<dyn KeyValueStore> = Rc::new(MemoryKv::new());
        let mut session = SessionStore::load(Rc::clone(&kv)).unwrap();

        session.login().unwrap();
        assert!(session.is_authenticated());
        assert_eq!(kv.get(keys::LOGGED_IN).unwrap().as_deref(), Some("true"));

        session.logout().unwrap();
        assert!(!session.is_authenticated());
        assert!(kv.get(keys::LOGGED_IN).unwrap().is_none());
    }

    #[test]
    fn test_session_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("crm.db");

        {
            let kv: Rc<dyn KeyValueStore> = Rc::new(SqliteKv::open(&path).unwrap());
            SessionStore::load(kv).unwrap().login().unwrap();
        }

        let kv: Rc<dyn KeyValueStore> = Rc::new(SqliteKv::open(&path).unwrap());
        let mut session = SessionStore::load(kv).unwrap();
        assert!(session.is_authenticated());

        session.logout().unwrap();
        let kv: Rc<dyn KeyValueStore> = Rc::new(SqliteKv::open(&path).unwrap());
        assert!(!SessionStore::load(kv).unwrap().is_authenticated());
    }

    #[test]
    fn test_only_exact_true_counts() {
        let kv: Rc<dyn KeyValueStore> = Rc::new(MemoryKv::new());
        kv.set(keys::LOGGED_IN, "TRUE").unwrap();
        assert!(!SessionStore::load(Rc::clone(&kv)).unwrap().is_authenticated());
        kv.set(keys::LOGGED_IN, "true").unwrap();
        assert!(SessionStore::load(kv).unwrap().is_authenticated());
    }

    #[test]
    fn test_subscribers_see_transitions() {
        let mut session = SessionStore::load(Rc::new(MemoryKv::new())).unwrap();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        session.subscribe(move |c| sink.borrow_mut().push(*c));

        session.login().unwrap();
        session.logout().unwrap();
        assert_eq!(
            *seen.borrow(),
            vec![SessionChange::LoggedIn, SessionChange::LoggedOut]
        );
    }
}
