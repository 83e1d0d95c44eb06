//! Application context.
//!
//! One [`App`] is built at start-up and owns every store, so consumers get
//! their state passed in rather than reaching for globals. Session-only
//! stores live exactly as long as the `App`.

use std::rc::Rc;

use tracing::{debug, info};

use crate::config::{AppConfig, Preferences};
use crate::error::{Error, Result};
use crate::nav::{self, Navigation, Route};
use crate::storage::KeyValueStore;
use crate::store::{ContactStore, NotificationStore, OpportunityStore, SessionStore, TaskStore};

pub struct App {
    kv: Rc<dyn KeyValueStore>,
    config: AppConfig,
    pub session: SessionStore,
    pub contacts: ContactStore,
    pub tasks: TaskStore,
    pub opportunities: OpportunityStore,
    pub notifications: NotificationStore,
    pub preferences: Preferences,
}

impl App {
    /// Load persisted state and seed the session-only stores.
    ///
    /// # Errors
    ///
    /// Returns an error if the session flag or the opportunity list cannot
    /// be read, or the stored opportunities are corrupt.
    pub fn open(kv: Rc<dyn KeyValueStore>, config: AppConfig) -> Result<Self> {
        let session = SessionStore::load(Rc::clone(&kv))?;
        let opportunities = OpportunityStore::load(Rc::clone(&kv))?;
        let app = Self {
            preferences: Preferences::new(Rc::clone(&kv)),
            kv,
            config,
            session,
            contacts: ContactStore::seeded(),
            tasks: TaskStore::seeded(),
            opportunities,
            notifications: NotificationStore::seeded(),
        };
        debug!(
            contacts = app.contacts.len(),
            tasks = app.tasks.len(),
            opportunities = app.opportunities.len(),
            "App ready"
        );
        Ok(app)
    }

    #[must_use]
    pub fn kv(&self) -> &dyn KeyValueStore {
        self.kv.as_ref()
    }

    #[must_use]
    pub const fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Evaluate `path` against the persisted session flag.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the flag cannot be read.
    pub fn navigate(&self, path: &str) -> Result<Navigation> {
        let authenticated = self.session.persisted()?;
        let outcome = nav::evaluate(path, authenticated);
        debug!(path, authenticated, ?outcome, "Navigated");
        Ok(outcome)
    }

    /// Gate `route`, failing unless it would render.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotAuthenticated`] when the gate redirects to login,
    /// or a storage error if the flag cannot be read.
    pub fn require(&self, route: Route) -> Result<Route> {
        let path = route.path();
        match nav::gate(route, self.session.persisted()?) {
            Navigation::Render(route) => Ok(route),
            Navigation::Redirect(Route::Login) => Err(Error::NotAuthenticated { path }),
            Navigation::Redirect(other) => Err(Error::InvalidArgument(format!(
                "{path} redirects to {other}"
            ))),
            Navigation::NotFound(path) => Err(Error::RouteNotFound { path }),
        }
    }

    /// Wait out the configured latency before a form submission.
    pub fn simulate_latency(&self) {
        self.config.simulate_latency();
    }

    /// Drop every subscription.
    pub fn shutdown(&mut self) {
        self.session.clear_subscribers();
        self.contacts.clear_subscribers();
        self.tasks.clear_subscribers();
        self.opportunities.clear_subscribers();
        self.notifications.clear_subscribers();
        info!("Shut down");
    }
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("config", &self.config)
            .field("session", &self.session)
            .field("contacts", &self.contacts.len())
            .field("tasks", &self.tasks.len())
            .field("opportunities", &self.opportunities.len())
            .field("notifications", &self.notifications.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NewContact;
    use crate::storage::{MemoryKv, keys};
    use std::cell::Cell;

    fn app() -> App {
        App::open(Rc::new(MemoryKv::new()), AppConfig::default()).unwrap()
    }

    #[test]
    fn test_open_seeds_stores() {
        let app = app();
        assert_eq!(app.contacts.len(), 6);
        assert_eq!(app.tasks.len(), 5);
        assert_eq!(app.opportunities.len(), 5);
        assert_eq!(app.notifications.len(), 3);
        assert!(!app.session.is_authenticated());
        assert!(app.kv().get(keys::OPPORTUNITIES).unwrap().is_some());
    }

    #[test]
    fn test_navigation_follows_session() {
        let mut app = app();
        assert_eq!(
            app.navigate("/dashboard").unwrap(),
            Navigation::Redirect(Route::Login)
        );
        assert!(matches!(
            app.require(Route::Contacts).unwrap_err(),
            Error::NotAuthenticated { .. }
        ));

        app.session.login().unwrap();
        assert_eq!(
            app.navigate("/").unwrap(),
            Navigation::Redirect(Route::Dashboard)
        );
        assert_eq!(app.require(Route::Contacts).unwrap(), Route::Contacts);
        assert!(app.require(Route::Login).is_err());
    }

    #[test]
    fn test_session_only_stores_reset_on_reopen() {
        let kv: Rc<dyn KeyValueStore> = Rc::new(MemoryKv::new());
        {
            let mut app = App::open(Rc::clone(&kv), AppConfig::default()).unwrap();
            app.contacts
                .add(NewContact::new("Ada", "Lovelace", "ada@x.com", "Analytical Engines"));
            app.opportunities.remove("1").unwrap();
        }

        let app = App::open(kv, AppConfig::default()).unwrap();
        assert_eq!(app.contacts.len(), 6);
        assert_eq!(app.opportunities.len(), 4);
    }

    #[test]
    fn test_shutdown_drops_subscribers() {
        let mut app = app();
        let hits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&hits);
        app.notifications
            .subscribe(move |_| counter.set(counter.get() + 1));

        app.notifications.mark_all_as_read();
        app.shutdown();
        app.notifications.clear_all();
        assert_eq!(hits.get(), 1);
    }
}
