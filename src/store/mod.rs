//! Entity stores for CRM Lite.
//!
//! Each store owns an immutable snapshot of its records and swaps in a new
//! one on every mutation, so a [`list`](ContactStore::list) handed out
//! earlier never changes under the caller.
//!
//! # Submodules
//!
//! - [`collection`] - snapshot container shared by the entity stores
//! - [`observer`] - change subscriptions
//! - [`seed`] - sample records for fresh stores
//! - [`session`] - the logged-in flag
//! - [`contacts`], [`tasks`], [`opportunities`], [`notifications`] - entity stores

pub mod collection;
pub mod contacts;
pub mod notifications;
pub mod observer;
pub mod opportunities;
pub mod seed;
pub mod session;
pub mod tasks;

pub use collection::{Collection, Record};
pub use contacts::ContactStore;
pub use notifications::NotificationStore;
pub use observer::{Change, Subscribers, SubscriptionId};
pub use opportunities::OpportunityStore;
pub use session::{SessionChange, SessionStore};
pub use tasks::TaskStore;

/// Parse a raw id (e.g. a route segment) as a numeric id.
///
/// Surrounding whitespace is ignored; anything else non-numeric is `None`.
#[must_use]
pub fn parse_numeric_id(raw: &str) -> Option<u64> {
    raw.trim().parse().ok()
}
