//! Derived queries over store snapshots.
//!
//! Everything here is a pure function of a record slice: nothing is cached,
//! and results borrow from the slice they were computed from.

pub mod contacts;
pub mod pipeline;
pub mod tasks;

pub use contacts::{ContactFilter, ContactStats};
pub use pipeline::{OpportunityFilter, PipelineStats, StageSummary};
pub use tasks::{TaskFilter, TaskStats};
