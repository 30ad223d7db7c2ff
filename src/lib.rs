//! Study-tracking core for a student/teacher pair.
//!
//! Three pieces of real machinery live here:
//! - the spaced-repetition review scheduler for vocabulary words
//!   ([`vocab::ReviewScheduler`]),
//! - recurrence expansion and the idempotent repeat apply for tasks
//!   ([`repeat`]),
//! - the simpler, deliberately non-idempotent template apply
//!   ([`templates::TemplateApplier`]).
//!
//! The crate is UI-free. Every read and write goes through the
//! [`store::RecordStore`] collaborator; [`store::MemoryStore`] backs tests
//! and in-process embedders, while a remote store implements the same trait
//! elsewhere.

pub mod repeat;
pub mod stats;
pub mod store;
pub mod tasks;
pub mod templates;
pub mod vocab;
