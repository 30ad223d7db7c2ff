//! Task recurrence
//!
//! This module provides:
//! - Pure expansion of a recurrence rule into dated candidate rows
//! - The idempotent apply: store-wide dedup, batch stamping, persistence
//!
//! The preview/apply split is deliberate: [`expander::expand`] never
//! writes, and [`applier::RepeatApplier`] reads current store state at
//! apply time rather than trusting the preview.

pub mod applier;
pub mod expander;

pub use applier::{RepeatApplier, RepeatBatch, RepeatOutcome};
pub use expander::{expand, Candidate, RecurrenceRule};
