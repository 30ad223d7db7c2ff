//! Vocabulary and spaced repetition
//!
//! This module provides:
//! - Word models, the append-only review log, and typed read filters
//! - The interval-band and mastery policy (pure)
//! - The review scheduler: due queue, grading, and the session cursor

pub mod algorithm;
pub mod models;
pub mod ops;
pub mod scheduler;

pub use models::*;
pub use ops::{create_word, delete_word, update_word, VocabError};
pub use scheduler::{GradeOutcome, ReviewScheduler, ReviewSession};
