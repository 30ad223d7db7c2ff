//! Dated study tasks
//!
//! This module provides:
//! - Task models, the optional-field update struct, and typed read filters
//! - Validated add/edit/toggle/feedback/delete operations over the store

pub mod models;
pub mod ops;

pub use models::*;
pub use ops::{create_task, delete_task, record_feedback, toggle_done, update_task, TaskError};
