//! Weekly plan templates
//!
//! This module provides:
//! - Template and template-task models with validated management ops
//! - Expansion of a template over an apply window
//! - The non-idempotent apply path (contrast with [`crate::repeat`])

pub mod applier;
pub mod models;
pub mod ops;

pub use applier::{expand_template, TemplateApplier};
pub use models::*;
pub use ops::{
    add_template_task, create_template, delete_template, delete_template_task, update_template,
    TemplateError,
};
