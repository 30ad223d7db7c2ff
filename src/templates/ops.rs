//! Validated template management on top of the record store

use thiserror::Error;
use uuid::Uuid;

use super::models::{NewTemplate, NewTemplateTask, Template, TemplateTask, TemplateUpdate};
use crate::store::{RecordStore, StoreError};

#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("Template name must not be empty")]
    EmptyName,

    #[error("Template task title must not be empty")]
    EmptyTitle,

    #[error("Day number {0} is outside 1..=7")]
    DayOutOfRange(u8),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type Result<T> = std::result::Result<T, TemplateError>;

pub fn create_template(store: &dyn RecordStore, draft: NewTemplate) -> Result<Template> {
    let name = draft.name.trim();
    if name.is_empty() {
        return Err(TemplateError::EmptyName);
    }
    Ok(store.insert_template(NewTemplate {
        name: name.to_string(),
        description: draft.description,
    })?)
}

pub fn update_template(store: &dyn RecordStore, id: Uuid, updates: TemplateUpdate) -> Result<Template> {
    if let Some(name) = &updates.name {
        if name.trim().is_empty() {
            return Err(TemplateError::EmptyName);
        }
    }
    Ok(store.update_template(id, updates)?)
}

pub fn delete_template(store: &dyn RecordStore, id: Uuid) -> Result<()> {
    Ok(store.delete_template(id)?)
}

/// Add a slot to a template week. Day numbers are the form's 1..=7; the
/// title is trimmed and must be non-empty.
pub fn add_template_task(store: &dyn RecordStore, draft: NewTemplateTask) -> Result<TemplateTask> {
    if !(1..=7).contains(&draft.day_number) {
        return Err(TemplateError::DayOutOfRange(draft.day_number));
    }
    let title = draft.title.trim().to_string();
    if title.is_empty() {
        return Err(TemplateError::EmptyTitle);
    }

    Ok(store.insert_template_task(NewTemplateTask { title, ..draft })?)
}

pub fn delete_template_task(store: &dyn RecordStore, id: Uuid) -> Result<()> {
    Ok(store.delete_template_task(id)?)
}
