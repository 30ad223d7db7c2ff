//! Validated task operations on top of the record store
//!
//! These are the direct add/edit/toggle/feedback/delete paths. Validation
//! happens before any store call, so a rejected input never produces a
//! partial write.

use thiserror::Error;
use uuid::Uuid;

use super::models::{NewTask, Task, TaskUpdate};
use crate::store::{RecordStore, StoreError};

#[derive(Error, Debug)]
pub enum TaskError {
    #[error("Task title must not be empty")]
    EmptyTitle,

    #[error("Actual minutes must be positive")]
    NonPositiveMinutes,

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type Result<T> = std::result::Result<T, TaskError>;

/// Add a single task directly (the calendar "Add Task" form).
///
/// The title is trimmed; a blank title is rejected without touching the
/// store.
pub fn create_task(store: &dyn RecordStore, draft: NewTask) -> Result<Task> {
    let title = draft.title.trim().to_string();
    if title.is_empty() {
        return Err(TaskError::EmptyTitle);
    }

    let row = NewTask { title, ..draft };
    store
        .insert_tasks(vec![row])?
        .pop()
        .ok_or_else(|| StoreError::Backend("insert returned no rows".to_string()).into())
}

/// Apply an edit-form update to a task
pub fn update_task(store: &dyn RecordStore, id: Uuid, updates: TaskUpdate) -> Result<Task> {
    if let Some(title) = &updates.title {
        if title.trim().is_empty() {
            return Err(TaskError::EmptyTitle);
        }
    }
    Ok(store.update_task(id, updates)?)
}

/// Flip a task's done flag
pub fn toggle_done(store: &dyn RecordStore, id: Uuid) -> Result<Task> {
    let task = store.get_task(id)?;
    let updates = TaskUpdate {
        is_done: Some(!task.is_done),
        ..TaskUpdate::default()
    };
    Ok(store.update_task(id, updates)?)
}

/// Record the student's feedback and, optionally, the time actually spent.
///
/// Zero actual minutes is rejected; the field means "time spent", not
/// "skipped".
pub fn record_feedback(
    store: &dyn RecordStore,
    id: Uuid,
    feedback: impl Into<String>,
    actual_minutes: Option<u32>,
) -> Result<Task> {
    if actual_minutes == Some(0) {
        return Err(TaskError::NonPositiveMinutes);
    }

    let updates = TaskUpdate {
        feedback: Some(feedback.into()),
        actual_minutes,
        ..TaskUpdate::default()
    };
    Ok(store.update_task(id, updates)?)
}

pub fn delete_task(store: &dyn RecordStore, id: Uuid) -> Result<()> {
    Ok(store.delete_task(id)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::tasks::{Category, TaskFilter};

    fn date(s: &str) -> chrono::NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_create_task_trims_title() {
        let store = MemoryStore::new();
        let task = create_task(&store, NewTask::new(date("2024-01-03"), "  Read unit 1  ")).unwrap();
        assert_eq!(task.title, "Read unit 1");
        assert_eq!(task.expected_minutes, 30);
        assert_eq!(task.category, Category::Other);
        assert!(!task.is_done);
    }

    #[test]
    fn test_blank_title_is_rejected_before_any_write() {
        let store = MemoryStore::new();
        let result = create_task(&store, NewTask::new(date("2024-01-03"), "   "));
        assert!(matches!(result, Err(TaskError::EmptyTitle)));
        assert!(store.list_tasks(&TaskFilter::all()).unwrap().is_empty());
    }

    #[test]
    fn test_toggle_done_flips_both_ways() {
        let store = MemoryStore::new();
        let task = create_task(&store, NewTask::new(date("2024-01-03"), "Essay")).unwrap();

        let task = toggle_done(&store, task.id).unwrap();
        assert!(task.is_done);
        let task = toggle_done(&store, task.id).unwrap();
        assert!(!task.is_done);
    }

    #[test]
    fn test_feedback_rejects_zero_minutes() {
        let store = MemoryStore::new();
        let task = create_task(&store, NewTask::new(date("2024-01-03"), "Essay")).unwrap();

        let result = record_feedback(&store, task.id, "too hard", Some(0));
        assert!(matches!(result, Err(TaskError::NonPositiveMinutes)));

        let task = record_feedback(&store, task.id, "went fine", Some(45)).unwrap();
        assert_eq!(task.feedback.as_deref(), Some("went fine"));
        assert_eq!(task.actual_minutes, Some(45));
    }

    #[test]
    fn test_operations_on_missing_task_surface_not_found() {
        let store = MemoryStore::new();
        let missing = Uuid::new_v4();
        assert!(matches!(
            toggle_done(&store, missing),
            Err(TaskError::Store(StoreError::TaskNotFound(id))) if id == missing
        ));
        assert!(matches!(
            delete_task(&store, missing),
            Err(TaskError::Store(StoreError::TaskNotFound(_)))
        ));
    }
}
