//! Record store collaborator
//!
//! The core does not own persistence. Every read and write goes through
//! the [`RecordStore`] trait, implemented against whatever actually backs
//! the portal. [`MemoryStore`] is the in-process implementation used by
//! tests and local embedders.

mod memory;

pub use memory::MemoryStore;

use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

use crate::repeat::RepeatBatch;
use crate::tasks::{NewTask, Task, TaskFilter, TaskUpdate};
use crate::templates::{NewTemplate, NewTemplateTask, Template, TemplateTask, TemplateUpdate};
use crate::vocab::{
    MasteryLevel, NewReviewLog, NewVocabWord, VocabFilter, VocabReviewLog, VocabWord,
    VocabWordUpdate,
};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Task not found: {0}")]
    TaskNotFound(Uuid),

    #[error("Vocab word not found: {0}")]
    WordNotFound(Uuid),

    #[error("Template not found: {0}")]
    TemplateNotFound(Uuid),

    #[error("Template task not found: {0}")]
    TemplateTaskNotFound(Uuid),

    #[error("Store backend failure: {0}")]
    Backend(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Typed query surface over the backing store.
///
/// Reads take explicit filter structs; writes are insert / update-by-id /
/// delete-by-id. `insert_tasks` is one batch call and must be treated as
/// all-or-nothing: when it errors, callers assume nothing was persisted,
/// even if the backend managed a partial write.
///
/// List order is the store's own iteration order; callers that need a
/// particular order sort for themselves.
pub trait RecordStore: Send + Sync {
    // ===== Tasks =====

    fn list_tasks(&self, filter: &TaskFilter) -> Result<Vec<Task>>;
    fn get_task(&self, id: Uuid) -> Result<Task>;
    fn insert_tasks(&self, rows: Vec<NewTask>) -> Result<Vec<Task>>;
    fn update_task(&self, id: Uuid, updates: TaskUpdate) -> Result<Task>;
    fn delete_task(&self, id: Uuid) -> Result<()>;

    // ===== Vocabulary =====

    fn list_words(&self, filter: &VocabFilter) -> Result<Vec<VocabWord>>;
    fn get_word(&self, id: Uuid) -> Result<VocabWord>;
    fn insert_word(&self, row: NewVocabWord) -> Result<VocabWord>;
    fn update_word(&self, id: Uuid, updates: VocabWordUpdate) -> Result<VocabWord>;
    /// Scheduler-owned mutation: mastery and the next review date always
    /// move together, and nothing else moves with them.
    fn set_review_state(
        &self,
        id: Uuid,
        mastery: MasteryLevel,
        next_review: NaiveDate,
    ) -> Result<VocabWord>;
    fn delete_word(&self, id: Uuid) -> Result<()>;
    /// Append one audit row. Logs are never updated or deleted.
    fn append_review_log(&self, row: NewReviewLog) -> Result<VocabReviewLog>;

    // ===== Templates =====

    fn list_templates(&self) -> Result<Vec<Template>>;
    fn get_template(&self, id: Uuid) -> Result<Template>;
    fn insert_template(&self, row: NewTemplate) -> Result<Template>;
    fn update_template(&self, id: Uuid, updates: TemplateUpdate) -> Result<Template>;
    /// Removes the template and its slots. Task rows previously created
    /// from the template are not touched.
    fn delete_template(&self, id: Uuid) -> Result<()>;
    fn list_template_tasks(&self, template_id: Uuid) -> Result<Vec<TemplateTask>>;
    fn insert_template_task(&self, row: NewTemplateTask) -> Result<TemplateTask>;
    fn delete_template_task(&self, id: Uuid) -> Result<()>;

    // ===== Repeat batches =====

    fn record_batch(&self, batch: RepeatBatch) -> Result<()>;
    fn list_batches(&self) -> Result<Vec<RepeatBatch>>;
}
