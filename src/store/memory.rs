//! In-memory record store
//!
//! Backs tests and in-process embedders. Rows live in plain vectors, so
//! list order is insertion order.

use std::sync::{Mutex, MutexGuard};

use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use super::{RecordStore, Result, StoreError};
use crate::repeat::RepeatBatch;
use crate::tasks::{NewTask, Task, TaskFilter, TaskUpdate};
use crate::templates::{NewTemplate, NewTemplateTask, Template, TemplateTask, TemplateUpdate};
use crate::vocab::{
    MasteryLevel, NewReviewLog, NewVocabWord, VocabFilter, VocabReviewLog, VocabWord,
    VocabWordUpdate,
};

#[derive(Default)]
struct State {
    tasks: Vec<Task>,
    words: Vec<VocabWord>,
    review_logs: Vec<VocabReviewLog>,
    templates: Vec<Template>,
    template_tasks: Vec<TemplateTask>,
    batches: Vec<RepeatBatch>,
}

#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> Result<MutexGuard<'_, State>> {
        self.state
            .lock()
            .map_err(|_| StoreError::Backend("store mutex poisoned".to_string()))
    }

    /// Snapshot of the audit trail, for inspection in tests and admin
    /// views. Not part of [`RecordStore`]: the engines only ever append.
    pub fn review_logs(&self) -> Vec<VocabReviewLog> {
        self.state().map(|s| s.review_logs.clone()).unwrap_or_default()
    }
}

impl RecordStore for MemoryStore {
    // ===== Tasks =====

    fn list_tasks(&self, filter: &TaskFilter) -> Result<Vec<Task>> {
        let state = self.state()?;
        Ok(state.tasks.iter().filter(|t| filter.matches(t)).cloned().collect())
    }

    fn get_task(&self, id: Uuid) -> Result<Task> {
        let state = self.state()?;
        state
            .tasks
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or(StoreError::TaskNotFound(id))
    }

    fn insert_tasks(&self, rows: Vec<NewTask>) -> Result<Vec<Task>> {
        let mut state = self.state()?;
        let mut inserted = Vec::with_capacity(rows.len());
        for row in rows {
            let task = Task {
                id: Uuid::new_v4(),
                task_date: row.task_date,
                title: row.title,
                description: row.description,
                category: row.category,
                is_done: false,
                expected_minutes: row.expected_minutes,
                actual_minutes: None,
                feedback: None,
                batch_id: row.batch_id,
            };
            state.tasks.push(task.clone());
            inserted.push(task);
        }
        Ok(inserted)
    }

    fn update_task(&self, id: Uuid, updates: TaskUpdate) -> Result<Task> {
        let mut state = self.state()?;
        let task = state
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(StoreError::TaskNotFound(id))?;

        if let Some(task_date) = updates.task_date {
            task.task_date = task_date;
        }
        if let Some(title) = updates.title {
            task.title = title;
        }
        if let Some(description) = updates.description {
            task.description = Some(description);
        }
        if let Some(category) = updates.category {
            task.category = category;
        }
        if let Some(is_done) = updates.is_done {
            task.is_done = is_done;
        }
        if let Some(expected_minutes) = updates.expected_minutes {
            task.expected_minutes = expected_minutes;
        }
        if let Some(actual_minutes) = updates.actual_minutes {
            task.actual_minutes = Some(actual_minutes);
        }
        if let Some(feedback) = updates.feedback {
            task.feedback = Some(feedback);
        }

        Ok(task.clone())
    }

    fn delete_task(&self, id: Uuid) -> Result<()> {
        let mut state = self.state()?;
        let len_before = state.tasks.len();
        state.tasks.retain(|t| t.id != id);
        if state.tasks.len() == len_before {
            return Err(StoreError::TaskNotFound(id));
        }
        Ok(())
    }

    // ===== Vocabulary =====

    fn list_words(&self, filter: &VocabFilter) -> Result<Vec<VocabWord>> {
        let state = self.state()?;
        Ok(state.words.iter().filter(|w| filter.matches(w)).cloned().collect())
    }

    fn get_word(&self, id: Uuid) -> Result<VocabWord> {
        let state = self.state()?;
        state
            .words
            .iter()
            .find(|w| w.id == id)
            .cloned()
            .ok_or(StoreError::WordNotFound(id))
    }

    fn insert_word(&self, row: NewVocabWord) -> Result<VocabWord> {
        let mut state = self.state()?;
        let word = VocabWord {
            id: Uuid::new_v4(),
            word: row.word,
            meaning: row.meaning,
            example: row.example,
            part_of_speech: row.part_of_speech,
            notes: row.notes,
            mastery_level: MasteryLevel::New,
            next_review_date: None,
            created_at: Utc::now(),
        };
        state.words.push(word.clone());
        Ok(word)
    }

    fn update_word(&self, id: Uuid, updates: VocabWordUpdate) -> Result<VocabWord> {
        let mut state = self.state()?;
        let word = state
            .words
            .iter_mut()
            .find(|w| w.id == id)
            .ok_or(StoreError::WordNotFound(id))?;

        if let Some(text) = updates.word {
            word.word = text;
        }
        if let Some(meaning) = updates.meaning {
            word.meaning = meaning;
        }
        if let Some(example) = updates.example {
            word.example = example;
        }
        if let Some(part_of_speech) = updates.part_of_speech {
            word.part_of_speech = part_of_speech;
        }
        if let Some(notes) = updates.notes {
            word.notes = notes;
        }

        Ok(word.clone())
    }

    fn set_review_state(
        &self,
        id: Uuid,
        mastery: MasteryLevel,
        next_review: NaiveDate,
    ) -> Result<VocabWord> {
        let mut state = self.state()?;
        let word = state
            .words
            .iter_mut()
            .find(|w| w.id == id)
            .ok_or(StoreError::WordNotFound(id))?;

        word.mastery_level = mastery;
        word.next_review_date = Some(next_review);
        Ok(word.clone())
    }

    fn delete_word(&self, id: Uuid) -> Result<()> {
        let mut state = self.state()?;
        let len_before = state.words.len();
        state.words.retain(|w| w.id != id);
        if state.words.len() == len_before {
            return Err(StoreError::WordNotFound(id));
        }
        Ok(())
    }

    fn append_review_log(&self, row: NewReviewLog) -> Result<VocabReviewLog> {
        let mut state = self.state()?;
        let log = VocabReviewLog {
            id: Uuid::new_v4(),
            vocab_id: row.vocab_id,
            quality: row.quality,
            interval_days: row.interval_days,
            updated_mastery: row.updated_mastery,
            created_at: Utc::now(),
        };
        state.review_logs.push(log.clone());
        Ok(log)
    }

    // ===== Templates =====

    fn list_templates(&self) -> Result<Vec<Template>> {
        Ok(self.state()?.templates.clone())
    }

    fn get_template(&self, id: Uuid) -> Result<Template> {
        let state = self.state()?;
        state
            .templates
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or(StoreError::TemplateNotFound(id))
    }

    fn insert_template(&self, row: NewTemplate) -> Result<Template> {
        let mut state = self.state()?;
        let template = Template {
            id: Uuid::new_v4(),
            name: row.name,
            description: row.description,
        };
        state.templates.push(template.clone());
        Ok(template)
    }

    fn update_template(&self, id: Uuid, updates: TemplateUpdate) -> Result<Template> {
        let mut state = self.state()?;
        let template = state
            .templates
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(StoreError::TemplateNotFound(id))?;

        if let Some(name) = updates.name {
            template.name = name;
        }
        if let Some(description) = updates.description {
            template.description = Some(description);
        }

        Ok(template.clone())
    }

    fn delete_template(&self, id: Uuid) -> Result<()> {
        let mut state = self.state()?;
        let len_before = state.templates.len();
        state.templates.retain(|t| t.id != id);
        if state.templates.len() == len_before {
            return Err(StoreError::TemplateNotFound(id));
        }
        state.template_tasks.retain(|t| t.template_id != id);
        Ok(())
    }

    fn list_template_tasks(&self, template_id: Uuid) -> Result<Vec<TemplateTask>> {
        let state = self.state()?;
        let mut tasks: Vec<TemplateTask> = state
            .template_tasks
            .iter()
            .filter(|t| t.template_id == template_id)
            .cloned()
            .collect();
        tasks.sort_by_key(|t| t.day_number);
        Ok(tasks)
    }

    fn insert_template_task(&self, row: NewTemplateTask) -> Result<TemplateTask> {
        let mut state = self.state()?;
        if !state.templates.iter().any(|t| t.id == row.template_id) {
            return Err(StoreError::TemplateNotFound(row.template_id));
        }
        let task = TemplateTask {
            id: Uuid::new_v4(),
            template_id: row.template_id,
            day_number: row.day_number,
            title: row.title,
            description: row.description,
            category: row.category,
            expected_minutes: row.expected_minutes,
        };
        state.template_tasks.push(task.clone());
        Ok(task)
    }

    fn delete_template_task(&self, id: Uuid) -> Result<()> {
        let mut state = self.state()?;
        let len_before = state.template_tasks.len();
        state.template_tasks.retain(|t| t.id != id);
        if state.template_tasks.len() == len_before {
            return Err(StoreError::TemplateTaskNotFound(id));
        }
        Ok(())
    }

    // ===== Repeat batches =====

    fn record_batch(&self, batch: RepeatBatch) -> Result<()> {
        self.state()?.batches.push(batch);
        Ok(())
    }

    fn list_batches(&self) -> Result<Vec<RepeatBatch>> {
        Ok(self.state()?.batches.clone())
    }
}
