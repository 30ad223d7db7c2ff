//! Data models for dated study tasks

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Study category for a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Reading,
    Listening,
    Speaking,
    Writing,
    Vocabulary,
    Grammar,
    #[default]
    Other,
}

fn default_expected_minutes() -> u32 {
    30
}

/// A task scheduled for a specific calendar day
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: Uuid,
    /// Calendar day the task is scheduled for
    pub task_date: NaiveDate,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub is_done: bool,
    #[serde(default = "default_expected_minutes")]
    pub expected_minutes: u32,
    /// Time the student actually spent, reported with feedback
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_minutes: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
    /// Set when the task was inserted by a repeat apply. Provenance only:
    /// deleting the batch record never cascades onto these rows.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch_id: Option<Uuid>,
}

/// Insert payload for a task; the store assigns the id
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub task_date: NaiveDate,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Category,
    #[serde(default = "default_expected_minutes")]
    pub expected_minutes: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch_id: Option<Uuid>,
}

impl NewTask {
    pub fn new(task_date: NaiveDate, title: impl Into<String>) -> Self {
        Self {
            task_date,
            title: title.into(),
            description: None,
            category: Category::default(),
            expected_minutes: default_expected_minutes(),
            batch_id: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    pub fn with_expected_minutes(mut self, minutes: u32) -> Self {
        self.expected_minutes = minutes;
        self
    }
}

/// Fields mutable after creation. Everything is optional; absent fields
/// are left untouched. `batch_id` is deliberately not here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskUpdate {
    pub task_date: Option<NaiveDate>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<Category>,
    pub is_done: Option<bool>,
    pub expected_minutes: Option<u32>,
    pub actual_minutes: Option<u32>,
    pub feedback: Option<String>,
}

/// Predicate for task reads. An empty filter selects every task.
#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    /// Exact calendar day
    pub date: Option<NaiveDate>,
    /// Inclusive lower bound on the task date
    pub date_from: Option<NaiveDate>,
    /// Inclusive upper bound on the task date
    pub date_to: Option<NaiveDate>,
    pub category: Option<Category>,
}

impl TaskFilter {
    /// Unscoped read over the whole task table
    pub fn all() -> Self {
        Self::default()
    }

    /// Tasks on exactly `date`
    pub fn on(date: NaiveDate) -> Self {
        Self {
            date: Some(date),
            ..Self::default()
        }
    }

    /// Tasks between `from` and `to`, inclusive on both ends
    pub fn between(from: NaiveDate, to: NaiveDate) -> Self {
        Self {
            date_from: Some(from),
            date_to: Some(to),
            ..Self::default()
        }
    }

    pub fn matches(&self, task: &Task) -> bool {
        if let Some(date) = self.date {
            if task.task_date != date {
                return false;
            }
        }
        if let Some(from) = self.date_from {
            if task.task_date < from {
                return false;
            }
        }
        if let Some(to) = self.date_to {
            if task.task_date > to {
                return false;
            }
        }
        if let Some(category) = self.category {
            if task.category != category {
                return false;
            }
        }
        true
    }
}
