//! Template application
//!
//! Structurally a simpler sibling of the repeat applier: same expansion
//! shape, but no dedup, no holiday filter and no batch record. Every
//! apply call inserts the full `weeks x template tasks` set, so repeating
//! an apply doubles the rows, and that is the intended contract of this
//! path. Callers wanting idempotence use the repeat path instead.

use chrono::{Duration, NaiveDate};
use uuid::Uuid;

use super::models::TemplateTask;
use crate::repeat::Candidate;
use crate::store::{RecordStore, Result};
use crate::tasks::NewTask;

/// Expand a template's tasks over `weeks` weeks from `start`.
///
/// Week `w`, day `d` lands on `start + 7w + (d - 1)` days. Category and
/// expected minutes missing on the template task default to Other and 30
/// here, so the preview matches what apply would insert.
pub fn expand_template(start: NaiveDate, weeks: u32, tasks: &[TemplateTask]) -> Vec<Candidate> {
    let mut candidates = Vec::new();
    for week in 0..weeks {
        for task in tasks {
            let target = start
                + Duration::weeks(i64::from(week))
                + Duration::days(i64::from(task.day_number) - 1);
            candidates.push(Candidate {
                target_date: target,
                title: task.title.clone(),
                description: task.description.clone(),
                category: task.category.unwrap_or_default(),
                expected_minutes: task.expected_minutes.unwrap_or(30),
            });
        }
    }
    candidates
}

pub struct TemplateApplier<'a> {
    store: &'a dyn RecordStore,
}

impl<'a> TemplateApplier<'a> {
    pub fn new(store: &'a dyn RecordStore) -> Self {
        Self { store }
    }

    /// Apply `template_id` for `weeks` weeks starting at `start`.
    ///
    /// Blindly inserts every expanded row: no dedup against existing
    /// tasks, no batch record. Returns the number of rows inserted, which
    /// is zero only for a template with no tasks.
    pub fn apply(&self, template_id: Uuid, start: NaiveDate, weeks: u32) -> Result<usize> {
        // surfaces TemplateNotFound before any insert
        self.store.get_template(template_id)?;
        let tasks = self.store.list_template_tasks(template_id)?;

        let rows: Vec<NewTask> = expand_template(start, weeks, &tasks)
            .into_iter()
            .map(|c| NewTask {
                task_date: c.target_date,
                title: c.title,
                description: c.description,
                category: c.category,
                expected_minutes: c.expected_minutes,
                batch_id: None,
            })
            .collect();

        if rows.is_empty() {
            log::info!("template apply: template {} has no tasks, nothing inserted", template_id);
            return Ok(0);
        }

        let inserted = self.store.insert_tasks(rows)?.len();
        log::info!(
            "template apply: template {} inserted {} task(s) over {} week(s) from {}",
            template_id,
            inserted,
            weeks,
            start
        );
        Ok(inserted)
    }
}
