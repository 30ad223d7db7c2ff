//! Idempotent repeat apply
//!
//! Takes a previewed candidate list, drops every candidate whose
//! `(task_date, title)` already exists anywhere in the task store, and
//! persists the residue under a fresh batch id.

use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::expander::Candidate;
use crate::store::{RecordStore, Result};
use crate::tasks::{NewTask, TaskFilter};

/// Provenance record for one repeat apply
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepeatBatch {
    pub batch_id: Uuid,
    pub created_at: DateTime<Utc>,
    /// Rows actually inserted, after dedup
    pub count: usize,
}

/// What one apply call did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepeatOutcome {
    /// `None` when every candidate was already present and nothing was
    /// written
    pub batch_id: Option<Uuid>,
    pub inserted: usize,
    pub skipped: usize,
}

fn dedup_key(date: NaiveDate, title: &str) -> String {
    format!("{}|{}", date, title)
}

pub struct RepeatApplier<'a> {
    store: &'a dyn RecordStore,
}

impl<'a> RepeatApplier<'a> {
    pub fn new(store: &'a dyn RecordStore) -> Self {
        Self { store }
    }

    /// Apply a previewed candidate list.
    ///
    /// The dedup snapshot covers the whole task table, not just the
    /// target window, so re-applying a recurrence never resurrects a task
    /// that already exists anywhere. Candidates are only checked against
    /// that snapshot: two identical candidates inside one preview both
    /// survive and both insert.
    ///
    /// When nothing survives, neither task rows nor a batch record are
    /// written; count-zero batches do not exist. Otherwise the residue
    /// goes in as one batch insert and exactly one [`RepeatBatch`] row
    /// follows it. An insert failure aborts before the batch record.
    ///
    /// Two racing apply calls can both pass the dedup read before either
    /// inserts. Callers serialize apply calls; the engine takes no lock.
    pub fn apply(&self, candidates: &[Candidate]) -> Result<RepeatOutcome> {
        let existing = self.store.list_tasks(&TaskFilter::all())?;
        let taken: HashSet<String> = existing
            .iter()
            .map(|t| dedup_key(t.task_date, &t.title))
            .collect();

        let surviving: Vec<&Candidate> = candidates
            .iter()
            .filter(|c| !taken.contains(&dedup_key(c.target_date, &c.title)))
            .collect();
        let skipped = candidates.len() - surviving.len();

        if surviving.is_empty() {
            log::info!("repeat apply: nothing to insert, {} duplicate(s) skipped", skipped);
            return Ok(RepeatOutcome {
                batch_id: None,
                inserted: 0,
                skipped,
            });
        }

        let batch_id = Uuid::new_v4();
        let rows: Vec<NewTask> = surviving
            .into_iter()
            .map(|c| NewTask {
                task_date: c.target_date,
                title: c.title.clone(),
                description: c.description.clone(),
                category: c.category,
                expected_minutes: c.expected_minutes,
                batch_id: Some(batch_id),
            })
            .collect();

        let inserted = self.store.insert_tasks(rows)?.len();
        self.store.record_batch(RepeatBatch {
            batch_id,
            created_at: Utc::now(),
            count: inserted,
        })?;

        log::info!(
            "repeat apply: batch {} inserted {} task(s), skipped {} duplicate(s)",
            batch_id,
            inserted,
            skipped
        );

        Ok(RepeatOutcome {
            batch_id: Some(batch_id),
            inserted,
            skipped,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repeat::expander::{expand, RecurrenceRule};
    use crate::store::MemoryStore;
    use crate::tasks::{Category, Task};

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn candidate(target: &str, title: &str) -> Candidate {
        Candidate {
            target_date: date(target),
            title: title.to_string(),
            description: None,
            category: Category::Reading,
            expected_minutes: 30,
        }
    }

    fn seed_task(store: &MemoryStore, target: &str, title: &str) {
        store
            .insert_tasks(vec![NewTask::new(date(target), title)])
            .unwrap();
    }

    fn all_tasks(store: &MemoryStore) -> Vec<Task> {
        store.list_tasks(&TaskFilter::all()).unwrap()
    }

    #[test]
    fn test_apply_inserts_and_stamps_one_batch() {
        let store = MemoryStore::new();
        let applier = RepeatApplier::new(&store);

        let outcome = applier
            .apply(&[candidate("2024-01-08", "Essay"), candidate("2024-01-15", "Essay")])
            .unwrap();

        assert_eq!(outcome.inserted, 2);
        assert_eq!(outcome.skipped, 0);
        let batch_id = outcome.batch_id.unwrap();

        let tasks = all_tasks(&store);
        assert_eq!(tasks.len(), 2);
        assert!(tasks.iter().all(|t| t.batch_id == Some(batch_id)));

        let batches = store.list_batches().unwrap();
        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0].batch_id, batch_id);
        assert_eq!(batches[0].count, 2);
    }

    #[test]
    fn test_reapplying_the_same_preview_is_a_no_op() {
        let store = MemoryStore::new();
        let applier = RepeatApplier::new(&store);
        let preview = vec![
            candidate("2024-01-08", "Essay"),
            candidate("2024-01-15", "Essay"),
        ];

        let first = applier.apply(&preview).unwrap();
        assert_eq!(first.inserted, 2);

        let second = applier.apply(&preview).unwrap();
        assert_eq!(second.inserted, 0);
        assert_eq!(second.skipped, 2);
        assert!(second.batch_id.is_none());

        assert_eq!(all_tasks(&store).len(), 2);
        // no count-zero batch record
        assert_eq!(store.list_batches().unwrap().len(), 1);
    }

    #[test]
    fn test_dedup_checks_the_whole_store_not_a_window() {
        let store = MemoryStore::new();
        // same (date, title) pair exists far outside any plausible window
        seed_task(&store, "2024-01-08", "Essay");
        let applier = RepeatApplier::new(&store);

        let outcome = applier
            .apply(&[candidate("2024-01-08", "Essay"), candidate("2024-01-08", "Shadowing")])
            .unwrap();

        assert_eq!(outcome.inserted, 1);
        assert_eq!(outcome.skipped, 1);
        let titles: Vec<String> = all_tasks(&store).iter().map(|t| t.title.clone()).collect();
        assert_eq!(titles, vec!["Essay".to_string(), "Shadowing".to_string()]);
    }

    #[test]
    fn test_same_title_on_another_date_is_not_a_duplicate() {
        let store = MemoryStore::new();
        seed_task(&store, "2024-01-08", "Essay");
        let applier = RepeatApplier::new(&store);

        let outcome = applier.apply(&[candidate("2024-01-09", "Essay")]).unwrap();
        assert_eq!(outcome.inserted, 1);
    }

    #[test]
    fn test_within_preview_duplicates_both_insert() {
        // known sharp edge: the dedup set is the pre-existing snapshot
        // only, so identical candidates in one preview all survive
        let store = MemoryStore::new();
        let applier = RepeatApplier::new(&store);

        let outcome = applier
            .apply(&[candidate("2024-01-08", "Essay"), candidate("2024-01-08", "Essay")])
            .unwrap();

        assert_eq!(outcome.inserted, 2);
        assert_eq!(all_tasks(&store).len(), 2);
    }

    #[test]
    fn test_expand_then_apply_round() {
        let store = MemoryStore::new();
        seed_task(&store, "2024-01-01", "Essay");
        let source = all_tasks(&store);

        let rule = RecurrenceRule::every_days(7, 3);
        let preview = expand(&rule, date("2024-01-01"), &source, &Default::default());
        assert_eq!(preview.len(), 3);

        let applier = RepeatApplier::new(&store);
        let outcome = applier.apply(&preview).unwrap();
        assert_eq!(outcome.inserted, 3);

        // the source day's task is untouched and unduplicated
        assert_eq!(all_tasks(&store).len(), 4);
    }

    #[test]
    fn test_empty_preview_writes_nothing() {
        let store = MemoryStore::new();
        let applier = RepeatApplier::new(&store);

        let outcome = applier.apply(&[]).unwrap();
        assert_eq!(
            outcome,
            RepeatOutcome {
                batch_id: None,
                inserted: 0,
                skipped: 0
            }
        );
        assert!(all_tasks(&store).is_empty());
        assert!(store.list_batches().unwrap().is_empty());
    }
}
