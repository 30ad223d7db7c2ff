//! Spaced-repetition review scheduling
//!
//! The scheduler computes the due queue and applies grading transitions.
//! It is the only writer of `mastery_level` and `next_review_date`; the
//! add/edit form never touches them.

use chrono::{Duration, NaiveDate};
use uuid::Uuid;

use super::algorithm::{interval_days, next_mastery};
use super::models::{NewReviewLog, VocabFilter, VocabReviewLog, VocabWord};
use crate::store::{RecordStore, Result};

/// Outcome of grading a single word
#[derive(Debug, Clone)]
pub struct GradeOutcome {
    /// The word as persisted after the grade
    pub word: VocabWord,
    /// Interval that was applied, in days
    pub interval_days: i64,
    /// The audit row that was appended
    pub log: VocabReviewLog,
}

pub struct ReviewScheduler<'a> {
    store: &'a dyn RecordStore,
}

impl<'a> ReviewScheduler<'a> {
    pub fn new(store: &'a dyn RecordStore) -> Self {
        Self { store }
    }

    /// Words due on or before `as_of`, oldest due date first.
    ///
    /// Words that have never been graded have no review date and are never
    /// due; they enter the cycle on their first grade. Ties keep store
    /// order (the sort is stable).
    pub fn due_words(&self, as_of: NaiveDate) -> Result<Vec<VocabWord>> {
        let mut due = self.store.list_words(&VocabFilter::due_by(as_of))?;
        due.sort_by_key(|w| w.next_review_date);
        Ok(due)
    }

    /// Grade a word and persist the resulting review state.
    ///
    /// The next review lands `interval` days after `as_of` (the grading
    /// day, not the word's previous due date), so lateness does not
    /// compound. One audit row is appended carrying the quality and
    /// interval used and the mastery that resulted.
    pub fn grade(&self, word_id: Uuid, quality: i32, as_of: NaiveDate) -> Result<GradeOutcome> {
        let word = self.store.get_word(word_id)?;

        let interval = interval_days(quality);
        let mastery = next_mastery(word.mastery_level, quality);
        let next_review = as_of + Duration::days(interval);

        let word = self.store.set_review_state(word.id, mastery, next_review)?;
        let log = self.store.append_review_log(NewReviewLog {
            vocab_id: word.id,
            quality,
            interval_days: interval,
            updated_mastery: mastery,
        })?;

        log::debug!(
            "graded word {} quality {} -> interval {}d, mastery {:?}",
            word.id,
            quality,
            interval,
            mastery
        );

        Ok(GradeOutcome {
            word,
            interval_days: interval,
            log,
        })
    }
}

/// Caller-held cursor over the due queue.
///
/// The queue is read once per pass. Advancing past the end re-issues the
/// due query instead of looping the stale list: a word that became due
/// mid-pass is picked up by the next pass, and the session ends when a
/// fresh pass comes back empty.
pub struct ReviewSession {
    queue: Vec<VocabWord>,
    index: usize,
}

impl ReviewSession {
    pub fn start(scheduler: &ReviewScheduler<'_>, as_of: NaiveDate) -> Result<Self> {
        Ok(Self {
            queue: scheduler.due_words(as_of)?,
            index: 0,
        })
    }

    /// The word currently shown, if any
    pub fn current(&self) -> Option<&VocabWord> {
        self.queue.get(self.index)
    }

    /// Words left in the current pass, including the current one
    pub fn remaining(&self) -> usize {
        self.queue.len().saturating_sub(self.index)
    }

    /// Grade the current word and move on.
    ///
    /// Returns `None` when there is no current word. When the pass is
    /// exhausted the queue is re-read as of `as_of`.
    pub fn grade_current(
        &mut self,
        scheduler: &ReviewScheduler<'_>,
        quality: i32,
        as_of: NaiveDate,
    ) -> Result<Option<GradeOutcome>> {
        let Some(word) = self.current() else {
            return Ok(None);
        };

        let outcome = scheduler.grade(word.id, quality, as_of)?;
        self.index += 1;
        if self.index >= self.queue.len() {
            self.queue = scheduler.due_words(as_of)?;
            self.index = 0;
        }
        Ok(Some(outcome))
    }
}
