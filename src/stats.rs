//! Derived dashboard reads
//!
//! Every number here is recomputed from a store read on demand. There is
//! no cached counter state to patch after writes, so nothing can fall
//! out of sync.

use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

use crate::store::{RecordStore, Result};
use crate::tasks::TaskFilter;
use crate::vocab::{MasteryLevel, VocabFilter};

/// Calendar badge counts: tasks per day
pub fn task_counts_by_date(store: &dyn RecordStore) -> Result<BTreeMap<NaiveDate, usize>> {
    let tasks = store.list_tasks(&TaskFilter::all())?;
    let mut counts = BTreeMap::new();
    for task in tasks {
        *counts.entry(task.task_date).or_insert(0) += 1;
    }
    Ok(counts)
}

/// Words added per day, keyed by creation date
pub fn vocab_counts_by_date(store: &dyn RecordStore) -> Result<BTreeMap<NaiveDate, usize>> {
    let words = store.list_words(&VocabFilter::all())?;
    let mut counts = BTreeMap::new();
    for word in words {
        *counts.entry(word.created_at.date_naive()).or_insert(0) += 1;
    }
    Ok(counts)
}

/// The vocabulary stat card
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabStats {
    pub total: usize,
    pub new_count: usize,
    pub learning_count: usize,
    pub mastered_count: usize,
    pub due_today: usize,
}

pub fn vocab_stats(store: &dyn RecordStore, as_of: NaiveDate) -> Result<VocabStats> {
    let words = store.list_words(&VocabFilter::all())?;

    let mut stats = VocabStats {
        total: words.len(),
        new_count: 0,
        learning_count: 0,
        mastered_count: 0,
        due_today: 0,
    };
    for word in &words {
        match word.mastery_level {
            MasteryLevel::New => stats.new_count += 1,
            MasteryLevel::Learning => stats.learning_count += 1,
            MasteryLevel::Mastered => stats.mastered_count += 1,
        }
        if matches!(word.next_review_date, Some(due) if due <= as_of) {
            stats.due_today += 1;
        }
    }
    Ok(stats)
}

/// The teacher's weekly overview numbers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyOverview {
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub total_tasks: usize,
    pub completed_tasks: usize,
    pub expected_minutes: u64,
    pub actual_minutes: u64,
    /// Completed over total, as a whole rounded percent; 0 when empty
    pub completion_rate: u32,
    /// Actual over expected minutes, as a whole rounded percent; can
    /// exceed 100
    pub time_rate: u32,
}

fn percent(numerator: u64, denominator: u64) -> u32 {
    if denominator == 0 {
        return 0;
    }
    ((numerator as f64 / denominator as f64) * 100.0).round() as u32
}

/// Aggregate the week (Sunday through Saturday) containing `day`
pub fn weekly_overview(store: &dyn RecordStore, day: NaiveDate) -> Result<WeeklyOverview> {
    let week_start = day - Duration::days(i64::from(day.weekday().num_days_from_sunday()));
    let week_end = week_start + Duration::days(6);

    let tasks = store.list_tasks(&TaskFilter::between(week_start, week_end))?;

    let expected: u64 = tasks.iter().map(|t| u64::from(t.expected_minutes)).sum();
    let actual: u64 = tasks
        .iter()
        .filter_map(|t| t.actual_minutes)
        .map(u64::from)
        .sum();
    let completed = tasks.iter().filter(|t| t.is_done).count();

    Ok(WeeklyOverview {
        week_start,
        week_end,
        total_tasks: tasks.len(),
        completed_tasks: completed,
        expected_minutes: expected,
        actual_minutes: actual,
        completion_rate: percent(completed as u64, tasks.len() as u64),
        time_rate: percent(actual, expected),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::tasks::{NewTask, TaskUpdate};
    use crate::vocab::NewVocabWord;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn add_task(store: &MemoryStore, day: &str, title: &str, expected: u32) -> uuid::Uuid {
        store
            .insert_tasks(vec![NewTask::new(date(day), title).with_expected_minutes(expected)])
            .unwrap()
            .pop()
            .unwrap()
            .id
    }

    #[test]
    fn test_task_counts_by_date() {
        let store = MemoryStore::new();
        add_task(&store, "2024-01-03", "a", 30);
        add_task(&store, "2024-01-03", "b", 30);
        add_task(&store, "2024-01-05", "c", 30);

        let counts = task_counts_by_date(&store).unwrap();
        assert_eq!(counts.get(&date("2024-01-03")), Some(&2));
        assert_eq!(counts.get(&date("2024-01-05")), Some(&1));
        assert_eq!(counts.get(&date("2024-01-04")), None);
    }

    #[test]
    fn test_vocab_stats_counts_levels_and_due() {
        let store = MemoryStore::new();
        let graded = store
            .insert_word(NewVocabWord {
                word: "one".to_string(),
                meaning: String::new(),
                example: String::new(),
                part_of_speech: Default::default(),
                notes: String::new(),
            })
            .unwrap();
        store
            .insert_word(NewVocabWord {
                word: "two".to_string(),
                meaning: String::new(),
                example: String::new(),
                part_of_speech: Default::default(),
                notes: String::new(),
            })
            .unwrap();
        store
            .set_review_state(graded.id, MasteryLevel::Learning, date("2024-06-01"))
            .unwrap();

        let stats = vocab_stats(&store, date("2024-06-01")).unwrap();
        assert_eq!(
            stats,
            VocabStats {
                total: 2,
                new_count: 1,
                learning_count: 1,
                mastered_count: 0,
                due_today: 1,
            }
        );
    }

    #[test]
    fn test_weekly_overview_sums_and_rates() {
        let store = MemoryStore::new();
        // 2024-06-05 is a Wednesday; its week runs Sun 2024-06-02 through
        // Sat 2024-06-08
        let done = add_task(&store, "2024-06-03", "in-week done", 30);
        add_task(&store, "2024-06-08", "in-week open", 60);
        add_task(&store, "2024-06-09", "next week", 30);

        store
            .update_task(
                done,
                TaskUpdate {
                    is_done: Some(true),
                    actual_minutes: Some(45),
                    ..TaskUpdate::default()
                },
            )
            .unwrap();

        let overview = weekly_overview(&store, date("2024-06-05")).unwrap();
        assert_eq!(overview.week_start, date("2024-06-02"));
        assert_eq!(overview.week_end, date("2024-06-08"));
        assert_eq!(overview.total_tasks, 2);
        assert_eq!(overview.completed_tasks, 1);
        assert_eq!(overview.expected_minutes, 90);
        assert_eq!(overview.actual_minutes, 45);
        assert_eq!(overview.completion_rate, 50);
        assert_eq!(overview.time_rate, 50);
    }

    #[test]
    fn test_weekly_overview_of_an_empty_week_is_all_zeroes() {
        let store = MemoryStore::new();
        let overview = weekly_overview(&store, date("2024-06-05")).unwrap();
        assert_eq!(overview.total_tasks, 0);
        assert_eq!(overview.completion_rate, 0);
        assert_eq!(overview.time_rate, 0);
    }
}
