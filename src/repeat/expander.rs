//! Recurrence expansion
//!
//! Pure date arithmetic: a rule plus the source day's tasks in, candidate
//! rows out. Nothing here touches the store; the applier owns
//! persistence, dedup and batch accounting.

use std::collections::HashSet;

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::tasks::{Category, Task};

/// How a source day's tasks project onto future dates.
///
/// `every_x_days > 0` selects interval mode and `repeat_count` is the
/// number of steps. `every_x_days == 0` selects weekday mode:
/// `repeat_count` is the number of weeks and `weekdays` the days to fill
/// in each of them.
#[derive(Debug, Clone)]
pub struct RecurrenceRule {
    pub every_x_days: u32,
    pub repeat_count: u32,
    pub weekdays: Vec<Weekday>,
    pub exclude_holidays: bool,
}

impl RecurrenceRule {
    /// Repeat every `every_x_days` days, `repeat_count` times
    pub fn every_days(every_x_days: u32, repeat_count: u32) -> Self {
        Self {
            every_x_days,
            repeat_count,
            weekdays: Vec::new(),
            exclude_holidays: false,
        }
    }

    /// Fill the given weekdays for `weeks` weeks starting from the source
    /// date's week
    pub fn on_weekdays(weekdays: Vec<Weekday>, weeks: u32) -> Self {
        Self {
            every_x_days: 0,
            repeat_count: weeks,
            weekdays,
            exclude_holidays: false,
        }
    }

    pub fn skipping_holidays(mut self) -> Self {
        self.exclude_holidays = true;
        self
    }
}

/// An expander-produced, not-yet-persisted task instance. Identity and
/// batch provenance are assigned only on apply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub target_date: NaiveDate,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub category: Category,
    pub expected_minutes: u32,
}

impl Candidate {
    fn from_task(task: &Task, target_date: NaiveDate) -> Self {
        Self {
            target_date,
            title: task.title.clone(),
            description: task.description.clone(),
            category: task.category,
            expected_minutes: task.expected_minutes,
        }
    }
}

/// Sunday of the week containing `date`
fn start_of_week(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_sunday()))
}

/// Expand `rule` from `source_date` over that day's tasks.
///
/// Interval mode steps `1..=repeat_count` from the source date; the
/// source day itself is never re-emitted. Weekday mode snaps each
/// selected weekday within each week offset from the start of the source
/// week (Sunday), so week 0 can land before the source date: selecting a
/// weekday earlier in the same week back-fills it on purpose.
///
/// When the rule excludes holidays, a target date in `holidays` is
/// dropped whole, before any rows are emitted for it.
///
/// Zero source tasks expand to zero candidates; callers should report
/// "nothing to repeat" instead of running an empty apply.
pub fn expand(
    rule: &RecurrenceRule,
    source_date: NaiveDate,
    source_tasks: &[Task],
    holidays: &HashSet<NaiveDate>,
) -> Vec<Candidate> {
    let mut candidates = Vec::new();

    if rule.every_x_days > 0 {
        for step in 1..=rule.repeat_count {
            let target = source_date + Duration::days(i64::from(step * rule.every_x_days));
            if rule.exclude_holidays && holidays.contains(&target) {
                continue;
            }
            for task in source_tasks {
                candidates.push(Candidate::from_task(task, target));
            }
        }
    } else {
        let week_start = start_of_week(source_date);
        for week in 0..rule.repeat_count {
            for &weekday in &rule.weekdays {
                let target = week_start
                    + Duration::weeks(i64::from(week))
                    + Duration::days(i64::from(weekday.num_days_from_sunday()));
                if rule.exclude_holidays && holidays.contains(&target) {
                    continue;
                }
                for task in source_tasks {
                    candidates.push(Candidate::from_task(task, target));
                }
            }
        }
    }

    candidates
}
