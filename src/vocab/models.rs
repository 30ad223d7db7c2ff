//! Data models for vocabulary words and review history

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Review progress for a word.
///
/// Stored and serialized as the integer the rest of the system uses:
/// 0 = New, 1 = Learning, 2 = Mastered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(into = "u8", try_from = "u8")]
pub enum MasteryLevel {
    #[default]
    New,
    Learning,
    Mastered,
}

impl MasteryLevel {
    /// One step up, saturating at Mastered
    pub fn stepped_up(self) -> Self {
        match self {
            Self::New => Self::Learning,
            Self::Learning | Self::Mastered => Self::Mastered,
        }
    }

    /// One step down, saturating at New
    pub fn stepped_down(self) -> Self {
        match self {
            Self::Mastered => Self::Learning,
            Self::Learning | Self::New => Self::New,
        }
    }
}

impl From<MasteryLevel> for u8 {
    fn from(level: MasteryLevel) -> u8 {
        match level {
            MasteryLevel::New => 0,
            MasteryLevel::Learning => 1,
            MasteryLevel::Mastered => 2,
        }
    }
}

impl TryFrom<u8> for MasteryLevel {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::New),
            1 => Ok(Self::Learning),
            2 => Ok(Self::Mastered),
            other => Err(format!("mastery level out of range: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PartOfSpeech {
    Noun,
    Verb,
    Adjective,
    Adverb,
    Phrase,
    #[default]
    Other,
}

/// A vocabulary word owned by the student
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabWord {
    pub id: Uuid,
    pub word: String,
    pub meaning: String,
    pub example: String,
    pub part_of_speech: PartOfSpeech,
    pub notes: String,
    #[serde(default)]
    pub mastery_level: MasteryLevel,
    /// `None` until the word is graded for the first time. Words are not
    /// auto-enrolled into the review cycle at creation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_review_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for a word; the store assigns id and created_at, and
/// seeds mastery to New with no review date
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewVocabWord {
    pub word: String,
    pub meaning: String,
    pub example: String,
    #[serde(default)]
    pub part_of_speech: PartOfSpeech,
    #[serde(default)]
    pub notes: String,
}

/// Form-mutable fields. Mastery and the next review date are owned by the
/// scheduler and cannot be set through an edit.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabWordUpdate {
    pub word: Option<String>,
    pub meaning: Option<String>,
    pub example: Option<String>,
    pub part_of_speech: Option<PartOfSpeech>,
    pub notes: Option<String>,
}

/// Append-only audit record for one grading event. Never updated, never
/// read back by the scheduler.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabReviewLog {
    pub id: Uuid,
    pub vocab_id: Uuid,
    pub quality: i32,
    /// Interval that was applied, in days
    pub interval_days: i64,
    /// Mastery after the grade, not before it
    pub updated_mastery: MasteryLevel,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReviewLog {
    pub vocab_id: Uuid,
    pub quality: i32,
    pub interval_days: i64,
    pub updated_mastery: MasteryLevel,
}

/// Predicate for word reads. An empty filter selects every word.
#[derive(Debug, Clone, Default)]
pub struct VocabFilter {
    /// Words whose next review date is on or before this day. Never
    /// matches a word that has no review date yet.
    pub due_on_or_before: Option<NaiveDate>,
    /// Words created on this calendar day
    pub created_on: Option<NaiveDate>,
}

impl VocabFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn due_by(date: NaiveDate) -> Self {
        Self {
            due_on_or_before: Some(date),
            ..Self::default()
        }
    }

    pub fn matches(&self, word: &VocabWord) -> bool {
        if let Some(cutoff) = self.due_on_or_before {
            match word.next_review_date {
                Some(due) if due <= cutoff => {}
                _ => return false,
            }
        }
        if let Some(created) = self.created_on {
            if word.created_at.date_naive() != created {
                return false;
            }
        }
        true
    }
}
