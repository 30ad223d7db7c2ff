//! Validated word operations on top of the record store
//!
//! The add/edit form paths. Review state is off limits here; grading goes
//! through the scheduler.

use thiserror::Error;
use uuid::Uuid;

use super::models::{NewVocabWord, VocabWord, VocabWordUpdate};
use crate::store::{RecordStore, StoreError};

#[derive(Error, Debug)]
pub enum VocabError {
    #[error("Word must not be empty")]
    EmptyWord,

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type Result<T> = std::result::Result<T, VocabError>;

/// Add a word. Text fields are trimmed; a blank word is rejected without
/// touching the store. The new word starts at mastery New with no review
/// date.
pub fn create_word(store: &dyn RecordStore, draft: NewVocabWord) -> Result<VocabWord> {
    let word = draft.word.trim();
    if word.is_empty() {
        return Err(VocabError::EmptyWord);
    }

    let row = NewVocabWord {
        word: word.to_string(),
        meaning: draft.meaning.trim().to_string(),
        example: draft.example.trim().to_string(),
        part_of_speech: draft.part_of_speech,
        notes: draft.notes.trim().to_string(),
    };
    Ok(store.insert_word(row)?)
}

/// Apply an edit-form update to a word
pub fn update_word(store: &dyn RecordStore, id: Uuid, updates: VocabWordUpdate) -> Result<VocabWord> {
    if let Some(word) = &updates.word {
        if word.trim().is_empty() {
            return Err(VocabError::EmptyWord);
        }
    }
    Ok(store.update_word(id, updates)?)
}

pub fn delete_word(store: &dyn RecordStore, id: Uuid) -> Result<()> {
    Ok(store.delete_word(id)?)
}
