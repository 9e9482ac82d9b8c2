//! crates/trivia_core/src/domain.rs
//!
//! Defines the pure, core data structures for the trivia game.
//! These structs are independent of any database or serialization format.

use std::collections::BTreeMap;

pub type QuestionId = i64;
pub type CategoryId = i64;

/// A single trivia question as stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub id: QuestionId,
    pub text: String,
    pub answer: String,
    pub category: CategoryId,
    pub difficulty: i32,
}

/// A question that has not been assigned an id by the store yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionDraft {
    pub text: String,
    pub answer: String,
    pub category: CategoryId,
    pub difficulty: i32,
}

/// Why a draft cannot be stored.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DraftError {
    #[error("question text must not be empty")]
    EmptyText,
    #[error("answer must not be empty")]
    EmptyAnswer,
    #[error("difficulty must be at least 1, got {0}")]
    InvalidDifficulty(i32),
}

impl QuestionDraft {
    /// Checks the fields a store would otherwise accept blindly.
    pub fn validate(&self) -> Result<(), DraftError> {
        if self.text.trim().is_empty() {
            return Err(DraftError::EmptyText);
        }
        if self.answer.trim().is_empty() {
            return Err(DraftError::EmptyAnswer);
        }
        if self.difficulty < 1 {
            return Err(DraftError::InvalidDifficulty(self.difficulty));
        }
        Ok(())
    }

    pub fn into_question(self, id: QuestionId) -> Question {
        Question {
            id,
            text: self.text,
            answer: self.answer,
            category: self.category,
            difficulty: self.difficulty,
        }
    }
}

/// Reference data grouping questions. `label` is the display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: CategoryId,
    pub label: String,
}

/// Projection of the categories as `id -> label`, ordered by id.
pub type CategoryMap = BTreeMap<CategoryId, String>;

pub fn category_map(categories: &[Category]) -> CategoryMap {
    categories
        .iter()
        .map(|c| (c.id, c.label.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> QuestionDraft {
        QuestionDraft {
            text: "Who painted the Mona Lisa?".to_string(),
            answer: "Leonardo da Vinci".to_string(),
            category: 2,
            difficulty: 3,
        }
    }

    #[test]
    fn valid_draft_passes() {
        assert_eq!(draft().validate(), Ok(()));
    }

    #[test]
    fn blank_fields_are_rejected() {
        let mut d = draft();
        d.text = "   ".to_string();
        assert_eq!(d.validate(), Err(DraftError::EmptyText));

        let mut d = draft();
        d.answer = String::new();
        assert_eq!(d.validate(), Err(DraftError::EmptyAnswer));

        let mut d = draft();
        d.difficulty = 0;
        assert_eq!(d.validate(), Err(DraftError::InvalidDifficulty(0)));
    }

    #[test]
    fn category_map_is_keyed_by_id() {
        let map = category_map(&[
            Category { id: 4, label: "History".to_string() },
            Category { id: 1, label: "Science".to_string() },
        ]);
        let ids: Vec<_> = map.keys().copied().collect();
        assert_eq!(ids, vec![1, 4]);
        assert_eq!(map.get(&4).map(String::as_str), Some("History"));
    }
}
