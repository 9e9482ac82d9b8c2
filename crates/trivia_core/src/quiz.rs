//! crates/trivia_core/src/quiz.rs
//!
//! Picks the next quiz question from an eligible pool, skipping the ones the
//! player has already seen. Session state stays with the caller.

use std::collections::HashSet;

use rand::Rng;

use crate::domain::{CategoryId, Question, QuestionId};

/// Which questions a quiz draws from. The wire value `0` means any category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryFilter {
    Any,
    Only(CategoryId),
}

impl CategoryFilter {
    pub fn from_id(id: CategoryId) -> Self {
        if id == 0 {
            Self::Any
        } else {
            Self::Only(id)
        }
    }

    pub fn admits(&self, question: &Question) -> bool {
        match self {
            Self::Any => true,
            Self::Only(id) => question.category == *id,
        }
    }
}

/// Result of one selection step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizDraw<'a> {
    /// `remaining` is the size of the unseen pool the question was drawn from.
    Next {
        question: &'a Question,
        remaining: usize,
    },
    /// Every eligible question has been seen; the quiz is over.
    Exhausted,
}

impl<'a> QuizDraw<'a> {
    pub fn question(&self) -> Option<&'a Question> {
        match self {
            Self::Next { question, .. } => Some(*question),
            Self::Exhausted => None,
        }
    }

    pub fn remaining(&self) -> usize {
        match self {
            Self::Next { remaining, .. } => *remaining,
            Self::Exhausted => 0,
        }
    }
}

/// Draws uniformly at random from `eligible` minus `excluded`.
pub fn next_question<'a>(
    eligible: &'a [Question],
    excluded: &HashSet<QuestionId>,
) -> QuizDraw<'a> {
    next_question_with(eligible, excluded, &mut rand::thread_rng())
}

pub fn next_question_with<'a, R: Rng + ?Sized>(
    eligible: &'a [Question],
    excluded: &HashSet<QuestionId>,
    rng: &mut R,
) -> QuizDraw<'a> {
    let remaining: Vec<&Question> = eligible
        .iter()
        .filter(|q| !excluded.contains(&q.id))
        .collect();

    if remaining.is_empty() {
        return QuizDraw::Exhausted;
    }

    let idx = rng.gen_range(0..remaining.len());
    QuizDraw::Next {
        question: remaining[idx],
        remaining: remaining.len(),
    }
}
