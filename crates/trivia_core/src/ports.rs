//! crates/trivia_core/src/ports.rs
//!
//! Defines the store contract consumed by the core logic.
//! The trait forms the boundary of the hexagonal architecture, allowing the core
//! to be independent of the concrete database behind it.

use async_trait::async_trait;

use crate::domain::{Category, CategoryId, Question, QuestionDraft, QuestionId};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from the storage backend.
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    /// The store refused a write, e.g. a constraint violation.
    #[error("Write rejected: {0}")]
    Rejected(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Store Port
//=========================================================================================

#[async_trait]
pub trait QuestionStore: Send + Sync {
    // --- Questions ---

    /// All questions, ordered by id ascending.
    async fn list_all(&self) -> PortResult<Vec<Question>>;

    /// Questions of one category, ordered by id ascending.
    async fn list_by_category(&self, category_id: CategoryId) -> PortResult<Vec<Question>>;

    /// Questions whose text contains `term`, ignoring case, ordered by id.
    async fn search(&self, term: &str) -> PortResult<Vec<Question>>;

    /// Stores a draft and returns it with its assigned id.
    async fn insert(&self, draft: QuestionDraft) -> PortResult<Question>;

    /// Removes a question. Returns `false` when no row had that id.
    async fn delete(&self, id: QuestionId) -> PortResult<bool>;

    // --- Categories ---
    async fn list_categories(&self) -> PortResult<Vec<Category>>;
}
