//! services/api/src/adapters/memory.rs
//!
//! An in-process implementation of the `QuestionStore` port. It backs the API
//! integration tests and local runs that have no PostgreSQL at hand.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;
use trivia_core::domain::{Category, CategoryId, Question, QuestionDraft, QuestionId};
use trivia_core::ports::{PortError, PortResult, QuestionStore};

#[derive(Default)]
struct Tables {
    questions: BTreeMap<QuestionId, Question>,
    categories: BTreeMap<CategoryId, Category>,
    next_id: QuestionId,
}

/// A store holding everything in ordered maps behind a single lock.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
    fail_writes: AtomicBool,
    fail_reads: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store seeded with the given categories.
    pub fn with_categories<I>(categories: I) -> Self
    where
        I: IntoIterator<Item = Category>,
    {
        let tables = Tables {
            categories: categories.into_iter().map(|c| (c.id, c)).collect(),
            ..Tables::default()
        };
        Self {
            tables: RwLock::new(tables),
            fail_writes: AtomicBool::new(false),
            fail_reads: AtomicBool::new(false),
        }
    }

    /// Makes every later insert and delete fail, leaving the data untouched.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Makes every later listing, search and category lookup fail.
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    fn check_readable(&self) -> PortResult<()> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(PortError::Unexpected("store is unreachable".to_string()));
        }
        Ok(())
    }

    fn check_writable(&self) -> PortResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(PortError::Rejected("store is read-only".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl QuestionStore for MemoryStore {
    async fn list_all(&self) -> PortResult<Vec<Question>> {
        self.check_readable()?;
        let tables = self.tables.read().await;
        Ok(tables.questions.values().cloned().collect())
    }

    async fn list_by_category(&self, category_id: CategoryId) -> PortResult<Vec<Question>> {
        self.check_readable()?;
        let tables = self.tables.read().await;
        Ok(tables
            .questions
            .values()
            .filter(|q| q.category == category_id)
            .cloned()
            .collect())
    }

    async fn search(&self, term: &str) -> PortResult<Vec<Question>> {
        self.check_readable()?;
        let needle = term.to_lowercase();
        let tables = self.tables.read().await;
        Ok(tables
            .questions
            .values()
            .filter(|q| q.text.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    async fn insert(&self, draft: QuestionDraft) -> PortResult<Question> {
        self.check_writable()?;
        let mut tables = self.tables.write().await;
        tables.next_id += 1;
        let question = draft.into_question(tables.next_id);
        tables.questions.insert(question.id, question.clone());
        Ok(question)
    }

    async fn delete(&self, id: QuestionId) -> PortResult<bool> {
        self.check_writable()?;
        let mut tables = self.tables.write().await;
        Ok(tables.questions.remove(&id).is_some())
    }

    async fn list_categories(&self) -> PortResult<Vec<Category>> {
        self.check_readable()?;
        let tables = self.tables.read().await;
        Ok(tables.categories.values().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(text: &str, category: CategoryId) -> QuestionDraft {
        QuestionDraft {
            text: text.to_string(),
            answer: "answer".to_string(),
            category,
            difficulty: 2,
        }
    }

    #[tokio::test]
    async fn insert_assigns_increasing_ids() {
        let store = MemoryStore::new();
        let a = store.insert(draft("first", 1)).await.unwrap();
        let b = store.insert(draft("second", 1)).await.unwrap();
        assert_eq!((a.id, b.id), (1, 2));

        let ids: Vec<_> = store.list_all().await.unwrap().iter().map(|q| q.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[tokio::test]
    async fn search_ignores_case() {
        let store = MemoryStore::new();
        store.insert(draft("What is the Title of the book?", 1)).await.unwrap();
        store.insert(draft("Which planet is red?", 1)).await.unwrap();

        let hits = store.search("title").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert!(store.search("xyz-no-match").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_reports_whether_a_row_existed() {
        let store = MemoryStore::new();
        let q = store.insert(draft("gone soon", 3)).await.unwrap();
        assert!(store.delete(q.id).await.unwrap());
        assert!(!store.delete(q.id).await.unwrap());
    }

    #[tokio::test]
    async fn failed_writes_leave_data_unchanged() {
        let store = MemoryStore::new();
        let q = store.insert(draft("kept", 3)).await.unwrap();
        store.fail_writes(true);

        assert!(matches!(store.insert(draft("new", 3)).await, Err(PortError::Rejected(_))));
        assert!(store.delete(q.id).await.is_err());
        assert_eq!(store.list_all().await.unwrap(), vec![q]);
    }

    #[tokio::test]
    async fn failed_reads_report_unexpected_errors() {
        let store = MemoryStore::with_categories([Category { id: 1, label: "Science".to_string() }]);
        store.insert(draft("still here", 1)).await.unwrap();
        store.fail_reads(true);

        assert!(matches!(store.list_all().await, Err(PortError::Unexpected(_))));
        assert!(matches!(store.list_by_category(1).await, Err(PortError::Unexpected(_))));
        assert!(matches!(store.search("still").await, Err(PortError::Unexpected(_))));
        assert!(matches!(store.list_categories().await, Err(PortError::Unexpected(_))));

        store.fail_reads(false);
        assert_eq!(store.list_all().await.unwrap().len(), 1);
    }
}
