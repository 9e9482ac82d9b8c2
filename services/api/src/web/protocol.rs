//! services/api/src/web/protocol.rs
//!
//! Defines the JSON payloads exchanged between the trivia frontend and the API,
//! and the parsing that turns loosely typed request bodies into core values.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use trivia_core::domain::{CategoryMap, Question, QuestionDraft, QuestionId};
use trivia_core::pagination::PageRequest;
use trivia_core::quiz::CategoryFilter;
use utoipa::{IntoParams, ToSchema};

//=========================================================================================
// Payloads Sent FROM the Client TO the Server
//=========================================================================================

/// The `?page=` query parameter shared by every listing endpoint.
#[derive(Deserialize, Debug, Default, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageParams {
    /// 1-based page number. Missing or non-numeric values mean page 1.
    pub page: Option<String>,
}

impl PageParams {
    pub fn page_request(&self) -> PageRequest {
        PageRequest::from_query(self.page.as_deref())
    }
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct SearchRequest {
    #[serde(rename = "searchTerm")]
    pub search_term: Option<String>,
}

impl SearchRequest {
    /// The trimmed search term, or `None` when the client asked for everything.
    pub fn term(&self) -> Option<&str> {
        self.search_term
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

/// Body of `POST /questions/add`. `category` and `difficulty` may arrive as
/// numbers or numeric strings.
#[derive(Deserialize, Debug, ToSchema)]
pub struct NewQuestionRequest {
    pub question: Option<String>,
    pub answer: Option<String>,
    #[schema(value_type = i64)]
    pub category: Option<Value>,
    #[schema(value_type = i32)]
    pub difficulty: Option<Value>,
}

impl NewQuestionRequest {
    pub fn into_draft(self) -> Result<QuestionDraft, &'static str> {
        let text = self.question.ok_or("missing question")?;
        let answer = self.answer.ok_or("missing answer")?;
        let category = self
            .category
            .as_ref()
            .and_then(integer_value)
            .ok_or("category must be an integer")?;
        let difficulty = self
            .difficulty
            .as_ref()
            .and_then(integer_value)
            .and_then(|d| i32::try_from(d).ok())
            .ok_or("difficulty must be an integer")?;

        Ok(QuestionDraft {
            text,
            answer,
            category,
            difficulty,
        })
    }
}

/// Body of `POST /quizzes`.
#[derive(Deserialize, Debug, ToSchema)]
pub struct QuizRequest {
    #[serde(default)]
    #[schema(value_type = Vec<i64>)]
    pub previous_questions: Option<Value>,
    /// `{ "id": <category id or 0 for all>, "type": <label> }`
    #[serde(default)]
    #[schema(value_type = Object)]
    pub quiz_category: Option<Value>,
}

/// A quiz request after structural validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizParams {
    pub excluded: HashSet<QuestionId>,
    pub filter: CategoryFilter,
}

impl QuizRequest {
    pub fn into_params(self) -> Result<QuizParams, &'static str> {
        let excluded = match self.previous_questions {
            None | Some(Value::Null) => HashSet::new(),
            Some(Value::Array(ids)) => ids
                .iter()
                .map(integer_value)
                .collect::<Option<HashSet<_>>>()
                .ok_or("previous_questions must only hold integers")?,
            Some(_) => return Err("previous_questions must be an array"),
        };

        let selector = match self.quiz_category {
            Some(Value::Object(selector)) => selector,
            Some(_) => return Err("quiz_category must be an object"),
            None => return Err("missing quiz_category"),
        };
        let category_id = selector
            .get("id")
            .ok_or("quiz_category has no id")
            .and_then(|id| integer_value(id).ok_or("quiz_category id must be an integer"))?;

        Ok(QuizParams {
            excluded,
            filter: CategoryFilter::from_id(category_id),
        })
    }
}

/// Accepts JSON integers and strings holding one.
fn integer_value(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

//=========================================================================================
// Payloads Sent FROM the Server TO the Client
//=========================================================================================

/// The wire shape of a question.
#[derive(Serialize, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct QuestionView {
    pub id: QuestionId,
    pub question: String,
    pub answer: String,
    pub category: i64,
    pub difficulty: i32,
}

impl From<&Question> for QuestionView {
    fn from(q: &Question) -> Self {
        Self {
            id: q.id,
            question: q.text.clone(),
            answer: q.answer.clone(),
            category: q.category,
            difficulty: q.difficulty,
        }
    }
}

#[derive(Serialize, Debug, ToSchema)]
pub struct CategoriesResponse {
    pub success: bool,
    /// Category labels keyed by id.
    #[schema(value_type = Object)]
    pub categories: CategoryMap,
}

/// One page of questions plus the context the frontend renders around it.
#[derive(Serialize, Debug, ToSchema)]
pub struct QuestionListResponse {
    pub success: bool,
    pub questions: Vec<QuestionView>,
    pub total_questions: usize,
    #[schema(value_type = Object)]
    pub categories: CategoryMap,
    pub current_category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted: Option<QuestionId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<QuestionId>,
}

impl QuestionListResponse {
    pub fn new(page: &[Question], total_questions: usize, categories: CategoryMap) -> Self {
        Self {
            success: true,
            questions: page.iter().map(QuestionView::from).collect(),
            total_questions,
            categories,
            current_category: String::new(),
            deleted: None,
            created: None,
        }
    }

    pub fn deleted(mut self, id: QuestionId) -> Self {
        self.deleted = Some(id);
        self
    }

    pub fn created(mut self, id: QuestionId) -> Self {
        self.created = Some(id);
        self
    }
}

#[derive(Serialize, Debug, ToSchema)]
pub struct QuizResponse {
    pub success: bool,
    /// `null` once every eligible question has been played.
    pub question: Option<QuestionView>,
    /// Unseen questions left in the pool before this draw.
    pub total_questions: usize,
    #[schema(value_type = Object)]
    pub categories: CategoryMap,
    pub current_category: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn quiz(body: Value) -> Result<QuizParams, &'static str> {
        serde_json::from_value::<QuizRequest>(body).unwrap().into_params()
    }

    #[test]
    fn quiz_accepts_numeric_string_ids() {
        let params = quiz(json!({
            "previous_questions": [9, "10"],
            "quiz_category": {"type": "History", "id": "4"}
        }))
        .unwrap();
        assert_eq!(params.filter, CategoryFilter::Only(4));
        assert_eq!(params.excluded, [9, 10].into_iter().collect::<HashSet<_>>());
    }

    #[test]
    fn quiz_category_zero_is_any() {
        let params = quiz(json!({"quiz_category": {"id": 0}})).unwrap();
        assert_eq!(params.filter, CategoryFilter::Any);
        assert!(params.excluded.is_empty());
    }

    #[test]
    fn malformed_selectors_are_rejected() {
        assert!(quiz(json!({"previous_questions": []})).is_err());
        assert!(quiz(json!({"quiz_category": {}})).is_err());
        assert!(quiz(json!({"quiz_category": 4})).is_err());
        assert!(quiz(json!({"quiz_category": {"id": "four"}})).is_err());
        assert!(quiz(json!({"quiz_category": {"id": 1}, "previous_questions": "1,2"})).is_err());
        assert!(quiz(json!({"quiz_category": {"id": 1}, "previous_questions": [1.5]})).is_err());
    }

    #[test]
    fn new_question_parses_loose_numbers() {
        let req: NewQuestionRequest = serde_json::from_value(json!({
            "question": "Is this a sample question?",
            "answer": "Yes",
            "difficulty": 1,
            "category": "1"
        }))
        .unwrap();
        let draft = req.into_draft().unwrap();
        assert_eq!((draft.category, draft.difficulty), (1, 1));
    }

    #[test]
    fn new_question_requires_every_field() {
        let req: NewQuestionRequest = serde_json::from_value(json!({})).unwrap();
        assert!(req.into_draft().is_err());
    }

    #[test]
    fn blank_search_term_means_everything() {
        let req = SearchRequest { search_term: Some("  ".to_string()) };
        assert_eq!(req.term(), None);
        let req = SearchRequest { search_term: Some(" title ".to_string()) };
        assert_eq!(req.term(), Some("title"));
    }
}
