pub mod domain;
pub mod pagination;
pub mod ports;
pub mod quiz;

pub use domain::{
    category_map, Category, CategoryId, CategoryMap, DraftError, Question, QuestionDraft,
    QuestionId,
};
pub use pagination::{paginate, PageRequest, QUESTIONS_PER_PAGE};
pub use ports::{PortError, PortResult, QuestionStore};
pub use quiz::{next_question, next_question_with, CategoryFilter, QuizDraw};
