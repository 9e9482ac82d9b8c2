pub mod db;
pub mod memory;

pub use db::PgQuestionStore;
pub use memory::MemoryStore;
