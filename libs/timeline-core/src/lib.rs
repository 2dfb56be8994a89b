//! Spaced repetition engine for memorizing dates.
//!
//! Provides:
//! - SM-2 scheduling over per-item review records
//! - Due item selection with a priority fallback
//! - The stat store seam plus an in-memory store
//! - Item-set parsing, question building and answer matching
//! - Study overview and session summary figures

pub mod algorithm;
pub mod error;
pub mod matching;
pub mod overview;
pub mod parser;
pub mod question;
pub mod review;
pub mod selector;
pub mod store;
pub mod types;

pub use algorithm::{SchedulingResult, Sm2};
pub use error::{ItemSetError, Result, ScoreError};
pub use matching::{compare_answers, normalize_answer, MatchResult};
pub use overview::{SessionSummary, StudyOverview};
pub use parser::parse;
pub use question::{Question, QuestionKind};
pub use review::{local_now, record_attempt, record_outcome, ReviewSystem};
pub use selector::select_due;
pub use store::{MemoryStore, StatStore};
pub use types::{Item, ItemId, ItemSet, PerformanceScore, ReviewRecord, StatMap};
