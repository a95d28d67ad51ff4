//! Session Management: state machine, misconception tracking and progress
//!
//! # Components
//! - `state.rs`: GameSession phase machine and scoring rules
//! - `mistakes.rs`: Misconception counting across a session
//! - `progress.rs`: Progress records and the persistence boundary

pub mod mistakes;
pub mod progress;
pub mod state;

pub use mistakes::{MistakeSummary, MistakeTracker};
pub use progress::{
    record_completion, JsonFileStore, MemoryStore, PersistError, ProgressRecord, ProgressStore,
};
pub use state::{
    AnswerOutcome, CompletionSummary, GamePhase, GameSession, ScoreRules, SessionError,
};
