//! FracQuest core: fraction practice as a reusable game engine
//!
//! The arithmetic, question generation and session tracking the mini-games
//! share, factored into one crate instead of being re-derived per game:
//!
//! - `engine`: exact fraction values and arithmetic over unified denominators
//! - `question`: randomized practice items with misconception-tagged choices
//! - `session`: the tutorial → playing → complete state machine, mistake
//!   tracking and the progress-persistence boundary
//! - `analytics`: teacher-dashboard aggregation over progress records
//! - `waypoint`: per-mini-game configuration
//! - `cli`: terminal rendering and input for the binary

pub mod analytics;
pub mod cli;
pub mod engine;
pub mod question;
pub mod session;
pub mod waypoint;

pub use engine::{EngineError, Fraction};
pub use question::{Question, QuestionKind};
pub use session::{GamePhase, GameSession, ScoreRules};
