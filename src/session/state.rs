//! Game session state machine
//!
//! Maintains:
//! - Phase (tutorial → playing → complete, with explicit retry resets)
//! - Score, mistake and attempt counters under per-waypoint rules
//! - The active question and the session wall clock

use std::time::Instant;

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::question::{self, Question, QuestionKind};

/// Operations issued in the wrong phase
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("session already left the tutorial")]
    AlreadyBegun,
    #[error("answers can only be submitted while playing")]
    NotPlaying,
    #[error("the session has not completed yet")]
    NotComplete,
}

/// Where the session currently is. Transitions are one-directional except
/// for the explicit retry reset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GamePhase {
    Tutorial,
    Playing,
    Complete,
}

/// Per-waypoint scoring constants.
///
/// The cap is a per-game constant (20 or 100 depending on the mini-game),
/// not a universal rule; the penalty is commonly 2.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRules {
    /// Score the session starts with
    pub starting_score: u32,
    /// Points awarded per correct answer
    pub correct_award: u32,
    /// Points removed per wrong answer (floored at zero)
    pub wrong_penalty: u32,
    /// Upper bound on the score
    pub score_cap: u32,
    /// Correct answers needed to finish
    pub rounds: u32,
}

impl Default for ScoreRules {
    fn default() -> Self {
        ScoreRules {
            starting_score: 0,
            correct_award: 4,
            wrong_penalty: 2,
            score_cap: 20,
            rounds: 5,
        }
    }
}

/// Outcome of one answer submission
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnswerOutcome {
    /// Correct; `session_complete` is set when the round quota was reached
    Correct { session_complete: bool },
    /// Wrong; the same question stays active for another attempt
    Incorrect,
}

/// Terminal emission: the tuple handed to the progress-recording collaborator
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CompletionSummary {
    pub score: u32,
    pub mistakes: u32,
    pub attempts: u32,
    pub time_spent_secs: u64,
}

/// One mini-game round trip from tutorial to scored completion
#[derive(Clone, Debug)]
pub struct GameSession {
    pub phase: GamePhase,
    kind: QuestionKind,
    rules: ScoreRules,
    pub score: u32,
    pub mistakes: u32,
    pub attempts: u32,
    /// Questions answered correctly so far
    pub rounds_cleared: u32,
    question: Option<Question>,
    start_time: Option<Instant>,
}

impl GameSession {
    /// Create a session in the tutorial phase
    pub fn new(kind: QuestionKind, rules: ScoreRules) -> Self {
        GameSession {
            phase: GamePhase::Tutorial,
            kind,
            rules,
            score: rules.starting_score.min(rules.score_cap),
            mistakes: 0,
            attempts: 0,
            rounds_cleared: 0,
            question: None,
            start_time: None,
        }
    }

    pub fn kind(&self) -> QuestionKind {
        self.kind
    }

    pub fn rules(&self) -> &ScoreRules {
        &self.rules
    }

    /// Leave the tutorial, start the clock and draw the first question
    pub fn begin(&mut self, rng: &mut impl Rng) -> Result<(), SessionError> {
        if self.phase != GamePhase::Tutorial {
            return Err(SessionError::AlreadyBegun);
        }
        self.phase = GamePhase::Playing;
        self.start_time = Some(Instant::now());
        self.question = Some(question::generate(self.kind, rng));
        Ok(())
    }

    /// The question currently on screen, while playing
    pub fn current_question(&self) -> Option<&Question> {
        self.question.as_ref()
    }

    /// Evaluate a submitted answer.
    ///
    /// Correct answers award points (capped) and advance to a fresh question
    /// or to completion; wrong answers cost the penalty and leave the same
    /// question active.
    pub fn submit(
        &mut self,
        chosen: &str,
        rng: &mut impl Rng,
    ) -> Result<AnswerOutcome, SessionError> {
        if self.phase != GamePhase::Playing {
            return Err(SessionError::NotPlaying);
        }
        let correct = self
            .question
            .as_ref()
            .ok_or(SessionError::NotPlaying)?
            .is_correct(chosen);

        self.attempts += 1;

        if correct {
            self.score = (self.score + self.rules.correct_award).min(self.rules.score_cap);
            self.rounds_cleared += 1;
            if self.rounds_cleared >= self.rules.rounds {
                self.phase = GamePhase::Complete;
                self.question = None;
                Ok(AnswerOutcome::Correct {
                    session_complete: true,
                })
            } else {
                self.question = Some(question::generate(self.kind, rng));
                Ok(AnswerOutcome::Correct {
                    session_complete: false,
                })
            }
        } else {
            self.mistakes += 1;
            self.score = self.score.saturating_sub(self.rules.wrong_penalty);
            Ok(AnswerOutcome::Incorrect)
        }
    }

    /// Explicit retry: reset all counters and either return to the tutorial
    /// or draw a fresh question and keep playing
    pub fn retry(&mut self, to_tutorial: bool, rng: &mut impl Rng) {
        self.score = self.rules.starting_score.min(self.rules.score_cap);
        self.mistakes = 0;
        self.attempts = 0;
        self.rounds_cleared = 0;
        if to_tutorial {
            self.phase = GamePhase::Tutorial;
            self.question = None;
            self.start_time = None;
        } else {
            self.phase = GamePhase::Playing;
            self.question = Some(question::generate(self.kind, rng));
            self.start_time = Some(Instant::now());
        }
    }

    /// Session duration in seconds
    pub fn duration_secs(&self) -> f64 {
        self.start_time
            .map(|t| t.elapsed().as_secs_f64())
            .unwrap_or(0.0)
    }

    /// The completion tuple, available once the session is complete
    pub fn summary(&self) -> Result<CompletionSummary, SessionError> {
        if self.phase != GamePhase::Complete {
            return Err(SessionError::NotComplete);
        }
        Ok(CompletionSummary {
            score: self.score,
            mistakes: self.mistakes,
            attempts: self.attempts,
            time_spent_secs: self.duration_secs().round() as u64,
        })
    }
}
