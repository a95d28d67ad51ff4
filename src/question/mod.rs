//! Question Generation: practice items and plausible wrong answers
//!
//! # Components
//! - `generator.rs`: Randomized addition/subtraction/comparison questions
//! - `distractors.rs`: Misconception-tagged wrong answer choices

pub mod distractors;
pub mod generator;

pub use distractors::{Choice, Misconception};
pub use generator::{generate, Question, QuestionKind};
