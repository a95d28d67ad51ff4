//! Question generation: randomized, pedagogically valid practice items
//!
//! Operand sampling mirrors the mini-games: same-denominator pairs stay at
//! or below one whole, different-denominator pairs draw from small
//! denominators, subtraction keeps the minuend at least as large as the
//! subtrahend, and comparison pairs too close to call are resampled.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::distractors::{self, Choice, Misconception};
use crate::engine::{arithmetic, Fraction};

/// Minimum decimal gap between non-equal comparison operands; anything
/// closer is too close to judge by eye and gets resampled
const MIN_COMPARISON_GAP: f64 = 0.05;

/// Resampling budget before falling back to a known-distinct pair
const MAX_COMPARISON_RESAMPLES: u32 = 64;

/// The operation a question asks about
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    Addition,
    Subtraction,
    Comparison,
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            QuestionKind::Addition => "addition",
            QuestionKind::Subtraction => "subtraction",
            QuestionKind::Comparison => "comparison",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for QuestionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "add" | "addition" => Ok(QuestionKind::Addition),
            "sub" | "subtract" | "subtraction" => Ok(QuestionKind::Subtraction),
            "compare" | "comparison" => Ok(QuestionKind::Comparison),
            other => Err(format!(
                "unknown question kind `{}` (expected add, subtract or compare)",
                other
            )),
        }
    }
}

/// A single practice item: two operands, the canonical answer and the
/// offered choice set
#[derive(Clone, Debug)]
pub struct Question {
    pub kind: QuestionKind,
    pub lhs: Fraction,
    pub rhs: Fraction,
    /// Canonical answer in display form
    pub answer: String,
    /// Offered choices; the correct answer appears exactly once
    pub choices: Vec<Choice>,
}

impl Question {
    /// Prompt line shown to the student, operands unreduced
    pub fn prompt(&self) -> String {
        match self.kind {
            QuestionKind::Addition => format!("{} + {} = ?", self.lhs, self.rhs),
            QuestionKind::Subtraction => format!("{} - {} = ?", self.lhs, self.rhs),
            QuestionKind::Comparison => format!("{}  ?  {}", self.lhs, self.rhs),
        }
    }

    /// Check a submitted answer (whitespace-insensitive)
    pub fn is_correct(&self, chosen: &str) -> bool {
        chosen.trim() == self.answer
    }

    /// The misconception behind a wrong choice, when the choice is one of ours
    pub fn slip_for(&self, chosen: &str) -> Option<Misconception> {
        let chosen = chosen.trim();
        self.choices
            .iter()
            .find(|c| c.text == chosen)
            .and_then(|c| c.slip)
    }

    /// One-line worked explanation shown after a correct answer.
    ///
    /// Mixed-denominator arithmetic shows the unification step with the
    /// intermediate equivalent fractions unreduced; comparisons show the
    /// cross-products. Same-denominator arithmetic needs no step.
    pub fn teaching_step(&self) -> Option<String> {
        match self.kind {
            QuestionKind::Addition | QuestionKind::Subtraction => {
                if self.lhs.denominator() == self.rhs.denominator() {
                    return None;
                }
                let (ua, ub) = arithmetic::unify(self.lhs, self.rhs);
                let (op, result) = match self.kind {
                    QuestionKind::Addition => ("+", arithmetic::add(self.lhs, self.rhs)),
                    _ => ("-", arithmetic::subtract(self.lhs, self.rhs)),
                };
                let step = format!(
                    "{} {} {}  ->  {} {} {}  =  {}",
                    self.lhs, op, self.rhs, ua, op, ub, result
                );
                if result.display() == result.to_string() {
                    Some(step)
                } else {
                    Some(format!("{}  =  {}", step, result.display()))
                }
            }
            QuestionKind::Comparison => Some(format!(
                "cross-multiply: {} x {} = {}  vs  {} x {} = {}",
                self.lhs.numerator(),
                self.rhs.denominator(),
                self.lhs.numerator() * self.rhs.denominator(),
                self.rhs.numerator(),
                self.lhs.denominator(),
                self.rhs.numerator() * self.lhs.denominator()
            )),
        }
    }
}

/// Generate a fresh practice item of the given kind
pub fn generate(kind: QuestionKind, rng: &mut impl Rng) -> Question {
    match kind {
        QuestionKind::Addition => generate_addition(rng),
        QuestionKind::Subtraction => generate_subtraction(rng),
        QuestionKind::Comparison => generate_comparison(rng),
    }
}

/// Two distinct small denominators for mixed-denominator questions
fn distinct_denominators(rng: &mut impl Rng) -> (i64, i64) {
    let d1 = rng.gen_range(2..=6);
    loop {
        let d2 = rng.gen_range(2..=6);
        if d2 != d1 {
            return (d1, d2);
        }
    }
}

fn generate_addition(rng: &mut impl Rng) -> Question {
    let (lhs, rhs) = if rng.gen_bool(0.5) {
        // Same denominator; numerator sum capped at the denominator so the
        // answer never needs an unrequested mixed number
        let d = rng.gen_range(2..=9);
        let n1 = rng.gen_range(1..d);
        let n2 = rng.gen_range(1..=d - n1);
        (Fraction::from_raw(n1, d), Fraction::from_raw(n2, d))
    } else {
        let (d1, d2) = distinct_denominators(rng);
        (
            Fraction::from_raw(rng.gen_range(1..d1), d1),
            Fraction::from_raw(rng.gen_range(1..d2), d2),
        )
    };

    let sum = arithmetic::add(lhs, rhs);
    let answer = sum.display();
    let wrong = distractors::addition_distractors(lhs, rhs, sum);
    Question {
        kind: QuestionKind::Addition,
        lhs,
        rhs,
        answer: answer.clone(),
        choices: distractors::assemble(answer, wrong, rng),
    }
}

fn generate_subtraction(rng: &mut impl Rng) -> Question {
    let (lhs, rhs) = if rng.gen_bool(0.5) {
        // Same denominator; second numerator sampled at or below the first,
        // so the result is non-negative by construction
        let d = rng.gen_range(2..=9);
        let n1 = rng.gen_range(1..d);
        let n2 = rng.gen_range(1..=n1);
        (Fraction::from_raw(n1, d), Fraction::from_raw(n2, d))
    } else {
        let (d1, d2) = distinct_denominators(rng);
        let a = Fraction::from_raw(rng.gen_range(1..d1), d1);
        let b = Fraction::from_raw(rng.gen_range(1..d2), d2);
        // Larger value becomes the minuend
        if a < b {
            (b, a)
        } else {
            (a, b)
        }
    };

    let diff = arithmetic::subtract(lhs, rhs);
    let answer = diff.display();
    let wrong = distractors::subtraction_distractors(lhs, rhs, diff);
    Question {
        kind: QuestionKind::Subtraction,
        lhs,
        rhs,
        answer: answer.clone(),
        choices: distractors::assemble(answer, wrong, rng),
    }
}

fn generate_comparison(rng: &mut impl Rng) -> Question {
    let (lhs, rhs) = if rng.gen_ratio(1, 3) {
        // Exactly-equal pair: scale numerator and denominator together
        let d = rng.gen_range(2..=6);
        let n = rng.gen_range(1..d);
        let k = rng.gen_range(2..=4);
        let plain = Fraction::from_raw(n, d);
        let scaled = Fraction::from_raw(n * k, d * k);
        if rng.gen_bool(0.5) {
            (plain, scaled)
        } else {
            (scaled, plain)
        }
    } else {
        sample_well_separated(rng)
    };

    let ordering = arithmetic::compare(lhs, rhs);
    let answer = arithmetic::comparison_symbol(ordering).to_string();
    let wrong = distractors::comparison_distractors(ordering);
    Question {
        kind: QuestionKind::Comparison,
        lhs,
        rhs,
        answer: answer.clone(),
        choices: distractors::assemble(answer, wrong, rng),
    }
}

/// Sample a pair of proper fractions whose values are far enough apart to
/// judge; resampling is bounded so generation always terminates
fn sample_well_separated(rng: &mut impl Rng) -> (Fraction, Fraction) {
    for _ in 0..MAX_COMPARISON_RESAMPLES {
        let d1 = rng.gen_range(2..=9);
        let d2 = rng.gen_range(2..=9);
        let a = Fraction::from_raw(rng.gen_range(1..d1), d1);
        let b = Fraction::from_raw(rng.gen_range(1..d2), d2);
        if (a.value() - b.value()).abs() >= MIN_COMPARISON_GAP {
            return (a, b);
        }
    }
    // The denominator range has plenty of well-separated pairs, so the
    // budget is never exhausted in practice
    (Fraction::from_raw(1, 3), Fraction::from_raw(2, 3))
}
