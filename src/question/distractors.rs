//! Distractor construction: plausible wrong answers
//!
//! Each distractor is the answer a student reaches through a specific
//! misconception (adding straight across, keeping the first denominator,
//! swapping numerator and denominator). Tagging every choice with the slip
//! that produces it lets the session report the habit, not just the miss.

use std::cmp::Ordering;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::engine::Fraction;

/// The error habit a wrong answer represents
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Misconception {
    /// Combined numerators and denominators straight across
    StraightAcross,
    /// Combined numerators but kept the first denominator unchanged
    KeptFirstDenominator,
    /// Swapped numerator and denominator in the result
    SwappedTopAndBottom,
    /// Right method, numerator off by a small amount
    NumeratorSlip,
    /// Reversed which side is larger
    ReversedComparison,
    /// Called two unequal fractions equal
    CalledEqual,
    /// Missed that the two fractions are equivalent
    MissedEquality,
}

impl Misconception {
    /// Short coaching line shown in the session summary
    pub fn coaching(&self) -> &'static str {
        match self {
            Misconception::StraightAcross => {
                "tops and bottoms don't combine straight across: find a common denominator first"
            }
            Misconception::KeptFirstDenominator => {
                "rewrite BOTH fractions over the common denominator before combining"
            }
            Misconception::SwappedTopAndBottom => {
                "keep the numerator on top: swapping it with the denominator changes the value"
            }
            Misconception::NumeratorSlip => "recount the numerator after combining",
            Misconception::ReversedComparison => {
                "cross-multiply to check which side is really larger"
            }
            Misconception::CalledEqual => "close is not equal: cross-multiply to compare exactly",
            Misconception::MissedEquality => {
                "scaling top and bottom by the same number keeps the value the same"
            }
        }
    }
}

/// One offered answer choice
#[derive(Clone, Debug)]
pub struct Choice {
    /// Canonical display text of this choice
    pub text: String,
    /// The misconception behind this choice; `None` marks the correct answer
    pub slip: Option<Misconception>,
}

/// Build a candidate distractor, discarding invalid fractions and anything
/// equal in value to the correct answer
fn candidate(
    numerator: i64,
    denominator: i64,
    slip: Misconception,
    correct: Fraction,
) -> Option<Choice> {
    let f = Fraction::new(numerator, denominator).ok()?;
    if f.numerator() < 0 || f == correct {
        return None;
    }
    Some(Choice {
        text: f.display(),
        slip: Some(slip),
    })
}

/// Append a candidate unless an earlier choice already shows the same text
fn push_distinct(out: &mut Vec<Choice>, choice: Option<Choice>) {
    if let Some(choice) = choice {
        if !out.iter().any(|c| c.text == choice.text) {
            out.push(choice);
        }
    }
}

/// Wrong answers for an addition question. `correct` is the unreduced sum
/// over the common denominator.
pub fn addition_distractors(lhs: Fraction, rhs: Fraction, correct: Fraction) -> Vec<Choice> {
    let mut out = Vec::new();

    push_distinct(
        &mut out,
        candidate(
            lhs.numerator() + rhs.numerator(),
            lhs.denominator() + rhs.denominator(),
            Misconception::StraightAcross,
            correct,
        ),
    );
    // Collapses to the correct value when denominators already match, and
    // the value filter drops it there
    push_distinct(
        &mut out,
        candidate(
            lhs.numerator() + rhs.numerator(),
            lhs.denominator(),
            Misconception::KeptFirstDenominator,
            correct,
        ),
    );

    let reduced = correct.reduced();
    push_distinct(
        &mut out,
        candidate(
            reduced.denominator(),
            reduced.numerator(),
            Misconception::SwappedTopAndBottom,
            correct,
        ),
    );

    fill_with_numerator_slips(&mut out, correct);
    out.truncate(3);
    out
}

/// Wrong answers for a subtraction question. `correct` is the unreduced
/// difference over the common denominator.
pub fn subtraction_distractors(lhs: Fraction, rhs: Fraction, correct: Fraction) -> Vec<Choice> {
    let mut out = Vec::new();

    // Straight-across denominators can hit zero or negative; candidate()
    // rejects those through Fraction::new
    push_distinct(
        &mut out,
        candidate(
            lhs.numerator() - rhs.numerator(),
            lhs.denominator() - rhs.denominator(),
            Misconception::StraightAcross,
            correct,
        ),
    );
    push_distinct(
        &mut out,
        candidate(
            lhs.numerator() - rhs.numerator(),
            lhs.denominator(),
            Misconception::KeptFirstDenominator,
            correct,
        ),
    );

    let reduced = correct.reduced();
    if reduced.numerator() != 0 {
        push_distinct(
            &mut out,
            candidate(
                reduced.denominator(),
                reduced.numerator(),
                Misconception::SwappedTopAndBottom,
                correct,
            ),
        );
    }

    fill_with_numerator_slips(&mut out, correct);
    out.truncate(3);
    out
}

/// Top up with off-by-a-little numerators over the common denominator until
/// at least two distractors exist
fn fill_with_numerator_slips(out: &mut Vec<Choice>, correct: Fraction) {
    for delta in [1, -1, 2, -2] {
        if out.len() >= 2 {
            return;
        }
        push_distinct(
            out,
            candidate(
                correct.numerator() + delta,
                correct.denominator(),
                Misconception::NumeratorSlip,
                correct,
            ),
        );
    }
}

/// The two wrong symbols for a comparison question
pub fn comparison_distractors(answer: Ordering) -> Vec<Choice> {
    let wrong = |text: &str, slip| Choice {
        text: text.to_string(),
        slip: Some(slip),
    };
    match answer {
        Ordering::Greater => vec![
            wrong("<", Misconception::ReversedComparison),
            wrong("=", Misconception::CalledEqual),
        ],
        Ordering::Less => vec![
            wrong(">", Misconception::ReversedComparison),
            wrong("=", Misconception::CalledEqual),
        ],
        Ordering::Equal => vec![
            wrong("<", Misconception::MissedEquality),
            wrong(">", Misconception::MissedEquality),
        ],
    }
}

/// Shuffle the correct answer into the distractor list. The result contains
/// the correct choice exactly once.
pub fn assemble(correct: String, mut distractors: Vec<Choice>, rng: &mut impl Rng) -> Vec<Choice> {
    distractors.push(Choice {
        text: correct,
        slip: None,
    });
    distractors.shuffle(rng);
    distractors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::arithmetic;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_addition_distractors_never_contain_the_answer() {
        for d1 in 2..=6 {
            for d2 in 2..=6 {
                for n1 in 1..d1 {
                    for n2 in 1..d2 {
                        let lhs = Fraction::from_raw(n1, d1);
                        let rhs = Fraction::from_raw(n2, d2);
                        let sum = arithmetic::add(lhs, rhs);
                        let wrong = addition_distractors(lhs, rhs, sum);

                        assert!(wrong.len() >= 2 && wrong.len() <= 3);
                        for choice in &wrong {
                            assert_ne!(choice.text, sum.display());
                            assert!(choice.slip.is_some());
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_subtraction_distractors_never_contain_the_answer() {
        for d1 in 2..=6 {
            for d2 in 2..=6 {
                for n1 in 1..d1 {
                    for n2 in 1..d2 {
                        let a = Fraction::from_raw(n1, d1);
                        let b = Fraction::from_raw(n2, d2);
                        // Keep to the domain: minuend at least the subtrahend
                        let (lhs, rhs) = if a < b { (b, a) } else { (a, b) };
                        let diff = arithmetic::subtract(lhs, rhs);
                        let wrong = subtraction_distractors(lhs, rhs, diff);

                        assert!(wrong.len() >= 2 && wrong.len() <= 3);
                        for choice in &wrong {
                            assert_ne!(choice.text, diff.display());
                            assert!(choice.slip.is_some());
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_distractor_texts_are_distinct() {
        let lhs = Fraction::from_raw(1, 8);
        let rhs = Fraction::from_raw(2, 8);
        let sum = arithmetic::add(lhs, rhs);
        let wrong = addition_distractors(lhs, rhs, sum);

        // 1/8 + 2/8: straight across gives the classic 3/16
        assert!(wrong.iter().any(|c| c.text == "3/16"));
        for (i, a) in wrong.iter().enumerate() {
            for b in wrong.iter().skip(i + 1) {
                assert_ne!(a.text, b.text);
            }
        }
    }

    #[test]
    fn test_comparison_distractors_exclude_the_answer_symbol() {
        for (answer, symbol) in [
            (Ordering::Less, "<"),
            (Ordering::Equal, "="),
            (Ordering::Greater, ">"),
        ] {
            let wrong = comparison_distractors(answer);
            assert_eq!(wrong.len(), 2);
            assert!(wrong.iter().all(|c| c.text != symbol));
        }
    }

    #[test]
    fn test_assemble_includes_the_answer_exactly_once() {
        let mut rng = StdRng::seed_from_u64(7);
        let lhs = Fraction::from_raw(1, 3);
        let rhs = Fraction::from_raw(1, 6);
        let sum = arithmetic::add(lhs, rhs);
        let choices = assemble(
            sum.display(),
            addition_distractors(lhs, rhs, sum),
            &mut rng,
        );

        let correct_count = choices.iter().filter(|c| c.slip.is_none()).count();
        assert_eq!(correct_count, 1);
        assert_eq!(
            choices
                .iter()
                .filter(|c| c.text == sum.display())
                .count(),
            1
        );
    }
}
