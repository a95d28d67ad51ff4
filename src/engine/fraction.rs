//! Fraction value type
//!
//! Handles:
//! - Validated construction (denominator never zero)
//! - Reduction to lowest terms via Euclidean GCD
//! - Raw, canonical and mixed-number display forms
//! - Parsing of `"n/d"`, `"w n/d"` and bare integers

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use super::EngineError;

/// Greatest common divisor (Euclidean), `gcd(a, 0) = a`
pub(crate) fn gcd(a: i64, b: i64) -> i64 {
    let (mut a, mut b) = (a.abs(), b.abs());
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }
    a
}

/// A rational number as an integer numerator over a positive denominator.
///
/// The denominator is non-zero by construction, so arithmetic and ordering
/// never have to re-check it. Values are kept exactly as constructed;
/// reduction happens on demand, which lets equivalent forms (`2/4` vs `1/2`)
/// be shown unreduced as a teaching step.
#[derive(Clone, Copy, Debug)]
pub struct Fraction {
    numerator: i64,
    denominator: i64,
}

impl Fraction {
    /// Create a fraction, rejecting a zero denominator.
    ///
    /// A negative denominator is normalized by moving the sign onto the
    /// numerator, keeping the positive-denominator invariant.
    pub fn new(numerator: i64, denominator: i64) -> Result<Self, EngineError> {
        match denominator.cmp(&0) {
            Ordering::Equal => Err(EngineError::ZeroDenominator),
            Ordering::Less => Ok(Fraction {
                numerator: -numerator,
                denominator: -denominator,
            }),
            Ordering::Greater => Ok(Fraction {
                numerator,
                denominator,
            }),
        }
    }

    /// Construct from components already known valid (denominator > 0).
    pub(crate) fn from_raw(numerator: i64, denominator: i64) -> Self {
        debug_assert!(denominator > 0);
        Fraction {
            numerator,
            denominator,
        }
    }

    pub fn numerator(&self) -> i64 {
        self.numerator
    }

    pub fn denominator(&self) -> i64 {
        self.denominator
    }

    /// Lowest-terms equivalent
    pub fn reduced(&self) -> Fraction {
        // gcd is at least 1 because the denominator is positive
        let g = gcd(self.numerator, self.denominator);
        Fraction {
            numerator: self.numerator / g,
            denominator: self.denominator / g,
        }
    }

    /// Approximate decimal value. Ordering and equality use exact
    /// cross-multiplication; this is for sampling heuristics only.
    pub fn value(&self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }

    /// Canonical display: reduced, with whole values collapsed.
    ///
    /// Zero numerators render as `"0"`, evenly-dividing denominators as the
    /// bare integer, everything else as `"n/d"` in lowest terms.
    pub fn display(&self) -> String {
        let r = self.reduced();
        if r.numerator == 0 {
            "0".to_string()
        } else if r.denominator == 1 {
            r.numerator.to_string()
        } else {
            format!("{}/{}", r.numerator, r.denominator)
        }
    }

    /// Mixed-number display (`"2 3/4"`) for improper fractions.
    ///
    /// Proper fractions and whole values fall back to [`Fraction::display`].
    pub fn display_mixed(&self) -> String {
        let r = self.reduced();
        if r.denominator == 1 || r.numerator.abs() <= r.denominator {
            return r.display();
        }
        let whole = r.numerator / r.denominator;
        let rest = r.numerator.abs() % r.denominator;
        format!("{} {}/{}", whole, rest, r.denominator)
    }
}

/// Raw form exactly as constructed (`"3/6"`, not `"1/2"`), used for operands
/// and intermediate teaching steps.
impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.denominator == 1 {
            write!(f, "{}", self.numerator)
        } else {
            write!(f, "{}/{}", self.numerator, self.denominator)
        }
    }
}

/// Value equality: `2/4 == 1/2`
impl PartialEq for Fraction {
    fn eq(&self, other: &Self) -> bool {
        self.numerator * other.denominator == other.numerator * self.denominator
    }
}

impl Eq for Fraction {}

impl PartialOrd for Fraction {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Ordering by cross-multiplication; exact because denominators are positive
impl Ord for Fraction {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.numerator * other.denominator).cmp(&(other.numerator * self.denominator))
    }
}

impl FromStr for Fraction {
    type Err = EngineError;

    /// Accepts `"w n/d"` (mixed), `"n/d"` and bare integers.
    fn from_str(s: &str) -> Result<Self, EngineError> {
        let s = s.trim();
        let parse_err = || EngineError::ParseFraction(s.to_string());

        if let Some((whole_part, frac_part)) = s.split_once(' ') {
            let whole: i64 = whole_part.trim().parse().map_err(|_| parse_err())?;
            let frac: Fraction = frac_part.trim().parse()?;
            if frac.numerator < 0 {
                return Err(parse_err());
            }
            let sign = if whole < 0 { -1 } else { 1 };
            let numerator = whole.abs() * frac.denominator + frac.numerator;
            return Fraction::new(sign * numerator, frac.denominator);
        }

        if let Some((n, d)) = s.split_once('/') {
            let n: i64 = n.trim().parse().map_err(|_| parse_err())?;
            let d: i64 = d.trim().parse().map_err(|_| parse_err())?;
            return Fraction::new(n, d);
        }

        let n: i64 = s.parse().map_err(|_| parse_err())?;
        Ok(Fraction::from_raw(n, 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_denominator_rejected() {
        assert_eq!(Fraction::new(1, 0), Err(EngineError::ZeroDenominator));
    }

    #[test]
    fn test_negative_denominator_normalized() {
        let f = Fraction::new(1, -2).unwrap();
        assert_eq!(f.numerator(), -1);
        assert_eq!(f.denominator(), 2);
    }

    #[test]
    fn test_reduce_yields_lowest_terms() {
        // Every valid pair reduces to coprime numerator/denominator
        for n in 0..=12 {
            for d in 1..=12 {
                let r = Fraction::from_raw(n, d).reduced();
                assert_eq!(gcd(r.numerator(), r.denominator()), 1);
                assert_eq!(r, Fraction::from_raw(n, d));
            }
        }
    }

    #[test]
    fn test_display_collapses_whole_values() {
        assert_eq!(Fraction::from_raw(4, 4).display(), "1");
        assert_eq!(Fraction::from_raw(6, 3).display(), "2");
        assert_eq!(Fraction::from_raw(0, 5).display(), "0");
        assert_eq!(Fraction::from_raw(6, 8).display(), "3/4");
    }

    #[test]
    fn test_raw_display_is_unreduced() {
        assert_eq!(Fraction::from_raw(3, 6).to_string(), "3/6");
        assert_eq!(Fraction::from_raw(7, 1).to_string(), "7");
    }

    #[test]
    fn test_mixed_display() {
        assert_eq!(Fraction::from_raw(11, 4).display_mixed(), "2 3/4");
        assert_eq!(Fraction::from_raw(3, 4).display_mixed(), "3/4");
        assert_eq!(Fraction::from_raw(8, 4).display_mixed(), "2");
    }

    #[test]
    fn test_mixed_round_trip() {
        let original = Fraction::from_raw(11, 4);
        let mixed = original.display_mixed();
        assert_eq!(mixed, "2 3/4");
        let back: Fraction = mixed.parse().unwrap();
        assert_eq!(back, original);
    }

    #[test]
    fn test_parse_forms() {
        assert_eq!("3/8".parse::<Fraction>().unwrap(), Fraction::from_raw(3, 8));
        assert_eq!("2".parse::<Fraction>().unwrap(), Fraction::from_raw(2, 1));
        assert_eq!(
            " 1 1/2 ".parse::<Fraction>().unwrap(),
            Fraction::from_raw(3, 2)
        );
        assert!("three/four".parse::<Fraction>().is_err());
        assert_eq!(
            "1/0".parse::<Fraction>(),
            Err(EngineError::ZeroDenominator)
        );
    }

    #[test]
    fn test_ordering_by_cross_multiplication() {
        let a = Fraction::from_raw(4, 5);
        let b = Fraction::from_raw(3, 4);
        assert!(a > b);
        assert_eq!(Fraction::from_raw(1, 2), Fraction::from_raw(2, 4));
    }
}
