//! Fraction arithmetic over unified denominators
//!
//! Addition and subtraction unify both operands on the least common multiple
//! of their denominators and return the result unreduced: showing the
//! equivalent-fraction intermediate is part of the lesson, so reduction is
//! left to display time.

use std::cmp::Ordering;

use super::fraction::{gcd, Fraction};

/// Least common multiple of two positive denominators
pub fn lcm(a: i64, b: i64) -> i64 {
    a / gcd(a, b) * b
}

/// Scale both operands to their least common denominator without changing
/// value. The UI shows this pair as the denominator-unification step.
pub fn unify(a: Fraction, b: Fraction) -> (Fraction, Fraction) {
    let common = lcm(a.denominator(), b.denominator());
    (
        Fraction::from_raw(a.numerator() * (common / a.denominator()), common),
        Fraction::from_raw(b.numerator() * (common / b.denominator()), common),
    )
}

/// Sum of two fractions, unreduced over the common denominator
pub fn add(a: Fraction, b: Fraction) -> Fraction {
    let (a, b) = unify(a, b);
    Fraction::from_raw(a.numerator() + b.numerator(), a.denominator())
}

/// Difference of two fractions, unreduced over the common denominator.
///
/// Callers must keep the minuend at least as large as the subtrahend where
/// the domain forbids negative results; the question generator guarantees
/// this by construction rather than by a runtime check.
pub fn subtract(a: Fraction, b: Fraction) -> Fraction {
    let (a, b) = unify(a, b);
    Fraction::from_raw(a.numerator() - b.numerator(), a.denominator())
}

/// Ordering by cross-multiplication, avoiding floating-point error
pub fn compare(a: Fraction, b: Fraction) -> Ordering {
    (a.numerator() * b.denominator()).cmp(&(b.numerator() * a.denominator()))
}

/// Display symbol for a comparison outcome
pub fn comparison_symbol(ordering: Ordering) -> &'static str {
    match ordering {
        Ordering::Less => "<",
        Ordering::Equal => "=",
        Ordering::Greater => ">",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lcm() {
        assert_eq!(lcm(3, 6), 6);
        assert_eq!(lcm(4, 6), 12);
        assert_eq!(lcm(5, 7), 35);
    }

    #[test]
    fn test_same_denominator_add() {
        // 1/4 + 3/4 = 4/4, displayed as the whole number "1"
        let sum = add(Fraction::from_raw(1, 4), Fraction::from_raw(3, 4));
        assert_eq!(sum.numerator(), 4);
        assert_eq!(sum.denominator(), 4);
        assert_eq!(sum.display(), "1");
    }

    #[test]
    fn test_unification_is_a_teaching_step() {
        // 1/3 + 1/6 unifies to sixths: 2/6 + 1/6 = 3/6, which reduces to 1/2
        let a = Fraction::from_raw(1, 3);
        let b = Fraction::from_raw(1, 6);

        let (ua, ub) = unify(a, b);
        assert_eq!(ua.to_string(), "2/6");
        assert_eq!(ub.to_string(), "1/6");

        let sum = add(a, b);
        assert_eq!(sum.numerator(), 3);
        assert_eq!(sum.denominator(), 6);
        assert_eq!(sum.display(), "1/2");
    }

    #[test]
    fn test_add_is_commutative() {
        for d1 in 2..=9 {
            for d2 in 2..=9 {
                for n1 in 1..d1 {
                    for n2 in 1..d2 {
                        let a = Fraction::from_raw(n1, d1);
                        let b = Fraction::from_raw(n2, d2);
                        assert_eq!(add(a, b).reduced(), add(b, a).reduced());
                    }
                }
            }
        }
    }

    #[test]
    fn test_subtract_inverts_add() {
        for d1 in 2..=9 {
            for d2 in 2..=9 {
                for n1 in 1..d1 {
                    for n2 in 1..d2 {
                        let a = Fraction::from_raw(n1, d1);
                        let b = Fraction::from_raw(n2, d2);
                        assert_eq!(subtract(add(a, b), b).reduced(), a.reduced());
                    }
                }
            }
        }
    }

    #[test]
    fn test_compare_cross_products() {
        // 4/5 vs 3/4: cross-products 16 vs 15
        assert_eq!(
            compare(Fraction::from_raw(4, 5), Fraction::from_raw(3, 4)),
            Ordering::Greater
        );
        assert_eq!(
            compare(Fraction::from_raw(1, 2), Fraction::from_raw(2, 4)),
            Ordering::Equal
        );
        assert_eq!(
            compare(Fraction::from_raw(2, 6), Fraction::from_raw(3, 6)),
            Ordering::Less
        );
    }

    #[test]
    fn test_compare_matches_decimal_ordering() {
        for d1 in 2..=9 {
            for d2 in 2..=9 {
                for n1 in 1..d1 {
                    for n2 in 1..d2 {
                        let a = Fraction::from_raw(n1, d1);
                        let b = Fraction::from_raw(n2, d2);
                        let expected = a
                            .value()
                            .partial_cmp(&b.value())
                            .expect("finite values always compare");
                        // Exactly-equal pairs may round identically, so only
                        // check agreement when the decimals are clearly apart
                        if (a.value() - b.value()).abs() > 1e-9 {
                            assert_eq!(compare(a, b), expected);
                        } else {
                            assert_eq!(compare(a, b), Ordering::Equal);
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_comparison_symbols() {
        assert_eq!(comparison_symbol(Ordering::Less), "<");
        assert_eq!(comparison_symbol(Ordering::Equal), "=");
        assert_eq!(comparison_symbol(Ordering::Greater), ">");
    }
}
