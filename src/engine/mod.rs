//! Fraction Engine: value representation and exact arithmetic
//!
//! # Components
//! - `fraction.rs`: Fraction value type, reduction, display forms, parsing
//! - `arithmetic.rs`: addition, subtraction and ordering over unified denominators

pub mod arithmetic;
pub mod fraction;

pub use fraction::Fraction;

use thiserror::Error;

/// Errors raised by the fraction engine
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    /// A fraction was constructed with a zero denominator (caller error)
    #[error("denominator must not be zero")]
    ZeroDenominator,
    /// A string could not be parsed as a fraction or mixed number
    #[error("cannot parse `{0}` as a fraction")]
    ParseFraction(String),
}
