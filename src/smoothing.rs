//! The additive smoothing constant.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{Signed, Zero};
use std::{fmt, str::FromStr};
use thiserror::Error;

/// Strictly positive constant added to every token count before normalizing.
///
/// Held as an exact rational so that `0.01` really is 1/100.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Delta(BigRational);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseDeltaError {
    #[error("smoothing constant {0:?} is not a plain decimal number")]
    NotDecimal(String),
    #[error("smoothing constant must be greater than zero")]
    NotPositive,
}

impl Delta {
    pub fn new(value: BigRational) -> Result<Self, ParseDeltaError> {
        if value.is_positive() {
            Ok(Delta(value))
        } else {
            Err(ParseDeltaError::NotPositive)
        }
    }

    pub fn as_ratio(&self) -> &BigRational {
        &self.0
    }
}

impl Default for Delta {
    fn default() -> Self {
        Delta(BigRational::new(BigInt::from(1), BigInt::from(100)))
    }
}

impl FromStr for Delta {
    type Err = ParseDeltaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let not_decimal = || ParseDeltaError::NotDecimal(s.to_string());

        let (whole, frac) = s.split_once('.').unwrap_or((s, ""));
        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if (whole.is_empty() && frac.is_empty()) || !all_digits(whole) || !all_digits(frac) {
            return Err(not_decimal());
        }

        // "1.25" -> 125 / 10^2
        let digits = format!("{whole}{frac}");
        let numer: BigInt = digits.parse().map_err(|_| not_decimal())?;
        let denom = num_traits::pow(BigInt::from(10), frac.len());

        let value = BigRational::new(numer, denom);
        if value.is_zero() {
            return Err(ParseDeltaError::NotPositive);
        }
        Delta::new(value)
    }
}

impl fmt::Display for Delta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
