//! Fixed-point money amounts
//!
//! Amounts are stored as signed minor units (hundredths) so balance
//! arithmetic is exact. Balances may go negative, hence `i64`.
//!
//! The `+`/`-` operators saturate at the `i64` bounds and are meant for
//! display totals. Anything that mutates wallet state uses the `checked_*`
//! forms and reports overflow as an error.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use std::str::FromStr;
use thiserror::Error;

/// Minor units per major unit
pub const MINOR_UNITS: i64 = 100;

/// Basis points in one whole (100%)
pub const BASIS_POINTS_DENOMINATOR: i64 = 10_000;

/// Amount parsing errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AmountError {
    #[error("Empty amount")]
    Empty,
    #[error("Invalid amount: {0}")]
    Invalid(String),
    #[error("Too many decimal places in {0} (max 2)")]
    TooPrecise(String),
    #[error("Amount out of range: {0}")]
    Overflow(String),
}

/// A money amount in minor units
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(into = "String", try_from = "String")]
pub struct Amount(i64);

impl Amount {
    pub const ZERO: Amount = Amount(0);

    /// Create from minor units (cents)
    pub const fn from_minor(minor: i64) -> Self {
        Self(minor)
    }

    /// Create from whole major units
    pub const fn from_major(major: i64) -> Self {
        Self(major * MINOR_UNITS)
    }

    /// Value in minor units
    pub const fn minor(&self) -> i64 {
        self.0
    }

    pub fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub fn is_negative(&self) -> bool {
        self.0 < 0
    }

    pub fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Scale by a rate given in basis points (250 = 2.5%).
    ///
    /// Rounds half away from zero to the nearest minor unit.
    pub fn apply_basis_points(&self, basis_points: u32) -> Self {
        let product = self.0 as i128 * basis_points as i128;
        let denominator = BASIS_POINTS_DENOMINATOR as i128;
        let mut quotient = product / denominator;
        let remainder = product % denominator;

        if remainder.abs() * 2 >= denominator {
            quotient += product.signum();
        }

        let clamp = if quotient.is_negative() { i64::MIN } else { i64::MAX };
        Self(i64::try_from(quotient).unwrap_or(clamp))
    }

    pub fn checked_add(self, other: Amount) -> Option<Amount> {
        self.0.checked_add(other.0).map(Amount)
    }

    pub fn checked_neg(self) -> Option<Amount> {
        self.0.checked_neg().map(Amount)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(
            f,
            "{}{}.{:02}",
            sign,
            abs / MINOR_UNITS as u64,
            abs % MINOR_UNITS as u64
        )
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(AmountError::Empty);
        }

        let (negative, digits) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
        };

        let (whole, fraction) = match digits.split_once('.') {
            Some((w, f)) => (w, f),
            None => (digits, ""),
        };

        let is_digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());
        if (whole.is_empty() && fraction.is_empty()) || !is_digits(whole) || !is_digits(fraction)
        {
            return Err(AmountError::Invalid(s.to_string()));
        }
        if fraction.len() > 2 {
            return Err(AmountError::TooPrecise(s.to_string()));
        }

        let whole_value: i64 = if whole.is_empty() {
            0
        } else {
            whole
                .parse()
                .map_err(|_| AmountError::Overflow(s.to_string()))?
        };
        let fraction_value: i64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<i64>().unwrap_or(0) * 10,
            _ => fraction.parse::<i64>().unwrap_or(0),
        };

        let minor = whole_value
            .checked_mul(MINOR_UNITS)
            .and_then(|m| m.checked_add(fraction_value))
            .ok_or_else(|| AmountError::Overflow(s.to_string()))?;

        Ok(Self(if negative { -minor } else { minor }))
    }
}

impl From<Amount> for String {
    fn from(amount: Amount) -> Self {
        amount.to_string()
    }
}

impl TryFrom<String> for Amount {
    type Error = AmountError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl Add for Amount {
    type Output = Amount;

    fn add(self, rhs: Amount) -> Amount {
        Amount(self.0.saturating_add(rhs.0))
    }
}

impl Sub for Amount {
    type Output = Amount;

    fn sub(self, rhs: Amount) -> Amount {
        Amount(self.0.saturating_sub(rhs.0))
    }
}

impl Neg for Amount {
    type Output = Amount;

    fn neg(self) -> Amount {
        Amount(self.0.saturating_neg())
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, rhs: Amount) {
        self.0 = self.0.saturating_add(rhs.0);
    }
}

impl SubAssign for Amount {
    fn sub_assign(&mut self, rhs: Amount) {
        self.0 = self.0.saturating_sub(rhs.0);
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Amount>>(iter: I) -> Amount {
        iter.fold(Amount::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Amount> for Amount {
    fn sum<I: Iterator<Item = &'a Amount>>(iter: I) -> Amount {
        iter.copied().sum()
    }
}
