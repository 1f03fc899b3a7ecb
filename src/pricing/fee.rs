//! Monetary amounts
//!
//! Fees are integer minor units (cents) so pricing stays exact and
//! deterministic. Display renders major.minor with two digits.

use std::fmt;
use std::iter::Sum;
use std::ops::Add;

use serde::{Deserialize, Serialize};

/// A non-negative amount in minor currency units
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Fee(u64);

impl Fee {
    pub const ZERO: Fee = Fee(0);

    /// From minor units (cents)
    pub const fn from_minor(minor: u64) -> Self {
        Fee(minor)
    }

    /// From whole currency units, saturating at `u64::MAX` minor units
    pub const fn from_major(major: u64) -> Self {
        Fee(major.saturating_mul(100))
    }

    /// From whole currency units, `None` if the minor amount overflows
    pub fn checked_from_major(major: u64) -> Option<Self> {
        major.checked_mul(100).map(Fee)
    }

    pub const fn minor(&self) -> u64 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Multiply, saturating at `u64::MAX` minor units
    pub fn times(&self, factor: u64) -> Fee {
        Fee(self.0.saturating_mul(factor))
    }

    /// Scale by `percent / 100`, rounding up to the next minor unit
    pub fn scale_percent_ceil(&self, percent: u32) -> Fee {
        let scaled = (self.0 as u128 * percent as u128).div_ceil(100);
        Fee(u64::try_from(scaled).unwrap_or(u64::MAX))
    }
}

impl Add for Fee {
    type Output = Fee;

    fn add(self, rhs: Fee) -> Fee {
        Fee(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Fee {
    fn sum<I: Iterator<Item = Fee>>(iter: I) -> Fee {
        iter.fold(Fee::ZERO, |acc, f| acc + f)
    }
}

impl fmt::Display for Fee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_major_minor() {
        assert_eq!(Fee::from_major(20).minor(), 2000);
        assert_eq!(Fee::from_minor(2050).to_string(), "20.50");
        assert_eq!(Fee::ZERO.to_string(), "0.00");
    }

    #[test]
    fn test_times_saturates() {
        assert_eq!(Fee::from_major(20).times(3), Fee::from_major(60));
        assert_eq!(Fee::from_minor(u64::MAX).times(2), Fee::from_minor(u64::MAX));
    }

    #[test]
    fn test_scale_percent_rounds_up() {
        // 1.6 x 20.00 = 32.00
        assert_eq!(Fee::from_major(20).scale_percent_ceil(160), Fee::from_major(32));
        // 1.5 x 0.01 = 0.015 -> 0.02
        assert_eq!(Fee::from_minor(1).scale_percent_ceil(150), Fee::from_minor(2));
        assert_eq!(Fee::ZERO.scale_percent_ceil(250), Fee::ZERO);
    }

    #[test]
    fn test_major_overflow() {
        let huge = 200_000_000_000_000_000;
        assert_eq!(Fee::checked_from_major(huge), None);
        assert_eq!(Fee::from_major(huge), Fee::from_minor(u64::MAX));
        assert_eq!(Fee::checked_from_major(7), Some(Fee::from_minor(700)));
    }

    #[test]
    fn test_sum() {
        let total: Fee = [Fee::from_major(1), Fee::from_minor(50)].into_iter().sum();
        assert_eq!(total, Fee::from_minor(150));
    }
}
