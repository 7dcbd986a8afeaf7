//! Smallest-unit ledger amounts.
//!
//! Balances are fixed-point integers (u128) in the ledger's smallest unit.
//! They never pass through floating point: a treasury holding
//! 2500000000000000000 raw units displays as exactly that decimal string.

use crate::error::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A balance in the ledger's smallest unit.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct RawAmount(u128);

impl RawAmount {
    pub const ZERO: Self = Self(0);

    pub fn new(raw: u128) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u128 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }

    pub fn saturating_sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }

    /// Format as whole display units with `decimals` fractional digits,
    /// trailing zeros trimmed. Pure integer arithmetic.
    ///
    /// `RawAmount::new(2_500_000_000_000_000_000).to_display_units(18)` is `"2.5"`.
    pub fn to_display_units(&self, decimals: u32) -> String {
        let divisor = 10u128.pow(decimals);
        let whole = self.0 / divisor;
        let frac = self.0 % divisor;
        if frac == 0 {
            return whole.to_string();
        }
        let frac = format!("{frac:0width$}", width = decimals as usize);
        format!("{whole}.{}", frac.trim_end_matches('0'))
    }
}

impl fmt::Display for RawAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RawAmount {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u128>()
            .map(Self)
            .map_err(|e| ParseError::InvalidAmount(format!("{s}: {e}")))
    }
}

impl From<u128> for RawAmount {
    fn from(raw: u128) -> Self {
        Self(raw)
    }
}
