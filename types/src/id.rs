//! Proposal and membership-token identifiers.

use crate::error::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Ordinal id of a governance proposal. The first proposal is id 0 and ids
/// are assigned densely, so a client that knows the proposal count can
/// enumerate every proposal.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ProposalId(u64);

impl ProposalId {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ProposalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u64> for ProposalId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// Identifier of a membership token, kept as a string-encoded decimal
/// integer. Token ids on the ledger can exceed u64, so the decimal string is
/// the canonical form and is submitted to the ledger unmodified.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TokenId(String);

impl TokenId {
    /// Accepts a non-empty all-digit decimal string.
    pub fn new(raw: impl Into<String>) -> Result<Self, ParseError> {
        let s = raw.into();
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseError::InvalidTokenId(s));
        }
        Ok(Self(s))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TokenId {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for TokenId {
    type Error = ParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<TokenId> for String {
    fn from(id: TokenId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_id_accepts_digits_only() {
        assert_eq!(TokenId::new("7").unwrap().as_str(), "7");
        assert!(TokenId::new("").is_err());
        assert!(TokenId::new("7a").is_err());
        assert!(TokenId::new("-1").is_err());
    }

    #[test]
    fn token_id_preserves_large_values() {
        let huge = "340282366920938463463374607431768211456";
        assert_eq!(TokenId::new(huge).unwrap().as_str(), huge);
    }
}
