//! Ledger address type with `0x` prefix.

use crate::error::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A 20-byte ledger account address, displayed as `0x`-prefixed lowercase hex.
///
/// Used both for wallet accounts (the connected signer) and for deployed
/// contract accounts (governance, membership token).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address([u8; 20]);

impl Address {
    /// The all-zero address.
    pub const ZERO: Self = Self([0u8; 20]);

    pub fn new(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 20]
    }

    /// Parse from `0x`-prefixed hex (case-insensitive).
    pub fn parse(s: &str) -> Result<Self, ParseError> {
        let stripped = s
            .strip_prefix("0x")
            .ok_or_else(|| ParseError::InvalidAddress(format!("missing 0x prefix: {s}")))?;
        let bytes = hex::decode(stripped)
            .map_err(|e| ParseError::InvalidAddress(format!("bad hex in {s}: {e}")))?;
        let bytes: [u8; 20] = bytes
            .try_into()
            .map_err(|_| ParseError::InvalidAddress(format!("address must be 20 bytes: {s}")))?;
        Ok(Self(bytes))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address(0x{}…)", hex::encode(&self.0[..4]))
    }
}

impl FromStr for Address {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Address {
    type Error = ParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<Address> for String {
    fn from(a: Address) -> Self {
        a.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_roundtrip() {
        let s = "0x00000000000000000000000000000000000000ff";
        let addr = Address::parse(s).unwrap();
        assert_eq!(addr.to_string(), s);
        assert_eq!(addr.as_bytes()[19], 0xff);
    }

    #[test]
    fn parse_rejects_bad_input() {
        assert!(Address::parse("no-prefix").is_err());
        assert!(Address::parse("0x1234").is_err());
        assert!(Address::parse("0xzz000000000000000000000000000000000000zz").is_err());
    }

    #[test]
    fn serde_uses_hex_string() {
        let addr = Address::new([0xab; 20]);
        let json = serde_json::to_string(&addr).unwrap();
        assert_eq!(json, format!("\"{addr}\""));
        let back: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(back, addr);
    }
}
