//! Client-side value types for governance state.
//!
//! Everything here is a read-through cache of ledger truth: a `Proposal` is
//! never mutated locally, only replaced by re-fetching after a confirmed
//! transaction.

use crate::error::ClientError;
use dao_types::{ProposalId, RawAmount, Timestamp, TokenId};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// A governance proposal as the client sees it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    /// Ordinal id, dense from 0.
    pub proposal_id: ProposalId,
    /// The membership token the proposal concerns.
    pub nft_token_id: TokenId,
    /// Voting deadline, absolute time (ledger epoch-seconds × 1000).
    pub deadline: Timestamp,
    pub yay_votes: u64,
    pub nay_votes: u64,
    /// Set exactly once, irreversibly, by a confirmed execute.
    pub executed: bool,
}

impl Proposal {
    /// Normalize a raw ledger record into the client shape.
    ///
    /// Raw records may encode numerics as JSON numbers or as decimal
    /// strings; both are accepted. The deadline arrives in epoch seconds.
    pub fn from_raw(id: ProposalId, raw: &Value) -> Result<Self, ClientError> {
        let record: RawProposal = serde_json::from_value(raw.clone())
            .map_err(|e| ClientError::ReadFailure(format!("bad proposal record for {id}: {e}")))?;

        let nft_token_id = TokenId::new(record.nft_token_id)
            .map_err(|e| ClientError::ReadFailure(format!("bad proposal record for {id}: {e}")))?;

        Ok(Self {
            proposal_id: id,
            nft_token_id,
            deadline: Timestamp::from_epoch_secs(record.deadline),
            yay_votes: record.yay_votes,
            nay_votes: record.nay_votes,
            executed: record.executed,
        })
    }

    /// Whether the voting deadline lies in the past.
    pub fn deadline_passed(&self, now: Timestamp) -> bool {
        self.deadline.has_passed(now)
    }
}

/// The raw record as the ledger returns it.
#[derive(Debug, Deserialize)]
struct RawProposal {
    #[serde(rename = "nftTokenId", deserialize_with = "de::decimal_string")]
    nft_token_id: String,
    #[serde(deserialize_with = "de::u64_lenient")]
    deadline: u64,
    #[serde(rename = "yayVotes", deserialize_with = "de::u64_lenient")]
    yay_votes: u64,
    #[serde(rename = "nayVotes", deserialize_with = "de::u64_lenient")]
    nay_votes: u64,
    executed: bool,
}

/// Lenient deserializers for fields the ledger encodes either as JSON
/// numbers or as decimal strings.
mod de {
    use serde::de::{Deserializer, Error, Unexpected};
    use serde::Deserialize;
    use serde_json::Value;

    pub fn u64_lenient<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
        let value = Value::deserialize(deserializer)?;
        match &value {
            Value::Number(n) => n.as_u64(),
            Value::String(s) => s.parse::<u64>().ok(),
            _ => None,
        }
        .ok_or_else(|| {
            Error::invalid_value(Unexpected::Other("non-integer value"), &"a u64 or its string")
        })
    }

    pub fn decimal_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        let value = Value::deserialize(deserializer)?;
        match value {
            Value::Number(n) => Ok(n.to_string()),
            Value::String(s) => Ok(s),
            _ => Err(Error::invalid_value(
                Unexpected::Other("non-decimal value"),
                &"an integer or its decimal string",
            )),
        }
    }
}

/// A vote on a proposal. Encoded as an ordinal on the wire: Yay = 0, Nay = 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Vote {
    Yay,
    Nay,
}

impl Vote {
    /// Wire encoding of the vote.
    pub fn ordinal(&self) -> u8 {
        match self {
            Self::Yay => 0,
            Self::Nay => 1,
        }
    }
}

impl fmt::Display for Vote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Yay => write!(f, "YAY"),
            Self::Nay => write!(f, "NAY"),
        }
    }
}

impl FromStr for Vote {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "YAY" => Ok(Self::Yay),
            "NAY" => Ok(Self::Nay),
            other => Err(ClientError::ReadFailure(format!("unknown vote: {other}"))),
        }
    }
}

/// Cached view of the governance state, rebuilt from sequential reads.
///
/// Invariant: `proposals.len() <= num_proposals`, and proposal ids run
/// `0..proposals.len()` in order. Never mutated in place.
#[derive(Clone, Debug, Default, Serialize)]
pub struct GovernanceSnapshot {
    pub treasury_balance: RawAmount,
    pub num_proposals: u64,
    pub proposals: Vec<Proposal>,
}

/// Membership-token count of the connected signer. Eligibility gating is
/// the ledger's job; the client only displays this.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MembershipBalance(u64);

impl MembershipBalance {
    pub fn new(count: u64) -> Self {
        Self(count)
    }

    pub fn count(&self) -> u64 {
        self.0
    }

    pub fn is_member(&self) -> bool {
        self.0 > 0
    }
}

impl fmt::Display for MembershipBalance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn normalizes_raw_record() {
        let raw = json!({
            "nftTokenId": 7,
            "deadline": 1_700_000_000,
            "yayVotes": 2,
            "nayVotes": 1,
            "executed": false,
        });
        let proposal = Proposal::from_raw(ProposalId::new(3), &raw).unwrap();
        assert_eq!(proposal.proposal_id, ProposalId::new(3));
        assert_eq!(proposal.nft_token_id.as_str(), "7");
        assert_eq!(proposal.deadline, Timestamp::from_epoch_secs(1_700_000_000));
        assert_eq!(proposal.yay_votes, 2);
        assert_eq!(proposal.nay_votes, 1);
        assert!(!proposal.executed);
    }

    #[test]
    fn accepts_string_encoded_numerics() {
        let raw = json!({
            "nftTokenId": "340282366920938463463374607431768211456",
            "deadline": "1700000000",
            "yayVotes": "12",
            "nayVotes": "0",
            "executed": true,
        });
        let proposal = Proposal::from_raw(ProposalId::new(0), &raw).unwrap();
        assert_eq!(
            proposal.nft_token_id.as_str(),
            "340282366920938463463374607431768211456"
        );
        assert_eq!(proposal.yay_votes, 12);
        assert!(proposal.executed);
    }

    #[test]
    fn rejects_malformed_record() {
        let raw = json!({ "nftTokenId": 7 });
        assert!(Proposal::from_raw(ProposalId::new(0), &raw).is_err());
        let raw = json!({
            "nftTokenId": 7,
            "deadline": -5,
            "yayVotes": 0,
            "nayVotes": 0,
            "executed": false,
        });
        assert!(Proposal::from_raw(ProposalId::new(0), &raw).is_err());
    }

    #[test]
    fn vote_wire_encoding() {
        assert_eq!(Vote::Yay.ordinal(), 0);
        assert_eq!(Vote::Nay.ordinal(), 1);
        assert_eq!("YAY".parse::<Vote>().unwrap(), Vote::Yay);
        assert_eq!("NAY".parse::<Vote>().unwrap(), Vote::Nay);
        assert!("MAYBE".parse::<Vote>().is_err());
    }

    #[test]
    fn deadline_passed_uses_millis() {
        let raw = json!({
            "nftTokenId": 1,
            "deadline": 100,
            "yayVotes": 0,
            "nayVotes": 0,
            "executed": false,
        });
        let proposal = Proposal::from_raw(ProposalId::new(0), &raw).unwrap();
        assert!(!proposal.deadline_passed(Timestamp::from_millis(100_000)));
        assert!(proposal.deadline_passed(Timestamp::from_millis(100_001)));
    }
}
