//! Client configuration.
//!
//! The deployed contract addresses, the required chain id, and the
//! post-confirmation refresh policy are configuration, not code. A UI shell
//! ships a TOML file rather than hard-coding addresses.

use crate::error::ClientError;
use dao_types::{Address, ChainId};
use serde::Deserialize;

/// Static configuration for one deployment of the governance contracts.
#[derive(Clone, Debug, Deserialize)]
pub struct ClientConfig {
    /// Endpoint of the wallet bridge / ledger RPC.
    pub node_url: String,

    /// Deployed governance contract. Also the treasury account: the
    /// treasury balance is the ledger balance of this address.
    pub governance_address: Address,

    /// Deployed membership-token contract.
    pub token_address: Address,

    /// The single network this client accepts. Connections resolving to any
    /// other chain id are rejected.
    pub required_chain: ChainId,

    /// How much derived state each confirmed action refreshes.
    #[serde(default)]
    pub refresh: RefreshPolicy,
}

impl ClientConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ClientError> {
        toml::from_str(text).map_err(|e| ClientError::ReadFailure(format!("bad config: {e}")))
    }
}

/// How much derived read state is refreshed after each confirmed action.
///
/// The defaults mirror the cheapest sound choice per action: a new proposal
/// only bumps the counter (its id equals the pre-submission count, so the
/// record can be fetched lazily), while vote and execute change an existing
/// record and warrant a full list refresh.
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(default)]
pub struct RefreshPolicy {
    pub after_create: RefreshScope,
    pub after_vote: RefreshScope,
    pub after_execute: RefreshScope,
}

impl Default for RefreshPolicy {
    fn default() -> Self {
        Self {
            after_create: RefreshScope::CountOnly,
            after_vote: RefreshScope::FullList,
            after_execute: RefreshScope::FullList,
        }
    }
}

/// Refresh granularity for one action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefreshScope {
    /// Refresh nothing; the UI refetches on its own schedule.
    None,
    /// Refresh the treasury balance and proposal count.
    CountOnly,
    /// Refresh counts and the full proposal list.
    FullList,
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
        node_url = "http://127.0.0.1:8545"
        governance_address = "0x7c3cf2d43b7582f5d4fa10697794cab1e34a3ca6"
        token_address = "0x0df1ae5f0c3a9d8be3feff1bd0b0be22cb6e9520"
        required_chain = 5
    "#;

    #[test]
    fn parses_minimal_config_with_default_policy() {
        let config = ClientConfig::from_toml_str(SAMPLE).unwrap();
        assert_eq!(config.required_chain, ChainId::new(5));
        assert_eq!(config.refresh.after_create, RefreshScope::CountOnly);
        assert_eq!(config.refresh.after_vote, RefreshScope::FullList);
        assert_eq!(config.refresh.after_execute, RefreshScope::FullList);
    }

    #[test]
    fn refresh_policy_is_overridable() {
        let text = format!("{SAMPLE}\n[refresh]\nafter_create = \"full_list\"\n");
        let config = ClientConfig::from_toml_str(&text).unwrap();
        assert_eq!(config.refresh.after_create, RefreshScope::FullList);
        assert_eq!(config.refresh.after_vote, RefreshScope::FullList);
    }

    #[test]
    fn rejects_malformed_address() {
        let text = SAMPLE.replace("0x7c3cf2d43b7582f5d4fa10697794cab1e34a3ca6", "nonsense");
        assert!(ClientConfig::from_toml_str(&text).is_err());
    }
}
