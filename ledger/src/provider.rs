//! The wallet-capability and ledger-RPC traits.

use crate::error::ProviderError;
use async_trait::async_trait;
use dao_types::{Address, ChainId, RawAmount, TxHash};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

/// The connect-on-demand wallet capability injected by the host environment.
///
/// `connect` may prompt the user for consent and therefore may suspend for
/// unbounded real time. Memoization is the session layer's job: the provider
/// itself is allowed to prompt on every call.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    async fn connect(&self) -> Result<Arc<dyn LedgerConnection>, ProviderError>;
}

/// A network-scoped view of the ledger obtained from a connected wallet.
///
/// One suspension point per ledger round trip; no call retries internally.
#[async_trait]
pub trait LedgerConnection: Send + Sync {
    /// Chain identity of the network this connection currently points at.
    /// Re-queried rather than cached: the user may switch networks mid-session.
    async fn chain_id(&self) -> Result<ChainId, ProviderError>;

    /// Address of the connected signer.
    async fn signer_address(&self) -> Result<Address, ProviderError>;

    /// Native balance of an account in the smallest unit.
    async fn get_balance(&self, address: &Address) -> Result<RawAmount, ProviderError>;

    /// Dispatch a read-only contract call and return the raw result value.
    async fn call(&self, request: &CallRequest) -> Result<Value, ProviderError>;

    /// Submit a state-changing contract call signed by the connected signer.
    /// Returns once the ledger has accepted the transaction into its pool.
    async fn submit(&self, request: &CallRequest) -> Result<TxHash, ProviderError>;

    /// Wait until the transaction is confirmed (mined). Resolves with the
    /// receipt on confirmation, or `ProviderError::Reverted` with the
    /// structured reason if the ledger rejected it.
    async fn wait(&self, tx: &TxHash) -> Result<TxReceipt, ProviderError>;
}

/// A contract call: target address, method name, and JSON-encoded arguments.
///
/// The interface schema is opaque to this layer; method names and argument
/// encodings are validated upstream against the bound contract's schema.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CallRequest {
    pub contract: Address,
    pub method: String,
    pub args: Vec<Value>,
}

impl CallRequest {
    pub fn new(contract: Address, method: impl Into<String>, args: Vec<Value>) -> Self {
        Self {
            contract,
            method: method.into(),
            args,
        }
    }
}

/// Receipt of a confirmed transaction.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TxReceipt {
    pub tx_hash: TxHash,
    pub block_number: u64,
}
