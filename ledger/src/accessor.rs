//! Read-only and signing views over a ledger connection.

use crate::error::ProviderError;
use crate::provider::{CallRequest, LedgerConnection, TxReceipt};
use dao_types::{Address, RawAmount, TxHash};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Query-only view bound to the current network.
#[derive(Clone)]
pub struct ReadAccessor {
    conn: Arc<dyn LedgerConnection>,
}

impl ReadAccessor {
    pub fn new(conn: Arc<dyn LedgerConnection>) -> Self {
        Self { conn }
    }

    pub fn connection(&self) -> &Arc<dyn LedgerConnection> {
        &self.conn
    }

    pub async fn get_balance(&self, address: &Address) -> Result<RawAmount, ProviderError> {
        self.conn.get_balance(address).await
    }

    pub async fn call(&self, request: &CallRequest) -> Result<Value, ProviderError> {
        debug!(contract = %request.contract, method = %request.method, "contract call");
        self.conn.call(request).await
    }
}

/// View bound to one wallet address, able to authorize state changes.
///
/// Derived from the session on demand, never cached across calls that differ
/// in signer requirement.
#[derive(Clone)]
pub struct SigningAccessor {
    conn: Arc<dyn LedgerConnection>,
    address: Address,
}

impl SigningAccessor {
    pub fn new(conn: Arc<dyn LedgerConnection>, address: Address) -> Self {
        Self { conn, address }
    }

    /// The connected signer's address.
    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn connection(&self) -> &Arc<dyn LedgerConnection> {
        &self.conn
    }

    pub async fn call(&self, request: &CallRequest) -> Result<Value, ProviderError> {
        self.conn.call(request).await
    }

    /// Submit a signed state-changing call. The returned [`PendingTx`] is the
    /// handle the caller waits on for confirmation.
    pub async fn submit(&self, request: &CallRequest) -> Result<PendingTx, ProviderError> {
        debug!(contract = %request.contract, method = %request.method, "submitting transaction");
        let tx_hash = self.conn.submit(request).await?;
        Ok(PendingTx {
            conn: self.conn.clone(),
            tx_hash,
        })
    }

    /// Downgrade to a read-only view over the same connection.
    pub fn as_read(&self) -> ReadAccessor {
        ReadAccessor::new(self.conn.clone())
    }
}

/// Either view, as handed out by the session layer.
#[derive(Clone)]
pub enum Accessor {
    Read(ReadAccessor),
    Signing(SigningAccessor),
}

impl Accessor {
    pub fn can_sign(&self) -> bool {
        matches!(self, Self::Signing(_))
    }

    pub fn connection(&self) -> &Arc<dyn LedgerConnection> {
        match self {
            Self::Read(a) => a.connection(),
            Self::Signing(a) => a.connection(),
        }
    }

    /// Signer address, if this accessor can sign.
    pub fn signer_address(&self) -> Option<&Address> {
        match self {
            Self::Read(_) => None,
            Self::Signing(a) => Some(a.address()),
        }
    }
}

/// A transaction accepted into the ledger's pool but not yet confirmed.
pub struct PendingTx {
    conn: Arc<dyn LedgerConnection>,
    tx_hash: TxHash,
}

impl std::fmt::Debug for PendingTx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingTx")
            .field("tx_hash", &self.tx_hash)
            .finish_non_exhaustive()
    }
}

impl PendingTx {
    pub fn tx_hash(&self) -> &TxHash {
        &self.tx_hash
    }

    /// Block until the transaction is confirmed. Fails with
    /// [`ProviderError::Reverted`] if the ledger rejects it.
    pub async fn wait(self) -> Result<TxReceipt, ProviderError> {
        self.conn.wait(&self.tx_hash).await
    }
}
