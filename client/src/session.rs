//! Session lifecycle: one memoized wallet connection, network guard on every
//! accessor request.

use crate::error::ClientError;
use crate::notices::UserNotices;
use dao_ledger::{Accessor, LedgerConnection, ReadAccessor, SigningAccessor, WalletProvider};
use dao_types::ChainId;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

/// Obtains and memoizes the wallet connection and hands out accessors.
///
/// Constructed once by the composition root and shared by `Arc`. The
/// underlying connection is established exactly once per manager lifetime —
/// the first `accessor` (or `connect_wallet`) call is the point at which the
/// wallet prompts the user, and may suspend for unbounded real time. Later
/// calls reuse the connection without re-prompting.
pub struct SessionManager {
    provider: Arc<dyn WalletProvider>,
    required_chain: ChainId,
    notices: Arc<dyn UserNotices>,
    conn: Mutex<Option<Arc<dyn LedgerConnection>>>,
}

impl SessionManager {
    pub fn new(
        provider: Arc<dyn WalletProvider>,
        required_chain: ChainId,
        notices: Arc<dyn UserNotices>,
    ) -> Self {
        Self {
            provider,
            required_chain,
            notices,
            conn: Mutex::new(None),
        }
    }

    /// Eagerly establish the wallet connection (the original UI's explicit
    /// connect button). Idempotent: a second call reuses the connection.
    pub async fn connect_wallet(&self) -> Result<(), ClientError> {
        self.connection().await.map(|_| ())
    }

    /// Whether a wallet connection has been established.
    pub async fn is_connected(&self) -> bool {
        self.conn.lock().await.is_some()
    }

    /// Drop the memoized connection. The next accessor request reconnects
    /// (and re-prompts the user).
    pub async fn close(&self) {
        let mut guard = self.conn.lock().await;
        if guard.take().is_some() {
            info!("wallet session closed");
        }
    }

    /// Obtain an accessor: read-only, or signing when `need_signer` is true.
    ///
    /// The network guard runs on every invocation, not only the first — the
    /// user may switch networks mid-session. On a chain mismatch the user is
    /// warned through the notice sink and the call fails with
    /// [`ClientError::WrongNetwork`] before any ledger query is issued by
    /// the caller.
    pub async fn accessor(&self, need_signer: bool) -> Result<Accessor, ClientError> {
        let conn = self.connection().await?;

        let connected = conn
            .chain_id()
            .await
            .map_err(ClientError::from_read)?;
        if connected != self.required_chain {
            self.notices.wrong_network(connected, self.required_chain);
            warn!(%connected, required = %self.required_chain, "wrong network");
            return Err(ClientError::WrongNetwork {
                connected,
                required: self.required_chain,
            });
        }

        if need_signer {
            let address = conn
                .signer_address()
                .await
                .map_err(ClientError::from_read)?;
            Ok(Accessor::Signing(SigningAccessor::new(conn, address)))
        } else {
            Ok(Accessor::Read(ReadAccessor::new(conn)))
        }
    }

    /// Convenience: a read-only accessor.
    pub async fn read(&self) -> Result<ReadAccessor, ClientError> {
        match self.accessor(false).await? {
            Accessor::Read(a) => Ok(a),
            Accessor::Signing(a) => Ok(a.as_read()),
        }
    }

    /// Convenience: a signing accessor bound to the connected address.
    pub async fn signing(&self) -> Result<SigningAccessor, ClientError> {
        match self.accessor(true).await? {
            Accessor::Signing(a) => Ok(a),
            Accessor::Read(_) => unreachable!("accessor(true) always returns a signing accessor"),
        }
    }

    /// The memoized connection, establishing it on first use.
    async fn connection(&self) -> Result<Arc<dyn LedgerConnection>, ClientError> {
        let mut guard = self.conn.lock().await;
        if let Some(conn) = guard.as_ref() {
            return Ok(conn.clone());
        }

        // May prompt the user for consent; suspends until they decide.
        let conn = self.provider.connect().await.map_err(|e| {
            error!(%e, "wallet connection failed");
            ClientError::from_read(e)
        })?;
        info!("wallet session established");
        *guard = Some(conn.clone());
        Ok(conn)
    }
}
