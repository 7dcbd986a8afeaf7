use thiserror::Error;

/// Errors surfaced by a wallet provider or ledger connection.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("ledger RPC error: {0}")]
    Rpc(String),

    #[error("invalid response from ledger: {0}")]
    InvalidResponse(String),

    #[error("rejected by user: {0}")]
    Rejected(String),

    #[error("transaction reverted: {}", .reason.as_deref().unwrap_or("no reason given"))]
    Reverted { reason: Option<String> },
}

impl ProviderError {
    /// The structured revert reason, if the ledger supplied one.
    pub fn revert_reason(&self) -> Option<&str> {
        match self {
            Self::Reverted { reason } => reason.as_deref(),
            _ => None,
        }
    }
}
