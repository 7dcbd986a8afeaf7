use dao_ledger::ProviderError;
use dao_types::{ChainId, ProposalId};
use std::fmt;
use thiserror::Error;

/// The three state-changing governance actions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GovernanceAction {
    CreateProposal,
    Vote,
    Execute,
}

impl fmt::Display for GovernanceAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::CreateProposal => "create proposal",
            Self::Vote => "vote",
            Self::Execute => "execute proposal",
        };
        write!(f, "{name}")
    }
}

/// Failure taxonomy of the governance core. Every operation returns a typed
/// result so the UI shell can branch on the kind instead of reading logs.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The wallet is connected to the wrong network. Recoverable: the user
    /// switches networks and retries.
    #[error("wrong network: connected to chain {connected}, required chain {required}")]
    WrongNetwork {
        connected: ChainId,
        required: ChainId,
    },

    /// The user declined the wallet connection or the signing request.
    #[error("connection rejected by user: {0}")]
    ConnectionRejected(String),

    /// A read query (balance, count, proposal fetch) failed.
    #[error("read failed: {0}")]
    ReadFailure(String),

    /// The ledger rejected or reverted a write at or before confirmation.
    /// `reason` is the ledger's structured revert reason and is only set for
    /// genuine reverts, never for transport errors.
    #[error("{action} failed: {detail}")]
    SubmissionFailure {
        action: GovernanceAction,
        detail: String,
        reason: Option<String>,
    },

    /// A single proposal fetch failed during the aggregate fetch; no partial
    /// list is returned.
    #[error("proposal list fetch aborted at {failed_id}: {source}")]
    AggregateFetchFailure {
        failed_id: ProposalId,
        #[source]
        source: Box<ClientError>,
    },

    /// Another governance action is still in flight.
    #[error("another governance action is in flight")]
    Busy,

    /// A method name was not present in the bound contract's schema.
    #[error("method {method:?} not in the {schema} schema")]
    UnknownMethod {
        schema: &'static str,
        method: String,
    },

    /// A state-changing call was attempted through a read-only accessor.
    #[error("write call requires a signing accessor")]
    ReadOnlyAccessor,

    /// Raw provider error that has not been classified yet. Internal seam:
    /// the reader and executor map these into the variants above.
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

impl ClientError {
    /// Classify a provider error arising from a read path.
    pub(crate) fn from_read(err: ProviderError) -> Self {
        match err {
            ProviderError::Rejected(msg) => Self::ConnectionRejected(msg),
            other => Self::ReadFailure(other.to_string()),
        }
    }

    /// Classify a provider error arising from a submission path.
    pub(crate) fn from_submission(action: GovernanceAction, err: ProviderError) -> Self {
        match err {
            ProviderError::Rejected(msg) => Self::ConnectionRejected(msg),
            ProviderError::Reverted { reason } => Self::SubmissionFailure {
                action,
                detail: reason
                    .clone()
                    .unwrap_or_else(|| "transaction reverted".to_string()),
                reason,
            },
            other => Self::SubmissionFailure {
                action,
                detail: other.to_string(),
                reason: None,
            },
        }
    }

    /// Re-classify a still-raw provider error on the read path.
    pub(crate) fn classify_read(self) -> Self {
        match self {
            Self::Provider(err) => Self::from_read(err),
            other => other,
        }
    }
}
