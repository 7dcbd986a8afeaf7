//! User-visible warning channel.
//!
//! Two situations must reach the user directly rather than only the log:
//! connecting on the wrong network, and an execute rejected by the ledger
//! with a structured reason. The UI shell supplies the sink; [`LogNotices`]
//! is the default for headless use.

use dao_types::ChainId;
use tracing::warn;

/// Sink for the warnings the core raises toward the user.
pub trait UserNotices: Send + Sync {
    /// The wallet resolved to `connected` but the client requires `required`.
    fn wrong_network(&self, connected: ChainId, required: ChainId);

    /// The ledger rejected an execute with a human-readable reason.
    fn transaction_reverted(&self, reason: &str);
}

/// Default sink: warnings go to the log only.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogNotices;

impl UserNotices for LogNotices {
    fn wrong_network(&self, connected: ChainId, required: ChainId) {
        warn!(%connected, %required, "please switch to the required network");
    }

    fn transaction_reverted(&self, reason: &str) {
        warn!(reason, "transaction reverted");
    }
}
