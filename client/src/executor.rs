//! State-changing governance actions.
//!
//! Every action runs the same machine: Idle → obtain a signing accessor
//! (may suspend for wallet approval) → Submitting → Pending (ledger
//! accepted the transaction) → Confirmed → refresh dependent read state →
//! Idle. Any failure lands in Failed. One shared busy flag serializes
//! actions and is cleared on every exit path.

use crate::config::{RefreshPolicy, RefreshScope};
use crate::error::{ClientError, GovernanceAction};
use crate::gateway::ContractGateway;
use crate::notices::UserNotices;
use crate::proposal::Vote;
use crate::reader::GovernanceStateReader;
use crate::session::SessionManager;
use dao_ledger::{Accessor, TxReceipt};
use dao_types::{ProposalId, TokenId};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tracing::{error, info, warn};

/// Observable position of the executor's state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionState {
    Idle,
    /// Write call issued, ledger has not accepted it yet.
    Submitting,
    /// Transaction in the pool, waiting for confirmation.
    Pending,
    /// Confirmed; dependent read state being refreshed.
    Confirmed,
    Failed,
}

/// Submits create / vote / execute and resynchronizes state on confirmation.
pub struct GovernanceActionExecutor {
    session: Arc<SessionManager>,
    gateway: ContractGateway,
    reader: Arc<GovernanceStateReader>,
    policy: RefreshPolicy,
    notices: Arc<dyn UserNotices>,
    busy: AtomicBool,
    state: Mutex<ActionState>,
}

impl GovernanceActionExecutor {
    pub fn new(
        session: Arc<SessionManager>,
        gateway: ContractGateway,
        reader: Arc<GovernanceStateReader>,
        policy: RefreshPolicy,
        notices: Arc<dyn UserNotices>,
    ) -> Self {
        Self {
            session,
            gateway,
            reader,
            policy,
            notices,
            busy: AtomicBool::new(false),
            state: Mutex::new(ActionState::Idle),
        }
    }

    /// Whether an action is currently in flight. The UI disables re-entrant
    /// triggers while this is set.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    /// Current state-machine position.
    pub fn state(&self) -> ActionState {
        *self.state.lock().expect("state lock poisoned")
    }

    /// Create a proposal for the given membership token.
    ///
    /// The new proposal's id equals the pre-submission proposal count, so
    /// the default policy refreshes only the count and leaves the record to
    /// be fetched lazily.
    pub async fn create_proposal(&self, nft_token_id: &TokenId) -> Result<TxReceipt, ClientError> {
        self.run_action(
            GovernanceAction::CreateProposal,
            "createProposal",
            vec![json!(nft_token_id.as_str())],
            self.policy.after_create,
        )
        .await
    }

    /// Cast a vote. The vote is wire-encoded as its ordinal (Yay = 0, Nay = 1).
    pub async fn vote_on_proposal(
        &self,
        proposal_id: ProposalId,
        vote: Vote,
    ) -> Result<TxReceipt, ClientError> {
        self.run_action(
            GovernanceAction::Vote,
            "voteOnProposal",
            vec![json!(proposal_id.as_u64()), json!(vote.ordinal())],
            self.policy.after_vote,
        )
        .await
    }

    /// Execute a passed proposal. On a ledger revert, the structured reason
    /// is surfaced to the user in addition to the typed error.
    pub async fn execute_proposal(&self, proposal_id: ProposalId) -> Result<TxReceipt, ClientError> {
        let result = self
            .run_action(
                GovernanceAction::Execute,
                "executeProposal",
                vec![json!(proposal_id.as_u64())],
                self.policy.after_execute,
            )
            .await;

        if let Err(ClientError::SubmissionFailure {
            reason: Some(reason),
            ..
        }) = &result
        {
            self.notices.transaction_reverted(reason);
        }
        result
    }

    /// Drive one action through the state machine under the busy flag.
    async fn run_action(
        &self,
        action: GovernanceAction,
        method: &str,
        args: Vec<Value>,
        refresh: RefreshScope,
    ) -> Result<TxReceipt, ClientError> {
        if self.busy.swap(true, Ordering::SeqCst) {
            return Err(ClientError::Busy);
        }
        let _clear = BusyGuard(&self.busy);

        let result = self.drive(action, method, args, refresh).await;
        match &result {
            Ok(receipt) => {
                self.set_state(ActionState::Idle);
                info!(%action, tx = %receipt.tx_hash, "action confirmed");
            }
            Err(e) => {
                self.set_state(ActionState::Failed);
                error!(%action, %e, "action failed");
            }
        }
        result
    }

    async fn drive(
        &self,
        action: GovernanceAction,
        method: &str,
        args: Vec<Value>,
        refresh: RefreshScope,
    ) -> Result<TxReceipt, ClientError> {
        // May suspend for wallet approval.
        let signer = self.session.signing().await?;
        let governance = self.gateway.governance(Accessor::Signing(signer));

        self.set_state(ActionState::Submitting);
        let pending = governance
            .submit(method, args)
            .await
            .map_err(|e| classify_submission(action, e))?;

        self.set_state(ActionState::Pending);
        let receipt = pending
            .wait()
            .await
            .map_err(|e| ClientError::from_submission(action, e))?;

        self.set_state(ActionState::Confirmed);
        self.apply_refresh(refresh).await;
        Ok(receipt)
    }

    /// Post-confirmation resynchronization. A refresh failure does not fail
    /// the action — the write is already confirmed on-ledger; staleness
    /// resolves on the next successful read.
    async fn apply_refresh(&self, scope: RefreshScope) {
        let result = match scope {
            RefreshScope::None => Ok(()),
            RefreshScope::CountOnly => self.reader.refresh_counts().await,
            RefreshScope::FullList => self.reader.refresh_all().await,
        };
        if let Err(e) = result {
            warn!(%e, "post-confirmation refresh failed");
        }
    }

    fn set_state(&self, state: ActionState) {
        *self.state.lock().expect("state lock poisoned") = state;
    }
}

/// Map an error raised while submitting; schema and accessor misuse pass
/// through unchanged.
fn classify_submission(action: GovernanceAction, err: ClientError) -> ClientError {
    match err {
        ClientError::Provider(e) => ClientError::from_submission(action, e),
        other => other,
    }
}

/// Clears the busy flag on every exit path, including early `?` returns.
struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}
