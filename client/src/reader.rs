//! Governance state reads and the read-through snapshot cache.

use crate::error::ClientError;
use crate::gateway::ContractGateway;
use crate::proposal::{GovernanceSnapshot, MembershipBalance, Proposal};
use crate::session::SessionManager;
use dao_ledger::Accessor;
use dao_types::{ProposalId, RawAmount};
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error};

/// Pulls governance state through the gateway and caches the result.
///
/// Each read is independently fallible and independently retryable; the
/// cache is only ever replaced wholesale from a successful read, so a failed
/// read leaves the previous snapshot intact. `snapshot()` is the pull-based
/// view the UI renders; the executor drives the `refresh_*` hooks after
/// confirmed writes.
pub struct GovernanceStateReader {
    session: Arc<SessionManager>,
    gateway: ContractGateway,
    snapshot: RwLock<GovernanceSnapshot>,
    membership: RwLock<MembershipBalance>,
}

impl GovernanceStateReader {
    pub fn new(session: Arc<SessionManager>, gateway: ContractGateway) -> Self {
        Self {
            session,
            gateway,
            snapshot: RwLock::new(GovernanceSnapshot::default()),
            membership: RwLock::new(MembershipBalance::default()),
        }
    }

    /// The cached snapshot. Reflects the most recent successful reads, not a
    /// live view of the ledger.
    pub async fn snapshot(&self) -> GovernanceSnapshot {
        self.snapshot.read().await.clone()
    }

    /// The cached membership balance of the connected signer.
    pub async fn cached_membership(&self) -> MembershipBalance {
        *self.membership.read().await
    }

    /// Treasury balance: the ledger balance of the governance contract's own
    /// address, as an exact smallest-unit integer.
    pub async fn treasury_balance(&self) -> Result<RawAmount, ClientError> {
        let accessor = self.session.read().await?;
        let governance = self.gateway.governance(Accessor::Read(accessor.clone()));
        let balance = accessor
            .get_balance(governance.address())
            .await
            .map_err(ClientError::from_read)?;

        self.snapshot.write().await.treasury_balance = balance;
        debug!(%balance, "treasury balance");
        Ok(balance)
    }

    /// Current proposal count.
    pub async fn num_proposals(&self) -> Result<u64, ClientError> {
        let accessor = self.session.read().await?;
        let governance = self.gateway.governance(Accessor::Read(accessor));
        let result = governance
            .call("numProposals", vec![])
            .await
            .map_err(ClientError::classify_read)?;
        let count = parse_u64(&result)?;

        self.snapshot.write().await.num_proposals = count;
        Ok(count)
    }

    /// Membership-token balance of the connected signer. Requires a signing
    /// accessor: the query is scoped to the caller's own address.
    pub async fn membership_balance(&self) -> Result<MembershipBalance, ClientError> {
        let signer = self.session.signing().await?;
        let address = *signer.address();
        let token = self.gateway.membership_token(Accessor::Signing(signer));
        let result = token
            .call("balanceOf", vec![json!(address)])
            .await
            .map_err(ClientError::classify_read)?;
        let balance = MembershipBalance::new(parse_u64(&result)?);

        *self.membership.write().await = balance;
        Ok(balance)
    }

    /// Fetch one proposal and normalize it into the client shape.
    pub async fn proposal_by_id(&self, id: ProposalId) -> Result<Proposal, ClientError> {
        let accessor = self.session.read().await?;
        let governance = self.gateway.governance(Accessor::Read(accessor));
        let raw = governance
            .call("proposals", vec![json!(id.as_u64())])
            .await
            .map_err(ClientError::classify_read)?;
        Proposal::from_raw(id, &raw)
    }

    /// Fetch every proposal, ids strictly ascending from 0.
    ///
    /// All-or-nothing: a failure on any single id aborts the aggregate and
    /// the cache keeps its previous list — callers never see a partial one.
    /// There is no atomicity across the sequence; the ledger may change
    /// between individual fetches.
    pub async fn all_proposals(&self) -> Result<Vec<Proposal>, ClientError> {
        let count = self.num_proposals().await?;

        let mut proposals = Vec::with_capacity(count as usize);
        for id in (0..count).map(ProposalId::new) {
            let proposal = self.proposal_by_id(id).await.map_err(|e| {
                error!(%id, %e, "aggregate proposal fetch aborted");
                ClientError::AggregateFetchFailure {
                    failed_id: id,
                    source: Box::new(e),
                }
            })?;
            proposals.push(proposal);
        }

        let mut snapshot = self.snapshot.write().await;
        snapshot.num_proposals = count;
        snapshot.proposals = proposals.clone();
        Ok(proposals)
    }

    /// Refresh the treasury balance and proposal count.
    pub async fn refresh_counts(&self) -> Result<(), ClientError> {
        self.treasury_balance().await?;
        self.num_proposals().await?;
        Ok(())
    }

    /// Refresh counts and the full proposal list.
    pub async fn refresh_all(&self) -> Result<(), ClientError> {
        self.treasury_balance().await?;
        self.all_proposals().await?;
        Ok(())
    }
}

/// Parse a counter value the ledger may encode as a number or string.
fn parse_u64(value: &Value) -> Result<u64, ClientError> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.parse::<u64>().ok(),
        _ => None,
    }
    .ok_or_else(|| ClientError::ReadFailure(format!("expected integer, got {value}")))
}
