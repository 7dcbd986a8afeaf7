//! Binding of logical contracts to session accessors.

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::schema::{ContractSchema, GOVERNANCE_SCHEMA, MEMBERSHIP_TOKEN_SCHEMA};
use dao_ledger::{Accessor, CallRequest, PendingTx};
use dao_types::Address;
use serde_json::Value;
use std::sync::Arc;

/// Produces callable contract handles. Pure and synchronous: a handle is
/// cheap to build and is recreated per call, since the bound accessor may
/// change between a read and a write.
#[derive(Clone)]
pub struct ContractGateway {
    config: Arc<ClientConfig>,
}

impl ContractGateway {
    pub fn new(config: Arc<ClientConfig>) -> Self {
        Self { config }
    }

    /// Bind an arbitrary contract to an accessor.
    pub fn bind_contract(
        &self,
        address: Address,
        schema: ContractSchema,
        accessor: Accessor,
    ) -> ContractHandle {
        ContractHandle {
            address,
            schema,
            accessor,
        }
    }

    /// The governance contract, bound to `accessor`.
    pub fn governance(&self, accessor: Accessor) -> ContractHandle {
        self.bind_contract(self.config.governance_address, GOVERNANCE_SCHEMA, accessor)
    }

    /// The membership-token contract, bound to `accessor`.
    pub fn membership_token(&self, accessor: Accessor) -> ContractHandle {
        self.bind_contract(self.config.token_address, MEMBERSHIP_TOKEN_SCHEMA, accessor)
    }
}

/// Immutable pairing of contract address, interface schema, and accessor.
pub struct ContractHandle {
    address: Address,
    schema: ContractSchema,
    accessor: Accessor,
}

impl ContractHandle {
    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn schema(&self) -> &ContractSchema {
        &self.schema
    }

    fn check_method(&self, method: &str) -> Result<(), ClientError> {
        if !self.schema.has_method(method) {
            return Err(ClientError::UnknownMethod {
                schema: self.schema.name,
                method: method.to_string(),
            });
        }
        Ok(())
    }

    /// Dispatch a read-only call. Provider errors are passed through raw for
    /// the caller to classify.
    pub async fn call(&self, method: &str, args: Vec<Value>) -> Result<Value, ClientError> {
        self.check_method(method)?;
        let request = CallRequest::new(self.address, method, args);
        Ok(self.accessor.connection().call(&request).await?)
    }

    /// Submit a state-changing call through the bound signing accessor.
    pub async fn submit(&self, method: &str, args: Vec<Value>) -> Result<PendingTx, ClientError> {
        self.check_method(method)?;
        let Accessor::Signing(signer) = &self.accessor else {
            return Err(ClientError::ReadOnlyAccessor);
        };
        let request = CallRequest::new(self.address, method, args);
        Ok(signer.submit(&request).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dao_ledger::{LedgerConnection, ProviderError, ReadAccessor, SigningAccessor, TxReceipt};
    use dao_types::{ChainId, RawAmount, TxHash};
    use serde_json::json;

    /// Connection stub: dispatch succeeds trivially so the tests observe
    /// only the handle's own guards.
    struct StubConnection;

    #[async_trait::async_trait]
    impl LedgerConnection for StubConnection {
        async fn chain_id(&self) -> Result<ChainId, ProviderError> {
            Ok(ChainId::new(5))
        }

        async fn signer_address(&self) -> Result<Address, ProviderError> {
            Ok(Address::ZERO)
        }

        async fn get_balance(&self, _address: &Address) -> Result<RawAmount, ProviderError> {
            Ok(RawAmount::ZERO)
        }

        async fn call(&self, _request: &CallRequest) -> Result<Value, ProviderError> {
            Ok(Value::Null)
        }

        async fn submit(&self, _request: &CallRequest) -> Result<TxHash, ProviderError> {
            Ok(TxHash::ZERO)
        }

        async fn wait(&self, tx: &TxHash) -> Result<TxReceipt, ProviderError> {
            Ok(TxReceipt {
                tx_hash: *tx,
                block_number: 1,
            })
        }
    }

    fn gateway() -> ContractGateway {
        let config = ClientConfig {
            node_url: "stub://".into(),
            governance_address: Address::new([0x11; 20]),
            token_address: Address::new([0x22; 20]),
            required_chain: ChainId::new(5),
            refresh: Default::default(),
        };
        ContractGateway::new(Arc::new(config))
    }

    fn read_accessor() -> Accessor {
        Accessor::Read(ReadAccessor::new(Arc::new(StubConnection)))
    }

    fn signing_accessor() -> Accessor {
        Accessor::Signing(SigningAccessor::new(Arc::new(StubConnection), Address::ZERO))
    }

    #[tokio::test]
    async fn submit_through_read_accessor_is_rejected() {
        let handle = gateway().governance(read_accessor());
        let err = handle.submit("createProposal", vec![json!("1")]).await.unwrap_err();
        assert!(matches!(err, ClientError::ReadOnlyAccessor));
    }

    #[tokio::test]
    async fn method_outside_schema_is_rejected_before_dispatch() {
        let handle = gateway().governance(read_accessor());
        let err = handle.call("balanceOf", vec![]).await.unwrap_err();
        assert!(matches!(
            err,
            ClientError::UnknownMethod { schema: "governance", .. }
        ));

        let handle = gateway().membership_token(signing_accessor());
        let err = handle.submit("executeProposal", vec![]).await.unwrap_err();
        assert!(matches!(
            err,
            ClientError::UnknownMethod { schema: "membership-token", .. }
        ));
    }

    #[tokio::test]
    async fn schema_methods_dispatch_through_the_accessor() {
        let handle = gateway().governance(read_accessor());
        assert!(handle.call("numProposals", vec![]).await.is_ok());

        let handle = gateway().governance(signing_accessor());
        let pending = handle.submit("voteOnProposal", vec![json!(0), json!(0)]).await.unwrap();
        assert!(pending.wait().await.is_ok());
    }
}
