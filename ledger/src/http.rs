//! JSON-RPC over HTTP implementation of the provider seam.
//!
//! Talks to a wallet bridge that proxies both the consent flow
//! (`wallet_connect`) and the network-scoped ledger RPC. User rejection
//! comes back as JSON-RPC error code 4001 and is mapped to
//! [`ProviderError::Rejected`]; contract reverts carry their reason in
//! `error.data.message`.

use crate::error::ProviderError;
use crate::provider::{CallRequest, LedgerConnection, TxReceipt, WalletProvider};
use async_trait::async_trait;
use dao_types::{Address, ChainId, RawAmount, TxHash};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// JSON-RPC error code for a user-rejected request.
const CODE_USER_REJECTED: i64 = 4001;

/// How often a pending transaction's receipt is polled.
const RECEIPT_POLL_INTERVAL: Duration = Duration::from_millis(1000);

// ── Transport ───────────────────────────────────────────────────────────

/// Shared JSON-RPC transport for the provider and its connections.
#[derive(Clone)]
struct RpcTransport {
    http: reqwest::Client,
    url: String,
}

impl RpcTransport {
    fn new(url: impl Into<String>) -> Result<Self, ProviderError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| ProviderError::Transport(format!("failed to create HTTP client: {e}")))?;
        Ok(Self {
            http,
            url: url.into(),
        })
    }

    /// Send a JSON-RPC request and return the `result` field.
    async fn rpc_call(&self, method: &str, params: Value) -> Result<Value, ProviderError> {
        let body = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params,
        });

        let response = self
            .http
            .post(&self.url)
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::Transport(format!("request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(ProviderError::Transport(format!(
                "ledger endpoint returned HTTP {}",
                response.status()
            )));
        }

        let json: Value = response
            .json()
            .await
            .map_err(|e| ProviderError::InvalidResponse(format!("invalid JSON response: {e}")))?;

        if let Some(error) = json.get("error") {
            return Err(classify_rpc_error(error));
        }

        json.get("result")
            .cloned()
            .ok_or_else(|| ProviderError::InvalidResponse("response missing result".into()))
    }
}

/// Map a JSON-RPC error object onto the provider taxonomy.
fn classify_rpc_error(error: &Value) -> ProviderError {
    let code = error.get("code").and_then(Value::as_i64).unwrap_or(0);
    let message = error
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or("unknown error")
        .to_string();

    if code == CODE_USER_REJECTED {
        return ProviderError::Rejected(message);
    }

    // Reverts carry the contract's reason string in error.data.message.
    if let Some(reason) = error
        .get("data")
        .and_then(|d| d.get("message"))
        .and_then(Value::as_str)
    {
        return ProviderError::Reverted {
            reason: Some(reason.to_string()),
        };
    }

    ProviderError::Rpc(message)
}

// ── Provider ────────────────────────────────────────────────────────────

/// Production wallet provider: JSON-RPC over HTTP.
#[derive(Clone)]
pub struct HttpWalletProvider {
    transport: RpcTransport,
}

impl HttpWalletProvider {
    /// Create a provider targeting the given endpoint
    /// (e.g. `http://127.0.0.1:8545`).
    pub fn new(url: impl Into<String>) -> Result<Self, ProviderError> {
        Ok(Self {
            transport: RpcTransport::new(url)?,
        })
    }
}

#[async_trait]
impl WalletProvider for HttpWalletProvider {
    async fn connect(&self) -> Result<Arc<dyn LedgerConnection>, ProviderError> {
        // This is the call that prompts the user for consent; it may take
        // unbounded real time on the bridge side before resolving.
        let result = self
            .transport
            .rpc_call("wallet_connect", json!({}))
            .await?;

        let address = result
            .get("address")
            .and_then(Value::as_str)
            .ok_or_else(|| ProviderError::InvalidResponse("connect response missing address".into()))?;
        let address = Address::parse(address)
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;

        debug!(%address, "wallet connected");
        Ok(Arc::new(HttpConnection {
            transport: self.transport.clone(),
            address,
        }))
    }
}

// ── Connection ──────────────────────────────────────────────────────────

/// A connected wallet session over the HTTP transport.
pub struct HttpConnection {
    transport: RpcTransport,
    address: Address,
}

#[async_trait]
impl LedgerConnection for HttpConnection {
    async fn chain_id(&self) -> Result<ChainId, ProviderError> {
        let result = self.transport.rpc_call("chain_id", json!({})).await?;
        let id = match &result {
            Value::Number(n) => n.as_u64(),
            Value::String(s) => s.parse::<u64>().ok(),
            _ => None,
        }
        .ok_or_else(|| ProviderError::InvalidResponse(format!("bad chain id: {result}")))?;
        Ok(ChainId::new(id))
    }

    async fn signer_address(&self) -> Result<Address, ProviderError> {
        Ok(self.address)
    }

    async fn get_balance(&self, address: &Address) -> Result<RawAmount, ProviderError> {
        let result = self
            .transport
            .rpc_call("get_balance", json!({ "address": address }))
            .await?;
        let raw = result
            .as_str()
            .ok_or_else(|| ProviderError::InvalidResponse(format!("bad balance: {result}")))?;
        raw.parse::<RawAmount>()
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))
    }

    async fn call(&self, request: &CallRequest) -> Result<Value, ProviderError> {
        self.transport
            .rpc_call(
                "contract_call",
                json!({
                    "contract": request.contract,
                    "method": request.method,
                    "args": request.args,
                }),
            )
            .await
    }

    async fn submit(&self, request: &CallRequest) -> Result<TxHash, ProviderError> {
        let result = self
            .transport
            .rpc_call(
                "contract_send",
                json!({
                    "contract": request.contract,
                    "method": request.method,
                    "args": request.args,
                    "from": self.address,
                }),
            )
            .await?;

        let hash = result
            .get("tx_hash")
            .and_then(Value::as_str)
            .ok_or_else(|| ProviderError::InvalidResponse("send response missing tx_hash".into()))?;
        TxHash::parse(hash).map_err(|e| ProviderError::InvalidResponse(e.to_string()))
    }

    async fn wait(&self, tx: &TxHash) -> Result<TxReceipt, ProviderError> {
        loop {
            let result = self
                .transport
                .rpc_call("tx_receipt", json!({ "tx_hash": tx }))
                .await?;

            if result.is_null() {
                tokio::time::sleep(RECEIPT_POLL_INTERVAL).await;
                continue;
            }

            let status = result
                .get("status")
                .and_then(Value::as_str)
                .ok_or_else(|| ProviderError::InvalidResponse(format!("bad receipt: {result}")))?;

            return match status {
                "confirmed" => {
                    let block_number = result
                        .get("block_number")
                        .and_then(Value::as_u64)
                        .unwrap_or_default();
                    Ok(TxReceipt {
                        tx_hash: *tx,
                        block_number,
                    })
                }
                "reverted" => Err(ProviderError::Reverted {
                    reason: result
                        .get("reason")
                        .and_then(Value::as_str)
                        .map(str::to_string),
                }),
                other => Err(ProviderError::InvalidResponse(format!(
                    "unknown receipt status: {other}"
                ))),
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_rejection_maps_to_rejected() {
        let error = json!({ "code": 4001, "message": "User rejected the request." });
        assert!(matches!(
            classify_rpc_error(&error),
            ProviderError::Rejected(_)
        ));
    }

    #[test]
    fn revert_reason_extracted_from_error_data() {
        let error = json!({
            "code": 3,
            "message": "execution reverted",
            "data": { "message": "DEADLINE_NOT_EXCEEDED" },
        });
        match classify_rpc_error(&error) {
            ProviderError::Reverted { reason } => {
                assert_eq!(reason.as_deref(), Some("DEADLINE_NOT_EXCEEDED"));
            }
            other => panic!("expected Reverted, got {other:?}"),
        }
    }

    #[test]
    fn plain_error_maps_to_rpc() {
        let error = json!({ "code": -32601, "message": "method not found" });
        assert!(matches!(classify_rpc_error(&error), ProviderError::Rpc(_)));
    }
}
