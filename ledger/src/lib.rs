//! Injected-provider seam between the governance client and the ledger.
//!
//! The client never talks to the ledger directly; it goes through two
//! capabilities supplied by the host environment:
//! - [`WalletProvider`] — the connect-on-demand wallet capability (may
//!   prompt the user for consent on first connect)
//! - [`LedgerConnection`] — the network-scoped RPC surface: chain identity,
//!   balance queries, contract-call dispatch, and signed submission with an
//!   async confirmation wait
//!
//! [`HttpWalletProvider`] is the production implementation, a JSON-RPC over
//! HTTP client. Tests substitute in-memory implementations.

pub mod accessor;
pub mod error;
pub mod http;
pub mod provider;

pub use accessor::{Accessor, PendingTx, ReadAccessor, SigningAccessor};
pub use error::ProviderError;
pub use http::{HttpConnection, HttpWalletProvider};
pub use provider::{CallRequest, LedgerConnection, TxReceipt, WalletProvider};
