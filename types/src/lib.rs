//! Fundamental types for the DAO governance client.
//!
//! This crate defines the value types shared across the workspace:
//! ledger addresses, transaction hashes, chain identity, smallest-unit
//! amounts, timestamps, and the proposal/token identifiers.

pub mod address;
pub mod amount;
pub mod chain;
pub mod error;
pub mod hash;
pub mod id;
pub mod time;

pub use address::Address;
pub use amount::RawAmount;
pub use chain::ChainId;
pub use error::ParseError;
pub use hash::TxHash;
pub use id::{ProposalId, TokenId};
pub use time::Timestamp;
