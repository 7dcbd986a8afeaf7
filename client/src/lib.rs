//! Governance client core.
//!
//! Lets a UI shell inspect and participate in on-ledger governance:
//! treasury balance, proposal browsing, voting, and execution of passed
//! proposals. The core owns the session lifecycle and a read-through cache
//! of ledger state; it never holds ledger truth of its own.
//!
//! Components:
//! - [`SessionManager`] — memoized wallet connection + network guard
//! - [`ContractGateway`] — binds contract address + schema to an accessor
//! - [`GovernanceStateReader`] — reads + snapshot cache
//! - [`GovernanceActionExecutor`] — create / vote / execute with
//!   confirmation wait and post-confirmation refresh

pub mod config;
pub mod error;
pub mod executor;
pub mod gateway;
pub mod notices;
pub mod proposal;
pub mod reader;
pub mod schema;
pub mod session;

pub use config::{ClientConfig, RefreshPolicy, RefreshScope};
pub use error::{ClientError, GovernanceAction};
pub use executor::{ActionState, GovernanceActionExecutor};
pub use gateway::{ContractGateway, ContractHandle};
pub use notices::{LogNotices, UserNotices};
pub use proposal::{GovernanceSnapshot, MembershipBalance, Proposal, Vote};
pub use reader::GovernanceStateReader;
pub use schema::{ContractSchema, GOVERNANCE_SCHEMA, MEMBERSHIP_TOKEN_SCHEMA};
pub use session::SessionManager;
