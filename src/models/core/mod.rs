//! Canonical domain models for the chain gateway.
//!
//! Every chain family reduces its payloads into these records, so consumers never see a
//! family-specific shape:
//! - NetworkConfig: static description of one served network
//! - Block, Transaction: chain activity
//! - Proposal, Tally: governance
//! - Validator, Delegation, Balance: staking and accounts

mod account;
mod block;
mod governance;
mod network;
mod transaction;
mod validator;

pub use account::{Balance, Coin, Delegation};
pub use block::Block;
pub use governance::{Proposal, ProposalStatus, Tally};
pub use network::NetworkConfig;
pub use transaction::{Transaction, TransactionGroup};
pub use validator::{Validator, ValidatorStatus, ValidatorStatusDetail};
