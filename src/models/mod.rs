//! Domain models and data structures for the chain gateway.
//!
//! This module contains all the core data structures used throughout the application:
//!
//! - `blockchain`: Raw upstream payload shapes for each supported chain family
//! - `config`: Configuration loading and validation
//! - `core`: Canonical, network-agnostic records (Block, Proposal, Validator, ...)

mod blockchain;
mod config;
mod core;

// Re-export blockchain types
pub use blockchain::{
	ChainFamily, LcdBlockId, LcdBlockMeta, LcdBlockResponse, LcdCoin, LcdHeader, LcdStdTx,
	LcdTxFee, LcdTxLog, LcdTxMessage, LcdTxResponse, LcdTxSignature, LcdTxValue,
};

pub use blockchain::cosmos::{
	CosmosDelegation, CosmosProposal, CosmosProposalContent, CosmosSigningInfo, CosmosTallyResult,
	CosmosValidator, CosmosValidatorCommission, CosmosValidatorDescription,
};

pub use blockchain::gaia::{GaiaDelegation, GaiaDelegationBalance, GaiaProposal, GaiaValidator};

// Re-export core types
pub use core::{
	Balance, Block, Coin, Delegation, NetworkConfig, Proposal, ProposalStatus, Tally, Transaction,
	TransactionGroup, Validator, ValidatorStatus, ValidatorStatusDetail,
};

// Re-export config types
pub use config::{ConfigError, ConfigLoader, GatewayConfig};
