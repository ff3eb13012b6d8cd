//! Core chain data source interface.
//!
//! This module defines the operation set every network family must provide, so that the
//! dispatch layer can treat all sources alike.

use async_trait::async_trait;

use crate::{
	models::{Balance, Block, ChainFamily, Delegation, Proposal, Transaction, Validator},
	services::blockchain::BlockChainError,
};

/// Defines the uniform operation set of a network's data source
///
/// Each operation performs exactly one REST call and reduces the answer into canonical
/// records. List operations return an empty list when the node does not answer with a list.
/// Nothing is retried.
#[async_trait]
pub trait ChainDataSource: Send + Sync {
	/// Identifier of the network this source serves
	fn network_id(&self) -> &str;

	/// Family of the network this source serves
	fn family(&self) -> ChainFamily;

	/// Retrieves every governance proposal
	async fn get_proposals(&self) -> Result<Vec<Proposal>, BlockChainError>;

	/// Retrieves one governance proposal
	async fn get_proposal(&self, proposal_id: u64) -> Result<Proposal, BlockChainError>;

	/// Retrieves every validator
	async fn get_validators(&self) -> Result<Vec<Validator>, BlockChainError>;

	/// Retrieves one validator by operator address
	async fn get_validator(&self, operator_address: &str) -> Result<Validator, BlockChainError>;

	/// Retrieves the block at `height`, or the latest block when `height` is `None`
	async fn get_block(&self, height: Option<u64>) -> Result<Block, BlockChainError>;

	/// Retrieves the balances of an account, one record per denomination
	async fn get_balances(&self, address: &str) -> Result<Vec<Balance>, BlockChainError>;

	/// Retrieves every delegation of a delegator
	async fn get_delegations(&self, delegator: &str)
		-> Result<Vec<Delegation>, BlockChainError>;

	/// Retrieves the delegation of a delegator to one validator
	async fn get_delegation(
		&self,
		delegator: &str,
		validator: &str,
	) -> Result<Delegation, BlockChainError>;

	/// Retrieves a transaction by hash
	async fn get_transaction(&self, hash: &str) -> Result<Transaction, BlockChainError>;
}
