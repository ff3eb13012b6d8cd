//! Mock implementation of the chain data source trait.
//!
//! Lets gateway and bridge tests script upstream answers per operation and check which
//! operations were called with which arguments.

use async_trait::async_trait;
use mockall::mock;

use chain_gateway::{
	models::{Balance, Block, ChainFamily, Delegation, Proposal, Transaction, Validator},
	services::blockchain::{BlockChainError, ChainDataSource},
};

mock! {
	pub ChainDataSource {}

	#[async_trait]
	impl ChainDataSource for ChainDataSource {
		fn network_id(&self) -> &str;
		fn family(&self) -> ChainFamily;
		async fn get_proposals(&self) -> Result<Vec<Proposal>, BlockChainError>;
		async fn get_proposal(&self, proposal_id: u64) -> Result<Proposal, BlockChainError>;
		async fn get_validators(&self) -> Result<Vec<Validator>, BlockChainError>;
		async fn get_validator(&self, operator_address: &str) -> Result<Validator, BlockChainError>;
		async fn get_block(&self, height: Option<u64>) -> Result<Block, BlockChainError>;
		async fn get_balances(&self, address: &str) -> Result<Vec<Balance>, BlockChainError>;
		async fn get_delegations(&self, delegator: &str) -> Result<Vec<Delegation>, BlockChainError>;
		async fn get_delegation(
			&self,
			delegator: &str,
			validator: &str,
		) -> Result<Delegation, BlockChainError>;
		async fn get_transaction(&self, hash: &str) -> Result<Transaction, BlockChainError>;
	}
}

/// A mocked source that reports `network_id`
pub fn mock_source(network_id: &str) -> MockChainDataSource {
	let mut source = MockChainDataSource::new();
	source
		.expect_network_id()
		.return_const(network_id.to_string());
	source.expect_family().return_const(ChainFamily::Cosmos);
	source
}
