//! Test helper utilities for canonical blocks
//!
//! - `BlockBuilder`: Builder for creating test Block instances

use crate::models::Block;

/// Builder for creating test Block instances
pub struct BlockBuilder {
	block: Block,
}

impl Default for BlockBuilder {
	fn default() -> Self {
		Self {
			block: Block {
				network_id: "test-network".to_string(),
				height: 1,
				chain_id: "test-chain-1".to_string(),
				hash: "HASH1".to_string(),
				time: "2020-01-01T00:00:00Z".to_string(),
				transactions: 0,
				proposer_address: String::new(),
			},
		}
	}
}

impl BlockBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn network_id(mut self, network_id: &str) -> Self {
		self.block.network_id = network_id.to_string();
		self
	}

	/// Sets the height and derives a matching hash
	pub fn height(mut self, height: u64) -> Self {
		self.block.height = height;
		self.block.hash = format!("HASH{}", height);
		self
	}

	pub fn transactions(mut self, transactions: u64) -> Self {
		self.block.transactions = transactions;
		self
	}

	pub fn build(self) -> Block {
		self.block
	}
}
