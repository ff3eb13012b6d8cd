use serde::{Deserialize, Serialize};

/// A block as published to subscribers and returned by block queries
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Block {
	pub network_id: String,
	pub height: u64,
	pub chain_id: String,
	pub hash: String,
	/// RFC 3339 block time exactly as served upstream
	pub time: String,
	pub transactions: u64,
	pub proposer_address: String,
}
