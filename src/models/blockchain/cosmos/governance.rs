use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{models::LcdCoin, utils::deserialization::{lenient_string, null_as_default}};

/// Proposal as served by `gov/proposals` on the Cosmos Hub
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CosmosProposal {
	#[serde(default, deserialize_with = "lenient_string")]
	pub proposal_id: String,
	pub proposal_content: Option<CosmosProposalContent>,
	#[serde(default, deserialize_with = "lenient_string")]
	pub proposal_status: String,
	#[serde(default, deserialize_with = "null_as_default")]
	pub final_tally_result: CosmosTallyResult,
	#[serde(default, deserialize_with = "lenient_string")]
	pub submit_time: String,
	#[serde(default, deserialize_with = "lenient_string")]
	pub deposit_end_time: String,
	#[serde(default, deserialize_with = "null_as_default")]
	pub total_deposit: Vec<LcdCoin>,
	#[serde(default, deserialize_with = "lenient_string")]
	pub voting_start_time: String,
	#[serde(default, deserialize_with = "lenient_string")]
	pub voting_end_time: String,
}

/// Amino-wrapped proposal content, `{type, value: {title, description, ...}}`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CosmosProposalContent {
	#[serde(rename = "type", default, deserialize_with = "lenient_string")]
	pub type_: String,
	#[serde(default)]
	pub value: Value,
}

impl CosmosProposalContent {
	/// Reads a string field out of the content value, empty when absent
	pub fn field(&self, name: &str) -> String {
		self.value
			.get(name)
			.and_then(Value::as_str)
			.unwrap_or_default()
			.to_string()
	}
}

/// Vote totals in base units
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CosmosTallyResult {
	#[serde(default, deserialize_with = "lenient_string")]
	pub yes: String,
	#[serde(default, deserialize_with = "lenient_string")]
	pub abstain: String,
	#[serde(default, deserialize_with = "lenient_string")]
	pub no: String,
	#[serde(default, deserialize_with = "lenient_string")]
	pub no_with_veto: String,
}
