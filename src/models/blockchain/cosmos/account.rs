use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::utils::deserialization::lenient_string;

/// Delegation entry from `staking/delegators/{address}/delegations`
///
/// The LCD proxy reports a per-entry failure through `error` instead of failing the
/// whole response.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CosmosDelegation {
	#[serde(default, deserialize_with = "lenient_string")]
	pub delegator_address: String,
	#[serde(default, deserialize_with = "lenient_string")]
	pub validator_address: String,
	#[serde(default, deserialize_with = "lenient_string")]
	pub shares: String,
	#[serde(default)]
	pub balance: Value,
	#[serde(default)]
	pub error: Option<Value>,
}
