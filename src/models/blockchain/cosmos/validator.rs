use serde::{Deserialize, Serialize};

use crate::utils::deserialization::{
	lenient_optional_string, lenient_string, lenient_u64, null_as_default,
};

/// Validator as served by `staking/validators` on the Cosmos Hub
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CosmosValidator {
	#[serde(default, deserialize_with = "lenient_string")]
	pub operator_address: String,
	#[serde(default, deserialize_with = "lenient_string")]
	pub consensus_pubkey: String,
	#[serde(default, deserialize_with = "null_as_default")]
	pub jailed: bool,
	#[serde(default, deserialize_with = "lenient_u64")]
	pub status: Option<u64>,
	#[serde(default, deserialize_with = "lenient_string")]
	pub tokens: String,
	#[serde(default, deserialize_with = "lenient_string")]
	pub delegator_shares: String,
	#[serde(default, deserialize_with = "null_as_default")]
	pub description: CosmosValidatorDescription,
	#[serde(default, deserialize_with = "lenient_string")]
	pub unbonding_height: String,
	#[serde(default, deserialize_with = "lenient_string")]
	pub unbonding_time: String,
	#[serde(default, deserialize_with = "null_as_default")]
	pub commission: CosmosValidatorCommission,
	#[serde(default, deserialize_with = "lenient_string")]
	pub min_self_delegation: String,
	#[serde(default, deserialize_with = "lenient_string")]
	pub voting_power: String,
	#[serde(default)]
	pub signing_info: Option<CosmosSigningInfo>,
	#[serde(default, deserialize_with = "lenient_optional_string")]
	pub expected_returns: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CosmosValidatorDescription {
	#[serde(default, deserialize_with = "lenient_string")]
	pub moniker: String,
	#[serde(default, deserialize_with = "lenient_string")]
	pub identity: String,
	#[serde(default, deserialize_with = "lenient_string")]
	pub website: String,
	#[serde(default, deserialize_with = "lenient_string")]
	pub details: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CosmosValidatorCommission {
	#[serde(default, deserialize_with = "lenient_string")]
	pub rate: String,
	#[serde(default, deserialize_with = "lenient_string")]
	pub max_rate: String,
	#[serde(default, deserialize_with = "lenient_string")]
	pub max_change_rate: String,
	#[serde(default, deserialize_with = "lenient_string")]
	pub update_time: String,
}

/// Slashing info merged into the validator by the LCD proxy
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CosmosSigningInfo {
	#[serde(default, deserialize_with = "lenient_u64")]
	pub start_height: Option<u64>,
	#[serde(default, deserialize_with = "lenient_string")]
	pub jailed_until: String,
	#[serde(default, deserialize_with = "lenient_string")]
	pub missed_blocks_counter: String,
}
