//! Gaia testnet LCD payload shapes.
//!
//! Gaia predates the proposal content rename and flattens the commission fields into the
//! validator object. Signing info and tally shapes are shared with the Cosmos Hub.

use serde::{Deserialize, Serialize};

use crate::{
	models::{
		CosmosProposalContent, CosmosSigningInfo, CosmosTallyResult, CosmosValidatorDescription,
		LcdCoin,
	},
	utils::deserialization::{
		lenient_optional_string, lenient_string, lenient_u64, null_as_default,
	},
};

/// Proposal as served by `gov/proposals` on the Gaia testnet
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GaiaProposal {
	#[serde(default, deserialize_with = "lenient_string")]
	pub id: String,
	pub content: Option<CosmosProposalContent>,
	#[serde(default, deserialize_with = "lenient_string")]
	pub proposal_status: String,
	#[serde(default, deserialize_with = "null_as_default")]
	pub final_tally_result: CosmosTallyResult,
	#[serde(default, deserialize_with = "lenient_string")]
	pub submit_time: String,
	#[serde(default, deserialize_with = "null_as_default")]
	pub total_deposit: Vec<LcdCoin>,
	#[serde(default, deserialize_with = "lenient_string")]
	pub voting_start_time: String,
	#[serde(default, deserialize_with = "lenient_string")]
	pub voting_end_time: String,
}

/// Validator as served by `staking/validators` on the Gaia testnet
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GaiaValidator {
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
	pub bond_height: String,
	#[serde(default, deserialize_with = "lenient_string")]
	pub bond_intra_tx_counter: String,
	#[serde(default, deserialize_with = "lenient_string")]
	pub unbonding_height: String,
	#[serde(default, deserialize_with = "lenient_string")]
	pub unbonding_time: String,
	#[serde(default, deserialize_with = "lenient_string")]
	pub rate: String,
	#[serde(default, deserialize_with = "lenient_string")]
	pub max_rate: String,
	#[serde(default, deserialize_with = "lenient_string")]
	pub max_change_rate: String,
	#[serde(default, deserialize_with = "lenient_string")]
	pub update_time: String,
	#[serde(default, deserialize_with = "lenient_string")]
	pub voting_power: String,
	#[serde(default)]
	pub signing_info: Option<CosmosSigningInfo>,
	#[serde(default, deserialize_with = "lenient_optional_string")]
	pub expected_returns: Option<String>,
}

/// Delegation entry; Gaia serves `balance` as a plain amount or as a coin
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GaiaDelegation {
	#[serde(default, deserialize_with = "lenient_string")]
	pub delegator_address: String,
	#[serde(default, deserialize_with = "lenient_string")]
	pub validator_address: String,
	#[serde(default, deserialize_with = "lenient_string")]
	pub shares: String,
	#[serde(default, deserialize_with = "null_as_default")]
	pub balance: GaiaDelegationBalance,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum GaiaDelegationBalance {
	Coin(LcdCoin),
	Amount(String),
	Number(serde_json::Number),
	#[default]
	Missing,
}

impl GaiaDelegationBalance {
	/// Base-unit amount regardless of the served shape, empty when missing
	pub fn amount(&self) -> String {
		match self {
			Self::Coin(coin) => coin.amount.clone(),
			Self::Amount(amount) => amount.clone(),
			Self::Number(number) => number.to_string(),
			Self::Missing => String::new(),
		}
	}
}
