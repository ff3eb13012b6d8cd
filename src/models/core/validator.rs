use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum ValidatorStatus {
	Active,
	Inactive,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ValidatorStatusDetail {
	Active,
	Inactive,
	Banned,
}

/// A validator in canonical form
///
/// Token, share and commission values are passed through as served; they are decimal
/// strings whose precision differs between fields.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Validator {
	pub network_id: String,
	pub operator_address: String,
	pub consensus_pubkey: String,
	/// Operator address re-encoded with the network's account prefix, empty if undecodable
	pub address: String,
	pub jailed: bool,
	pub details: String,
	pub website: String,
	pub identity: String,
	pub moniker: String,
	pub voting_power: String,
	pub start_height: Option<u64>,
	pub uptime_percentage: u32,
	pub tokens: String,
	pub update_time: String,
	pub commission: String,
	pub max_commission: String,
	pub max_change_commission: String,
	pub status: ValidatorStatus,
	pub status_detailed: ValidatorStatusDetail,
	pub delegator_shares: String,
	pub expected_returns: Option<String>,
}
