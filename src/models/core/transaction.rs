use serde::{Deserialize, Serialize};

use crate::models::Coin;

/// Functional area a message type belongs to
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TransactionGroup {
	Banking,
	Staking,
	Governance,
	Distribution,
}

impl TransactionGroup {
	/// Looks up the group of an amino message type, `None` for unmapped types
	pub fn from_message_type(message_type: &str) -> Option<Self> {
		match message_type {
			"cosmos-sdk/MsgSend" => Some(Self::Banking),
			"cosmos-sdk/MsgCreateValidator"
			| "cosmos-sdk/MsgEditValidator"
			| "cosmos-sdk/MsgDelegate"
			| "cosmos-sdk/MsgUndelegate"
			| "cosmos-sdk/MsgBeginRedelegate"
			| "cosmos-sdk/MsgUnjail" => Some(Self::Staking),
			"cosmos-sdk/MsgSubmitProposal" | "cosmos-sdk/MsgDeposit" | "cosmos-sdk/MsgVote" => {
				Some(Self::Governance)
			}
			"cosmos-sdk/MsgModifyWithdrawAddress"
			| "cosmos-sdk/MsgWithdrawDelegationReward"
			| "cosmos-sdk/MsgWithdrawValidatorCommission" => Some(Self::Distribution),
			_ => None,
		}
	}
}

/// A transaction in canonical form, described by its first message
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
	pub network_id: String,
	pub hash: String,
	pub height: u64,
	#[serde(rename = "type")]
	pub message_type: String,
	pub group: Option<TransactionGroup>,
	pub timestamp: String,
	pub gas_used: String,
	pub gas_wanted: String,
	pub success: bool,
	pub log: String,
	pub memo: String,
	pub fee: Coin,
	pub signature: String,
	/// JSON encoding of the first message's value
	pub value: String,
}
