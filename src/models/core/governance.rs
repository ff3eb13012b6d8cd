use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Lifecycle stage of a governance proposal
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ProposalStatus {
	DepositPeriod,
	VotingPeriod,
	Passed,
	Rejected,
}

impl ProposalStatus {
	/// Parses an upstream status string, ignoring ASCII case
	pub fn from_source(status: &str) -> Option<Self> {
		match status.trim().to_ascii_lowercase().as_str() {
			"depositperiod" => Some(Self::DepositPeriod),
			"votingperiod" => Some(Self::VotingPeriod),
			"passed" => Some(Self::Passed),
			"rejected" => Some(Self::Rejected),
			_ => None,
		}
	}

	/// Passed and rejected proposals no longer change
	pub fn is_finalized(&self) -> bool {
		matches!(self, Self::Passed | Self::Rejected)
	}
}

/// Vote totals in display units
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Tally {
	pub yes: Decimal,
	pub no: Decimal,
	pub abstain: Decimal,
	pub veto: Decimal,
	pub total: Decimal,
	/// `-1` when it cannot be determined, `0` when nobody voted
	pub total_voted_percentage: Decimal,
}

/// A governance proposal in canonical form
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Proposal {
	pub network_id: String,
	pub id: u64,
	#[serde(rename = "type")]
	pub proposal_type: String,
	pub title: String,
	pub description: String,
	pub creation_time: String,
	pub status: ProposalStatus,
	pub status_begin_time: String,
	pub status_end_time: String,
	pub tally: Tally,
	/// Deposited bond tokens in display units
	pub deposit: Decimal,
}
