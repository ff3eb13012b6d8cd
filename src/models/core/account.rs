use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Holdings of a single denomination, in base units
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Balance {
	pub denom: String,
	pub amount: Decimal,
}

/// A bonded position of one delegator with one validator
///
/// `amount` is zero and both addresses are empty when the upstream reported an error for
/// this delegation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Delegation {
	pub delegator_address: String,
	pub validator_address: String,
	pub amount: Decimal,
}

impl Delegation {
	pub fn empty() -> Self {
		Self {
			delegator_address: String::new(),
			validator_address: String::new(),
			amount: Decimal::ZERO,
		}
	}
}

/// A `{denom, amount}` pair, `{"", 0}` when the upstream omitted it
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Coin {
	pub denom: String,
	pub amount: Decimal,
}
