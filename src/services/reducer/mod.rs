//! Normalization of raw LCD payloads into canonical records.
//!
//! One reducer exists per network family. Reducers are pure: they never perform I/O, never
//! log and hold no state. Optional fields that are missing or malformed degrade to sentinel
//! values; only fields with no sensible default raise [`ReducerError::MalformedPayload`].

mod common;
mod cosmos;
mod error;
mod gaia;

use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::models::{
	Balance, Block, ChainFamily, Delegation, LcdBlockResponse, LcdTxResponse, Proposal,
	Transaction, Validator,
};

pub use common::{
	account_address, amount_from_value, normalize_website, parse_amount, reduce_coin,
	reduce_coin_list, reduce_tally, status_window, sum_deposit, validator_status,
	voted_percentage, ReducerContext, WEBSITE_NOT_SET,
};
pub use cosmos::CosmosReducer;
pub use error::ReducerError;
pub use gaia::GaiaReducer;

/// The reducers of one network family
///
/// Implementations differ in the raw payload shapes, the bond denomination and the scaling
/// rule. Blocks, transactions and balance lists share one shape across the supported
/// families and have default implementations.
pub trait FamilyReducer: Send + Sync + 'static {
	/// Family these reducers belong to
	const FAMILY: ChainFamily;

	/// Denomination deposits and stake are counted in
	const BOND_DENOM: &'static str;

	type RawProposal: DeserializeOwned + Send;
	type RawValidator: DeserializeOwned + Send;
	type RawDelegation: DeserializeOwned + Send;

	/// Converts a base-unit amount into the family's display denomination
	fn to_display_units(amount: Decimal) -> Decimal;

	fn reduce_proposal(
		raw: &Self::RawProposal,
		ctx: &ReducerContext,
	) -> Result<Proposal, ReducerError>;

	fn reduce_validator(raw: &Self::RawValidator, ctx: &ReducerContext) -> Validator;

	fn reduce_delegation(raw: &Self::RawDelegation, ctx: &ReducerContext) -> Delegation;

	fn reduce_balances(raw: &Value, _ctx: &ReducerContext) -> Vec<Balance> {
		reduce_coin_list(raw)
	}

	fn reduce_block(raw: &LcdBlockResponse, ctx: &ReducerContext) -> Result<Block, ReducerError> {
		common::reduce_block(raw, ctx)
	}

	fn reduce_transaction(
		raw: &LcdTxResponse,
		ctx: &ReducerContext,
	) -> Result<Transaction, ReducerError> {
		common::reduce_transaction(raw, ctx)
	}
}
