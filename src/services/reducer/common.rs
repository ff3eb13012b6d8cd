//! Derivation rules shared by every LCD family.
//!
//! The families only disagree on field names, bond denomination and scaling. Everything
//! else (status windows, tally percentages, validator status, addresses, blocks and
//! transactions) is derived here.

use std::{collections::HashMap, str::FromStr};

use bech32::{Bech32, Hrp};
use chrono::{DateTime, NaiveDate};
use rust_decimal::Decimal;
use serde_json::Value;

use crate::{
	models::{
		Balance, Block, Coin, CosmosProposalContent, CosmosSigningInfo, CosmosTallyResult,
		LcdBlockResponse, LcdCoin, LcdTxResponse, NetworkConfig, Proposal, ProposalStatus, Tally,
		Transaction, TransactionGroup, ValidatorStatus, ValidatorStatusDetail,
	},
	services::reducer::ReducerError,
};

/// Source marker for a validator website that was never set
pub const WEBSITE_NOT_SET: &str = "[do-not-modify]";

/// Status code LCD nodes use for a bonded validator
const BONDED_STATUS_CODE: u64 = 2;

/// Ancillary data a reducer may need besides the raw payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReducerContext {
	pub network_id: String,
	pub bech32_prefix: String,
	/// Total bonded tokens in base units, as `staking/pool` reports them, when the caller
	/// knows it
	pub bonded_tokens: Option<Decimal>,
}

impl ReducerContext {
	pub fn new(network_id: impl Into<String>, bech32_prefix: impl Into<String>) -> Self {
		Self {
			network_id: network_id.into(),
			bech32_prefix: bech32_prefix.into(),
			bonded_tokens: None,
		}
	}

	pub fn for_network(network: &NetworkConfig) -> Self {
		Self::new(network.id.clone(), network.bech32_prefix.clone())
	}

	pub fn with_bonded_tokens(mut self, bonded_tokens: Decimal) -> Self {
		self.bonded_tokens = Some(bonded_tokens);
		self
	}

	pub(crate) fn metadata(&self) -> HashMap<String, String> {
		HashMap::from([("network_id".to_string(), self.network_id.clone())])
	}

	pub(crate) fn metadata_with(
		&self,
		key: &str,
		value: impl Into<String>,
	) -> HashMap<String, String> {
		let mut metadata = self.metadata();
		metadata.insert(key.to_string(), value.into());
		metadata
	}
}

/// Parses a base-unit amount, degrading to zero when the value is not numeric
pub fn parse_amount(raw: &str) -> Decimal {
	let raw = raw.trim();
	Decimal::from_str(raw)
		.or_else(|_| Decimal::from_scientific(raw))
		.unwrap_or(Decimal::ZERO)
}

/// Reads an amount that may be a string, a number or a `{denom, amount}` coin
pub fn amount_from_value(raw: Option<&Value>) -> Decimal {
	match raw {
		Some(Value::String(amount)) => parse_amount(amount),
		Some(Value::Number(amount)) => parse_amount(&amount.to_string()),
		Some(Value::Object(coin)) => amount_from_value(coin.get("amount")),
		_ => Decimal::ZERO,
	}
}

/// Divides a base-unit amount by 10^6
pub(crate) fn micro_to_display(amount: Decimal) -> Decimal {
	amount
		.checked_div(Decimal::new(1_000_000, 0))
		.unwrap_or(Decimal::ZERO)
		.normalize()
}

/// Begin and end time of the period a proposal is currently in
pub fn status_window(
	status: ProposalStatus,
	submit_time: &str,
	voting_start_time: &str,
	voting_end_time: &str,
) -> (String, String) {
	let (begin, end) = match status {
		ProposalStatus::DepositPeriod => (submit_time, voting_start_time),
		ProposalStatus::VotingPeriod => (voting_start_time, voting_end_time),
		ProposalStatus::Passed | ProposalStatus::Rejected => (voting_end_time, voting_end_time),
	};
	(begin.to_string(), end.to_string())
}

/// Sums the deposit entries denominated in `bond_denom`, in base units
pub fn sum_deposit(total_deposit: &[LcdCoin], bond_denom: &str) -> Decimal {
	total_deposit
		.iter()
		.filter(|coin| coin.denom == bond_denom)
		.fold(Decimal::ZERO, |sum, coin| {
			sum.saturating_add(parse_amount(&coin.amount))
		})
}

/// Share of the bonded stake that voted
///
/// The division is bonded over `total_voted`, the upstream formula kept as is. Callers pass
/// the display-unit total scaled down once more, see [`reduce_tally`].
pub fn voted_percentage(
	status: ProposalStatus,
	total_voted: Decimal,
	bonded_tokens: Option<Decimal>,
) -> Decimal {
	if status.is_finalized() {
		return Decimal::NEGATIVE_ONE;
	}
	if total_voted.is_zero() {
		return Decimal::ZERO;
	}
	match bonded_tokens {
		Some(bonded) => bonded
			.checked_div(total_voted)
			.map(|p| p.normalize())
			.unwrap_or(Decimal::NEGATIVE_ONE),
		None => Decimal::NEGATIVE_ONE,
	}
}

/// Converts a raw tally into display units and attaches the voted percentage
pub fn reduce_tally(
	raw: &CosmosTallyResult,
	status: ProposalStatus,
	bonded_tokens: Option<Decimal>,
	to_display_units: fn(Decimal) -> Decimal,
) -> Tally {
	let yes = parse_amount(&raw.yes);
	let no = parse_amount(&raw.no);
	let abstain = parse_amount(&raw.abstain);
	let veto = parse_amount(&raw.no_with_veto);
	let total = to_display_units(
		yes.saturating_add(no)
			.saturating_add(abstain)
			.saturating_add(veto),
	);

	Tally {
		yes: to_display_units(yes),
		no: to_display_units(no),
		abstain: to_display_units(abstain),
		veto: to_display_units(veto),
		total,
		// Upstream scales the already scaled total a second time before dividing
		total_voted_percentage: voted_percentage(status, to_display_units(total), bonded_tokens),
	}
}

/// Proposal fields after the family-specific names were resolved
pub(crate) struct ProposalParts<'a> {
	pub id: &'a str,
	pub content: Option<&'a CosmosProposalContent>,
	pub status: &'a str,
	pub tally: &'a CosmosTallyResult,
	pub submit_time: &'a str,
	pub voting_start_time: &'a str,
	pub voting_end_time: &'a str,
	pub total_deposit: &'a [LcdCoin],
}

pub(crate) fn build_proposal(
	parts: ProposalParts<'_>,
	ctx: &ReducerContext,
	bond_denom: &str,
	to_display_units: fn(Decimal) -> Decimal,
) -> Result<Proposal, ReducerError> {
	let content = parts.content.ok_or_else(|| {
		ReducerError::malformed_payload(
			"proposal content is missing",
			None,
			Some(ctx.metadata_with("proposal_id", parts.id)),
		)
	})?;

	let id = parts.id.trim().parse::<u64>().map_err(|e| {
		ReducerError::malformed_payload(
			"proposal id is not a number",
			Some(Box::new(e)),
			Some(ctx.metadata_with("proposal_id", parts.id)),
		)
	})?;

	let status = ProposalStatus::from_source(parts.status).ok_or_else(|| {
		ReducerError::malformed_payload(
			format!("unknown proposal status '{}'", parts.status),
			None,
			Some(ctx.metadata_with("proposal_id", id.to_string())),
		)
	})?;

	let (status_begin_time, status_end_time) = status_window(
		status,
		parts.submit_time,
		parts.voting_start_time,
		parts.voting_end_time,
	);

	Ok(Proposal {
		network_id: ctx.network_id.clone(),
		id,
		proposal_type: content.type_.clone(),
		title: content.field("title"),
		description: content.field("description"),
		creation_time: parts.submit_time.to_string(),
		status,
		status_begin_time,
		status_end_time,
		tally: reduce_tally(parts.tally, status, ctx.bonded_tokens, to_display_units),
		deposit: to_display_units(sum_deposit(parts.total_deposit, bond_denom)),
	})
}

/// Validator status from the numeric source code and the signing info
///
/// A jail lasting past 9000-02-01 is how the chain marks a tombstoned validator.
pub fn validator_status(
	status_code: Option<u64>,
	signing_info: Option<&CosmosSigningInfo>,
) -> (ValidatorStatus, ValidatorStatusDetail) {
	if status_code == Some(BONDED_STATUS_CODE) {
		return (ValidatorStatus::Active, ValidatorStatusDetail::Active);
	}

	let banned_after = NaiveDate::from_ymd_opt(9000, 2, 1)
		.and_then(|date| date.and_hms_opt(0, 0, 0))
		.map(|date| date.and_utc());
	let jailed_until = signing_info
		.and_then(|info| DateTime::parse_from_rfc3339(info.jailed_until.trim()).ok());

	match (jailed_until, banned_after) {
		(Some(until), Some(limit)) if until > limit => {
			(ValidatorStatus::Inactive, ValidatorStatusDetail::Banned)
		}
		_ => (ValidatorStatus::Inactive, ValidatorStatusDetail::Inactive),
	}
}

/// Normalizes a validator website into a URL with a scheme, or the empty string
pub fn normalize_website(raw: &str) -> String {
	let website = raw.trim();
	if website.is_empty() || website == WEBSITE_NOT_SET {
		return String::new();
	}

	let lower = website.to_ascii_lowercase();
	if lower.starts_with("http://") || lower.starts_with("https://") {
		website.to_string()
	} else {
		format!("https://{}", website)
	}
}

/// Re-encodes a validator operator address with the network's account prefix
///
/// Returns an empty string when the operator address is not valid bech32.
pub fn account_address(operator_address: &str, bech32_prefix: &str) -> String {
	let Ok((_, data)) = bech32::decode(operator_address) else {
		return String::new();
	};
	let Ok(hrp) = Hrp::parse(bech32_prefix) else {
		return String::new();
	};
	bech32::encode::<Bech32>(hrp, &data).unwrap_or_default()
}

/// Reads one coin from either a single `{denom, amount}` object or a list of them
pub fn reduce_coin(raw: &Value) -> Coin {
	let coin = match raw {
		Value::Array(items) => items.first(),
		Value::Object(_) => Some(raw),
		_ => None,
	};

	coin.map(|coin| Coin {
		denom: coin
			.get("denom")
			.and_then(Value::as_str)
			.unwrap_or_default()
			.to_string(),
		amount: amount_from_value(coin.get("amount")),
	})
	.unwrap_or_default()
}

/// One balance per coin of a list payload; anything that is not a list yields none
pub fn reduce_coin_list(raw: &Value) -> Vec<Balance> {
	let Value::Array(items) = raw else {
		return Vec::new();
	};

	items
		.iter()
		.filter(|item| item.is_object())
		.map(|item| {
			let coin = reduce_coin(item);
			Balance {
				denom: coin.denom,
				amount: coin.amount,
			}
		})
		.collect()
}

pub fn reduce_block(raw: &LcdBlockResponse, ctx: &ReducerContext) -> Result<Block, ReducerError> {
	let meta = raw.block_meta.as_ref();
	let header = meta
		.and_then(|meta| meta.header.as_ref())
		.ok_or_else(|| {
			ReducerError::malformed_payload("block header is missing", None, Some(ctx.metadata()))
		})?;

	let height = header.height.trim().parse::<u64>().map_err(|e| {
		ReducerError::malformed_payload(
			"block height is not a number",
			Some(Box::new(e)),
			Some(ctx.metadata_with("height", header.height.clone())),
		)
	})?;

	Ok(Block {
		network_id: ctx.network_id.clone(),
		height,
		chain_id: header.chain_id.clone(),
		hash: meta.map(|meta| meta.block_id.hash.clone()).unwrap_or_default(),
		time: header.time.clone(),
		transactions: header.num_txs.trim().parse().unwrap_or(0),
		proposer_address: header.proposer_address.clone(),
	})
}

pub fn reduce_transaction(
	raw: &LcdTxResponse,
	ctx: &ReducerContext,
) -> Result<Transaction, ReducerError> {
	let tx = raw.tx.as_ref().map(|tx| &tx.value);
	let message = tx.and_then(|tx| tx.msg.first()).ok_or_else(|| {
		ReducerError::malformed_payload(
			"transaction has no message",
			None,
			Some(ctx.metadata_with("hash", raw.txhash.clone())),
		)
	})?;
	let log = raw.logs.first();

	Ok(Transaction {
		network_id: ctx.network_id.clone(),
		hash: raw.txhash.clone(),
		height: raw.height.trim().parse().unwrap_or(0),
		message_type: message.type_.clone(),
		group: TransactionGroup::from_message_type(&message.type_),
		timestamp: raw.timestamp.clone(),
		gas_used: raw.gas_used.clone(),
		gas_wanted: raw.gas_wanted.clone(),
		success: log.map(|log| log.success).unwrap_or(false),
		log: log.map(|log| log.log.clone()).unwrap_or_default(),
		memo: tx.map(|tx| tx.memo.clone()).unwrap_or_default(),
		fee: tx.map(|tx| reduce_coin(&tx.fee.amount)).unwrap_or_default(),
		signature: tx
			.and_then(|tx| tx.signatures.first())
			.map(|signature| signature.signature.clone())
			.unwrap_or_default(),
		value: serde_json::to_string(&message.value).unwrap_or_default(),
	})
}
