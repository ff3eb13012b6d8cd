//! Reducers for the Gaia testnet LCD.
//!
//! Gaia serves proposals under `id`/`content`, flattens the commission fields and may send
//! a balance as a single coin instead of a list.

use rust_decimal::Decimal;
use serde_json::Value;

use crate::{
	models::{
		Balance, ChainFamily, Delegation, GaiaDelegation, GaiaProposal, GaiaValidator, Proposal,
		Validator,
	},
	services::reducer::{
		common::{self, build_proposal, micro_to_display, ProposalParts},
		FamilyReducer, ReducerContext, ReducerError,
	},
};

#[derive(Debug, Clone, Copy, Default)]
pub struct GaiaReducer;

impl FamilyReducer for GaiaReducer {
	const FAMILY: ChainFamily = ChainFamily::Gaia;
	const BOND_DENOM: &'static str = "stake";

	type RawProposal = GaiaProposal;
	type RawValidator = GaiaValidator;
	type RawDelegation = GaiaDelegation;

	fn to_display_units(amount: Decimal) -> Decimal {
		micro_to_display(amount)
	}

	fn reduce_proposal(raw: &GaiaProposal, ctx: &ReducerContext) -> Result<Proposal, ReducerError> {
		build_proposal(
			ProposalParts {
				id: &raw.id,
				content: raw.content.as_ref(),
				status: &raw.proposal_status,
				tally: &raw.final_tally_result,
				submit_time: &raw.submit_time,
				voting_start_time: &raw.voting_start_time,
				voting_end_time: &raw.voting_end_time,
				total_deposit: &raw.total_deposit,
			},
			ctx,
			Self::BOND_DENOM,
			Self::to_display_units,
		)
	}

	fn reduce_validator(raw: &GaiaValidator, ctx: &ReducerContext) -> Validator {
		let (status, status_detailed) =
			common::validator_status(raw.status, raw.signing_info.as_ref());

		Validator {
			network_id: ctx.network_id.clone(),
			operator_address: raw.operator_address.clone(),
			consensus_pubkey: raw.consensus_pubkey.clone(),
			address: common::account_address(&raw.operator_address, &ctx.bech32_prefix),
			jailed: raw.jailed,
			details: raw.description.details.clone(),
			website: common::normalize_website(&raw.description.website),
			identity: raw.description.identity.clone(),
			moniker: raw.description.moniker.clone(),
			voting_power: raw.voting_power.clone(),
			start_height: raw.signing_info.as_ref().and_then(|info| info.start_height),
			uptime_percentage: 1,
			tokens: raw.tokens.clone(),
			update_time: raw.update_time.clone(),
			commission: raw.rate.clone(),
			max_commission: raw.max_rate.clone(),
			max_change_commission: raw.max_change_rate.clone(),
			status,
			status_detailed,
			delegator_shares: raw.delegator_shares.clone(),
			expected_returns: raw.expected_returns.clone(),
		}
	}

	fn reduce_delegation(raw: &GaiaDelegation, _ctx: &ReducerContext) -> Delegation {
		Delegation {
			delegator_address: raw.delegator_address.clone(),
			validator_address: raw.validator_address.clone(),
			amount: common::parse_amount(&raw.balance.amount()),
		}
	}

	fn reduce_balances(raw: &Value, _ctx: &ReducerContext) -> Vec<Balance> {
		match raw {
			Value::Object(_) => common::reduce_coin_list(&Value::Array(vec![raw.clone()])),
			_ => common::reduce_coin_list(raw),
		}
	}
}
