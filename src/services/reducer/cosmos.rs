//! Reducers for the Cosmos Hub LCD.

use rust_decimal::Decimal;

use crate::{
	models::{
		ChainFamily, CosmosDelegation, CosmosProposal, CosmosValidator, Delegation, Proposal,
		Validator,
	},
	services::reducer::{
		common::{self, build_proposal, micro_to_display, ProposalParts},
		FamilyReducer, ReducerContext, ReducerError,
	},
};

#[derive(Debug, Clone, Copy, Default)]
pub struct CosmosReducer;

impl FamilyReducer for CosmosReducer {
	const FAMILY: ChainFamily = ChainFamily::Cosmos;
	const BOND_DENOM: &'static str = "uatom";

	type RawProposal = CosmosProposal;
	type RawValidator = CosmosValidator;
	type RawDelegation = CosmosDelegation;

	/// uatom to atom
	fn to_display_units(amount: Decimal) -> Decimal {
		micro_to_display(amount)
	}

	fn reduce_proposal(
		raw: &CosmosProposal,
		ctx: &ReducerContext,
	) -> Result<Proposal, ReducerError> {
		build_proposal(
			ProposalParts {
				id: &raw.proposal_id,
				content: raw.proposal_content.as_ref(),
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

	fn reduce_validator(raw: &CosmosValidator, ctx: &ReducerContext) -> Validator {
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
			update_time: raw.commission.update_time.clone(),
			commission: raw.commission.rate.clone(),
			max_commission: raw.commission.max_rate.clone(),
			max_change_commission: raw.commission.max_change_rate.clone(),
			status,
			status_detailed,
			delegator_shares: raw.delegator_shares.clone(),
			expected_returns: raw.expected_returns.clone(),
		}
	}

	/// A delegation the node reports an error for becomes the empty delegation
	fn reduce_delegation(raw: &CosmosDelegation, _ctx: &ReducerContext) -> Delegation {
		if raw.error.is_some() {
			return Delegation::empty();
		}

		Delegation {
			delegator_address: raw.delegator_address.clone(),
			validator_address: raw.validator_address.clone(),
			amount: common::amount_from_value(Some(&raw.balance)),
		}
	}
}
