use bech32::{Bech32, Hrp};
use chain_gateway::{
	models::{ChainFamily, CosmosValidator, LcdCoin, NetworkConfig, ProposalStatus},
	utils::tests::builders::network::NetworkConfigBuilder,
};
use proptest::{option, prelude::*};
use serde_json::json;

const MAX_COINS: usize = 6;

pub fn family_strategy() -> impl Strategy<Value = ChainFamily> {
	prop_oneof![Just(ChainFamily::Cosmos), Just(ChainFamily::Gaia)]
}

pub fn proposal_status_strategy() -> impl Strategy<Value = ProposalStatus> {
	prop_oneof![
		Just(ProposalStatus::DepositPeriod),
		Just(ProposalStatus::VotingPeriod),
		Just(ProposalStatus::Passed),
		Just(ProposalStatus::Rejected),
	]
}

pub fn network_strategy() -> impl Strategy<Value = NetworkConfig> {
	(
		"[a-z][a-z0-9]{0,10}(-[a-z0-9]{1,4})?",
		"[A-Z][A-Za-z ]{0,19}",
		"[a-z]{2,8}-[0-9]{1,5}",
		family_strategy(),
		"[a-z]{2,10}",
		any::<bool>(),
		any::<bool>(),
		any::<bool>(),
	)
		.prop_map(
			|(id, title, chain_id, family, prefix, testnet, experimental, enabled)| {
				NetworkConfigBuilder::new()
					.id(&id)
					.title(&title)
					.chain_id(&chain_id)
					.family(family)
					.bech32_prefix(&prefix)
					.api_url(&format!("https://{}.lcd.test", id))
					.rpc_url(&format!("https://{}.rpc.test:26657", id))
					.testnet(testnet)
					.experimental(experimental)
					.actions(enabled)
					.features(enabled)
					.build()
			},
		)
}

/// Base-unit amounts as LCD nodes print them
pub fn base_amount_strategy() -> impl Strategy<Value = u64> {
	0u64..10_000_000_000_000
}

pub fn coin_list_strategy() -> impl Strategy<Value = Vec<LcdCoin>> {
	prop::collection::vec(
		(
			prop::sample::select(vec!["uatom", "photino", "stake", "muon"]),
			base_amount_strategy(),
		)
			.prop_map(|(denom, amount)| LcdCoin {
				denom: denom.to_string(),
				amount: amount.to_string(),
			}),
		0..MAX_COINS,
	)
}

/// A valid bech32 address over 20 random bytes
pub fn bech32_address_strategy(prefix: &'static str) -> impl Strategy<Value = String> {
	prop::collection::vec(any::<u8>(), 20).prop_map(move |data| {
		bech32::encode::<Bech32>(Hrp::parse(prefix).unwrap(), &data).unwrap()
	})
}

/// Websites as validators fill them in, including the "not set" marker
pub fn website_strategy() -> impl Strategy<Value = String> {
	prop_oneof![
		Just(String::new()),
		Just("[do-not-modify]".to_string()),
		"[a-z]{1,12}\\.(com|io|network)",
		"(http|https|HTTPS)://[a-z]{1,12}\\.com",
		" [a-z]{1,12}\\.org ",
	]
}

pub fn cosmos_validator_strategy() -> impl Strategy<Value = CosmosValidator> {
	(
		bech32_address_strategy("cosmosvaloper"),
		option::of(0u64..4),
		any::<bool>(),
		website_strategy(),
		"[A-Za-z0-9 ]{0,20}",
		base_amount_strategy(),
		option::of(0u64..5_000_000),
	)
		.prop_map(
			|(operator_address, status, jailed, website, moniker, tokens, start_height)| {
				let mut raw = json!({
					"operator_address": operator_address,
					"consensus_pubkey": "cosmosvalconspub1zcjduepq",
					"jailed": jailed,
					"tokens": tokens.to_string(),
					"delegator_shares": format!("{}.000000000000000000", tokens),
					"description": {
						"moniker": moniker,
						"identity": "",
						"website": website,
						"details": ""
					},
					"commission": {
						"rate": "0.100000000000000000",
						"max_rate": "0.200000000000000000",
						"max_change_rate": "0.010000000000000000",
						"update_time": "2019-03-13T23:00:00Z"
					},
					"voting_power": "0.01"
				});
				if let Some(status) = status {
					raw["status"] = json!(status);
				}
				if let Some(start_height) = start_height {
					raw["signing_info"] = json!({
						"start_height": start_height.to_string(),
						"jailed_until": "1970-01-01T00:00:00Z",
						"missed_blocks_counter": "0"
					});
				}
				serde_json::from_value(raw).unwrap()
			},
		)
}
