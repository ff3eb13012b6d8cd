use mockall::predicate;
use rust_decimal::Decimal;
use std::{sync::Arc, time::Duration};

use chain_gateway::{
	models::{Coin, Delegation, Transaction, TransactionGroup},
	repositories::NetworkRepository,
	services::{
		blockbridge::{BlockBridgeService, BridgeConfig},
		blockchain::{BlockChainError, ChainDataSource, SourceRegistry},
		cache::InMemoryCache,
		gateway::GatewayService,
	},
	utils::tests::builders::{network::NetworkConfigBuilder, validator::ValidatorBuilder},
};

use crate::integration::mocks::{mock_source, MockChainDataSource, ACCOUNT_A, OPERATOR_A, OPERATOR_B};

fn gateway(
	sources: Vec<MockChainDataSource>,
	cached: bool,
) -> GatewayService<MockChainDataSource, InMemoryCache> {
	let networks: Vec<_> = sources
		.iter()
		.map(|source| NetworkConfigBuilder::new().id(source.network_id()).build())
		.collect();
	let gateway = GatewayService::new(
		SourceRegistry::from_sources(sources).unwrap(),
		NetworkRepository::from_networks(networks, false),
		Arc::new(BlockBridgeService::new(BridgeConfig::default())),
	);
	if cached {
		gateway.with_cache(Arc::new(InMemoryCache::new()), Duration::from_secs(60))
	} else {
		gateway
	}
}

fn transaction(hash: &str) -> Transaction {
	Transaction {
		network_id: "cosmoshub".to_string(),
		hash: hash.to_string(),
		height: 42,
		message_type: "cosmos-sdk/MsgSend".to_string(),
		group: TransactionGroup::from_message_type("cosmos-sdk/MsgSend"),
		timestamp: "2019-12-11T16:11:34Z".to_string(),
		gas_used: "73000".to_string(),
		gas_wanted: "200000".to_string(),
		success: true,
		log: String::new(),
		memo: String::new(),
		fee: Coin {
			denom: "uatom".to_string(),
			amount: Decimal::new(5000, 0),
		},
		signature: String::new(),
		value: "{}".to_string(),
	}
}

#[tokio::test]
async fn test_cached_requests_reach_upstream_once() {
	let mut source = mock_source("cosmoshub");
	source
		.expect_get_transaction()
		.with(predicate::eq("ABC"))
		.times(1)
		.returning(|hash| Ok(transaction(hash)));
	let gateway = gateway(vec![source], true);

	let first = gateway.transaction("cosmoshub", "ABC").await.unwrap();
	let second = gateway.transaction("cosmoshub", "ABC").await.unwrap();
	assert_eq!(first, second);
	assert_eq!(second.group, Some(TransactionGroup::Banking));
}

#[tokio::test]
async fn test_requests_go_to_the_named_network_only() {
	let mut hub = mock_source("cosmoshub");
	hub.expect_get_delegation()
		.with(predicate::eq(ACCOUNT_A), predicate::eq(OPERATOR_A))
		.times(1)
		.returning(|delegator, validator| {
			Ok(Delegation {
				delegator_address: delegator.to_string(),
				validator_address: validator.to_string(),
				amount: Decimal::new(10, 0),
			})
		});
	let mut testnet = mock_source("gaia-testnet");
	testnet.expect_get_delegation().never();
	let gateway = gateway(vec![hub, testnet], false);

	let delegation = gateway
		.delegation("cosmoshub", ACCOUNT_A, OPERATOR_A)
		.await
		.unwrap();
	assert_eq!(delegation.amount, Decimal::new(10, 0));
	assert_eq!(delegation.validator_address, OPERATOR_A);
}

#[tokio::test]
async fn test_unknown_network_never_reaches_a_source() {
	let mut source = mock_source("cosmoshub");
	source.expect_get_validators().never();
	source.expect_get_block().never();
	let gateway = gateway(vec![source], true);

	let result = gateway.validators("cosmos-hub", None).await;
	match result {
		Err(BlockChainError::UnknownNetwork(ctx)) => {
			assert!(ctx.to_string().contains("cosmos-hub"));
		}
		other => panic!("expected unknown network, got {:?}", other.map(|v| v.len())),
	}
	assert!(matches!(
		gateway.block("cosmos-hub", Some(1)).await,
		Err(BlockChainError::UnknownNetwork(_))
	));
}

#[tokio::test]
async fn test_validator_filter_is_applied_to_the_cached_set() {
	let mut source = mock_source("cosmoshub");
	source.expect_get_validators().times(1).returning(|| {
		Ok(vec![
			ValidatorBuilder::new()
				.network_id("cosmoshub")
				.operator_address(OPERATOR_A)
				.build(),
			ValidatorBuilder::new()
				.network_id("cosmoshub")
				.operator_address(OPERATOR_B)
				.build(),
		])
	});
	let gateway = gateway(vec![source], true);

	let only_b = vec![OPERATOR_B.to_string()];
	let filtered = gateway
		.validators("cosmoshub", Some(only_b.as_slice()))
		.await
		.unwrap();
	assert_eq!(filtered.len(), 1);
	assert_eq!(filtered[0].operator_address, OPERATOR_B);

	let all = gateway.validators("cosmoshub", None).await.unwrap();
	assert_eq!(all.len(), 2);
}

#[tokio::test]
async fn test_empty_delegation_passes_through() {
	let mut source = mock_source("cosmoshub");
	source
		.expect_get_delegations()
		.with(predicate::eq(ACCOUNT_A))
		.returning(|_| Ok(vec![Delegation::empty()]));
	let gateway = gateway(vec![source], false);

	let delegations = gateway.delegations("cosmoshub", ACCOUNT_A).await.unwrap();
	assert_eq!(delegations, vec![Delegation::empty()]);
}
