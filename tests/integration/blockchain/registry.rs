use rust_decimal::Decimal;

use chain_gateway::{
	models::Balance,
	services::blockchain::{BlockChainError, ChainDataSource, SourceRegistry},
};

use crate::integration::mocks::mock_source;

#[tokio::test]
async fn test_dispatch_selects_the_source_of_the_network() {
	let mut hub = mock_source("cosmoshub");
	hub.expect_get_balances().times(1).returning(|_| {
		Ok(vec![Balance {
			denom: "uatom".to_string(),
			amount: Decimal::new(1, 0),
		}])
	});
	let mut testnet = mock_source("gaia-testnet");
	testnet.expect_get_balances().never();

	let registry = SourceRegistry::from_sources(vec![hub, testnet]).unwrap();
	assert_eq!(registry.network_ids(), vec!["cosmoshub", "gaia-testnet"]);

	let source = registry.dispatch("cosmoshub").unwrap();
	assert_eq!(source.network_id(), "cosmoshub");
	let balances = source.get_balances("cosmos1abc").await.unwrap();
	assert_eq!(balances[0].denom, "uatom");
}

#[test]
fn test_dispatch_is_deterministic() {
	let registry =
		SourceRegistry::from_sources(vec![mock_source("cosmoshub"), mock_source("gaia-testnet")])
			.unwrap();

	for _ in 0..3 {
		let first = registry.dispatch("gaia-testnet").unwrap();
		let second = registry.dispatch("gaia-testnet").unwrap();
		assert!(std::sync::Arc::ptr_eq(&first, &second));
	}
}

#[test]
fn test_unknown_network_fails_closed() {
	let registry = SourceRegistry::from_sources(vec![mock_source("cosmoshub")]).unwrap();

	for id in ["", "Cosmoshub", "cosmoshub ", "gaia-testnet"] {
		match registry.dispatch(id) {
			Err(BlockChainError::UnknownNetwork(ctx)) => {
				assert!(ctx.to_string().contains("No data source for network"));
			}
			Err(other) => panic!("unexpected error for {:?}: {}", id, other),
			Ok(_) => panic!("dispatch of {:?} should fail", id),
		}
	}
}

#[test]
fn test_duplicate_network_ids_are_rejected() {
	let result =
		SourceRegistry::from_sources(vec![mock_source("cosmoshub"), mock_source("cosmoshub")]);
	assert!(matches!(result, Err(BlockChainError::RegistryError(_))));
}
