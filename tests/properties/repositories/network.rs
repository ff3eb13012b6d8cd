use crate::properties::strategies::network_strategy;

use chain_gateway::{
	models::{ConfigLoader, NetworkConfig},
	repositories::{NetworkRepository, NetworkRepositoryTrait},
};
use proptest::{prelude::*, test_runner::Config};
use std::collections::BTreeMap;

const MIN_TEST_CASES: usize = 1;
const MAX_TEST_CASES: usize = 10;

fn by_id(networks: Vec<NetworkConfig>) -> BTreeMap<String, NetworkConfig> {
	networks
		.into_iter()
		.map(|network| (network.id.clone(), network))
		.collect()
}

proptest! {
	#![proptest_config(Config {
		failure_persistence: None,
		..Config::default()
	})]

	#[test]
	fn test_query_operations(
		networks in proptest::collection::vec(network_strategy(), MIN_TEST_CASES..MAX_TEST_CASES)
	) {
		let expected = by_id(networks.clone());
		let repo = NetworkRepository::from_networks(networks, true);

		for (id, network) in &expected {
			let got = repo.get(id);
			prop_assert_eq!(Some(network), got.as_ref());
		}
		prop_assert_eq!(repo.get_all(), expected.values().cloned().collect::<Vec<_>>());
		prop_assert_eq!(repo.ids(), expected.keys().cloned().collect::<Vec<_>>());
		prop_assert_eq!(None, repo.get("non-existent-network"));
	}

	#[test]
	fn test_testnet_switch(
		networks in proptest::collection::vec(network_strategy(), MIN_TEST_CASES..MAX_TEST_CASES)
	) {
		let expected = by_id(networks.clone());
		let mainnets = NetworkRepository::from_networks(networks.clone(), false);
		let everything = NetworkRepository::from_networks(networks, true);

		prop_assert!(mainnets.get_all().iter().all(|network| !network.testnet));
		prop_assert_eq!(everything.len(), expected.len());
		prop_assert_eq!(
			mainnets.len(),
			expected.values().filter(|network| !network.testnet).count()
		);
	}

	#[test]
	fn test_generated_networks_validate(network in network_strategy()) {
		prop_assert!(network.validate().is_ok());
	}

	#[test]
	fn test_file_roundtrip(
		networks in proptest::collection::vec(network_strategy(), MIN_TEST_CASES..MAX_TEST_CASES)
	) {
		let expected = by_id(networks);
		let dir = tempfile::tempdir().unwrap();
		for network in expected.values() {
			std::fs::write(
				dir.path().join(format!("{}.json", network.id)),
				serde_json::to_string(network).unwrap(),
			)
			.unwrap();
		}

		let runtime = tokio::runtime::Runtime::new().unwrap();
		let repo = runtime
			.block_on(NetworkRepository::new(Some(dir.path()), true))
			.unwrap();
		prop_assert_eq!(repo.get_all(), expected.values().cloned().collect::<Vec<_>>());
	}
}
