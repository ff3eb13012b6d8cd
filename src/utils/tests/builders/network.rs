//! Test helper utilities for network configuration
//!
//! - `NetworkConfigBuilder`: Builder for creating test NetworkConfig instances

use crate::models::{ChainFamily, NetworkConfig};

/// Builder for creating test NetworkConfig instances
pub struct NetworkConfigBuilder {
	network: NetworkConfig,
}

impl Default for NetworkConfigBuilder {
	fn default() -> Self {
		Self {
			network: NetworkConfig {
				id: "test-network".to_string(),
				title: "Test Network".to_string(),
				chain_id: "test-chain-1".to_string(),
				family: ChainFamily::Cosmos,
				bech32_prefix: "cosmos".to_string(),
				api_url: "https://lcd.test.network".to_string(),
				rpc_url: "https://rpc.test.network:26657".to_string(),
				ws_url: None,
				logo_url: None,
				testnet: false,
				experimental: false,
				action_send: false,
				action_claim_rewards: false,
				action_delegate: false,
				action_redelegate: false,
				action_undelegate: false,
				action_deposit: false,
				action_vote: false,
				action_proposal: false,
				feature_session: false,
				feature_explorer: false,
				feature_portfolio: false,
				feature_validators: false,
				feature_activity: false,
				feature_proposals: false,
			},
		}
	}
}

impl NetworkConfigBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn id(mut self, id: &str) -> Self {
		self.network.id = id.to_string();
		self
	}

	pub fn title(mut self, title: &str) -> Self {
		self.network.title = title.to_string();
		self
	}

	pub fn chain_id(mut self, chain_id: &str) -> Self {
		self.network.chain_id = chain_id.to_string();
		self
	}

	pub fn family(mut self, family: ChainFamily) -> Self {
		self.network.family = family;
		self
	}

	pub fn bech32_prefix(mut self, prefix: &str) -> Self {
		self.network.bech32_prefix = prefix.to_string();
		self
	}

	pub fn api_url(mut self, url: &str) -> Self {
		self.network.api_url = url.to_string();
		self
	}

	pub fn rpc_url(mut self, url: &str) -> Self {
		self.network.rpc_url = url.to_string();
		self
	}

	pub fn ws_url(mut self, url: &str) -> Self {
		self.network.ws_url = Some(url.to_string());
		self
	}

	pub fn logo_url(mut self, url: &str) -> Self {
		self.network.logo_url = Some(url.to_string());
		self
	}

	pub fn testnet(mut self, testnet: bool) -> Self {
		self.network.testnet = testnet;
		self
	}

	pub fn experimental(mut self, experimental: bool) -> Self {
		self.network.experimental = experimental;
		self
	}

	/// Sets every `action_*` flag at once
	pub fn actions(mut self, enabled: bool) -> Self {
		self.network.action_send = enabled;
		self.network.action_claim_rewards = enabled;
		self.network.action_delegate = enabled;
		self.network.action_redelegate = enabled;
		self.network.action_undelegate = enabled;
		self.network.action_deposit = enabled;
		self.network.action_vote = enabled;
		self.network.action_proposal = enabled;
		self
	}

	/// Sets every `feature_*` flag at once
	pub fn features(mut self, enabled: bool) -> Self {
		self.network.feature_session = enabled;
		self.network.feature_explorer = enabled;
		self.network.feature_portfolio = enabled;
		self.network.feature_validators = enabled;
		self.network.feature_activity = enabled;
		self.network.feature_proposals = enabled;
		self
	}

	pub fn build(self) -> NetworkConfig {
		self.network
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_default_network() {
		let network = NetworkConfigBuilder::new().build();

		assert_eq!(network.id, "test-network");
		assert_eq!(network.family, ChainFamily::Cosmos);
		assert_eq!(network.bech32_prefix, "cosmos");
		assert!(network.ws_url.is_none());
		assert!(!network.testnet);
		assert!(!network.action_delegate);
	}

	#[test]
	fn test_builder_methods() {
		let network = NetworkConfigBuilder::new()
			.id("gaia-testnet")
			.title("Gaia Testnet")
			.chain_id("gaia-13006")
			.family(ChainFamily::Gaia)
			.api_url("https://gaia.example.com")
			.logo_url("https://logo.example.com/cosmos.png")
			.testnet(true)
			.experimental(true)
			.actions(true)
			.features(true)
			.build();

		assert_eq!(network.id, "gaia-testnet");
		assert_eq!(network.title, "Gaia Testnet");
		assert_eq!(network.chain_id, "gaia-13006");
		assert_eq!(network.family, ChainFamily::Gaia);
		assert_eq!(network.api_url, "https://gaia.example.com");
		assert!(network.testnet && network.experimental);
		assert!(network.action_vote && network.action_send);
		assert!(network.feature_proposals && network.feature_session);
	}
}
