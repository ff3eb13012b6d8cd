//! Network registry implementation.
//!
//! Holds the networks the gateway serves. The registry is loaded once from the JSON files of
//! the networks directory, filtered by the testnet switch, and never changes afterwards.

#![allow(clippy::result_large_err)]

use std::{
	collections::{BTreeMap, HashMap},
	path::Path,
	sync::Arc,
};

use async_trait::async_trait;

use crate::{
	models::{ConfigLoader, NetworkConfig},
	repositories::error::RepositoryError,
};

/// Immutable registry of served networks
#[derive(Clone, Debug, Default)]
pub struct NetworkRepository {
	/// Served networks keyed by id
	networks: Arc<BTreeMap<String, NetworkConfig>>,
}

impl NetworkRepository {
	/// Loads every network file under `path` (or the default directory)
	///
	/// Networks flagged as testnet are only kept when `include_testnets` is set.
	pub async fn new(path: Option<&Path>, include_testnets: bool) -> Result<Self, RepositoryError> {
		let networks = Self::load_all(path).await?;
		Ok(Self::from_networks(networks.into_values(), include_testnets))
	}

	/// Builds a registry from already loaded networks
	pub fn from_networks(
		networks: impl IntoIterator<Item = NetworkConfig>,
		include_testnets: bool,
	) -> Self {
		let networks = networks
			.into_iter()
			.filter(|network| {
				if network.testnet && !include_testnets {
					tracing::debug!("Skipping testnet network {}", network.id);
					return false;
				}
				true
			})
			.map(|network| (network.id.clone(), network))
			.collect();

		Self {
			networks: Arc::new(networks),
		}
	}

	pub fn len(&self) -> usize {
		self.networks.len()
	}

	pub fn is_empty(&self) -> bool {
		self.networks.is_empty()
	}

	/// Ids of the served networks, sorted
	pub fn ids(&self) -> Vec<String> {
		self.networks.keys().cloned().collect()
	}
}

/// Interface for network registry implementations
#[async_trait]
pub trait NetworkRepositoryTrait: Clone + Send + Sync {
	/// Load all network configurations from the given path
	///
	/// If no path is provided, uses the default config directory.
	async fn load_all(path: Option<&Path>)
		-> Result<HashMap<String, NetworkConfig>, RepositoryError>;

	/// Get a specific network by id
	///
	/// Returns None if the network isn't served.
	fn get(&self, network_id: &str) -> Option<NetworkConfig>;

	/// Get all served networks, sorted by id
	fn get_all(&self) -> Vec<NetworkConfig>;
}

#[async_trait]
impl NetworkRepositoryTrait for NetworkRepository {
	async fn load_all(
		path: Option<&Path>,
	) -> Result<HashMap<String, NetworkConfig>, RepositoryError> {
		NetworkConfig::load_all(path).await.map_err(|e| {
			RepositoryError::load_error(
				"Failed to load networks",
				Some(Box::new(e)),
				Some(HashMap::from([(
					"path".to_string(),
					path.map_or_else(|| "default".to_string(), |p| p.display().to_string()),
				)])),
			)
		})
	}

	fn get(&self, network_id: &str) -> Option<NetworkConfig> {
		self.networks.get(network_id).cloned()
	}

	fn get_all(&self) -> Vec<NetworkConfig> {
		self.networks.values().cloned().collect()
	}
}
