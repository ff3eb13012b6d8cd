//! Source registry mapping network ids to their data sources.
//!
//! The registry is built once at startup and never changes afterwards, so dispatch is a
//! plain map lookup without locking. Building it with two sources for the same network id
//! is rejected.

use std::{collections::HashMap, sync::Arc};

use crate::{
	models::NetworkConfig,
	services::blockchain::{client::ChainDataSource, clients::ChainSource, BlockChainError},
	utils::http::HttpClientConfig,
};

/// Immutable id to source mapping
pub struct SourceRegistry<S = ChainSource> {
	sources: Arc<HashMap<String, Arc<S>>>,
}

impl<S> Clone for SourceRegistry<S> {
	fn clone(&self) -> Self {
		Self {
			sources: self.sources.clone(),
		}
	}
}

impl<S: ChainDataSource> SourceRegistry<S> {
	/// Builds a registry from already constructed sources
	///
	/// # Errors
	/// Returns `BlockChainError::RegistryError` if two sources serve the same network id.
	pub fn from_sources(sources: impl IntoIterator<Item = S>) -> Result<Self, BlockChainError> {
		let mut map: HashMap<String, Arc<S>> = HashMap::new();
		for source in sources {
			let network_id = source.network_id().to_string();
			if map.contains_key(&network_id) {
				return Err(BlockChainError::registry_error(
					format!("Duplicate source for network '{}'", network_id),
					None,
					Some(HashMap::from([("network_id".to_string(), network_id)])),
				));
			}
			map.insert(network_id, Arc::new(source));
		}

		Ok(Self {
			sources: Arc::new(map),
		})
	}

	/// Returns the source responsible for `network_id`
	///
	/// # Errors
	/// Returns `BlockChainError::UnknownNetwork` if no source serves the id.
	pub fn dispatch(&self, network_id: &str) -> Result<Arc<S>, BlockChainError> {
		self.sources.get(network_id).cloned().ok_or_else(|| {
			BlockChainError::unknown_network(
				format!("No data source for network '{}'", network_id),
				None,
				Some(HashMap::from([(
					"network_id".to_string(),
					network_id.to_string(),
				)])),
			)
		})
	}

	/// Ids of all registered networks, sorted
	pub fn network_ids(&self) -> Vec<String> {
		let mut ids: Vec<String> = self.sources.keys().cloned().collect();
		ids.sort();
		ids
	}

	pub fn len(&self) -> usize {
		self.sources.len()
	}

	pub fn is_empty(&self) -> bool {
		self.sources.is_empty()
	}
}

impl SourceRegistry<ChainSource> {
	/// Builds one HTTP-backed source per configured network
	pub fn from_networks<'a>(
		networks: impl IntoIterator<Item = &'a NetworkConfig>,
		config: &HttpClientConfig,
	) -> Result<Self, BlockChainError> {
		let sources = networks
			.into_iter()
			.map(|network| {
				ChainSource::from_network(network, config).map_err(|e| {
					BlockChainError::registry_error(
						format!("Failed to create data source for '{}'", network.id),
						Some(e.into()),
						None,
					)
				})
			})
			.collect::<Result<Vec<_>, _>>()?;

		Self::from_sources(sources)
	}
}
