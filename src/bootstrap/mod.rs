//! Bootstrap module for initializing services and starting the block bridges.
//!
//! # Services
//! - `NetworkRepository`: The served networks, loaded from the network files
//! - `SourceRegistry`: One chain data source per served network
//! - `BlockBridgeService`: Per-network block topics and their bridges
//! - `GatewayService`: The request surface wrapping all of the above
//!
//! # Bridges
//! - `start_bridges`: Starts one block bridge per served network, fed by the network's
//!   Tendermint websocket

use std::{error::Error, sync::Arc};
use tracing::{info, warn};

use crate::{
	models::{GatewayConfig, NetworkConfig},
	repositories::{NetworkRepository, NetworkRepositoryTrait},
	services::{
		blockbridge::{BlockBridgeService, BridgeConfig, TendermintEventFeed},
		blockchain::SourceRegistry,
		cache::InMemoryCache,
		gateway::GatewayService,
	},
	utils::{http::HttpClientConfig, metrics::CONFIGURED_NETWORKS},
};

/// Type alias for handling ServiceResult
pub type Result<T> = std::result::Result<T, Box<dyn Error>>;

/// Builds the gateway and its collaborators from `config`
///
/// Loads the network files, builds one data source per served network and, when enabled,
/// attaches the in-process response cache.
///
/// # Errors
/// Returns an error if the network files cannot be loaded or a data source cannot be built
pub async fn initialize_services(config: &GatewayConfig) -> Result<Arc<GatewayService>> {
	let networks =
		NetworkRepository::new(Some(config.networks_path.as_path()), config.include_testnets)
			.await?;
	if networks.is_empty() {
		warn!(
			"No networks configured under {}",
			config.networks_path.display()
		);
	}

	let http_config = HttpClientConfig {
		timeout: config.http_timeout,
		..HttpClientConfig::default()
	};
	let served = networks.get_all();
	let registry = SourceRegistry::from_networks(&served, &http_config)?;
	CONFIGURED_NETWORKS.set(registry.len() as i64);

	let bridges = Arc::new(BlockBridgeService::new(BridgeConfig::from_gateway_config(
		config,
	)));

	let mut gateway = GatewayService::new(registry, networks, bridges);
	if config.enable_cache {
		info!(
			"Response cache enabled (ttl: {}s)",
			config.cache_ttl.as_secs()
		);
		gateway = gateway.with_cache(Arc::new(InMemoryCache::new()), config.cache_ttl);
	}

	info!("Serving {} networks", served.len());
	Ok(Arc::new(gateway))
}

/// Starts a block bridge for every network in `networks`
///
/// Networks the gateway does not serve are skipped with a warning. Returns the ids of the
/// networks whose bridge is running.
pub async fn start_bridges(
	gateway: &GatewayService,
	networks: &[NetworkConfig],
) -> Result<Vec<String>> {
	let bridges = gateway.bridges();
	for network in networks {
		let source = match gateway.registry().dispatch(&network.id) {
			Ok(source) => source,
			Err(e) => {
				warn!("Not starting block bridge for {}: {}", network.id, e);
				continue;
			}
		};
		let feed = TendermintEventFeed::new(network);
		info!(
			"Starting block bridge for {} ({})",
			network.id,
			feed.url()
		);
		bridges.start_network_bridge(feed, source).await?;
	}

	Ok(bridges.active_networks().await)
}
