//! Chain gateway entry point.
//!
//! This binary loads the served networks, builds the gateway services and runs one block
//! bridge per network until interrupted.
//!
//! # Flow
//! 1. Loads settings from the environment, `.env` and command line flags
//! 2. Loads the network files and builds one chain data source per served network
//! 3. Starts a block bridge per network, publishing each new block to its topic
//! 4. Optionally serves Prometheus metrics and logs the blocks of watched networks
//! 5. Handles graceful shutdown on Ctrl+C

pub mod bootstrap;
pub mod models;
pub mod repositories;
pub mod services;
pub mod utils;

use crate::{
	bootstrap::{initialize_services, start_bridges, Result},
	models::GatewayConfig,
	services::gateway::GatewayService,
	utils::{
		logging::setup_logging, metrics::server::create_metrics_server, parse_byte_size,
		parse_network_list, port_of,
	},
};

use clap::Parser;
use dotenvy::dotenv_override;
use futures::StreamExt;
use std::env::{set_var, var};
use tokio::task::JoinHandle;
use tracing::{error, info};

const DEFAULT_METRICS_ADDRESS: &str = "127.0.0.1:8081";

#[derive(Parser)]
#[command(
	name = "chain-gateway",
	about = "A blockchain data gateway that normalizes Cosmos SDK chain data and streams new blocks per network.",
	version
)]
struct Cli {
	/// Write logs to file instead of stdout
	#[arg(long)]
	log_file: bool,

	/// Set log level (trace, debug, info, warn, error)
	#[arg(long, value_name = "LEVEL")]
	log_level: Option<String>,

	/// Path to store log files (default: logs/)
	#[arg(long, value_name = "PATH")]
	log_path: Option<String>,

	/// Maximum log file size before rolling (e.g., "1GB", "500MB", "1024KB")
	#[arg(long, value_name = "SIZE", value_parser = parse_byte_size)]
	log_max_size: Option<u64>,

	/// Address to start the metrics server on (default: 127.0.0.1:8081)
	#[arg(long, value_name = "HOST:PORT")]
	metrics_address: Option<String>,

	/// Enable metrics server
	#[arg(long)]
	metrics: bool,

	/// Directory holding the network files (default: config/networks)
	#[arg(long, value_name = "PATH")]
	networks_path: Option<String>,

	/// Serve networks flagged as testnet
	#[arg(long)]
	testnet: bool,

	/// Comma separated network ids whose published blocks are logged
	#[arg(long, value_name = "NETWORK_IDS")]
	watch: Option<String>,

	/// Validate configuration files without starting the service
	#[arg(long)]
	check: bool,
}

impl Cli {
	/// Apply CLI options to environment variables, overriding any existing values
	fn apply_to_env(&self) {
		// Reload environment variables from .env file
		// Override any existing environment variables
		dotenv_override().ok();

		if self.log_file {
			set_var("LOG_MODE", "file");
		}

		// Set log level from RUST_LOG if it exists
		if let Ok(level) = var("RUST_LOG") {
			set_var("LOG_LEVEL", level);
		}

		if let Some(level) = &self.log_level {
			set_var("LOG_LEVEL", level);
			set_var("RUST_LOG", level);
		}

		if let Some(path) = &self.log_path {
			set_var("LOG_DATA_DIR", path);
		}

		if let Some(max_size) = &self.log_max_size {
			set_var("LOG_MAX_SIZE", max_size.to_string());
		}

		if self.metrics {
			set_var("METRICS_ENABLED", "true");
		}

		if let Some(port) = self.metrics_address.as_deref().and_then(port_of) {
			set_var("METRICS_PORT", port.to_string());
		}

		if let Some(path) = &self.networks_path {
			set_var("NETWORKS_PATH", path);
		}

		if self.testnet {
			set_var("TESTNET", "true");
		}
	}
}

/// Main entry point for the chain gateway.
///
/// # Errors
/// Returns an error if service initialization fails or if there's an error during shutdown.
#[tokio::main]
async fn main() -> Result<()> {
	let cli = Cli::parse();

	// Apply CLI options to environment
	cli.apply_to_env();

	setup_logging().unwrap_or_else(|e| {
		error!("Failed to setup logging: {}", e);
	});

	let config = GatewayConfig::from_env()
		.map_err(|e| anyhow::anyhow!("Invalid gateway settings: {}", e))?;

	if cli.check {
		validate_configuration(&config).await;
		return Ok(());
	}

	let gateway = initialize_services(&config)
		.await
		.map_err(|e| anyhow::anyhow!("Failed to initialize services: {}", e))?;

	let metrics_enabled = var("METRICS_ENABLED").map(|v| v == "true").unwrap_or(false);
	let metrics_address = match (&cli.metrics_address, var("METRICS_PORT")) {
		(Some(address), _) => address.clone(),
		(None, Ok(port)) => format!("127.0.0.1:{}", port),
		(None, Err(_)) => DEFAULT_METRICS_ADDRESS.to_string(),
	};

	let metrics_server = if metrics_enabled {
		info!("Metrics server enabled, starting on {}", metrics_address);
		match create_metrics_server(metrics_address) {
			Ok(server) => Some(server),
			Err(e) => {
				error!("Failed to create metrics server: {}", e);
				None
			}
		}
	} else {
		info!("Metrics server disabled. Use --metrics flag or METRICS_ENABLED=true to enable");
		None
	};

	let networks = gateway.networks();
	if networks.is_empty() {
		info!("No networks to serve. Exiting...");
		return Ok(());
	}

	let watchers = match &cli.watch {
		Some(list) => spawn_watchers(&gateway, &parse_network_list(list)).await,
		None => Vec::new(),
	};

	let running = start_bridges(&gateway, &networks).await?;
	info!(
		"Service started with {} block bridge(s). Press Ctrl+C to shutdown",
		running.len()
	);

	let ctrl_c = tokio::signal::ctrl_c();

	if let Some(metrics_future) = metrics_server {
		tokio::select! {
			result = ctrl_c => {
				if let Err(e) = result {
					error!("Error waiting for Ctrl+C: {}", e);
				}
				info!("Shutdown signal received, stopping services...");
			}
			result = metrics_future => {
				if let Err(e) = result {
					error!("Metrics server error: {}", e);
				}
				info!("Metrics server stopped, shutting down services...");
			}
		}
	} else {
		let _ = ctrl_c.await;
		info!("Shutdown signal received, stopping services...");
	}

	if let Err(e) = gateway.bridges().stop_all().await {
		error!("Error during shutdown: {}", e);
	}
	for watcher in watchers {
		watcher.abort();
	}

	info!("Shutdown complete");
	Ok(())
}

/// Logs every block published for the given networks
///
/// Unknown ids are reported and skipped.
async fn spawn_watchers(gateway: &GatewayService, network_ids: &[String]) -> Vec<JoinHandle<()>> {
	let mut handles = Vec::new();
	for network_id in network_ids {
		match gateway.subscribe_blocks(network_id).await {
			Ok(subscription) => {
				let network_id = network_id.clone();
				info!("Watching blocks of {}", network_id);
				handles.push(tokio::spawn(async move {
					let mut blocks = subscription.into_stream();
					while let Some(block) = blocks.next().await {
						info!(
							network = %network_id,
							height = block.height,
							hash = %block.hash,
							transactions = block.transactions,
							"New block"
						);
					}
				}));
			}
			Err(e) => error!("Cannot watch {}: {}", network_id, e),
		}
	}
	handles
}

/// Validates configuration files and logs the results
async fn validate_configuration(config: &GatewayConfig) {
	info!("Validating configuration files...");

	match initialize_services(config).await {
		Ok(gateway) => {
			info!("✓ Core services initialized successfully");

			let networks = gateway.networks();
			if networks.is_empty() {
				error!(
					"No networks found under {}",
					config.networks_path.display()
				);
				return;
			}
			info!("✓ Found {} network(s)", networks.len());
			for network in &networks {
				info!(
					"  {} ({:?}, chain {}, events from {})",
					network.id,
					network.family,
					network.chain_id,
					network.event_feed_url()
				);
			}

			info!("Configuration validation completed successfully!");
		}
		Err(e) => {
			error!("{}", e);
		}
	}
}
