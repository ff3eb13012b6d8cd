//! Network configuration loading and validation.
//!
//! This module implements the ConfigLoader trait for NetworkConfig, allowing the served
//! networks to be defined in JSON files, one network per file.

use async_trait::async_trait;
use std::{collections::HashMap, path::Path};
use url::Url;

use crate::{
	models::{config::error::ConfigError, ConfigLoader, NetworkConfig},
	utils::normalize_string,
};

fn path_metadata(path: &Path) -> Option<HashMap<String, String>> {
	Some(HashMap::from([(
		"path".to_string(),
		path.display().to_string(),
	)]))
}

fn validate_url(field: &str, value: &str, schemes: &[&str]) -> Result<(), ConfigError> {
	let url = Url::parse(value).map_err(|e| {
		ConfigError::validation_error(
			format!("{} is not a valid URL", field),
			Some(Box::new(e)),
			Some(HashMap::from([(field.to_string(), value.to_string())])),
		)
	})?;

	if !schemes.contains(&url.scheme()) {
		return Err(ConfigError::validation_error(
			format!("{} must use one of: {}", field, schemes.join(", ")),
			None,
			Some(HashMap::from([(field.to_string(), value.to_string())])),
		));
	}
	Ok(())
}

#[async_trait]
impl ConfigLoader for NetworkConfig {
	/// Load all network configurations from a directory
	///
	/// Reads and parses all JSON files in the specified directory (or default
	/// config directory). Entries are keyed by network id.
	async fn load_all<T>(path: Option<&Path>) -> Result<T, ConfigError>
	where
		T: FromIterator<(String, Self)>,
	{
		let network_dir = path.unwrap_or(Path::new("config/networks"));
		let mut pairs: Vec<(String, NetworkConfig)> = Vec::new();

		if !network_dir.exists() {
			return Err(ConfigError::file_error(
				"networks directory not found",
				None,
				path_metadata(network_dir),
			));
		}

		let mut entries = std::fs::read_dir(network_dir)
			.map_err(|e| {
				ConfigError::file_error(
					format!("failed to read networks directory: {}", e),
					Some(Box::new(e)),
					path_metadata(network_dir),
				)
			})?
			.collect::<Result<Vec<_>, _>>()
			.map_err(|e| {
				ConfigError::file_error(
					format!("failed to read directory entry: {}", e),
					Some(Box::new(e)),
					path_metadata(network_dir),
				)
			})?;
		// Stable order so duplicate reports always name the same file
		entries.sort_by_key(|entry| entry.path());

		for entry in entries {
			let path = entry.path();

			if !Self::is_json_file(&path) {
				continue;
			}

			let network = Self::load_from_path(&path).await?;

			let existing_networks: Vec<&NetworkConfig> =
				pairs.iter().map(|(_, network)| network).collect();
			Self::validate_uniqueness(&existing_networks, &network, &path.display().to_string())?;

			pairs.push((network.id.clone(), network));
		}

		Ok(T::from_iter(pairs))
	}

	/// Load a network configuration from a specific file
	async fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
		let file = std::fs::File::open(path).map_err(|e| {
			ConfigError::file_error(
				format!("failed to open network config file: {}", e),
				Some(Box::new(e)),
				path_metadata(path),
			)
		})?;
		let config: NetworkConfig = serde_json::from_reader(file).map_err(|e| {
			ConfigError::parse_error(
				format!("failed to parse network config: {}", e),
				Some(Box::new(e)),
				path_metadata(path),
			)
		})?;

		config.validate()?;

		Ok(config)
	}

	/// Validate the network configuration
	///
	/// Ensures that:
	/// - The id is present and only uses lowercase letters, digits and dashes
	/// - Title, chain id and address prefix are present
	/// - REST and RPC URLs are http(s), the websocket URL (if any) is ws(s)
	fn validate(&self) -> Result<(), ConfigError> {
		if self.id.is_empty() {
			return Err(ConfigError::validation_error(
				"Network id is required",
				None,
				None,
			));
		}

		if !self
			.id
			.chars()
			.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
		{
			return Err(ConfigError::validation_error(
				"Network id must contain only lowercase letters, numbers, and dashes",
				None,
				Some(HashMap::from([("network_id".to_string(), self.id.clone())])),
			));
		}

		if self.title.trim().is_empty() {
			return Err(ConfigError::validation_error(
				"Network title is required",
				None,
				Some(HashMap::from([("network_id".to_string(), self.id.clone())])),
			));
		}

		if self.chain_id.trim().is_empty() {
			return Err(ConfigError::validation_error(
				"Chain id is required",
				None,
				Some(HashMap::from([("network_id".to_string(), self.id.clone())])),
			));
		}

		if self.bech32_prefix.is_empty()
			|| !self
				.bech32_prefix
				.chars()
				.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
		{
			return Err(ConfigError::validation_error(
				"bech32_prefix must be a non-empty lowercase alphanumeric string",
				None,
				Some(HashMap::from([("network_id".to_string(), self.id.clone())])),
			));
		}

		validate_url("api_url", &self.api_url, &["http", "https"])?;
		validate_url("rpc_url", &self.rpc_url, &["http", "https"])?;
		if let Some(ws_url) = &self.ws_url {
			validate_url("ws_url", ws_url, &["ws", "wss"])?;
		}

		// Log a warning if the network uses an insecure protocol
		self.validate_protocol();

		Ok(())
	}

	/// Validate the safety of the protocol used in the network
	///
	/// Returns if safe, or logs a warning message if unsafe.
	fn validate_protocol(&self) {
		for (kind, url) in [("API", &self.api_url), ("RPC", &self.rpc_url)] {
			if url.starts_with("http://") {
				tracing::warn!("Network '{}' uses an insecure {} URL: {}", self.id, kind, url);
			}
		}
		if let Some(ws_url) = &self.ws_url {
			if ws_url.starts_with("ws://") {
				tracing::warn!(
					"Network '{}' uses an insecure WebSocket URL: {}",
					self.id,
					ws_url
				);
			}
		}
	}

	fn validate_uniqueness(
		instances: &[&Self],
		current_instance: &Self,
		file_path: &str,
	) -> Result<(), ConfigError> {
		let id = normalize_string(&current_instance.id);
		if instances
			.iter()
			.any(|existing| normalize_string(&existing.id) == id)
		{
			return Err(ConfigError::validation_error(
				format!("Duplicate network id found: '{}'", current_instance.id),
				None,
				Some(HashMap::from([
					("network_id".to_string(), current_instance.id.clone()),
					("path".to_string(), file_path.to_string()),
				])),
			));
		}
		Ok(())
	}
}
