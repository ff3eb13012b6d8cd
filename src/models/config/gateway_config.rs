//! Process-level settings read from the environment.
//!
//! Variables (all optional):
//! - NETWORKS_PATH: directory holding the network files; default is "config/networks"
//! - TESTNET: "true" to serve networks flagged as testnet; default is "false"
//! - ENABLE_CACHE: "true" to cache request responses; default is "false"
//! - CACHE_TTL_SECS: lifetime of cached responses; default is 30
//! - BRIDGE_MAX_IN_FLIGHT: overlapping block fetches per bridge; default is 4
//! - TOPIC_CAPACITY: blocks buffered per subscriber before it lags; default is 128
//! - HTTP_TIMEOUT_SECS: upstream REST timeout; default is 30

use std::{collections::HashMap, env, path::PathBuf, str::FromStr, time::Duration};

use crate::models::ConfigError;

const DEFAULT_NETWORKS_PATH: &str = "config/networks";
const DEFAULT_CACHE_TTL_SECS: u64 = 30;
const DEFAULT_BRIDGE_MAX_IN_FLIGHT: usize = 4;
const DEFAULT_TOPIC_CAPACITY: usize = 128;
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Settings shared by every service of the gateway
#[derive(Debug, Clone, PartialEq)]
pub struct GatewayConfig {
	pub networks_path: PathBuf,
	pub include_testnets: bool,
	pub enable_cache: bool,
	pub cache_ttl: Duration,
	pub bridge_max_in_flight: usize,
	pub topic_capacity: usize,
	pub http_timeout: Duration,
}

impl Default for GatewayConfig {
	fn default() -> Self {
		Self {
			networks_path: PathBuf::from(DEFAULT_NETWORKS_PATH),
			include_testnets: false,
			enable_cache: false,
			cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
			bridge_max_in_flight: DEFAULT_BRIDGE_MAX_IN_FLIGHT,
			topic_capacity: DEFAULT_TOPIC_CAPACITY,
			http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
		}
	}
}

fn parse_flag(name: &str, value: Option<String>) -> Result<bool, ConfigError> {
	match value.as_deref().map(str::trim) {
		None | Some("") => Ok(false),
		Some(v) if v.eq_ignore_ascii_case("true") || v == "1" => Ok(true),
		Some(v) if v.eq_ignore_ascii_case("false") || v == "0" => Ok(false),
		Some(v) => Err(ConfigError::environment_error(
			format!("{} must be true or false", name),
			None,
			Some(HashMap::from([("value".to_string(), v.to_string())])),
		)),
	}
}

fn parse_positive<T>(name: &str, value: Option<String>, default: T) -> Result<T, ConfigError>
where
	T: FromStr + PartialOrd + Default,
	T::Err: std::error::Error + Send + Sync + 'static,
{
	let Some(raw) = value else {
		return Ok(default);
	};
	let parsed = raw.trim().parse::<T>().map_err(|e| {
		ConfigError::environment_error(
			format!("{} must be a positive integer", name),
			Some(Box::new(e)),
			Some(HashMap::from([("value".to_string(), raw.clone())])),
		)
	})?;
	if parsed <= T::default() {
		return Err(ConfigError::environment_error(
			format!("{} must be a positive integer", name),
			None,
			Some(HashMap::from([("value".to_string(), raw)])),
		));
	}
	Ok(parsed)
}

impl GatewayConfig {
	/// Reads the settings from the process environment
	///
	/// `.env` is loaded first so local overrides apply.
	pub fn from_env() -> Result<Self, ConfigError> {
		dotenvy::dotenv().ok();
		Self::from_lookup(|key| env::var(key).ok())
	}

	/// Reads the settings through an arbitrary variable lookup
	pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
	where
		F: Fn(&str) -> Option<String>,
	{
		let networks_path = lookup("NETWORKS_PATH")
			.filter(|p| !p.trim().is_empty())
			.map(PathBuf::from)
			.unwrap_or_else(|| PathBuf::from(DEFAULT_NETWORKS_PATH));

		Ok(Self {
			networks_path,
			include_testnets: parse_flag("TESTNET", lookup("TESTNET"))?,
			enable_cache: parse_flag("ENABLE_CACHE", lookup("ENABLE_CACHE"))?,
			cache_ttl: Duration::from_secs(parse_positive(
				"CACHE_TTL_SECS",
				lookup("CACHE_TTL_SECS"),
				DEFAULT_CACHE_TTL_SECS,
			)?),
			bridge_max_in_flight: parse_positive(
				"BRIDGE_MAX_IN_FLIGHT",
				lookup("BRIDGE_MAX_IN_FLIGHT"),
				DEFAULT_BRIDGE_MAX_IN_FLIGHT,
			)?,
			topic_capacity: parse_positive(
				"TOPIC_CAPACITY",
				lookup("TOPIC_CAPACITY"),
				DEFAULT_TOPIC_CAPACITY,
			)?,
			http_timeout: Duration::from_secs(parse_positive(
				"HTTP_TIMEOUT_SECS",
				lookup("HTTP_TIMEOUT_SECS"),
				DEFAULT_HTTP_TIMEOUT_SECS,
			)?),
		})
	}
}
