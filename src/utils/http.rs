//! HTTP client construction shared by all upstream REST transports.
//!
//! Upstream calls are never retried here: a failed request surfaces to the caller as a
//! transport error, and the caller decides what to do with it.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// --- Default values for HTTP client settings ---
fn default_timeout() -> Duration {
	Duration::from_secs(30)
}

fn default_connect_timeout() -> Duration {
	Duration::from_secs(20)
}

fn default_pool_idle_timeout() -> Duration {
	Duration::from_secs(90)
}

fn default_pool_max_idle_per_host() -> usize {
	32
}

/// Connection settings for the pooled upstream HTTP client
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct HttpClientConfig {
	/// Total time allowed for one request, including the body
	#[serde(default = "default_timeout")]
	pub timeout: Duration,
	/// Time allowed to establish the TCP/TLS connection
	#[serde(default = "default_connect_timeout")]
	pub connect_timeout: Duration,
	/// How long idle pooled connections are kept
	#[serde(default = "default_pool_idle_timeout")]
	pub pool_idle_timeout: Duration,
	/// Maximum idle pooled connections per upstream host
	#[serde(default = "default_pool_max_idle_per_host")]
	pub pool_max_idle_per_host: usize,
}

impl Default for HttpClientConfig {
	fn default() -> Self {
		Self {
			timeout: default_timeout(),
			connect_timeout: default_connect_timeout(),
			pool_idle_timeout: default_pool_idle_timeout(),
			pool_max_idle_per_host: default_pool_max_idle_per_host(),
		}
	}
}

impl HttpClientConfig {
	/// Default settings with a custom request timeout
	pub fn with_timeout(timeout: Duration) -> Self {
		Self {
			timeout,
			connect_timeout: default_connect_timeout().min(timeout),
			..Self::default()
		}
	}
}

/// Creates the pooled HTTP client used by REST transports
///
/// # Parameters:
/// - `config`: Timeouts and pool sizing
///
/// # Returns
/// A `reqwest::Client`; cloning it shares the connection pool
pub fn create_http_client(config: &HttpClientConfig) -> Result<reqwest::Client, reqwest::Error> {
	reqwest::ClientBuilder::new()
		.pool_idle_timeout(config.pool_idle_timeout)
		.pool_max_idle_per_host(config.pool_max_idle_per_host)
		.timeout(config.timeout)
		.connect_timeout(config.connect_timeout)
		.build()
}
