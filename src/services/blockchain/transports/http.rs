//! HTTP transport implementation for LCD REST APIs.
//!
//! Every request is a single GET against the network's `api_url`. Connection pooling and
//! timeouts come from the shared `reqwest` client; there is no retry and no endpoint
//! rotation.

use anyhow::Context;
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use serde_json::Value;
use std::collections::HashMap;
use url::Url;

use crate::{
	models::NetworkConfig,
	services::blockchain::transports::{unwrap_lcd_envelope, RestTransport, TransportError},
	utils::http::{create_http_client, HttpClientConfig},
};

/// Basic HTTP transport client for LCD interactions
///
/// The client is cheap to clone and can be shared across tasks.
#[derive(Clone, Debug)]
pub struct HttpTransportClient {
	/// Pooled HTTP client for making requests
	pub client: reqwest::Client,
	/// API root, always ending in a slash so that relative paths append to it
	base_url: Url,
}

impl HttpTransportClient {
	/// Creates a transport for the network's REST API
	///
	/// # Arguments
	/// * `network` - Network configuration holding the API URL
	/// * `config` - Timeouts and pool settings for the underlying client
	///
	/// # Returns
	/// * `Result<Self, anyhow::Error>` - New transport or configuration error
	pub fn new(network: &NetworkConfig, config: &HttpClientConfig) -> Result<Self, anyhow::Error> {
		let client = create_http_client(config).context("Failed to create base HTTP client")?;
		Self::new_with_client(client, &network.api_url)
	}

	/// Creates a transport around an existing client
	pub fn new_with_client(client: reqwest::Client, api_url: &str) -> Result<Self, anyhow::Error> {
		let mut base_url =
			Url::parse(api_url).with_context(|| format!("Invalid API URL: {}", api_url))?;
		if !base_url.path().ends_with('/') {
			let path = format!("{}/", base_url.path());
			base_url.set_path(&path);
		}
		Ok(Self { client, base_url })
	}

	fn endpoint(&self, path: &str) -> Result<Url, TransportError> {
		self.base_url
			.join(path.trim_start_matches('/'))
			.map_err(|e| {
				TransportError::network(
					format!("Invalid request path '{}'", path),
					Some(Box::new(e)),
					Some(HashMap::from([(
						"base_url".to_string(),
						self.base_url.to_string(),
					)])),
				)
			})
	}
}

#[async_trait]
impl RestTransport for HttpTransportClient {
	fn base_url(&self) -> String {
		self.base_url.as_str().trim_end_matches('/').to_string()
	}

	/// Sends a GET request to the LCD API
	///
	/// # Arguments
	/// * `path` - Path relative to the API root, e.g. `staking/validators`
	///
	/// # Returns
	/// * `Result<Value, TransportError>` - JSON body without the LCD envelope, or error
	async fn send_get_request(&self, path: &str) -> Result<Value, TransportError> {
		let url = self.endpoint(path)?;
		let metadata = || Some(HashMap::from([("url".to_string(), url.to_string())]));

		let response = self
			.client
			.get(url.clone())
			.header(ACCEPT, "application/json")
			.send()
			.await
			.map_err(|e| {
				if e.is_timeout() {
					TransportError::timeout("Request timed out", Some(Box::new(e)), metadata())
				} else {
					TransportError::network("Failed to send request", Some(Box::new(e)), metadata())
				}
			})?;

		let status = response.status();
		if !status.is_success() {
			let body = response.text().await.unwrap_or_default();
			return Err(TransportError::http(
				status,
				url.to_string(),
				body,
				None,
				None,
			));
		}

		let payload: Value = response.json().await.map_err(|e| {
			TransportError::response_parse(
				"Failed to parse response body",
				Some(Box::new(e)),
				metadata(),
			)
		})?;

		Ok(unwrap_lcd_envelope(payload))
	}
}
