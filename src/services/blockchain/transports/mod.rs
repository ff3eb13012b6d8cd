//! Network transport implementations for chain data sources.
//!
//! Provides the REST transport used to reach a network's LCD API:
//!
//! - Generic HTTP transport over a pooled `reqwest` client

mod error;
mod http;

pub use error::TransportError;
pub use http::HttpTransportClient;

use serde_json::Value;

/// Base trait for all REST transports
///
/// A transport performs exactly one request per call. It never retries; callers see every
/// failure as a [`TransportError`].
#[async_trait::async_trait]
pub trait RestTransport: Send + Sync + Clone {
	/// Base URL every request path is resolved against
	fn base_url(&self) -> String;

	/// Sends a GET request for `path` and returns the decoded JSON body
	async fn send_get_request(&self, path: &str) -> Result<Value, TransportError>;
}

/// Strips the `{height, result}` envelope newer LCD versions wrap every answer in
pub fn unwrap_lcd_envelope(payload: Value) -> Value {
	match payload {
		Value::Object(mut map)
			if map.len() == 2 && map.contains_key("height") && map.contains_key("result") =>
		{
			map.remove("result").unwrap_or(Value::Null)
		}
		other => other,
	}
}
