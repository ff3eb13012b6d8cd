//! Upstream "new block" event feeds.
//!
//! A feed hands out one subscription at a time as a stream of events. The stream ends when
//! the underlying connection is gone; resubscribing is up to the caller.

use std::{collections::HashMap, time::Duration};

use async_trait::async_trait;
use futures::{stream::BoxStream, SinkExt, StreamExt};
use serde_json::{json, Value};
use tokio_tungstenite::{connect_async, tungstenite::Message};

use crate::{models::NetworkConfig, services::blockbridge::error::BlockBridgeError};

/// Tendermint query selecting new block events
pub const NEW_BLOCK_QUERY: &str = "tm.event='NewBlock'";

const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// Silence after which a subscription counts as gone
///
/// Tendermint commits a block every few seconds, so a quiet connection is a dead one.
const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(30);

/// A single "new block" notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewBlockEvent {
	pub height: u64,
}

/// Events of one subscription, in arrival order
///
/// An `Err` item is a message that could not be understood; the subscription itself is
/// still alive. The stream ending means the subscription is gone.
pub type EventStream = BoxStream<'static, Result<NewBlockEvent, BlockBridgeError>>;

/// Source of new block events for one network
#[async_trait]
pub trait EventFeed: Send + Sync {
	/// Opens a fresh subscription to new block events
	async fn subscribe(&self) -> Result<EventStream, BlockBridgeError>;
}

/// Event feed over the Tendermint JSON-RPC websocket
#[derive(Debug, Clone)]
pub struct TendermintEventFeed {
	network_id: String,
	url: String,
	connect_timeout: Duration,
	read_timeout: Duration,
}

impl TendermintEventFeed {
	pub fn new(network: &NetworkConfig) -> Self {
		Self::with_url(&network.id, network.event_feed_url())
	}

	pub fn with_url(network_id: impl Into<String>, url: impl Into<String>) -> Self {
		Self {
			network_id: network_id.into(),
			url: url.into(),
			connect_timeout: DEFAULT_CONNECT_TIMEOUT,
			read_timeout: DEFAULT_READ_TIMEOUT,
		}
	}

	pub fn with_connect_timeout(mut self, connect_timeout: Duration) -> Self {
		self.connect_timeout = connect_timeout;
		self
	}

	pub fn with_read_timeout(mut self, read_timeout: Duration) -> Self {
		self.read_timeout = read_timeout;
		self
	}

	pub fn url(&self) -> &str {
		&self.url
	}

	fn metadata(&self) -> HashMap<String, String> {
		HashMap::from([
			("network_id".to_string(), self.network_id.clone()),
			("url".to_string(), self.url.clone()),
		])
	}
}

#[async_trait]
impl EventFeed for TendermintEventFeed {
	async fn subscribe(&self) -> Result<EventStream, BlockBridgeError> {
		let connect = tokio::time::timeout(self.connect_timeout, connect_async(self.url.as_str()));
		let (ws_stream, _) = match connect.await {
			Ok(Ok(connection)) => connection,
			Ok(Err(e)) => {
				return Err(BlockBridgeError::feed_error(
					"Failed to connect to event feed",
					Some(Box::new(e)),
					Some(self.metadata()),
				))
			}
			Err(e) => {
				return Err(BlockBridgeError::feed_error(
					"Timed out connecting to event feed",
					Some(Box::new(e)),
					Some(self.metadata()),
				))
			}
		};

		let (mut sink, stream) = ws_stream.split();
		let request = json!({
			"jsonrpc": "2.0",
			"method": "subscribe",
			"id": "0",
			"params": { "query": NEW_BLOCK_QUERY },
		});
		sink.send(Message::Text(request.to_string()))
			.await
			.map_err(|e| {
				BlockBridgeError::feed_error(
					"Failed to send subscribe request",
					Some(Box::new(e)),
					Some(self.metadata()),
				)
			})?;

		tracing::debug!(network = %self.network_id, url = %self.url, "Sent new block subscription");

		let network_id = self.network_id.clone();
		let read_timeout = self.read_timeout;
		// The sink travels with the stream so the connection lives as long as the subscription
		let events = futures::stream::unfold(
			(sink, stream, network_id),
			move |(sink, mut stream, network_id)| async move {
				loop {
					let next = match tokio::time::timeout(read_timeout, stream.next()).await {
						Ok(next) => next?,
						Err(_) => {
							tracing::warn!(
								network = %network_id,
								"Event feed silent for {:?}, dropping subscription",
								read_timeout
							);
							return None;
						}
					};
					let item = match next {
						Ok(Message::Text(text)) => match parse_new_block_event(&text) {
							Ok(Some(event)) => Ok(event),
							Ok(None) => continue,
							Err(e) => Err(e),
						},
						Ok(Message::Close(frame)) => {
							tracing::info!(network = %network_id, "Event feed closed: {:?}", frame);
							return None;
						}
						Ok(_) => continue,
						Err(e) => {
							tracing::warn!(network = %network_id, "Event feed read failed: {}", e);
							return None;
						}
					};
					return Some((item, (sink, stream, network_id)));
				}
			},
		)
		.boxed();

		Ok(events)
	}
}

/// Extracts the block height from one feed message
///
/// Returns `Ok(None)` for messages that carry no event, such as the subscription
/// acknowledgement. Heights may be encoded as strings or numbers.
pub fn parse_new_block_event(text: &str) -> Result<Option<NewBlockEvent>, BlockBridgeError> {
	let value: Value = serde_json::from_str(text).map_err(|e| {
		BlockBridgeError::event_parse_error("Event is not valid JSON", Some(Box::new(e)), None)
	})?;

	if let Some(error) = value.get("error") {
		return Err(BlockBridgeError::event_parse_error(
			"Event feed returned an error",
			None,
			Some(HashMap::from([("error".to_string(), error.to_string())])),
		));
	}

	let Some(data) = value.pointer("/result/data") else {
		return Ok(None);
	};

	let height = match data.pointer("/value/block/header/height") {
		Some(Value::String(height)) => height.trim().parse::<u64>().ok(),
		Some(Value::Number(height)) => height.as_u64(),
		_ => None,
	};

	match height {
		Some(height) => Ok(Some(NewBlockEvent { height })),
		None => Err(BlockBridgeError::event_parse_error(
			"Event carries no usable block height",
			None,
			None,
		)),
	}
}
