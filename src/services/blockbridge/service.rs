//! Block bridge service implementation.
//!
//! Runs one background task per network. Each task keeps a subscription to the network's
//! new block events, fetches the block behind every event by height and publishes the
//! canonical block on the network's topic. Fetches overlap up to a configured limit while
//! publication stays in event arrival order.

use std::{collections::HashMap, fmt, sync::Arc, time::Duration};

use backon::{BackoffBuilder, ExponentialBuilder};
use futures::StreamExt;
use tokio::{
	sync::{watch, RwLock},
	task::JoinHandle,
};
use tracing::instrument;

use crate::{
	models::GatewayConfig,
	services::{
		blockbridge::{
			error::BlockBridgeError,
			feed::{EventFeed, EventStream},
			topic::{BlockSubscription, BlockTopic},
			tracker::HeightTracker,
		},
		blockchain::ChainDataSource,
	},
	utils::metrics::{BLOCKS_PUBLISHED, BRIDGE_RECONNECTS, BRIDGE_STATE, EVENTS_DROPPED},
};

/// Where a bridge currently is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BridgeState {
	/// No live subscription; connecting or waiting to retry
	Disconnected,
	/// Subscribed and idle
	Subscribed,
	/// At least one block fetch is running
	Fetching,
	/// Handing a block to the topic
	Publishing,
}

impl BridgeState {
	/// Numeric value exported on the bridge state gauge
	pub fn as_gauge(&self) -> i64 {
		match self {
			Self::Disconnected => 0,
			Self::Subscribed => 1,
			Self::Fetching => 2,
			Self::Publishing => 3,
		}
	}
}

impl fmt::Display for BridgeState {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			Self::Disconnected => "disconnected",
			Self::Subscribed => "subscribed",
			Self::Fetching => "fetching",
			Self::Publishing => "publishing",
		};
		f.write_str(name)
	}
}

/// Tuning shared by every bridge of a service
#[derive(Debug, Clone, PartialEq)]
pub struct BridgeConfig {
	/// Block fetches allowed to overlap per bridge
	pub max_in_flight: usize,
	/// Blocks buffered per subscriber before it starts lagging
	pub topic_capacity: usize,
	/// First resubscribe delay
	pub min_backoff: Duration,
	/// Upper bound for resubscribe delays
	pub max_backoff: Duration,
}

impl Default for BridgeConfig {
	fn default() -> Self {
		Self {
			max_in_flight: 4,
			topic_capacity: 128,
			min_backoff: Duration::from_millis(500),
			max_backoff: Duration::from_secs(60),
		}
	}
}

impl BridgeConfig {
	pub fn from_gateway_config(config: &GatewayConfig) -> Self {
		Self {
			max_in_flight: config.bridge_max_in_flight,
			topic_capacity: config.topic_capacity,
			..Self::default()
		}
	}

	/// Fresh, unbounded sequence of resubscribe delays
	fn backoff(&self) -> impl Iterator<Item = Duration> {
		ExponentialBuilder::default()
			.with_min_delay(self.min_backoff)
			.with_max_delay(self.max_backoff)
			.with_jitter()
			.without_max_times()
			.build()
	}
}

/// Handle on a running bridge task
struct BridgeHandle {
	shutdown_tx: watch::Sender<bool>,
	state_rx: watch::Receiver<BridgeState>,
	task: JoinHandle<()>,
}

/// Owns the per-network topics and the bridges feeding them
pub struct BlockBridgeService {
	config: BridgeConfig,
	tracker: HeightTracker,
	topics: Arc<RwLock<HashMap<String, BlockTopic>>>,
	active_bridges: Arc<RwLock<HashMap<String, BridgeHandle>>>,
}

impl BlockBridgeService {
	pub fn new(config: BridgeConfig) -> Self {
		Self {
			config,
			tracker: HeightTracker::default(),
			topics: Arc::new(RwLock::new(HashMap::new())),
			active_bridges: Arc::new(RwLock::new(HashMap::new())),
		}
	}

	/// Topic of a network, created on first use
	pub async fn topic(&self, network_id: &str) -> BlockTopic {
		if let Some(topic) = self.topics.read().await.get(network_id) {
			return topic.clone();
		}
		self.topics
			.write()
			.await
			.entry(network_id.to_string())
			.or_insert_with(|| BlockTopic::new(network_id, self.config.topic_capacity))
			.clone()
	}

	/// Attaches a consumer to a network's topic
	///
	/// The consumer sees every block published after this call. A bridge need not be
	/// running yet.
	pub async fn subscribe(&self, network_id: &str) -> BlockSubscription {
		self.topic(network_id).await.subscribe()
	}

	/// Starts bridging `source`'s network from `feed`
	///
	/// Starting a network that already has a running bridge is a no-op.
	pub async fn start_network_bridge<F, S>(
		&self,
		feed: F,
		source: Arc<S>,
	) -> Result<(), BlockBridgeError>
	where
		F: EventFeed + 'static,
		S: ChainDataSource + 'static,
	{
		let network_id = source.network_id().to_string();
		let mut bridges = self.active_bridges.write().await;

		if bridges.contains_key(&network_id) {
			tracing::info!("Block bridge already running for network {}", network_id);
			return Ok(());
		}

		let topic = self.topic(&network_id).await;
		let (shutdown_tx, shutdown_rx) = watch::channel(false);
		let (state_tx, state_rx) = watch::channel(BridgeState::Disconnected);

		let bridge = NetworkBridge {
			network_id: network_id.clone(),
			feed,
			source,
			topic,
			tracker: self.tracker.clone(),
			config: self.config.clone(),
			state: Arc::new(state_tx),
		};
		let task = tokio::spawn(bridge.run(shutdown_rx));

		bridges.insert(
			network_id.clone(),
			BridgeHandle {
				shutdown_tx,
				state_rx,
				task,
			},
		);

		tracing::info!("Started block bridge for network {}", network_id);
		Ok(())
	}

	/// Stops a network's bridge and waits for its task to finish
	///
	/// Existing subscribers stay attached to the topic and resume receiving blocks if the
	/// bridge is started again.
	pub async fn stop_network_bridge(&self, network_id: &str) -> Result<(), BlockBridgeError> {
		let Some(handle) = self.active_bridges.write().await.remove(network_id) else {
			return Ok(());
		};

		let _ = handle.shutdown_tx.send(true);
		handle.task.await.map_err(|e| {
			BlockBridgeError::Other(anyhow::anyhow!(
				"Block bridge task for {} failed: {}",
				network_id,
				e
			))
		})?;

		tracing::info!("Stopped block bridge for network {}", network_id);
		Ok(())
	}

	/// Stops every running bridge
	pub async fn stop_all(&self) -> Result<(), BlockBridgeError> {
		for network_id in self.active_networks().await {
			self.stop_network_bridge(&network_id).await?;
		}
		Ok(())
	}

	/// Ids of networks with a running bridge, sorted
	pub async fn active_networks(&self) -> Vec<String> {
		let mut ids: Vec<String> = self.active_bridges.read().await.keys().cloned().collect();
		ids.sort();
		ids
	}

	/// Current state of a network's bridge
	pub async fn state(&self, network_id: &str) -> Option<BridgeState> {
		self.active_bridges
			.read()
			.await
			.get(network_id)
			.map(|handle| *handle.state_rx.borrow())
	}

	/// Receiver following a network's bridge state
	pub async fn watch_state(&self, network_id: &str) -> Option<watch::Receiver<BridgeState>> {
		self.active_bridges
			.read()
			.await
			.get(network_id)
			.map(|handle| handle.state_rx.clone())
	}
}

#[derive(Debug, PartialEq, Eq)]
enum PumpExit {
	Disconnected,
	Shutdown,
}

/// Background task state for one network
struct NetworkBridge<F, S> {
	network_id: String,
	feed: F,
	source: Arc<S>,
	topic: BlockTopic,
	tracker: HeightTracker,
	config: BridgeConfig,
	state: Arc<watch::Sender<BridgeState>>,
}

impl<F, S> NetworkBridge<F, S>
where
	F: EventFeed + 'static,
	S: ChainDataSource + 'static,
{
	#[instrument(skip_all, fields(network = %self.network_id))]
	async fn run(self, mut shutdown: watch::Receiver<bool>) {
		let mut backoff = self.config.backoff();
		let mut first_attempt = true;
		let mut failed_attempts: u32 = 0;

		loop {
			if *shutdown.borrow() {
				break;
			}
			if !first_attempt {
				BRIDGE_RECONNECTS
					.with_label_values(&[self.network_id.as_str()])
					.inc();
			}
			first_attempt = false;

			let subscribed = tokio::select! {
				_ = shutdown.changed() => break,
				result = self.feed.subscribe() => result,
			};

			match subscribed {
				Ok(events) => {
					backoff = self.config.backoff();
					failed_attempts = 0;
					set_state(&self.network_id, &self.state, BridgeState::Subscribed);
					tracing::info!("Subscribed to new block events");

					if self.pump(events, &mut shutdown).await == PumpExit::Shutdown {
						break;
					}
					set_state(&self.network_id, &self.state, BridgeState::Disconnected);
					tracing::warn!("Event feed disconnected, resubscribing");
				}
				Err(e) => {
					// Only the first failure of a streak is worth a warning
					if failed_attempts == 0 {
						tracing::warn!("Cannot subscribe to event feed: {}", e);
					} else {
						tracing::debug!(
							attempt = failed_attempts + 1,
							"Cannot subscribe to event feed: {}",
							e
						);
					}
					failed_attempts = failed_attempts.saturating_add(1);
				}
			}

			let delay = backoff.next().unwrap_or(self.config.max_backoff);
			tracing::debug!("Resubscribing in {}ms", delay.as_millis());
			tokio::select! {
				_ = shutdown.changed() => break,
				_ = tokio::time::sleep(delay) => {}
			}
		}

		set_state(&self.network_id, &self.state, BridgeState::Disconnected);
		tracing::info!("Block bridge stopped");
	}

	/// Drives one subscription until it ends or shutdown is requested
	async fn pump(&self, events: EventStream, shutdown: &mut watch::Receiver<bool>) -> PumpExit {
		let tracker = self.tracker.clone();
		let network_id = self.network_id.clone();
		let accepted = events.filter_map(move |event| {
			let tracker = tracker.clone();
			let network_id = network_id.clone();
			async move {
				match event {
					Ok(event) => {
						if tracker.record_height(&network_id, event.height).await {
							Some(event.height)
						} else {
							record_drop(&network_id, "stale_height");
							None
						}
					}
					Err(_) => {
						record_drop(&network_id, "malformed_event");
						None
					}
				}
			}
		});

		let source = self.source.clone();
		let state = self.state.clone();
		let network_id = self.network_id.clone();
		let mut fetched = accepted
			.map(move |height| {
				let source = source.clone();
				let state = state.clone();
				let network_id = network_id.clone();
				async move {
					set_state(&network_id, &state, BridgeState::Fetching);
					(height, source.get_block(Some(height)).await)
				}
			})
			.buffered(self.config.max_in_flight.max(1))
			.boxed();

		loop {
			let next = tokio::select! {
				_ = shutdown.changed() => return PumpExit::Shutdown,
				next = fetched.next() => next,
			};

			match next {
				Some((_, Ok(block))) => {
					set_state(&self.network_id, &self.state, BridgeState::Publishing);
					let height = block.height;
					let receivers = self.topic.publish(block);
					BLOCKS_PUBLISHED
						.with_label_values(&[self.network_id.as_str()])
						.inc();
					tracing::debug!("Published block {} to {} subscribers", height, receivers);
				}
				Some((height, Err(e))) => {
					BlockBridgeError::fetch_error(
						format!("Failed to fetch block {}", height),
						Some(Box::new(e)),
						Some(HashMap::from([
							("network_id".to_string(), self.network_id.clone()),
							("height".to_string(), height.to_string()),
						])),
					);
					record_drop(&self.network_id, "fetch_failed");
				}
				None => return PumpExit::Disconnected,
			}
			set_state(&self.network_id, &self.state, BridgeState::Subscribed);
		}
	}
}

fn set_state(network_id: &str, state: &watch::Sender<BridgeState>, next: BridgeState) {
	state.send_replace(next);
	BRIDGE_STATE
		.with_label_values(&[network_id])
		.set(next.as_gauge());
}

fn record_drop(network_id: &str, reason: &str) {
	EVENTS_DROPPED.with_label_values(&[network_id, reason]).inc();
}
