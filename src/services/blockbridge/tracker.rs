//! Height tracking for bridged block events.
//!
//! Events can be redelivered after a resubscribe and nodes occasionally skip heights. The
//! [`HeightTracker`] keeps a short history of accepted heights per network so that:
//! - Redelivered or out-of-order heights are rejected before any fetch happens
//! - Gaps between consecutive accepted heights are logged as missed blocks

use std::{
	collections::{HashMap, VecDeque},
	sync::Arc,
};
use tokio::sync::Mutex;

use crate::services::blockbridge::error::BlockBridgeError;

const DEFAULT_HISTORY_SIZE: usize = 100;

/// Tracks accepted block heights per network
#[derive(Clone, Debug)]
pub struct HeightTracker {
	/// Recently accepted heights
	/// Key: network id, Value: queue of heights, newest last
	history: Arc<Mutex<HashMap<String, VecDeque<u64>>>>,
	/// Maximum number of heights kept per network
	history_size: usize,
}

impl Default for HeightTracker {
	fn default() -> Self {
		Self::new(DEFAULT_HISTORY_SIZE)
	}
}

impl HeightTracker {
	pub fn new(history_size: usize) -> Self {
		Self {
			history: Arc::new(Mutex::new(HashMap::new())),
			history_size: history_size.max(1),
		}
	}

	/// Records a height if it moves the network forward
	///
	/// Returns `false`, and leaves the history untouched, when `height` is not above the
	/// last accepted height. Skipped heights are logged as missed but still accepted.
	pub async fn record_height(&self, network_id: &str, height: u64) -> bool {
		let mut history = self.history.lock().await;
		let network_history = history
			.entry(network_id.to_string())
			.or_insert_with(|| VecDeque::with_capacity(self.history_size));

		if let Some(&last) = network_history.back() {
			if height <= last {
				BlockBridgeError::height_tracker_error(
					format!(
						"Out of order or duplicate block detected: received {} after {}",
						height, last
					),
					None,
					Some(HashMap::from([(
						"network_id".to_string(),
						network_id.to_string(),
					)])),
				);
				return false;
			}

			if height > last + 1 {
				let message = if height == last + 2 {
					format!("Missed block {}", last + 1)
				} else {
					format!("Missed blocks {} to {}", last + 1, height - 1)
				};
				BlockBridgeError::height_tracker_error(
					message,
					None,
					Some(HashMap::from([(
						"network_id".to_string(),
						network_id.to_string(),
					)])),
				);
			}
		}

		network_history.push_back(height);
		while network_history.len() > self.history_size {
			network_history.pop_front();
		}
		true
	}

	/// Most recently accepted height for a network, if any
	pub async fn last_height(&self, network_id: &str) -> Option<u64> {
		self.history
			.lock()
			.await
			.get(network_id)
			.and_then(|history| history.back().copied())
	}
}
