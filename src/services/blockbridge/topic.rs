//! Per-network block topics.
//!
//! A topic has exactly one producer, the network's bridge, and any number of subscription
//! handles. Each handle owns its own slot in a bounded ring; a handle that falls more than
//! `capacity` blocks behind loses its oldest undelivered blocks and is told how many.

use futures::{stream::BoxStream, StreamExt};
use thiserror::Error as ThisError;
use tokio::sync::broadcast::{self, error::RecvError};

use crate::{
	models::Block,
	utils::metrics::{EVENTS_DROPPED, TOPIC_SUBSCRIBERS},
};

/// Why a subscription produced no block
#[derive(ThisError, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopicRecvError {
	/// The subscriber fell behind and this many blocks were skipped for it
	#[error("Subscriber lagged behind by {0} blocks")]
	Lagged(u64),

	/// The topic is gone and no more blocks will arrive
	#[error("Topic closed")]
	Closed,
}

/// Broadcast channel of canonical blocks for one network
#[derive(Clone, Debug)]
pub struct BlockTopic {
	network_id: String,
	sender: broadcast::Sender<Block>,
}

impl BlockTopic {
	pub fn new(network_id: impl Into<String>, capacity: usize) -> Self {
		let (sender, _) = broadcast::channel(capacity.max(1));
		Self {
			network_id: network_id.into(),
			sender,
		}
	}

	pub fn network_id(&self) -> &str {
		&self.network_id
	}

	/// Publishes a block to every current subscriber
	///
	/// Returns the number of subscribers that will see it. Publishing with no
	/// subscribers is not an error; the block is simply not retained.
	pub fn publish(&self, block: Block) -> usize {
		self.sender.send(block).unwrap_or(0)
	}

	/// Attaches a new subscriber that sees every block published from now on
	pub fn subscribe(&self) -> BlockSubscription {
		TOPIC_SUBSCRIBERS
			.with_label_values(&[self.network_id.as_str()])
			.inc();
		BlockSubscription {
			network_id: self.network_id.clone(),
			receiver: self.sender.subscribe(),
		}
	}

	pub fn subscriber_count(&self) -> usize {
		self.sender.receiver_count()
	}
}

/// A consumer's handle on a topic
///
/// Dropping the handle detaches the consumer without affecting anyone else.
#[derive(Debug)]
pub struct BlockSubscription {
	network_id: String,
	receiver: broadcast::Receiver<Block>,
}

impl BlockSubscription {
	pub fn network_id(&self) -> &str {
		&self.network_id
	}

	/// Waits for the next block
	///
	/// A `Lagged` result is reported once per overflow; the following call resumes with
	/// the oldest block still retained.
	pub async fn recv(&mut self) -> Result<Block, TopicRecvError> {
		match self.receiver.recv().await {
			Ok(block) => Ok(block),
			Err(RecvError::Lagged(skipped)) => {
				tracing::warn!(
					network = %self.network_id,
					"Subscriber lagged, skipped {} blocks",
					skipped
				);
				EVENTS_DROPPED
					.with_label_values(&[self.network_id.as_str(), "lagged"])
					.inc_by(skipped);
				Err(TopicRecvError::Lagged(skipped))
			}
			Err(RecvError::Closed) => Err(TopicRecvError::Closed),
		}
	}

	/// Converts the handle into a stream of blocks that steps over lag gaps
	///
	/// The stream ends when the topic closes.
	pub fn into_stream(self) -> BoxStream<'static, Block> {
		futures::stream::unfold(self, |mut subscription| async move {
			loop {
				match subscription.recv().await {
					Ok(block) => return Some((block, subscription)),
					Err(TopicRecvError::Lagged(_)) => continue,
					Err(TopicRecvError::Closed) => return None,
				}
			}
		})
		.boxed()
	}
}

impl Drop for BlockSubscription {
	fn drop(&mut self) {
		TOPIC_SUBSCRIBERS
			.with_label_values(&[self.network_id.as_str()])
			.dec();
	}
}
