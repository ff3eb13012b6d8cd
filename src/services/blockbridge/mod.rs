//! Block event bridge.
//!
//! Turns a node's pushed "new block" events into canonical blocks published on a
//! per-network topic. Includes:
//!
//! - The event feed trait and its Tendermint websocket implementation
//! - The per-network broadcast topic and its subscription handles
//! - Height tracking for redelivered and missed events
//! - The bridge service that runs one task per network

mod error;
mod feed;
mod service;
mod topic;
mod tracker;

pub use error::BlockBridgeError;
pub use feed::{parse_new_block_event, EventFeed, EventStream, NewBlockEvent, TendermintEventFeed};
pub use service::{BlockBridgeService, BridgeConfig, BridgeState};
pub use topic::{BlockSubscription, BlockTopic, TopicRecvError};
pub use tracker::HeightTracker;
