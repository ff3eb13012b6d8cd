//! Block bridge error types and handling.
//!
//! Covers the event feed connection, event decoding, block fetches and height tracking.

use crate::utils::logging::error::{ErrorContext, TraceableError};
use std::collections::HashMap;
use thiserror::Error as ThisError;
use uuid::Uuid;

/// Represents possible errors that can occur while bridging block events
#[derive(ThisError, Debug)]
pub enum BlockBridgeError {
	/// The event feed could not be reached or refused the subscription
	#[error("Feed error: {0}")]
	FeedError(ErrorContext),

	/// A message on the feed could not be understood
	#[error("Event parse error: {0}")]
	EventParseError(ErrorContext),

	/// Fetching the block behind an event failed
	#[error("Fetch error: {0}")]
	FetchError(ErrorContext),

	/// Redelivered, out-of-order or missed heights
	#[error("Height tracker error: {0}")]
	HeightTrackerError(ErrorContext),

	/// Other errors that don't fit into the categories above
	#[error(transparent)]
	Other(#[from] anyhow::Error),
}

impl BlockBridgeError {
	// Feed error
	pub fn feed_error(
		msg: impl Into<String>,
		source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
		metadata: Option<HashMap<String, String>>,
	) -> Self {
		Self::FeedError(ErrorContext::new_with_log(msg, source, metadata))
	}

	// Event parse error
	pub fn event_parse_error(
		msg: impl Into<String>,
		source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
		metadata: Option<HashMap<String, String>>,
	) -> Self {
		Self::EventParseError(ErrorContext::new_with_log(msg, source, metadata))
	}

	// Fetch error
	pub fn fetch_error(
		msg: impl Into<String>,
		source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
		metadata: Option<HashMap<String, String>>,
	) -> Self {
		Self::FetchError(ErrorContext::new_with_log(msg, source, metadata))
	}

	// Height tracker error
	pub fn height_tracker_error(
		msg: impl Into<String>,
		source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
		metadata: Option<HashMap<String, String>>,
	) -> Self {
		Self::HeightTrackerError(ErrorContext::new_with_log(msg, source, metadata))
	}
}

impl TraceableError for BlockBridgeError {
	fn trace_id(&self) -> String {
		match self {
			Self::FeedError(ctx) => ctx.trace_id.clone(),
			Self::EventParseError(ctx) => ctx.trace_id.clone(),
			Self::FetchError(ctx) => ctx.trace_id.clone(),
			Self::HeightTrackerError(ctx) => ctx.trace_id.clone(),
			Self::Other(_) => Uuid::new_v4().to_string(),
		}
	}
}
