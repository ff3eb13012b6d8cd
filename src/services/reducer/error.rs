//! Reducer error types.
//!
//! Reducers are pure, so these constructors never log. The data source that called the
//! reducer decides whether the failure is worth reporting.

use crate::utils::logging::error::{ErrorContext, TraceableError};
use std::collections::HashMap;
use thiserror::Error as ThisError;
use uuid::Uuid;

/// Represents errors that can occur while normalizing an upstream payload
#[derive(ThisError, Debug)]
pub enum ReducerError {
	/// A required field is absent and has no sensible default
	#[error("Malformed payload: {0}")]
	MalformedPayload(ErrorContext),

	/// Other errors that don't fit into the categories above
	#[error(transparent)]
	Other(#[from] anyhow::Error),
}

impl ReducerError {
	pub fn malformed_payload(
		msg: impl Into<String>,
		source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
		metadata: Option<HashMap<String, String>>,
	) -> Self {
		Self::MalformedPayload(ErrorContext::new(msg, source, metadata))
	}
}

impl TraceableError for ReducerError {
	fn trace_id(&self) -> String {
		match self {
			Self::MalformedPayload(ctx) => ctx.trace_id.clone(),
			Self::Other(_) => Uuid::new_v4().to_string(),
		}
	}
}
