//! Chain data source error types and handling.
//!
//! Covers the three failure kinds a request can end in (transport, unknown network and
//! malformed payload) plus registry construction and internal failures.

use crate::{
	services::{blockchain::transports::TransportError, reducer::ReducerError},
	utils::logging::error::{ErrorContext, TraceableError},
};
use std::collections::HashMap;
use thiserror::Error as ThisError;
use uuid::Uuid;

/// Represents possible errors that can occur during chain data operations
#[derive(ThisError, Debug)]
pub enum BlockChainError {
	/// The upstream node could not be reached or answered with an error status
	#[error("Transport error: {0}")]
	Transport(#[from] TransportError),

	/// No data source is registered for the requested network id
	#[error("Unknown network: {0}")]
	UnknownNetwork(ErrorContext),

	/// The upstream payload lacks a field that has no default
	#[error("Malformed payload: {0}")]
	MalformedPayload(ErrorContext),

	/// The source registry could not be built from the configured networks
	#[error("Source registry error: {0}")]
	RegistryError(ErrorContext),

	/// Internal errors within the data source
	#[error("Internal error: {0}")]
	InternalError(ErrorContext),

	/// Other errors that don't fit into the categories above
	#[error(transparent)]
	Other(#[from] anyhow::Error),
}

impl BlockChainError {
	// Unknown network
	pub fn unknown_network(
		msg: impl Into<String>,
		source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
		metadata: Option<HashMap<String, String>>,
	) -> Self {
		Self::UnknownNetwork(ErrorContext::new_with_log(msg, source, metadata))
	}

	// Malformed payload
	pub fn malformed_payload(
		msg: impl Into<String>,
		source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
		metadata: Option<HashMap<String, String>>,
	) -> Self {
		Self::MalformedPayload(ErrorContext::new_with_log(msg, source, metadata))
	}

	// Registry error
	pub fn registry_error(
		msg: impl Into<String>,
		source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
		metadata: Option<HashMap<String, String>>,
	) -> Self {
		Self::RegistryError(ErrorContext::new_with_log(msg, source, metadata))
	}

	// Internal error
	pub fn internal_error(
		msg: impl Into<String>,
		source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
		metadata: Option<HashMap<String, String>>,
	) -> Self {
		Self::InternalError(ErrorContext::new_with_log(msg, source, metadata))
	}
}

impl From<ReducerError> for BlockChainError {
	fn from(error: ReducerError) -> Self {
		Self::malformed_payload(
			"Failed to normalize upstream payload",
			Some(Box::new(error)),
			None,
		)
	}
}

impl TraceableError for BlockChainError {
	fn trace_id(&self) -> String {
		match self {
			Self::Transport(err) => err.trace_id(),
			Self::UnknownNetwork(ctx) => ctx.trace_id.clone(),
			Self::MalformedPayload(ctx) => ctx.trace_id.clone(),
			Self::RegistryError(ctx) => ctx.trace_id.clone(),
			Self::InternalError(ctx) => ctx.trace_id.clone(),
			Self::Other(_) => Uuid::new_v4().to_string(),
		}
	}
}
