//! Contextual errors shared by every service of the gateway.
//!
//! Each service error wraps an [`ErrorContext`]: a message, the upstream cause and string
//! metadata such as the network id or LCD path. A trace id follows the error through its
//! source chain, so one failed upstream call keeps the same id from the transport up to
//! the gateway log line.

use chrono::Utc;
use std::{collections::HashMap, error::Error, fmt};
use uuid::Uuid;

type BoxedSource = Box<dyn Error + Send + Sync + 'static>;

/// Sources inspected when looking for an inherited trace id
const TRACE_SEARCH_DEPTH: usize = 4;

/// Markers of an HTML error page returned by a proxy in front of a node
const HTML_MARKERS: [&str; 4] = ["<!doctype", "<html", "<head", "<body"];

/// Message, cause and metadata of a failure
#[derive(Debug)]
pub struct ErrorContext {
	pub message: String,
	pub source: Option<BoxedSource>,
	pub metadata: Option<HashMap<String, String>>,
	/// RFC 3339 creation time
	pub timestamp: String,
	/// Inherited from the source chain when possible, a fresh UUID v4 otherwise
	pub trace_id: String,
}

impl ErrorContext {
	pub fn new(
		message: impl Into<String>,
		source: Option<BoxedSource>,
		metadata: Option<HashMap<String, String>>,
	) -> Self {
		let trace_id = source
			.as_deref()
			.map(TraceableError::trace_id)
			.unwrap_or_else(|| Uuid::new_v4().to_string());

		Self {
			message: message.into(),
			source,
			metadata,
			timestamp: Utc::now().to_rfc3339(),
			trace_id,
		}
	}

	/// Same as [`ErrorContext::new`], and emits the error at `error` level
	pub fn new_with_log(
		message: impl Into<String>,
		source: Option<BoxedSource>,
		metadata: Option<HashMap<String, String>>,
	) -> Self {
		let context = Self::new(message, source, metadata);
		log_error(&context);
		context
	}

	pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.metadata
			.get_or_insert_with(HashMap::new)
			.insert(key.into(), value.into());
		self
	}

	/// `message [k1=v1, k2=v2]` with keys sorted, or the bare message without metadata
	pub fn format_with_metadata(&self) -> String {
		let Some(metadata) = self.metadata.as_ref().filter(|m| !m.is_empty()) else {
			return self.message.clone();
		};

		let mut pairs: Vec<(&String, &String)> = metadata.iter().collect();
		pairs.sort();
		let rendered: Vec<String> = pairs
			.into_iter()
			.map(|(key, value)| format!("{}={}", key, value))
			.collect();
		format!("{} [{}]", self.message, rendered.join(", "))
	}

	fn metadata_value(&self, key: &str) -> Option<&str> {
		self.metadata
			.as_ref()
			.and_then(|metadata| metadata.get(key))
			.map(String::as_str)
	}
}

impl fmt::Display for ErrorContext {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.format_with_metadata())
	}
}

impl Error for ErrorContext {
	fn source(&self) -> Option<&(dyn Error + 'static)> {
		self.source.as_deref().map(|e| e as &(dyn Error + 'static))
	}
}

/// Errors carrying a trace id
pub trait TraceableError: Error + Send + Sync {
	fn trace_id(&self) -> String;
}

impl TraceableError for dyn Error + Send + Sync + 'static {
	fn trace_id(&self) -> String {
		let mut current: Option<&(dyn Error + 'static)> = Some(self);
		for _ in 0..=TRACE_SEARCH_DEPTH {
			let Some(err) = current else {
				break;
			};
			if let Some(id) = known_trace_id(err) {
				return id;
			}
			current = err.source();
		}
		Uuid::new_v4().to_string()
	}
}

/// Trace id of `err` when it is one of the gateway's error types
fn known_trace_id(err: &(dyn Error + 'static)) -> Option<String> {
	if let Some(context) = err.downcast_ref::<ErrorContext>() {
		return Some(context.trace_id.clone());
	}

	macro_rules! trace_id_of {
		($($ty:path),* $(,)?) => {
			$(
				if let Some(e) = err.downcast_ref::<$ty>() {
					return Some(e.trace_id());
				}
			)*
		};
	}

	trace_id_of!(
		crate::services::blockchain::BlockChainError,
		crate::services::blockchain::TransportError,
		crate::services::reducer::ReducerError,
		crate::services::blockbridge::BlockBridgeError,
		crate::services::cache::CacheError,
		crate::repositories::RepositoryError,
		crate::models::ConfigError,
	);
	None
}

/// Cuts an HTML error page down to the text in front of it
fn strip_html(message: &str) -> &str {
	let lower = message.to_ascii_lowercase();
	HTML_MARKERS
		.iter()
		.filter_map(|marker| lower.find(marker))
		.min()
		.map_or(message, |start| message[..start].trim_end())
}

/// `err` followed by one "Caused by" line per source
fn format_error_chain(err: &dyn Error) -> String {
	let mut chain = strip_html(&err.to_string()).to_string();
	let mut source = err.source();
	while let Some(cause) = source {
		chain.push_str("\n\tCaused by: ");
		chain.push_str(strip_html(&cause.to_string()));
		source = cause.source();
	}
	chain
}

fn log_error(error: &ErrorContext) {
	let network = error.metadata_value("network_id").unwrap_or("-");
	match &error.source {
		Some(source) => tracing::error!(
			message = error.format_with_metadata(),
			trace_id = %error.trace_id,
			timestamp = %error.timestamp,
			network = %network,
			error.chain = %format_error_chain(source.as_ref()),
			"Error occurred"
		),
		None => tracing::error!(
			message = error.format_with_metadata(),
			trace_id = %error.trace_id,
			timestamp = %error.timestamp,
			network = %network,
			"Error occurred"
		),
	}
}
