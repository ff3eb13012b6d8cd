//! Response cache for the request path.
//!
//! The gateway asks the cache before dispatching a request and stores the canonical result
//! afterwards. Entries are keyed by [`request_fingerprint`] so identical requests against
//! the same network share one entry.

mod error;
mod memory;

pub use error::CacheError;
pub use memory::InMemoryCache;

use async_trait::async_trait;
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::time::Duration;

/// Get/set-with-TTL store for serialized responses
#[async_trait]
pub trait ResponseCache: Send + Sync {
	/// Returns the stored value, or `None` when absent or expired
	async fn get(&self, key: &str) -> Result<Option<Value>, CacheError>;

	/// Stores `value` under `key` for `ttl`
	async fn set(&self, key: &str, value: Value, ttl: Duration) -> Result<(), CacheError>;
}

/// Deterministic cache key for one request
///
/// Each part is length-prefixed before hashing, so `("ab", "c")` and `("a", "bc")` never
/// collide.
pub fn request_fingerprint(network_id: &str, operation: &str, args: &[&str]) -> String {
	let mut hasher = Sha256::new();
	for part in [network_id, operation].iter().chain(args.iter()) {
		hasher.update((part.len() as u64).to_be_bytes());
		hasher.update(part.as_bytes());
	}
	hex::encode(hasher.finalize())
}
