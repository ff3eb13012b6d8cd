//! In-process response cache.

use async_trait::async_trait;
use serde_json::Value;
use std::{
	collections::HashMap,
	sync::Arc,
	time::{Duration, Instant},
};
use tokio::sync::RwLock;

use crate::services::cache::{CacheError, ResponseCache};

#[derive(Debug, Clone)]
struct Entry {
	value: Value,
	expires_at: Instant,
}

/// Entry count at which a write first sweeps out expired entries
const DEFAULT_PURGE_THRESHOLD: usize = 1024;

#[derive(Debug)]
struct Store {
	entries: HashMap<String, Entry>,
	/// Size that triggers the next sweep on write
	purge_at: usize,
	min_purge_at: usize,
}

impl Store {
	fn with_threshold(threshold: usize) -> Self {
		let threshold = threshold.max(1);
		Self {
			entries: HashMap::new(),
			purge_at: threshold,
			min_purge_at: threshold,
		}
	}

	fn purge(&mut self, now: Instant) -> usize {
		let before = self.entries.len();
		self.entries.retain(|_, entry| entry.expires_at > now);
		// Next sweep once the live set has doubled
		self.purge_at = (self.entries.len() * 2).max(self.min_purge_at);
		before - self.entries.len()
	}
}

/// Cache held in a map inside the process
///
/// Expired entries are dropped when read, and swept in bulk on write once the map has
/// grown past its purge threshold.
#[derive(Debug, Clone)]
pub struct InMemoryCache {
	store: Arc<RwLock<Store>>,
}

impl Default for InMemoryCache {
	fn default() -> Self {
		Self::with_purge_threshold(DEFAULT_PURGE_THRESHOLD)
	}
}

impl InMemoryCache {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_purge_threshold(threshold: usize) -> Self {
		Self {
			store: Arc::new(RwLock::new(Store::with_threshold(threshold))),
		}
	}

	/// Removes every expired entry and returns how many were removed
	pub async fn purge_expired(&self) -> usize {
		self.store.write().await.purge(Instant::now())
	}

	pub async fn len(&self) -> usize {
		self.store.read().await.entries.len()
	}

	pub async fn is_empty(&self) -> bool {
		self.store.read().await.entries.is_empty()
	}
}

#[async_trait]
impl ResponseCache for InMemoryCache {
	async fn get(&self, key: &str) -> Result<Option<Value>, CacheError> {
		let now = Instant::now();
		{
			let store = self.store.read().await;
			match store.entries.get(key) {
				None => return Ok(None),
				Some(entry) if entry.expires_at > now => return Ok(Some(entry.value.clone())),
				Some(_) => {}
			}
		}

		let mut store = self.store.write().await;
		if store
			.entries
			.get(key)
			.is_some_and(|entry| entry.expires_at <= now)
		{
			store.entries.remove(key);
		}
		Ok(None)
	}

	async fn set(&self, key: &str, value: Value, ttl: Duration) -> Result<(), CacheError> {
		if ttl.is_zero() {
			return Ok(());
		}
		let now = Instant::now();
		let mut store = self.store.write().await;
		if store.entries.len() >= store.purge_at {
			let purged = store.purge(now);
			tracing::debug!(purged, remaining = store.entries.len(), "Swept response cache");
		}
		store.entries.insert(
			key.to_string(),
			Entry {
				value,
				expires_at: now + ttl,
			},
		);
		Ok(())
	}
}
