//! Prometheus metrics of the gateway.
//!
//! Everything is registered in [`REGISTRY`], which the metrics server encodes on scrape.
//! Per-network series are labelled with the network id.

pub mod server;

use lazy_static::lazy_static;
use prometheus::{
	core::Collector, Encoder, Gauge, IntCounterVec, IntGauge, IntGaugeVec, Opts, Registry,
	TextEncoder,
};
use sysinfo::System;

/// Adds `metric` to the global registry and hands it back
fn registered<M: Collector + Clone + 'static>(metric: M) -> M {
	REGISTRY.register(Box::new(metric.clone())).unwrap();
	metric
}

fn counter_vec(name: &str, help: &str, labels: &[&str]) -> IntCounterVec {
	registered(IntCounterVec::new(Opts::new(name, help), labels).unwrap())
}

fn gauge_vec(name: &str, help: &str, labels: &[&str]) -> IntGaugeVec {
	registered(IntGaugeVec::new(Opts::new(name, help), labels).unwrap())
}

lazy_static! {
	pub static ref REGISTRY: Registry = Registry::new();

	/// Host CPU usage, 0-100 across all cores
	pub static ref CPU_USAGE: Gauge =
		registered(Gauge::new("cpu_usage_percentage", "Current CPU usage percentage").unwrap());

	pub static ref MEMORY_USAGE: Gauge =
		registered(Gauge::new("memory_usage_bytes", "Memory usage in bytes").unwrap());

	pub static ref TOTAL_MEMORY: Gauge =
		registered(Gauge::new("total_memory_bytes", "Total memory in bytes").unwrap());

	/// Set once the network registry is loaded
	pub static ref CONFIGURED_NETWORKS: IntGauge =
		registered(IntGauge::new("configured_networks", "Number of configured networks").unwrap());

	/// Upstream REST requests, labelled by network and data source operation
	pub static ref UPSTREAM_REQUESTS: IntCounterVec = counter_vec(
		"upstream_requests_total",
		"Upstream REST requests per network and operation",
		&["network", "operation"],
	);

	pub static ref BLOCKS_PUBLISHED: IntCounterVec = counter_vec(
		"blocks_published_total",
		"Blocks published to subscribers per network",
		&["network"],
	);

	/// Block events that never reached a subscriber
	///
	/// Reasons: `fetch_failed`, `stale_height`, `malformed_event` and `lagged`. Lagged drops
	/// are counted once per subscriber.
	pub static ref EVENTS_DROPPED: IntCounterVec = counter_vec(
		"block_events_dropped_total",
		"Block events dropped per network and reason",
		&["network", "reason"],
	);

	pub static ref BRIDGE_RECONNECTS: IntCounterVec = counter_vec(
		"bridge_reconnects_total",
		"Event feed resubscriptions per network",
		&["network"],
	);

	/// 0 disconnected, 1 subscribed, 2 fetching, 3 publishing
	pub static ref BRIDGE_STATE: IntGaugeVec = gauge_vec(
		"bridge_state",
		"Block bridge state per network",
		&["network"],
	);

	pub static ref TOPIC_SUBSCRIBERS: IntGaugeVec = gauge_vec(
		"topic_subscribers",
		"Block topic subscribers per network",
		&["network"],
	);

	pub static ref CACHE_HITS: IntCounterVec = counter_vec(
		"cache_hits_total",
		"Response cache hits per network and operation",
		&["network", "operation"],
	);

	pub static ref CACHE_MISSES: IntCounterVec = counter_vec(
		"cache_misses_total",
		"Response cache misses per network and operation",
		&["network", "operation"],
	);
}

/// Encodes every registered metric in the Prometheus text format
pub fn gather_metrics() -> Result<Vec<u8>, Box<dyn std::error::Error>> {
	let mut buffer = Vec::new();
	TextEncoder::new().encode(&REGISTRY.gather(), &mut buffer)?;
	Ok(buffer)
}

/// Samples host CPU and memory into their gauges
pub fn update_system_metrics() {
	let mut sys = System::new();
	sys.refresh_cpu_usage();
	sys.refresh_memory();

	CPU_USAGE.set(f64::from(sys.global_cpu_usage()));
	TOTAL_MEMORY.set(sys.total_memory() as f64);
	MEMORY_USAGE.set(sys.used_memory() as f64);
}
