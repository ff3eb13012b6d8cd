//! Parsing utilities
//!
//! Helpers for values that arrive as strings from the command line or the environment.

use byte_unit::Byte;
use std::str::FromStr;

/// Parses a human-readable size such as "1GB", "500MB" or "1024KiB" into bytes
pub fn parse_byte_size(s: &str) -> Result<u64, String> {
	match Byte::from_str(s) {
		Ok(byte) => Ok(byte.as_u64()),
		Err(e) => Err(format!("Invalid size format: '{}'. Error: {}", s, e)),
	}
}

/// Normalizes a string by trimming whitespace and converting to lowercase.
pub fn normalize_string(input: &str) -> String {
	input.trim().to_lowercase()
}

/// Splits a comma separated list of network ids
///
/// Entries are trimmed, empty entries are skipped and duplicates keep their first position.
pub fn parse_network_list(s: &str) -> Vec<String> {
	let mut ids: Vec<String> = Vec::new();
	for id in s.split(',').map(str::trim).filter(|id| !id.is_empty()) {
		if !ids.iter().any(|existing| existing == id) {
			ids.push(id.to_string());
		}
	}
	ids
}

/// Extracts the port of a `HOST:PORT` address
pub fn port_of(address: &str) -> Option<u16> {
	address
		.rsplit_once(':')
		.and_then(|(_, port)| port.parse::<u16>().ok())
}
