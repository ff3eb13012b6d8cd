//! Lenient field deserializers for upstream payloads
//!
//! LCD versions disagree on whether numeric fields are JSON numbers or strings, and
//! proxies sometimes send `null` for fields that are normally present. These helpers accept
//! every such variation so a shape drift degrades to a sentinel instead of failing the
//! whole record.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

fn value_to_string(value: Value) -> Option<String> {
	match value {
		Value::Null => None,
		Value::String(s) => Some(s),
		Value::Number(n) => Some(n.to_string()),
		Value::Bool(b) => Some(b.to_string()),
		other => Some(other.to_string()),
	}
}

/// Deserializes strings, numbers and booleans into a `String`, `null` into `""`
pub fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
	D: Deserializer<'de>,
{
	let value = Option::<Value>::deserialize(deserializer)?;
	Ok(value.and_then(value_to_string).unwrap_or_default())
}

/// Like [`lenient_string`] but keeps `null` as `None`
pub fn lenient_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
	D: Deserializer<'de>,
{
	let value = Option::<Value>::deserialize(deserializer)?;
	Ok(value.and_then(value_to_string))
}

/// Deserializes `2`, `"2"` or `null` into an optional `u64`
///
/// Anything that does not parse as an unsigned integer becomes `None`.
pub fn lenient_u64<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
	D: Deserializer<'de>,
{
	let value = Option::<Value>::deserialize(deserializer)?;
	Ok(match value {
		Some(Value::Number(n)) => n.as_u64(),
		Some(Value::String(s)) => s.trim().parse::<u64>().ok(),
		_ => None,
	})
}

/// Deserializes `null` into `T::default()`
///
/// Amino JSON encodes empty lists and absent sub-objects as `null`; `#[serde(default)]` only
/// covers a missing key.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
	D: Deserializer<'de>,
	T: Default + Deserialize<'de>,
{
	Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
