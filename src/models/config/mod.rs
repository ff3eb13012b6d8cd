//! Configuration loading and validation.
//!
//! Network files are loaded through [`ConfigLoader`]; process settings come from the
//! environment through [`GatewayConfig::from_env`].

#![allow(clippy::result_large_err)]

use async_trait::async_trait;
use std::path::Path;

mod error;
mod gateway_config;
mod network_config;

pub use error::ConfigError;
pub use gateway_config::GatewayConfig;

/// A configuration type stored as one JSON document per file
///
/// Network files are the only implementor today; the loader stays generic over the
/// collection it fills so repositories can pick their own map type.
#[async_trait]
pub trait ConfigLoader: Sized {
	/// Reads every `.json` file under `path`, or the default directory when `None`,
	/// keyed by the identifier of each document
	async fn load_all<T>(path: Option<&Path>) -> Result<T, ConfigError>
	where
		T: FromIterator<(String, Self)>;

	async fn load_from_path(path: &Path) -> Result<Self, ConfigError>;

	fn validate(&self) -> Result<(), ConfigError>;

	/// Warns about plain-text transports; never fails
	fn validate_protocol(&self);

	fn is_json_file(path: &Path) -> bool {
		path.extension()
			.is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
	}

	/// Fails when `current` shares its identifier with one of `loaded`
	///
	/// `file_path` only appears in the error metadata.
	fn validate_uniqueness(
		loaded: &[&Self],
		current: &Self,
		file_path: &str,
	) -> Result<(), ConfigError>;
}
