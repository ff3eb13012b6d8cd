//! Chain family model implementations.
//!
//! This module contains type definitions for the raw payloads served by each
//! supported chain family. The shapes here mirror the upstream LCD REST API and are
//! only ever read by the reducers, which turn them into canonical records.

use serde::{Deserialize, Serialize};
use std::fmt;

pub mod cosmos;
pub mod gaia;
mod lcd;

pub use lcd::{
	LcdBlockId, LcdBlockMeta, LcdBlockResponse, LcdCoin, LcdHeader, LcdStdTx, LcdTxFee, LcdTxLog,
	LcdTxMessage, LcdTxResponse, LcdTxSignature, LcdTxValue,
};

/// Supported chain families
///
/// A family fixes the REST payload shapes, the bond denomination and the numeric scaling
/// convention of every network that belongs to it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ChainFamily {
	/// Cosmos Hub LCD (`proposal_id`, `proposal_content`, nested commission)
	Cosmos,
	/// Gaia testnet LCD (`id`, `content`, flat commission fields)
	Gaia,
}

impl ChainFamily {
	/// Returns the lowercase name used in configuration files and logs
	pub fn as_str(&self) -> &'static str {
		match self {
			ChainFamily::Cosmos => "cosmos",
			ChainFamily::Gaia => "gaia",
		}
	}
}

impl fmt::Display for ChainFamily {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}
