//! Payload shapes shared by every LCD-based family.
//!
//! Block and transaction responses did not diverge between the supported LCD versions, so
//! both families deserialize them into the same types.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::utils::deserialization::{lenient_string, null_as_default};

/// A `{denom, amount}` pair as served by the LCD, amount in base units
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LcdCoin {
	#[serde(default, deserialize_with = "lenient_string")]
	pub denom: String,
	#[serde(default, deserialize_with = "lenient_string")]
	pub amount: String,
}

/// Response of `blocks/{height}` and `blocks/latest`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LcdBlockResponse {
	pub block_meta: Option<LcdBlockMeta>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LcdBlockMeta {
	#[serde(default, deserialize_with = "null_as_default")]
	pub block_id: LcdBlockId,
	pub header: Option<LcdHeader>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LcdBlockId {
	#[serde(default, deserialize_with = "lenient_string")]
	pub hash: String,
}

/// Tendermint block header; numeric fields arrive as strings
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LcdHeader {
	#[serde(default, deserialize_with = "lenient_string")]
	pub height: String,
	#[serde(default, deserialize_with = "lenient_string")]
	pub chain_id: String,
	#[serde(default, deserialize_with = "lenient_string")]
	pub time: String,
	#[serde(default, deserialize_with = "lenient_string")]
	pub num_txs: String,
	#[serde(default, deserialize_with = "lenient_string")]
	pub proposer_address: String,
}

/// Response of `txs/{hash}`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LcdTxResponse {
	#[serde(default, deserialize_with = "lenient_string")]
	pub txhash: String,
	#[serde(default, deserialize_with = "lenient_string")]
	pub height: String,
	#[serde(default, deserialize_with = "lenient_string")]
	pub timestamp: String,
	#[serde(default, deserialize_with = "lenient_string")]
	pub gas_used: String,
	#[serde(default, deserialize_with = "lenient_string")]
	pub gas_wanted: String,
	#[serde(default, deserialize_with = "null_as_default")]
	pub logs: Vec<LcdTxLog>,
	pub tx: Option<LcdStdTx>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LcdTxLog {
	#[serde(default, deserialize_with = "null_as_default")]
	pub success: bool,
	#[serde(default, deserialize_with = "lenient_string")]
	pub log: String,
}

/// Amino-encoded `auth/StdTx`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LcdStdTx {
	#[serde(default, deserialize_with = "null_as_default")]
	pub value: LcdTxValue,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LcdTxValue {
	#[serde(default, deserialize_with = "null_as_default")]
	pub msg: Vec<LcdTxMessage>,
	#[serde(default, deserialize_with = "null_as_default")]
	pub fee: LcdTxFee,
	#[serde(default, deserialize_with = "null_as_default")]
	pub signatures: Vec<LcdTxSignature>,
	#[serde(default, deserialize_with = "lenient_string")]
	pub memo: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LcdTxMessage {
	#[serde(rename = "type", default, deserialize_with = "lenient_string")]
	pub type_: String,
	#[serde(default)]
	pub value: Value,
}

/// Fee block; `amount` is a coin array on current nodes and a bare coin on older ones
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LcdTxFee {
	#[serde(default)]
	pub amount: Value,
	#[serde(default, deserialize_with = "lenient_string")]
	pub gas: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LcdTxSignature {
	#[serde(default, deserialize_with = "lenient_string")]
	pub signature: String,
}
