use serde::{Deserialize, Serialize};

use crate::models::ChainFamily;

/// Static configuration of one served network.
///
/// Loaded once at startup from `config/networks/*.json` and never mutated afterwards. The
/// `action_*` and `feature_*` flags tell clients which operations are meaningful for the
/// network; the gateway itself serves every operation regardless.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct NetworkConfig {
	/// Globally unique identifier used for dispatch and topic names
	pub id: String,

	/// Human-readable name of the network
	pub title: String,

	/// Chain id reported by the nodes
	pub chain_id: String,

	/// Payload family served by `api_url`
	pub family: ChainFamily,

	/// Human-readable part of account addresses
	pub bech32_prefix: String,

	/// Base URL of the LCD REST API
	pub api_url: String,

	/// Base URL of the Tendermint RPC endpoint
	pub rpc_url: String,

	/// Explicit websocket endpoint, derived from `rpc_url` when absent
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub ws_url: Option<String>,

	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub logo_url: Option<String>,

	#[serde(default)]
	pub testnet: bool,

	#[serde(default)]
	pub experimental: bool,

	#[serde(default)]
	pub action_send: bool,
	#[serde(default)]
	pub action_claim_rewards: bool,
	#[serde(default)]
	pub action_delegate: bool,
	#[serde(default)]
	pub action_redelegate: bool,
	#[serde(default)]
	pub action_undelegate: bool,
	#[serde(default)]
	pub action_deposit: bool,
	#[serde(default)]
	pub action_vote: bool,
	#[serde(default)]
	pub action_proposal: bool,

	#[serde(default)]
	pub feature_session: bool,
	#[serde(default)]
	pub feature_explorer: bool,
	#[serde(default)]
	pub feature_portfolio: bool,
	#[serde(default)]
	pub feature_validators: bool,
	#[serde(default)]
	pub feature_activity: bool,
	#[serde(default)]
	pub feature_proposals: bool,
}

impl NetworkConfig {
	/// Websocket endpoint of the block event feed
	///
	/// Uses `ws_url` when configured, otherwise swaps the scheme of `rpc_url`
	/// (`http` to `ws`, `https` to `wss`) and appends the Tendermint `/websocket` path.
	pub fn event_feed_url(&self) -> String {
		if let Some(ws_url) = &self.ws_url {
			return ws_url.clone();
		}

		let base = self.rpc_url.trim_end_matches('/');
		let swapped = if let Some(rest) = base.strip_prefix("https://") {
			format!("wss://{}", rest)
		} else if let Some(rest) = base.strip_prefix("http://") {
			format!("ws://{}", rest)
		} else {
			base.to_string()
		};
		format!("{}/websocket", swapped)
	}
}
