//! LCD REST client implementation.
//!
//! This module provides the data source shared by every LCD family. The family decides the
//! raw payload shapes and the reducers; the client decides the paths and the transport.

use std::{collections::HashMap, marker::PhantomData};

use anyhow::Context;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::instrument;

use crate::{
	models::{
		Balance, Block, ChainFamily, Delegation, LcdBlockResponse, LcdTxResponse, NetworkConfig,
		Proposal, Transaction, Validator,
	},
	services::{
		blockchain::{
			client::ChainDataSource,
			transports::{HttpTransportClient, RestTransport},
			BlockChainError,
		},
		reducer::{FamilyReducer, ReducerContext},
	},
	utils::{http::HttpClientConfig, metrics::UPSTREAM_REQUESTS},
};

/// Client implementation for LCD-based networks
///
/// Provides access to governance, staking, bank and block data through an HTTP transport.
/// `R` selects the family's reducers.
#[derive(Clone)]
pub struct LcdClient<R: FamilyReducer, T: Send + Sync + Clone> {
	/// The underlying transport for REST communication
	http_client: T,
	/// Network id and address prefix handed to the reducers
	ctx: ReducerContext,
	_reducer: PhantomData<fn() -> R>,
}

impl<R: FamilyReducer, T: Send + Sync + Clone> LcdClient<R, T> {
	/// Creates a new client instance with a specific transport
	pub fn new_with_transport(http_client: T, network: &NetworkConfig) -> Self {
		Self {
			http_client,
			ctx: ReducerContext::for_network(network),
			_reducer: PhantomData,
		}
	}
}

impl<R: FamilyReducer> LcdClient<R, HttpTransportClient> {
	/// Creates a new client instance talking to the network's `api_url`
	///
	/// # Arguments
	/// * `network` - Network configuration containing the API URL and address prefix
	/// * `config` - HTTP timeouts and pool settings
	///
	/// # Returns
	/// * `Result<Self, anyhow::Error>` - New client instance or configuration error
	pub fn new(network: &NetworkConfig, config: &HttpClientConfig) -> Result<Self, anyhow::Error> {
		let transport = HttpTransportClient::new(network, config)
			.with_context(|| format!("Failed to create transport for {}", network.id))?;
		Ok(Self::new_with_transport(transport, network))
	}
}

impl<R: FamilyReducer, T: RestTransport> LcdClient<R, T> {
	fn metadata(&self, operation: &str) -> HashMap<String, String> {
		HashMap::from([
			("network_id".to_string(), self.ctx.network_id.clone()),
			("operation".to_string(), operation.to_string()),
		])
	}

	async fn fetch(&self, operation: &str, path: &str) -> Result<Value, BlockChainError> {
		UPSTREAM_REQUESTS
			.with_label_values(&[self.ctx.network_id.as_str(), operation])
			.inc();
		Ok(self.http_client.send_get_request(path).await?)
	}

	fn decode<P: DeserializeOwned>(
		&self,
		operation: &str,
		payload: Value,
	) -> Result<P, BlockChainError> {
		serde_json::from_value(payload).map_err(|e| {
			BlockChainError::malformed_payload(
				format!("Unexpected {} payload", operation),
				Some(Box::new(e)),
				Some(self.metadata(operation)),
			)
		})
	}

	/// Decodes a list payload; anything other than a list yields an empty list
	fn decode_list<P: DeserializeOwned>(
		&self,
		operation: &str,
		payload: Value,
	) -> Result<Vec<P>, BlockChainError> {
		match payload {
			Value::Array(items) => items
				.into_iter()
				.map(|item| self.decode(operation, item))
				.collect(),
			other => {
				tracing::debug!(
					network = %self.ctx.network_id,
					operation,
					"Expected a list, got {}",
					json_kind(&other)
				);
				Ok(Vec::new())
			}
		}
	}
}

fn json_kind(value: &Value) -> &'static str {
	match value {
		Value::Null => "null",
		Value::Bool(_) => "a boolean",
		Value::Number(_) => "a number",
		Value::String(_) => "a string",
		Value::Array(_) => "a list",
		Value::Object(_) => "an object",
	}
}

#[async_trait]
impl<R: FamilyReducer, T: RestTransport + 'static> ChainDataSource for LcdClient<R, T> {
	fn network_id(&self) -> &str {
		&self.ctx.network_id
	}

	fn family(&self) -> ChainFamily {
		R::FAMILY
	}

	#[instrument(skip(self), fields(network = %self.ctx.network_id))]
	async fn get_proposals(&self) -> Result<Vec<Proposal>, BlockChainError> {
		let payload = self.fetch("proposals", "gov/proposals").await?;
		let raw: Vec<R::RawProposal> = self.decode_list("proposals", payload)?;
		raw.iter()
			.map(|proposal| R::reduce_proposal(proposal, &self.ctx).map_err(Into::into))
			.collect()
	}

	#[instrument(skip(self), fields(network = %self.ctx.network_id))]
	async fn get_proposal(&self, proposal_id: u64) -> Result<Proposal, BlockChainError> {
		let payload = self
			.fetch("proposal", &format!("gov/proposals/{}", proposal_id))
			.await?;
		let raw: R::RawProposal = self.decode("proposal", payload)?;
		Ok(R::reduce_proposal(&raw, &self.ctx)?)
	}

	#[instrument(skip(self), fields(network = %self.ctx.network_id))]
	async fn get_validators(&self) -> Result<Vec<Validator>, BlockChainError> {
		let payload = self.fetch("validators", "staking/validators").await?;
		let raw: Vec<R::RawValidator> = self.decode_list("validators", payload)?;
		Ok(raw
			.iter()
			.map(|validator| R::reduce_validator(validator, &self.ctx))
			.collect())
	}

	#[instrument(skip(self), fields(network = %self.ctx.network_id))]
	async fn get_validator(&self, operator_address: &str) -> Result<Validator, BlockChainError> {
		let payload = self
			.fetch(
				"validator",
				&format!("staking/validators/{}", operator_address),
			)
			.await?;
		let raw: R::RawValidator = self.decode("validator", payload)?;
		Ok(R::reduce_validator(&raw, &self.ctx))
	}

	#[instrument(skip(self), fields(network = %self.ctx.network_id))]
	async fn get_block(&self, height: Option<u64>) -> Result<Block, BlockChainError> {
		let path = match height {
			Some(height) => format!("blocks/{}", height),
			None => "blocks/latest".to_string(),
		};
		let payload = self.fetch("block", &path).await?;
		let raw: LcdBlockResponse = self.decode("block", payload)?;
		Ok(R::reduce_block(&raw, &self.ctx)?)
	}

	#[instrument(skip(self), fields(network = %self.ctx.network_id))]
	async fn get_balances(&self, address: &str) -> Result<Vec<Balance>, BlockChainError> {
		let payload = self
			.fetch("balances", &format!("bank/balances/{}", address))
			.await?;
		Ok(R::reduce_balances(&payload, &self.ctx))
	}

	#[instrument(skip(self), fields(network = %self.ctx.network_id))]
	async fn get_delegations(&self, delegator: &str) -> Result<Vec<Delegation>, BlockChainError> {
		let payload = self
			.fetch(
				"delegations",
				&format!("staking/delegators/{}/delegations", delegator),
			)
			.await?;
		let raw: Vec<R::RawDelegation> = self.decode_list("delegations", payload)?;
		Ok(raw
			.iter()
			.map(|delegation| R::reduce_delegation(delegation, &self.ctx))
			.collect())
	}

	#[instrument(skip(self), fields(network = %self.ctx.network_id))]
	async fn get_delegation(
		&self,
		delegator: &str,
		validator: &str,
	) -> Result<Delegation, BlockChainError> {
		let payload = self
			.fetch(
				"delegation",
				&format!("staking/delegators/{}/delegations/{}", delegator, validator),
			)
			.await?;
		let raw: R::RawDelegation = self.decode("delegation", payload)?;
		Ok(R::reduce_delegation(&raw, &self.ctx))
	}

	#[instrument(skip(self), fields(network = %self.ctx.network_id))]
	async fn get_transaction(&self, hash: &str) -> Result<Transaction, BlockChainError> {
		let payload = self.fetch("transaction", &format!("txs/{}", hash)).await?;
		let raw: LcdTxResponse = self.decode("transaction", payload)?;
		Ok(R::reduce_transaction(&raw, &self.ctx)?)
	}
}
