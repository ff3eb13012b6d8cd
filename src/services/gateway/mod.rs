//! Request surface of the gateway.
//!
//! [`GatewayService`] is what an outer transport layer talks to. Every chain operation goes
//! through network dispatch first, so an unknown network id fails before any cache or
//! upstream access. Results are optionally kept in a [`ResponseCache`] keyed by
//! [`request_fingerprint`].

use serde::{de::DeserializeOwned, Serialize};
use std::{collections::HashMap, future::Future, sync::Arc, time::Duration};
use tracing::{instrument, warn};

use crate::{
	models::{
		Balance, Block, Delegation, NetworkConfig, Proposal, Transaction, Validator,
	},
	repositories::{NetworkRepository, NetworkRepositoryTrait},
	services::{
		blockbridge::{BlockBridgeService, BlockSubscription},
		blockchain::{BlockChainError, ChainDataSource, ChainSource, SourceRegistry},
		cache::{request_fingerprint, CacheError, InMemoryCache, ResponseCache},
	},
	utils::metrics::{CACHE_HITS, CACHE_MISSES},
};

/// Dispatching, caching front of the chain data sources
pub struct GatewayService<S = ChainSource, C = InMemoryCache> {
	registry: SourceRegistry<S>,
	networks: NetworkRepository,
	cache: Option<Arc<C>>,
	cache_ttl: Duration,
	bridges: Arc<BlockBridgeService>,
}

impl<S, C> GatewayService<S, C>
where
	S: ChainDataSource + 'static,
	C: ResponseCache + 'static,
{
	/// Creates a gateway without a response cache
	pub fn new(
		registry: SourceRegistry<S>,
		networks: NetworkRepository,
		bridges: Arc<BlockBridgeService>,
	) -> Self {
		Self {
			registry,
			networks,
			cache: None,
			cache_ttl: Duration::ZERO,
			bridges,
		}
	}

	/// Serves repeated requests from `cache` for `ttl`
	pub fn with_cache(mut self, cache: Arc<C>, ttl: Duration) -> Self {
		self.cache = Some(cache);
		self.cache_ttl = ttl;
		self
	}

	pub fn registry(&self) -> &SourceRegistry<S> {
		&self.registry
	}

	pub fn bridges(&self) -> Arc<BlockBridgeService> {
		self.bridges.clone()
	}

	/// All served networks, sorted by id
	pub fn networks(&self) -> Vec<NetworkConfig> {
		self.networks.get_all()
	}

	pub fn network(&self, network_id: &str) -> Option<NetworkConfig> {
		self.networks.get(network_id)
	}

	pub async fn proposals(&self, network_id: &str) -> Result<Vec<Proposal>, BlockChainError> {
		self.cached(network_id, "proposals", &[], |source| async move {
			source.get_proposals().await
		})
		.await
	}

	pub async fn proposal(
		&self,
		network_id: &str,
		proposal_id: u64,
	) -> Result<Proposal, BlockChainError> {
		let id = proposal_id.to_string();
		self.cached(network_id, "proposal", &[&id], |source| async move {
			source.get_proposal(proposal_id).await
		})
		.await
	}

	/// Validators of a network, optionally restricted to the given operator addresses
	///
	/// The full set is cached; the restriction is applied afterwards and keeps the
	/// upstream order.
	pub async fn validators(
		&self,
		network_id: &str,
		address_list: Option<&[String]>,
	) -> Result<Vec<Validator>, BlockChainError> {
		let validators: Vec<Validator> = self
			.cached(network_id, "validators", &[], |source| async move {
				source.get_validators().await
			})
			.await?;

		Ok(match address_list {
			Some(addresses) => validators
				.into_iter()
				.filter(|validator| addresses.contains(&validator.operator_address))
				.collect(),
			None => validators,
		})
	}

	pub async fn validator(
		&self,
		network_id: &str,
		operator_address: &str,
	) -> Result<Validator, BlockChainError> {
		self.cached(
			network_id,
			"validator",
			&[operator_address],
			|source| async move { source.get_validator(operator_address).await },
		)
		.await
	}

	/// A block by height, or the latest block when `height` is `None`
	///
	/// The latest block changes with every new block and is never cached.
	pub async fn block(
		&self,
		network_id: &str,
		height: Option<u64>,
	) -> Result<Block, BlockChainError> {
		match height {
			Some(height) => {
				let arg = height.to_string();
				self.cached(network_id, "block", &[&arg], |source| async move {
					source.get_block(Some(height)).await
				})
				.await
			}
			None => self.registry.dispatch(network_id)?.get_block(None).await,
		}
	}

	pub async fn balances(
		&self,
		network_id: &str,
		address: &str,
	) -> Result<Vec<Balance>, BlockChainError> {
		self.cached(network_id, "balances", &[address], |source| async move {
			source.get_balances(address).await
		})
		.await
	}

	pub async fn delegations(
		&self,
		network_id: &str,
		delegator: &str,
	) -> Result<Vec<Delegation>, BlockChainError> {
		self.cached(network_id, "delegations", &[delegator], |source| async move {
			source.get_delegations(delegator).await
		})
		.await
	}

	pub async fn delegation(
		&self,
		network_id: &str,
		delegator: &str,
		validator: &str,
	) -> Result<Delegation, BlockChainError> {
		self.cached(
			network_id,
			"delegation",
			&[delegator, validator],
			|source| async move { source.get_delegation(delegator, validator).await },
		)
		.await
	}

	pub async fn transaction(
		&self,
		network_id: &str,
		hash: &str,
	) -> Result<Transaction, BlockChainError> {
		self.cached(network_id, "transaction", &[hash], |source| async move {
			source.get_transaction(hash).await
		})
		.await
	}

	/// Attaches a consumer to the block topic of a served network
	///
	/// # Errors
	/// Returns `BlockChainError::UnknownNetwork` when no source serves `network_id`.
	pub async fn subscribe_blocks(
		&self,
		network_id: &str,
	) -> Result<BlockSubscription, BlockChainError> {
		self.registry.dispatch(network_id)?;
		Ok(self.bridges.subscribe(network_id).await)
	}

	#[instrument(skip(self, args, fetch), fields(network = %network_id))]
	async fn cached<T, F, Fut>(
		&self,
		network_id: &str,
		operation: &'static str,
		args: &[&str],
		fetch: F,
	) -> Result<T, BlockChainError>
	where
		T: Serialize + DeserializeOwned,
		F: FnOnce(Arc<S>) -> Fut,
		Fut: Future<Output = Result<T, BlockChainError>>,
	{
		let source = self.registry.dispatch(network_id)?;
		let Some(cache) = &self.cache else {
			return fetch(source).await;
		};

		let key = request_fingerprint(network_id, operation, args);
		let metadata = || {
			HashMap::from([
				("network_id".to_string(), network_id.to_string()),
				("operation".to_string(), operation.to_string()),
			])
		};

		match cache.get(&key).await {
			Ok(Some(value)) => match serde_json::from_value::<T>(value) {
				Ok(hit) => {
					CACHE_HITS
						.with_label_values(&[network_id, operation])
						.inc();
					return Ok(hit);
				}
				Err(e) => {
					CacheError::serialization_error(
						"Failed to decode cached response",
						Some(Box::new(e)),
						Some(metadata()),
					);
				}
			},
			Ok(None) => {}
			Err(e) => warn!("Cache lookup failed, fetching upstream: {}", e),
		}
		CACHE_MISSES
			.with_label_values(&[network_id, operation])
			.inc();

		let result = fetch(source).await?;
		match serde_json::to_value(&result) {
			Ok(value) => {
				if let Err(e) = cache.set(&key, value, self.cache_ttl).await {
					warn!("Failed to store response in cache: {}", e);
				}
			}
			Err(e) => {
				CacheError::serialization_error(
					"Failed to encode response for cache",
					Some(Box::new(e)),
					Some(metadata()),
				);
			}
		}
		Ok(result)
	}
}
