//! The closed set of data sources a network can be served by.

use async_trait::async_trait;

use crate::{
	models::{
		Balance, Block, ChainFamily, Delegation, NetworkConfig, Proposal, Transaction, Validator,
	},
	services::blockchain::{
		client::ChainDataSource,
		clients::{CosmosClient, GaiaClient},
		transports::{HttpTransportClient, RestTransport},
		BlockChainError,
	},
	utils::http::HttpClientConfig,
};

/// One variant per supported network family
#[derive(Clone)]
pub enum ChainSource<T: RestTransport = HttpTransportClient> {
	Cosmos(CosmosClient<T>),
	Gaia(GaiaClient<T>),
}

impl<T: RestTransport> ChainSource<T> {
	/// Builds the source matching the network's family around an existing transport
	pub fn new_with_transport(network: &NetworkConfig, transport: T) -> Self {
		match network.family {
			ChainFamily::Cosmos => {
				Self::Cosmos(CosmosClient::<T>::new_with_transport(transport, network))
			}
			ChainFamily::Gaia => Self::Gaia(GaiaClient::<T>::new_with_transport(transport, network)),
		}
	}
}

impl ChainSource<HttpTransportClient> {
	/// Builds the source matching the network's family over HTTP
	pub fn from_network(
		network: &NetworkConfig,
		config: &HttpClientConfig,
	) -> Result<Self, anyhow::Error> {
		let transport = HttpTransportClient::new(network, config)?;
		Ok(Self::new_with_transport(network, transport))
	}
}

macro_rules! delegate {
	($self:ident, $source:ident => $call:expr) => {
		match $self {
			ChainSource::Cosmos($source) => $call,
			ChainSource::Gaia($source) => $call,
		}
	};
}

#[async_trait]
impl<T: RestTransport + 'static> ChainDataSource for ChainSource<T> {
	fn network_id(&self) -> &str {
		delegate!(self, source => source.network_id())
	}

	fn family(&self) -> ChainFamily {
		delegate!(self, source => source.family())
	}

	async fn get_proposals(&self) -> Result<Vec<Proposal>, BlockChainError> {
		delegate!(self, source => source.get_proposals().await)
	}

	async fn get_proposal(&self, proposal_id: u64) -> Result<Proposal, BlockChainError> {
		delegate!(self, source => source.get_proposal(proposal_id).await)
	}

	async fn get_validators(&self) -> Result<Vec<Validator>, BlockChainError> {
		delegate!(self, source => source.get_validators().await)
	}

	async fn get_validator(&self, operator_address: &str) -> Result<Validator, BlockChainError> {
		delegate!(self, source => source.get_validator(operator_address).await)
	}

	async fn get_block(&self, height: Option<u64>) -> Result<Block, BlockChainError> {
		delegate!(self, source => source.get_block(height).await)
	}

	async fn get_balances(&self, address: &str) -> Result<Vec<Balance>, BlockChainError> {
		delegate!(self, source => source.get_balances(address).await)
	}

	async fn get_delegations(&self, delegator: &str) -> Result<Vec<Delegation>, BlockChainError> {
		delegate!(self, source => source.get_delegations(delegator).await)
	}

	async fn get_delegation(
		&self,
		delegator: &str,
		validator: &str,
	) -> Result<Delegation, BlockChainError> {
		delegate!(self, source => source.get_delegation(delegator, validator).await)
	}

	async fn get_transaction(&self, hash: &str) -> Result<Transaction, BlockChainError> {
		delegate!(self, source => source.get_transaction(hash).await)
	}
}
