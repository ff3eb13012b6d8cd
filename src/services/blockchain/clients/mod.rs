//! Chain data source implementations.
//!
//! Both supported families speak the legacy LCD REST API with the same path templates, so
//! a single client parameterized by the family's reducers serves both:
//! - Cosmos client for the Cosmos Hub
//! - Gaia client for the Gaia testnet

mod lcd {
	pub mod client;
}
mod source;

pub use lcd::client::LcdClient;
pub use source::ChainSource;

use crate::services::{
	blockchain::transports::HttpTransportClient,
	reducer::{CosmosReducer, GaiaReducer},
};

/// Data source for networks of the `cosmos` family
pub type CosmosClient<T = HttpTransportClient> = LcdClient<CosmosReducer, T>;

/// Data source for networks of the `gaia` family
pub type GaiaClient<T = HttpTransportClient> = LcdClient<GaiaReducer, T>;
