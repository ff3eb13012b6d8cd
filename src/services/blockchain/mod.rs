//! Chain data sources and network dispatch.
//!
//! Provides the uniform data source interface and its implementations. Includes:
//!
//! - The chain data source trait
//! - The LCD client shared by the Cosmos and Gaia families
//! - The REST transport
//! - Error handling for data source operations
//! - The source registry used for dispatch

mod client;
mod clients;
mod error;
mod registry;
mod transports;

pub use client::ChainDataSource;
pub use clients::{ChainSource, CosmosClient, GaiaClient, LcdClient};
pub use error::BlockChainError;
pub use registry::SourceRegistry;
pub use transports::{unwrap_lcd_envelope, HttpTransportClient, RestTransport, TransportError};
