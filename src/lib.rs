//! Blockchain data gateway for Cosmos SDK chains.
//!
//! This library normalizes the REST payloads of Cosmos SDK nodes into canonical records and
//! streams newly committed blocks per network. It includes:
//!
//! - Reducers turning raw node payloads into canonical proposals, validators, blocks,
//!   balances, delegations and transactions
//! - One chain data source per network, selected by network id
//! - A block event bridge from a node's websocket feed to a per-network broadcast topic
//! - An optional response cache on the request path
//!
//! # Module Structure
//!
//! - `bootstrap`: Bootstraps the application
//! - `models`: Canonical records, raw payload shapes and configuration
//! - `repositories`: The registry of served networks
//! - `services`: Reducers, data sources, block bridge, cache and the gateway surface
//! - `utils`: Logging, metrics, HTTP and parsing helpers

pub mod bootstrap;
pub mod models;
pub mod repositories;
pub mod services;
pub mod utils;
