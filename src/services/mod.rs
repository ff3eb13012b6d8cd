//! Core services implementing the business logic.
//!
//! This module contains the main service implementations:
//! - `blockbridge`: Node event subscription and per-network block topics
//! - `blockchain`: Chain data sources and network dispatch
//! - `cache`: Response cache for the request path
//! - `gateway`: The request/response surface over all of the above
//! - `reducer`: Normalization of raw upstream payloads

pub mod blockbridge;
pub mod blockchain;
pub mod cache;
pub mod gateway;
pub mod reducer;
