//! Repository implementations for configuration management.
//!
//! The gateway has a single repository: the network registry, loaded from the JSON files
//! of the networks directory and read through `get` and `get_all`.

mod error;
mod network;

pub use error::RepositoryError;
pub use network::{NetworkRepository, NetworkRepositoryTrait};
