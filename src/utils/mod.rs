//! Utility modules for common functionality.
//!
//! This module provides various utility functions and types that are used across
//! the application. Currently includes:
//!
//! - deserialization: Lenient field deserializers for upstream payloads
//! - http: HTTP client construction for the REST transport
//! - logging: Logging utilities and error context
//! - metrics: Metrics registry and the metrics server
//! - parsing: Parsing utilities for command line and environment values
//! - tests: Test utilities

pub mod deserialization;
pub mod http;
pub mod logging;
pub mod metrics;
pub mod parsing;

pub use http::*;
pub use parsing::*;
