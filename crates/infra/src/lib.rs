//! # Go.Data Infrastructure
//!
//! Infrastructure implementations of the core ports.
//!
//! This crate contains:
//! - The reqwest-backed HTTP client and the bearer-token transport
//! - The login/logout session provider
//! - Configuration loading (environment, dotenv, JSON/TOML files)
//! - Tracing subscriber setup
//! - [`GoDataClient`], which wires all of the above from a [`GoDataConfig`]
//!
//! ## Architecture
//! - Implements traits defined in `godata-core`
//! - Contains all "impure" code (network, filesystem, environment)
//!
//! [`GoDataConfig`]: godata_domain::GoDataConfig

pub mod api;
pub mod client;
pub mod config;
pub mod errors;
pub mod http;
pub mod observability;

// Re-export commonly used items
pub use api::{HttpTransport, LoginSessionProvider};
pub use client::GoDataClient;
pub use errors::InfraError;
pub use http::{HttpClient, HttpClientBuilder};
pub use observability::{error_label, init_tracing};
