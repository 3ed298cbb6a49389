//! # Go.Data Domain
//!
//! Data types shared by every layer of the Go.Data adaptor.
//!
//! This crate contains:
//! - Session, credentials and resource references
//! - Query filters and the upsert-by-external-id model
//! - Domain error types and Result definitions
//! - Configuration structures
//!
//! ## Architecture
//! - No dependencies on other workspace crates
//! - No I/O

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;

pub use config::*;
pub use errors::*;
pub use types::*;
