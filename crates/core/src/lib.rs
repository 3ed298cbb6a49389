//! # Go.Data Core
//!
//! Business logic of the Go.Data adaptor - no HTTP code.
//!
//! This crate contains:
//! - Port interfaces for sessions and transport (traits)
//! - The upsert-by-external-id resolver and list/get helpers
//! - The resource service exposing the named operations
//! - The pipeline runtime that threads state between operations
//!
//! ## Architecture Principles
//! - Only depends on `godata-domain`
//! - All I/O goes through [`Transport`] and [`SessionProvider`]

pub mod pipeline;
pub mod resources;
pub mod session;
pub mod transport;

pub use pipeline::{Operation, Pipeline, PipelineReport, RecordSource, State, StepOutcome};
pub use resources::{GoDataService, UpsertResolver};
pub use session::ports::SessionProvider;
pub use transport::ports::Transport;
