//! Pipeline runtime
//!
//! Sequences operations over a [`State`] value, one network call at a time.

pub mod operation;
pub mod runtime;
pub mod state;

pub use operation::{Operation, RecordSource};
pub use runtime::{Pipeline, PipelineReport, StepOutcome, StepReport};
pub use state::State;
