//! Pipeline state threaded between operations

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The value each operation reads from and writes its result into.
///
/// `data` holds the latest result; `references` keeps every earlier `data`
/// in the order it was replaced.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct State {
    pub data: Value,
    #[serde(default)]
    pub references: Vec<Value>,
}

impl State {
    pub fn new() -> Self {
        Self::default()
    }

    /// Initial state carrying input data, e.g. a source system's payload.
    pub fn with_data(data: Value) -> Self {
        Self { data, references: Vec::new() }
    }

    /// Move the current `data` into `references` and replace it.
    pub fn compose_next(mut self, data: Value) -> Self {
        let previous = std::mem::replace(&mut self.data, data);
        self.references.push(previous);
        self
    }

    /// The most recent entry of `references`.
    pub fn last_reference(&self) -> Option<&Value> {
        self.references.last()
    }
}
