//! Query filters sent to Go.Data collection endpoints
//!
//! A filter is a JSON object sent as the `filter` query parameter. Field
//! matches live under `where`; dotted top-level keys such as
//! `where.relationship` are kept verbatim because the backend resolves them
//! against related models.
//!
//! Combining two filters goes through [`Filter::merge`]: nested objects are
//! merged key by key and, when both sides hold a non-object value for the
//! same key, the right-hand side wins.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::{GoDataError, Result};

const WHERE: &str = "where";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Filter(Map<String, Value>);

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// `{ "where": { field: value } }`
    pub fn where_eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new().and_where(field, value)
    }

    /// Add an exact match to the `where` clause.
    pub fn and_where(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        let clause = self
            .0
            .entry(WHERE)
            .or_insert_with(|| Value::Object(Map::new()));
        match clause {
            Value::Object(fields) => {
                fields.insert(field.into(), value.into());
            }
            other => {
                let mut fields = Map::new();
                fields.insert(field.into(), value.into());
                *other = Value::Object(fields);
            }
        }
        self
    }

    /// Set a top-level filter key, e.g. `where.relationship`.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Build a filter from an arbitrary JSON value, which must be an object.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(GoDataError::InvalidInput(format!(
                "filter must be a JSON object, got {other}"
            ))),
        }
    }

    /// Combine two filters; see the module docs for the merge rules.
    pub fn merge(mut self, other: Filter) -> Self {
        for (key, value) in other.0 {
            match self.0.get_mut(&key) {
                Some(slot) => merge_into(slot, value),
                None => {
                    self.0.insert(key, value);
                }
            }
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn where_clause(&self) -> Option<&Map<String, Value>> {
        self.0.get(WHERE).and_then(Value::as_object)
    }

    /// Encode for the `filter` query parameter.
    ///
    /// Both the get helpers and the upsert lookup go through this function.
    pub fn to_query_value(&self) -> Result<String> {
        serde_json::to_string(&self.0)
            .map_err(|e| GoDataError::Internal(format!("Failed to encode filter: {e}")))
    }

    /// Decode a `filter` query parameter.
    pub fn parse(encoded: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(encoded)
            .map_err(|e| GoDataError::InvalidInput(format!("Invalid filter JSON: {e}")))?;
        Self::from_value(value)
    }
}

impl TryFrom<Value> for Filter {
    type Error = GoDataError;

    fn try_from(value: Value) -> Result<Self> {
        Self::from_value(value)
    }
}

fn merge_into(target: &mut Value, incoming: Value) {
    match (target, incoming) {
        (Value::Object(existing), Value::Object(incoming)) => {
            for (key, value) in incoming {
                match existing.get_mut(&key) {
                    Some(slot) => merge_into(slot, value),
                    None => {
                        existing.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}
