//! Upsert-by-external-id data model

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::{GoDataError, Result};
use crate::types::filter::Filter;
use crate::types::resource::check_path_segment;

/// Backend identifier field shared by every resource kind.
pub const RECORD_ID_FIELD: &str = "id";

/// A record to create or update, matched on one caller-supplied field.
#[derive(Debug, Clone, PartialEq)]
pub struct UpsertCandidate {
    external_id_field: String,
    record: Map<String, Value>,
}

impl UpsertCandidate {
    /// The record must be a JSON object whose `external_id_field` is present
    /// and non-null.
    pub fn new(external_id_field: impl Into<String>, record: Value) -> Result<Self> {
        let external_id_field = external_id_field.into();
        if external_id_field.is_empty() {
            return Err(GoDataError::InvalidInput("external id field must not be empty".into()));
        }

        let record = match record {
            Value::Object(record) => record,
            other => {
                return Err(GoDataError::InvalidInput(format!(
                    "upsert record must be a JSON object, got {other}"
                )));
            }
        };

        match record.get(&external_id_field) {
            None | Some(Value::Null) => Err(GoDataError::InvalidInput(format!(
                "upsert record is missing external id field '{external_id_field}'"
            ))),
            Some(_) => Ok(Self { external_id_field, record }),
        }
    }

    pub fn external_id_field(&self) -> &str {
        &self.external_id_field
    }

    pub fn external_id(&self) -> &Value {
        // Presence is checked in `new` and the record is never mutated.
        self.record.get(&self.external_id_field).unwrap_or(&Value::Null)
    }

    pub fn record(&self) -> &Map<String, Value> {
        &self.record
    }

    /// `{ "where": { <external_id_field>: <external id> } }`
    pub fn lookup_filter(&self) -> Filter {
        Filter::where_eq(self.external_id_field.clone(), self.external_id().clone())
    }

    /// The record as a request body.
    pub fn body(&self) -> Value {
        Value::Object(self.record.clone())
    }
}

/// Which branch of the upsert protocol a lookup result selects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Match {
    None,
    One(String),
    Many(usize),
}

/// Existing remote records that share the candidate's external id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchResult(Vec<Value>);

impl MatchResult {
    pub fn new(records: Vec<Value>) -> Self {
        Self(records)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn records(&self) -> &[Value] {
        &self.0
    }

    /// Decide the branch. A single match must carry a usable `id`.
    pub fn classify(&self) -> Result<Match> {
        match self.0.as_slice() {
            [] => Ok(Match::None),
            [record] => {
                let id = record_id(record).ok_or_else(|| {
                    GoDataError::InvalidInput(format!(
                        "matched record has no usable '{RECORD_ID_FIELD}' field"
                    ))
                })?;
                check_path_segment("matched record id", &id)?;
                Ok(Match::One(id))
            }
            many => Ok(Match::Many(many.len())),
        }
    }
}

/// Read a record's backend id; numeric ids are rendered as strings.
pub fn record_id(record: &Value) -> Option<String> {
    match record.get(RECORD_ID_FIELD)? {
        Value::String(id) if !id.is_empty() => Some(id.clone()),
        Value::Number(id) => Some(id.to_string()),
        _ => None,
    }
}

/// Result of a completed upsert; `record` is the mutating call's response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum UpsertOutcome {
    Created { record: Value },
    Updated { id: String, record: Value },
}

impl UpsertOutcome {
    pub fn record(&self) -> &Value {
        match self {
            Self::Created { record } | Self::Updated { record, .. } => record,
        }
    }

    pub fn into_record(self) -> Value {
        match self {
            Self::Created { record } | Self::Updated { record, .. } => record,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn candidate_requires_external_id_value() {
        let ok = UpsertCandidate::new("visualId", json!({ "visualId": "V1", "firstName": "Luca" }));
        assert!(ok.is_ok());

        let missing = UpsertCandidate::new("visualId", json!({ "firstName": "Luca" }));
        assert!(matches!(missing, Err(GoDataError::InvalidInput(_))));

        let null = UpsertCandidate::new("visualId", json!({ "visualId": null }));
        assert!(matches!(null, Err(GoDataError::InvalidInput(_))));

        let not_object = UpsertCandidate::new("visualId", json!(["V1"]));
        assert!(matches!(not_object, Err(GoDataError::InvalidInput(_))));
    }

    #[test]
    fn lookup_filter_matches_only_external_id() {
        let candidate =
            UpsertCandidate::new("visualId", json!({ "visualId": "V1", "firstName": "Luca" }))
                .unwrap();
        assert_eq!(
            candidate.lookup_filter().to_query_value().unwrap(),
            r#"{"where":{"visualId":"V1"}}"#
        );
        assert_eq!(candidate.external_id(), &json!("V1"));
        assert_eq!(candidate.body()["firstName"], "Luca");
    }

    #[test]
    fn classify_branches_on_cardinality() {
        assert_eq!(MatchResult::new(vec![]).classify().unwrap(), Match::None);
        assert_eq!(
            MatchResult::new(vec![json!({ "id": "c-1", "visualId": "V1" })]).classify().unwrap(),
            Match::One("c-1".into())
        );
        assert_eq!(
            MatchResult::new(vec![json!({ "id": "a" }), json!({ "id": "b" })]).classify().unwrap(),
            Match::Many(2)
        );
    }

    #[test]
    fn single_match_without_id_is_rejected() {
        let result = MatchResult::new(vec![json!({ "visualId": "V1" })]).classify();
        assert!(matches!(result, Err(GoDataError::InvalidInput(_))));
    }

    #[test]
    fn single_match_with_unsafe_id_is_rejected() {
        let result = MatchResult::new(vec![json!({ "id": "c-1/../../users" })]).classify();
        assert!(matches!(result, Err(GoDataError::InvalidInput(msg)) if msg.contains("c-1/")));
    }

    #[test]
    fn numeric_ids_are_accepted() {
        assert_eq!(record_id(&json!({ "id": 42 })), Some("42".to_string()));
        assert_eq!(record_id(&json!({ "id": "" })), None);
    }

    #[test]
    fn outcome_exposes_response_record() {
        let outcome = UpsertOutcome::Updated { id: "c-1".into(), record: json!({ "id": "c-1" }) };
        assert_eq!(outcome.record()["id"], "c-1");
        assert_eq!(serde_json::to_value(&outcome).unwrap()["action"], "updated");
    }
}
