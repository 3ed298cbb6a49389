//! In-memory Go.Data backend implementing the `Transport` port
//!
//! Collections are keyed by their path relative to the API root. Lookups
//! honour exact matches in the `where` clause; creates assign sequential ids.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use godata_core::Transport;
use godata_domain::{
    record_id, ApiRequest, Filter, GoDataError, HttpMethod, Result as DomainResult, Session,
};
use serde_json::{json, Value};

/// A request as the backend saw it.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: HttpMethod,
    pub path: String,
    pub filter: Option<Filter>,
    pub body: Option<Value>,
    pub token: String,
}

#[derive(Default)]
pub struct FakeBackend {
    collections: Mutex<HashMap<String, Vec<Value>>>,
    requests: Mutex<Vec<RecordedRequest>>,
    failing_paths: Mutex<HashMap<String, GoDataError>>,
    failing_calls: Mutex<HashMap<(HttpMethod, String), GoDataError>>,
    next_id: Mutex<usize>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a collection with existing records.
    pub fn with_records(self, collection: &str, records: Vec<Value>) -> Self {
        self.collections.lock().unwrap().insert(collection.to_string(), records);
        self
    }

    /// Make every request to `path` fail with `error`.
    pub fn failing(self, path: &str, error: GoDataError) -> Self {
        self.failing_paths.lock().unwrap().insert(path.to_string(), error);
        self
    }

    /// Make only `method` requests to `path` fail with `error`.
    pub fn failing_on(self, method: HttpMethod, path: &str, error: GoDataError) -> Self {
        self.failing_calls.lock().unwrap().insert((method, path.to_string()), error);
        self
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn methods(&self) -> Vec<HttpMethod> {
        self.requests().iter().map(|r| r.method).collect()
    }

    pub fn records(&self, collection: &str) -> Vec<Value> {
        self.collections.lock().unwrap().get(collection).cloned().unwrap_or_default()
    }

    fn generate_id(&self) -> String {
        let mut next = self.next_id.lock().unwrap();
        *next += 1;
        format!("generated-{}", *next)
    }

    fn split_member(path: &str) -> Option<(&str, &str)> {
        let (collection, id) = path.rsplit_once('/')?;
        if collection.ends_with("outbreaks") && !collection.contains('/') {
            return Some((collection, id));
        }
        matches!(collection.rsplit('/').next(), Some("contacts" | "cases" | "locations"))
            .then_some((collection, id))
    }
}

fn matches_where(record: &Value, filter: Option<&Filter>) -> bool {
    let Some(clause) = filter.and_then(Filter::where_clause) else {
        return true;
    };
    clause.iter().all(|(field, expected)| record.get(field) == Some(expected))
}

#[async_trait]
impl Transport for FakeBackend {
    async fn send(&self, session: &Session, request: ApiRequest) -> DomainResult<Value> {
        self.requests.lock().unwrap().push(RecordedRequest {
            method: request.method,
            path: request.path.clone(),
            filter: request.filter.clone(),
            body: request.body.clone(),
            token: session.bearer_token().to_string(),
        });

        if let Some(err) = self.failing_paths.lock().unwrap().get(&request.path) {
            return Err(err.clone());
        }
        if let Some(err) =
            self.failing_calls.lock().unwrap().get(&(request.method, request.path.clone()))
        {
            return Err(err.clone());
        }

        let mut collections = self.collections.lock().unwrap();
        match request.method {
            HttpMethod::Get => {
                let records = collections.get(&request.path).cloned().unwrap_or_default();
                let filtered: Vec<Value> = records
                    .into_iter()
                    .filter(|record| matches_where(record, request.filter.as_ref()))
                    .collect();
                Ok(Value::Array(filtered))
            }
            HttpMethod::Post => {
                let mut record = request.body.unwrap_or_else(|| json!({}));
                record["id"] = Value::String(self.generate_id());
                collections.entry(request.path).or_default().push(record.clone());
                Ok(record)
            }
            HttpMethod::Put | HttpMethod::Patch => {
                let (collection, id) = Self::split_member(&request.path)
                    .ok_or_else(|| GoDataError::Client(format!("404 {}", request.path)))?;
                let records = collections
                    .get_mut(collection)
                    .ok_or_else(|| GoDataError::Client(format!("404 {}", request.path)))?;
                let existing = records
                    .iter_mut()
                    .find(|r| record_id(r).as_deref() == Some(id))
                    .ok_or_else(|| GoDataError::Client(format!("404 {}", request.path)))?;

                let body = request.body.unwrap_or_else(|| json!({}));
                if request.method == HttpMethod::Put {
                    *existing = body;
                } else if let (Some(target), Some(patch)) =
                    (existing.as_object_mut(), body.as_object())
                {
                    for (key, value) in patch {
                        target.insert(key.clone(), value.clone());
                    }
                }
                existing["id"] = Value::String(id.to_string());
                Ok(existing.clone())
            }
        }
    }
}
