//! List and get helpers for collection endpoints

use godata_domain::{ApiRequest, Filter, GoDataError, ResourceRef, Result, Session};
use serde_json::Value;
use tracing::{debug, instrument};

use crate::transport::ports::Transport;

/// Fetch every record of a collection.
#[instrument(skip(transport, session), fields(path = %resource.collection_path()))]
pub async fn list(
    transport: &dyn Transport,
    session: &Session,
    resource: &ResourceRef,
) -> Result<Vec<Value>> {
    let path = resource.collection_path();
    let body = transport.send(session, ApiRequest::get(path.clone())).await?;
    let records = expect_records(body, &path)?;
    debug!(count = records.len(), "listed records");
    Ok(records)
}

/// Fetch the records of a collection matching `filter`.
#[instrument(skip(transport, session, filter), fields(path = %resource.collection_path()))]
pub async fn get(
    transport: &dyn Transport,
    session: &Session,
    resource: &ResourceRef,
    filter: &Filter,
) -> Result<Vec<Value>> {
    let path = resource.collection_path();
    let body = transport.send(session, ApiRequest::filtered(path.clone(), filter.clone())).await?;
    let records = expect_records(body, &path)?;
    debug!(count = records.len(), "filtered records");
    Ok(records)
}

fn expect_records(body: Value, path: &str) -> Result<Vec<Value>> {
    match body {
        Value::Array(records) => Ok(records),
        other => Err(GoDataError::InvalidInput(format!(
            "expected a JSON array from {path}, got {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
