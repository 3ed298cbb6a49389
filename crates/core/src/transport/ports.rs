//! Port interfaces for issuing API requests

use async_trait::async_trait;
use godata_domain::{ApiRequest, Result, Session};
use serde_json::Value;

/// Executes one request against the session's API and returns the parsed
/// JSON body.
///
/// Implementations attach the session's bearer token and perform exactly
/// one attempt per call.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, session: &Session, request: ApiRequest) -> Result<Value>;
}
