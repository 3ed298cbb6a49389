//! Bearer-token transport over HTTP
//!
//! Implements the core [`Transport`] port. Each [`ApiRequest`] becomes one
//! HTTP call against `session.base_url()`, carrying the session token in the
//! `Authorization` header and the filter as a JSON-encoded `filter` query
//! parameter.

use async_trait::async_trait;
use godata_core::Transport;
use godata_domain::constants::FILTER_QUERY_PARAM;
use godata_domain::{ApiRequest, HttpMethod, Result, Session};
use reqwest::Method;
use serde_json::Value;
use tracing::{debug, instrument};

use super::response::read_json;
use crate::http::HttpClient;

#[derive(Clone)]
pub struct HttpTransport {
    http: HttpClient,
}

impl HttpTransport {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }
}

fn to_reqwest(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Patch => Method::PATCH,
    }
}

#[async_trait]
impl Transport for HttpTransport {
    #[instrument(skip_all, fields(method = %request.method, path = %request.path))]
    async fn send(&self, session: &Session, request: ApiRequest) -> Result<Value> {
        let url = session.url_for(&request.path);

        let mut builder = self
            .http
            .request(to_reqwest(request.method), &url)
            .header("Authorization", format!("Bearer {}", session.bearer_token()));

        if let Some(filter) = &request.filter {
            builder = builder.query(&[(FILTER_QUERY_PARAM, filter.to_query_value()?)]);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = self.http.send(builder).await?;
        let value = read_json(response, &url).await?;

        debug!(path = %request.path, "request successful");
        Ok(value)
    }
}
