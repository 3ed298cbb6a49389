//! Go.Data login/logout
//!
//! `POST users/login` with `{email, password}` answers with an access token
//! in the `id` field. That token becomes the [`Session`] bearer token.

use async_trait::async_trait;
use godata_core::SessionProvider;
use godata_domain::constants::{LOGIN_PATH, LOGOUT_PATH};
use godata_domain::{Credentials, GoDataError, Result, Session};
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use super::response::read_json;
use crate::http::HttpClient;

#[derive(Serialize)]
struct LoginBody<'a> {
    email: &'a str,
    password: &'a str,
}

/// Session provider backed by the Go.Data user endpoints.
#[derive(Clone)]
pub struct LoginSessionProvider {
    http: HttpClient,
    api_url: String,
}

impl LoginSessionProvider {
    pub fn new(http: HttpClient, api_url: impl Into<String>) -> Self {
        let api_url = api_url.into().trim_end_matches('/').to_string();
        Self { http, api_url }
    }

    fn login_url(&self) -> String {
        format!("{}/{}", self.api_url, LOGIN_PATH)
    }

    async fn request_token(&self, credentials: &Credentials) -> Result<String> {
        let url = self.login_url();
        let body = LoginBody { email: &credentials.email, password: &credentials.password };

        let response = self.http.send(self.http.request(Method::POST, &url).json(&body)).await?;
        let value = read_json(response, &url).await?;

        match value.get("id") {
            Some(Value::String(token)) if !token.is_empty() => Ok(token.clone()),
            _ => Err(GoDataError::Auth("login response did not contain an access token".into())),
        }
    }
}

#[async_trait]
impl SessionProvider for LoginSessionProvider {
    #[instrument(skip_all, fields(email = %credentials.email))]
    async fn login(&self, credentials: &Credentials) -> Result<Session> {
        match self.request_token(credentials).await {
            Ok(token) => {
                info!(api_url = %self.api_url, "Logged in to Go.Data");
                Ok(Session::new(self.api_url.clone(), token))
            }
            Err(GoDataError::Auth(message)) => {
                warn!(error = %message, "Go.Data login rejected");
                Err(GoDataError::Auth(message))
            }
            Err(other) => {
                warn!(error_type = other.label(), error = %other, "Go.Data login failed");
                Err(GoDataError::Auth(other.to_string()))
            }
        }
    }

    #[instrument(skip_all)]
    async fn logout(&self, session: &Session) -> Result<()> {
        let url = session.url_for(LOGOUT_PATH);
        let builder = self
            .http
            .request(Method::POST, &url)
            .header("Authorization", format!("Bearer {}", session.bearer_token()));

        let response = self.http.send(builder).await?;
        read_json(response, &url).await?;
        debug!("Logged out of Go.Data");
        Ok(())
    }
}
