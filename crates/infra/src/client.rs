//! Wiring from configuration to a ready-to-run adaptor

use std::sync::Arc;
use std::time::Duration;

use godata_core::{GoDataService, Pipeline, PipelineReport, SessionProvider, State};
use godata_domain::{Credentials, GoDataConfig, Result, Session};
use tracing::info;

use crate::api::{HttpTransport, LoginSessionProvider};
use crate::config;
use crate::http::HttpClient;

/// Session provider, resource service and credentials built from one
/// [`GoDataConfig`].
pub struct GoDataClient {
    sessions: LoginSessionProvider,
    service: GoDataService,
    credentials: Credentials,
}

impl GoDataClient {
    /// Build from an explicit configuration.
    ///
    /// # Errors
    /// Returns `GoDataError::Config` if the configuration is invalid or the
    /// HTTP client cannot be built.
    pub fn from_config(config: &GoDataConfig) -> Result<Self> {
        config::validate(config)?;

        let mut builder = HttpClient::builder().timeout(Duration::from_secs(config.timeout_secs));
        if let Some(agent) = &config.user_agent {
            builder = builder.user_agent(agent.clone());
        }
        let http = builder.build()?;

        let transport = Arc::new(HttpTransport::new(http.clone()));
        let service = GoDataService::new(transport, config.update_methods);
        let sessions = LoginSessionProvider::new(http, config.api_url.clone());

        info!(
            api_url = %config.api_url,
            timeout_secs = config.timeout_secs,
            "Go.Data client configured"
        );
        Ok(Self { sessions, service, credentials: config.credentials() })
    }

    /// Build from `.env`, environment variables or a probed config file.
    ///
    /// # Errors
    /// Returns `GoDataError::Config` if no valid configuration is found.
    pub fn from_env() -> Result<Self> {
        Self::from_config(&config::load()?)
    }

    pub fn service(&self) -> &GoDataService {
        &self.service
    }

    pub fn sessions(&self) -> &LoginSessionProvider {
        &self.sessions
    }

    /// Log in with the configured credentials.
    pub async fn login(&self) -> Result<Session> {
        self.sessions.login(&self.credentials).await
    }

    /// Run `pipeline` under a fresh session.
    ///
    /// # Errors
    /// Returns `GoDataError::Auth` if login fails.
    pub async fn run(&self, pipeline: &Pipeline, initial: State) -> Result<PipelineReport> {
        pipeline.run(&self.sessions, &self.credentials, &self.service, initial).await
    }
}

#[cfg(test)]
mod tests {
    use godata_domain::GoDataError;

    use super::*;

    #[test]
    fn rejects_invalid_configuration() {
        let config = GoDataConfig::new("localhost:8000", "a@b.c", "x");
        assert!(matches!(GoDataClient::from_config(&config), Err(GoDataError::Config(_))));
    }

    #[test]
    fn builds_from_valid_configuration() {
        let mut config = GoDataConfig::new("http://localhost:8000/api", "a@b.c", "x");
        config.user_agent = Some("adaptor-test".into());
        assert!(GoDataClient::from_config(&config).is_ok());
    }
}
