//! Configuration structures

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{GoDataError, Result};
use crate::impl_str_conversions;
use crate::types::{Credentials, HttpMethod, ResourceKind};

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection settings for a Go.Data instance.
///
/// The base URL key is `api_url`. Older deployments used `host`; that key is
/// still recognised so [`GoDataConfig::validate`] can reject it with a
/// pointer to the new name instead of a generic missing-field error.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct GoDataConfig {
    #[serde(default)]
    pub api_url: String,
    pub email: String,
    pub password: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub user_agent: Option<String>,
    #[serde(default)]
    pub update_methods: UpdateMethods,
    #[serde(rename = "host", default, skip_serializing)]
    legacy_host: Option<String>,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl GoDataConfig {
    pub fn new(
        api_url: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            api_url: api_url.into(),
            email: email.into(),
            password: password.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: None,
            update_methods: UpdateMethods::default(),
            legacy_host: None,
        }
    }

    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.email.clone(), self.password.clone())
    }

    /// Structural checks that do not need URL parsing.
    ///
    /// # Errors
    /// Returns `GoDataError::Config` when the legacy `host` key is present or
    /// a required value is empty.
    pub fn validate(&self) -> Result<()> {
        if self.legacy_host.is_some() {
            return Err(GoDataError::Config(
                "configuration key 'host' was renamed to 'api_url'".to_string(),
            ));
        }
        if self.api_url.trim().is_empty() {
            return Err(GoDataError::Config("api_url must not be empty".to_string()));
        }
        if self.email.trim().is_empty() || self.password.is_empty() {
            return Err(GoDataError::Config("email and password are required".to_string()));
        }
        if self.timeout_secs == 0 {
            return Err(GoDataError::Config("timeout_secs must be greater than zero".to_string()));
        }
        Ok(())
    }
}

impl fmt::Debug for GoDataConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GoDataConfig")
            .field("api_url", &self.api_url)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("timeout_secs", &self.timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("update_methods", &self.update_methods)
            .finish()
    }
}

/// HTTP verb used for the update branch of an upsert.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdateMethod {
    #[default]
    Put,
    Patch,
}

impl_str_conversions!(UpdateMethod {
    Put => "put",
    Patch => "patch",
});

impl From<UpdateMethod> for HttpMethod {
    fn from(value: UpdateMethod) -> Self {
        match value {
            UpdateMethod::Put => HttpMethod::Put,
            UpdateMethod::Patch => HttpMethod::Patch,
        }
    }
}

/// Update verb per resource kind. Everything defaults to `PUT`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateMethods {
    pub outbreak: UpdateMethod,
    pub contact: UpdateMethod,
    pub case: UpdateMethod,
    pub location: UpdateMethod,
}

impl UpdateMethods {
    pub fn for_kind(&self, kind: ResourceKind) -> HttpMethod {
        match kind {
            ResourceKind::Outbreak => self.outbreak,
            ResourceKind::Contact => self.contact,
            ResourceKind::Case => self.case,
            ResourceKind::Location => self.location,
        }
        .into()
    }

    pub fn set(&mut self, kind: ResourceKind, method: UpdateMethod) {
        match kind {
            ResourceKind::Outbreak => self.outbreak = method,
            ResourceKind::Contact => self.contact = method,
            ResourceKind::Case => self.case = method,
            ResourceKind::Location => self.location = method,
        }
    }
}
