//! Authenticated session and the credentials exchanged for it

use std::fmt;

use serde::{Deserialize, Serialize};

/// Login credentials for a Go.Data user.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self { email: email.into(), password: password.into() }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// A bearer token bound to the API it was issued by.
///
/// Created once at the head of an operation sequence and never mutated;
/// every operation receives it by reference.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    base_url: String,
    bearer_token: String,
}

impl Session {
    /// Trailing slashes are stripped from `base_url` so paths can be
    /// appended with a single `/`.
    pub fn new(base_url: impl Into<String>, bearer_token: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, bearer_token: bearer_token.into() }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn bearer_token(&self) -> &str {
        &self.bearer_token
    }

    /// Absolute URL for a path relative to the API root.
    pub fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("base_url", &self.base_url)
            .field("bearer_token", &"<redacted>")
            .finish()
    }
}
