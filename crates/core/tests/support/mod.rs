//! Shared test helpers for `godata-core` integration tests.
//!
//! These helpers provide an in-memory Go.Data backend and a scripted session
//! provider so tests can focus on protocol behaviour instead of HTTP.

#![allow(dead_code)]

pub mod backend;

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use godata_core::SessionProvider;
use godata_domain::{Credentials, GoDataError, Result as DomainResult, Session};

pub use backend::{FakeBackend, RecordedRequest};

pub const BASE_URL: &str = "http://godata.test/api";
pub const VALID_EMAIL: &str = "user@example.org";
pub const VALID_PASSWORD: &str = "correct-horse";

pub fn valid_credentials() -> Credentials {
    Credentials::new(VALID_EMAIL, VALID_PASSWORD)
}

pub fn session() -> Session {
    Session::new(BASE_URL, "token-1")
}

/// Accepts one email/password pair and counts login attempts.
#[derive(Default)]
pub struct StaticSessionProvider {
    logins: AtomicUsize,
}

impl StaticSessionProvider {
    pub fn login_count(&self) -> usize {
        self.logins.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SessionProvider for StaticSessionProvider {
    async fn login(&self, credentials: &Credentials) -> DomainResult<Session> {
        self.logins.fetch_add(1, Ordering::SeqCst);
        if credentials.email == VALID_EMAIL && credentials.password == VALID_PASSWORD {
            Ok(session())
        } else {
            Err(GoDataError::Auth("LOGIN_FAILED".into()))
        }
    }

    async fn logout(&self, _session: &Session) -> DomainResult<()> {
        Ok(())
    }
}
