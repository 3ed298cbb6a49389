//! Port interfaces for authentication

use async_trait::async_trait;
use godata_domain::{Credentials, Result, Session};

/// Exchanges credentials for a bearer-token session
#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// Log in and return a session for the configured API.
    ///
    /// Any failure is reported as `GoDataError::Auth`.
    async fn login(&self, credentials: &Credentials) -> Result<Session>;

    /// Invalidate the session's token on the server.
    async fn logout(&self, session: &Session) -> Result<()>;
}
