//! Go.Data REST API adapters
//!
//! - [`HttpTransport`]: the core `Transport` port over reqwest
//! - [`LoginSessionProvider`]: the core `SessionProvider` port

pub mod auth;
mod response;
pub mod transport;

pub use auth::LoginSessionProvider;
pub use transport::HttpTransport;
