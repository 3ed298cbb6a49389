//! Domain types and models

pub mod filter;
pub mod request;
pub mod resource;
pub mod session;
pub mod upsert;

pub use filter::Filter;
pub use request::{ApiRequest, HttpMethod};
pub use resource::{ResourceKind, ResourceRef};
pub use session::{Credentials, Session};
pub use upsert::{record_id, Match, MatchResult, UpsertCandidate, UpsertOutcome, RECORD_ID_FIELD};
