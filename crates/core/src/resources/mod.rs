//! Go.Data resource operations
//!
//! List and get are thin GET wrappers; upsert runs the external-id protocol
//! in [`resolver`].

pub mod queries;
pub mod resolver;
pub mod service;

pub use resolver::UpsertResolver;
pub use service::GoDataService;
