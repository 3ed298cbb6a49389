//! API constants
//!
//! Paths are relative to the configured `api_url`.

pub const LOGIN_PATH: &str = "users/login";
pub const LOGOUT_PATH: &str = "users/logout";

/// Query parameter carrying the JSON-encoded filter.
pub const FILTER_QUERY_PARAM: &str = "filter";

pub const DEFAULT_USER_AGENT: &str = concat!("godata-adaptor/", env!("CARGO_PKG_VERSION"));
