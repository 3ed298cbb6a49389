//! Transport-neutral description of a single API call

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::impl_str_conversions;
use crate::types::filter::Filter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
}

impl_str_conversions!(HttpMethod {
    Get => "get",
    Post => "post",
    Put => "put",
    Patch => "patch",
});

impl HttpMethod {
    pub fn is_mutating(self) -> bool {
        !matches!(self, Self::Get)
    }
}

/// One request against a path relative to the session's base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: HttpMethod,
    pub path: String,
    pub filter: Option<Filter>,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self { method: HttpMethod::Get, path: path.into(), filter: None, body: None }
    }

    pub fn filtered(path: impl Into<String>, filter: Filter) -> Self {
        Self { filter: Some(filter), ..Self::get(path) }
    }

    pub fn with_body(method: HttpMethod, path: impl Into<String>, body: Value) -> Self {
        Self { method, path: path.into(), filter: None, body: Some(body) }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn constructors_set_method_and_payload() {
        let list = ApiRequest::get("locations");
        assert_eq!(list.method, HttpMethod::Get);
        assert!(list.filter.is_none() && list.body.is_none());

        let lookup = ApiRequest::filtered("outbreaks", Filter::where_eq("name", "Demo"));
        assert_eq!(lookup.method, HttpMethod::Get);
        assert!(lookup.filter.is_some());

        let update =
            ApiRequest::with_body(HttpMethod::Patch, "locations/l-1", json!({ "name": "x" }));
        assert!(update.method.is_mutating());
        assert_eq!(update.body, Some(json!({ "name": "x" })));
    }

    #[test]
    fn method_parses_from_config_strings() {
        assert_eq!("PATCH".parse::<HttpMethod>(), Ok(HttpMethod::Patch));
        assert_eq!(HttpMethod::Put.to_string(), "put");
        assert!("delete".parse::<HttpMethod>().is_err());
    }
}
