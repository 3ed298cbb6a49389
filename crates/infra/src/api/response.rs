//! Status classification and body decoding for Go.Data responses

use godata_domain::{GoDataError, Result};
use reqwest::{Response, StatusCode};
use serde_json::Value;

/// Map a non-success status to the domain error taxonomy.
pub(crate) fn status_error(status: StatusCode, url: &str, body: &str) -> GoDataError {
    let message = if body.is_empty() {
        format!("{url} returned status {status}")
    } else {
        format!("{url} returned status {status}: {body}")
    };

    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        GoDataError::Auth(message)
    } else if status.is_server_error() {
        GoDataError::Server(message)
    } else if status.is_client_error() {
        GoDataError::Client(message)
    } else {
        GoDataError::Network(message)
    }
}

/// Read a response as JSON.
///
/// 204/205 and empty bodies decode to `Value::Null`.
pub(crate) async fn read_json(response: Response, url: &str) -> Result<Value> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| GoDataError::Network(format!("failed to read response from {url}: {e}")))?;

    if !status.is_success() {
        return Err(status_error(status, url, &body));
    }

    if status == StatusCode::NO_CONTENT
        || status == StatusCode::RESET_CONTENT
        || body.trim().is_empty()
    {
        return Ok(Value::Null);
    }

    serde_json::from_str(&body)
        .map_err(|e| GoDataError::Client(format!("Failed to parse response from {url}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_statuses_map_to_auth() {
        for status in [StatusCode::UNAUTHORIZED, StatusCode::FORBIDDEN] {
            assert!(matches!(status_error(status, "u", ""), GoDataError::Auth(_)));
        }
    }

    #[test]
    fn rate_limit_is_a_client_error() {
        let err = status_error(StatusCode::TOO_MANY_REQUESTS, "http://h/api/cases", "slow down");
        match err {
            GoDataError::Client(msg) => {
                assert!(msg.contains("429"));
                assert!(msg.contains("slow down"));
            }
            other => panic!("expected client error, got {other:?}"),
        }
    }

    #[test]
    fn server_errors_keep_url() {
        let err = status_error(StatusCode::BAD_GATEWAY, "http://h/api/locations", "");
        assert_eq!(
            err,
            GoDataError::Server("http://h/api/locations returned status 502 Bad Gateway".into())
        );
    }
}
