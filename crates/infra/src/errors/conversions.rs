//! Conversions from external infrastructure errors into domain errors.

use std::io::Error as IoError;

use godata_domain::GoDataError;
use reqwest::Error as HttpError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct InfraError(pub GoDataError);

impl From<InfraError> for GoDataError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<GoDataError> for InfraError {
    fn from(value: GoDataError) -> Self {
        InfraError(value)
    }
}

trait IntoGoDataError {
    fn into_godata(self) -> GoDataError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → GoDataError */
/* -------------------------------------------------------------------------- */

impl IntoGoDataError for HttpError {
    fn into_godata(self) -> GoDataError {
        if self.is_timeout() {
            return GoDataError::Network("HTTP request timed out".into());
        }

        #[cfg(not(target_arch = "wasm32"))]
        if self.is_connect() {
            return GoDataError::Network("HTTP connection failure".into());
        }

        if let Some(status) = self.status() {
            let code = status.as_u16();
            let message =
                format!("HTTP {} {}", code, status.canonical_reason().unwrap_or("unknown status"));

            return match code {
                401 | 403 => GoDataError::Auth(message),
                400..=499 => GoDataError::Client(message),
                500..=599 => GoDataError::Server(message),
                _ => GoDataError::Network(message),
            };
        }

        if self.is_decode() {
            return GoDataError::Client(format!("undecodable response body: {self}"));
        }

        if self.is_builder() {
            return GoDataError::InvalidInput(format!("invalid HTTP request: {self}"));
        }

        GoDataError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_godata())
    }
}

/* -------------------------------------------------------------------------- */
/* std::io::Error → GoDataError (config files) */
/* -------------------------------------------------------------------------- */

impl IntoGoDataError for IoError {
    fn into_godata(self) -> GoDataError {
        GoDataError::Config(format!("Failed to read config file: {self}"))
    }
}

impl From<IoError> for InfraError {
    fn from(value: IoError) -> Self {
        InfraError(value.into_godata())
    }
}
