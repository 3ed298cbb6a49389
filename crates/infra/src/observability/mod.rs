//! Logging setup and structured-logging helpers

use godata_domain::GoDataError;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Install a global fmt subscriber.
///
/// `RUST_LOG` takes precedence over `level`. Calling this more than once is
/// harmless; only the first call installs a subscriber.
pub fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("godata_core={level},godata_infra={level},warn"))
    });

    let installed = tracing_subscriber::registry().with(fmt::layer()).with(filter).try_init();
    if installed.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}

/// Convert a `GoDataError` into a stable label suitable for logging.
#[inline]
pub fn error_label(error: &GoDataError) -> &'static str {
    error.label()
}
