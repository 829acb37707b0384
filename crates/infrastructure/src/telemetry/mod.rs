//! Tracing initialization
//!
//! Console subscriber setup with env-filter based log levels and a
//! text or JSON output format switch.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Error type for tracing initialization
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    /// Failed to initialize tracing subscriber
    #[error("Failed to initialize tracing: {0}")]
    Init(String),
}

fn default_filter() -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("weathervane=info,tower_http=info,info"))
}

/// Initialize the tracing subscriber
///
/// Reads `RUST_LOG` when set, otherwise defaults to info-level output.
/// `log_format` selects between human-readable text and JSON lines;
/// anything other than `"json"` means text.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_tracing(log_format: &str) -> Result<(), TelemetryError> {
    let registry = tracing_subscriber::registry().with(default_filter());

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_target(true))
            .try_init()
            .map_err(|e| TelemetryError::Init(e.to_string()))
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .try_init()
            .map_err(|e| TelemetryError::Init(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_init_fails_cleanly() {
        // Whichever call runs second must report Init instead of panicking.
        let first = init_tracing("text");
        let second = init_tracing("json");
        assert!(first.is_ok() || matches!(first, Err(TelemetryError::Init(_))));
        assert!(matches!(second, Err(TelemetryError::Init(_))));
    }
}
