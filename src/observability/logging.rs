//! Structured logging.
//!
//! # Responsibilities
//! - Initialize logging subsystem
//! - Configure log level from config, overridable via `RUST_LOG`

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter directives for a log level: this crate and tower_http.
pub fn default_directives(log_level: &str) -> String {
    format!("connect_bridge={log_level},tower_http={log_level}")
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins over `log_level` when set. Calling this twice is a no-op.
pub fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(log_level)));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directives() {
        assert_eq!(
            default_directives("debug"),
            "connect_bridge=debug,tower_http=debug"
        );
    }
}
