//! Tracing initialization for the command-line tool.
//!
//! Logs go to stderr so stdout carries only anonymized output. The library
//! emits events but never installs a subscriber itself.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable holding a filter directive, e.g. `logveil=debug`
pub const LOG_ENV: &str = "LOGVEIL_LOG";

static INIT: Once = Once::new();

/// Default level for a `-v` count
pub fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Initialize logging.
///
/// `LOGVEIL_LOG` wins, then `RUST_LOG`, then the level implied by `verbosity`.
/// Calling this more than once is a no-op.
pub fn init(verbosity: u8) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV)
            .or_else(|_| EnvFilter::try_from_default_env())
            .unwrap_or_else(|_| EnvFilter::new(format!("logveil={}", level_for(verbosity))));

        let result = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(verbosity >= 2),
            )
            .with(filter)
            .try_init();

        if let Err(e) = result {
            eprintln!("logveil: Warning - could not initialize logging: {}", e);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_for_verbosity() {
        assert_eq!(level_for(0), "warn");
        assert_eq!(level_for(1), "info");
        assert_eq!(level_for(2), "debug");
        assert_eq!(level_for(9), "trace");
    }

    #[test]
    fn test_init_is_idempotent() {
        init(0);
        init(3);
    }
}
