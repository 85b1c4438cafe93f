//! Logging initialization.
//!
//! The filter is read from `PIPEFX_LOG`, then `RUST_LOG`. Without either,
//! the level follows the `-v` count: `warn`, `info`, then `debug`.
//! Output goes to stderr so it never mixes with the shell prompts.

use anyhow::Result;
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

/// Environment variable holding the log filter directive.
pub const LOG_ENV: &str = "PIPEFX_LOG";

/// Level used when no environment filter is set.
pub fn default_level(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

/// Installs the global subscriber.
pub fn init(verbosity: u8) -> Result<()> {
    let env_filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_env("RUST_LOG"))
        .unwrap_or_else(|_| EnvFilter::new(default_level(verbosity)));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_level() {
        assert_eq!(default_level(0), "warn");
        assert_eq!(default_level(1), "info");
        assert_eq!(default_level(2), "debug");
        assert_eq!(default_level(9), "debug");
    }
}
