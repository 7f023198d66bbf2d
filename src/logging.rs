use anyhow::anyhow;
use tracing_subscriber::{EnvFilter, fmt};

/// Environment variable holding the log filter, e.g. `WISH_LOG=debug`.
pub const LOG_ENV: &str = "WISH_LOG";

/// Install the global tracing subscriber.
///
/// Logging is off unless [`LOG_ENV`] asks for it, so stderr normally carries
/// nothing but the shell's own error message. Logs go to stderr.
pub fn init_logging() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("off"));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .try_init()
        .map_err(|e| anyhow!("failed to initialise logging: {e}"))?;

    tracing::debug!("logging initialised");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_init_fails() {
        // nothing else in the test binary installs a subscriber
        assert!(init_logging().is_ok());
        assert!(init_logging().is_err());
    }
}
