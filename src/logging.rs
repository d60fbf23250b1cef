//! `tracing` setup. Logs go to stderr so stdout stays clean for records.

use anyhow::{anyhow, Result};
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// `-q` lowers to errors only; each `-v` raises one step above `warn`.
pub fn level_from_flags(verbose: u8, quiet: bool) -> Level {
    if quiet {
        return Level::ERROR;
    }
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// `RUST_LOG` wins over the CLI level when set.
pub fn init_logging(level: Level) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_ascii_lowercase()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!("failed to initialize logging: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_maps_to_levels() {
        assert_eq!(level_from_flags(0, false), Level::WARN);
        assert_eq!(level_from_flags(1, false), Level::INFO);
        assert_eq!(level_from_flags(2, false), Level::DEBUG);
        assert_eq!(level_from_flags(5, false), Level::TRACE);
        assert_eq!(level_from_flags(3, true), Level::ERROR);
    }
}
