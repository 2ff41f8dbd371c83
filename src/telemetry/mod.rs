//! Logging setup.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins over `Config::log_level`. Returns `false` when a subscriber
/// was already installed, so embedding hosts and tests can call this freely.
pub fn init(config: &Config) -> bool {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let installed = tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(log_writer()))
        .try_init()
        .is_ok();

    if installed {
        tracing::debug!("Tracing initialised at level {}", config.log_level);
    }
    installed
}

#[cfg(not(test))]
fn log_writer() -> fn() -> std::io::Stdout {
    std::io::stdout
}

/// Captured by the test harness instead of going straight to stdout.
#[cfg(test)]
fn log_writer() -> tracing_subscriber::fmt::TestWriter {
    tracing_subscriber::fmt::TestWriter::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        init(&Config::default());
        assert!(!init(&Config::default()));
    }
}
