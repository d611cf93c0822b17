//! Tracing subscriber setup

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{LogFormat, LoggingConfig};
use crate::error::{Result, ServerError};

/// Install the global subscriber. `RUST_LOG` takes precedence over the configured level.
///
/// Logs go to stderr so `spam-check` output stays clean on stdout.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(&config.level));
    let registry = tracing_subscriber::registry().with(filter);

    let result = match config.format {
        LogFormat::Pretty => registry
            .with(fmt::layer().pretty().with_writer(std::io::stderr))
            .try_init(),
        LogFormat::Compact => registry
            .with(fmt::layer().compact().with_writer(std::io::stderr))
            .try_init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init(),
    };

    result.map_err(|e| ServerError::Config(format!("Failed to initialize logging: {}", e)))
}

fn default_filter(level: &str) -> EnvFilter {
    EnvFilter::new(format!(
        "spam_server={level},spam_core={level},tower_http={level}",
        level = level
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_covers_workspace_crates() {
        let filter = default_filter("debug").to_string();
        assert!(filter.contains("spam_server=debug"));
        assert!(filter.contains("spam_core=debug"));
        assert!(filter.contains("tower_http=debug"));
    }
}
