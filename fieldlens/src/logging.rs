//! Logging configuration and setup.
//!
//! Fieldlens emits structured logs through the `tracing` crate; hosts that
//! already install a subscriber can ignore this module entirely. The setup
//! here is for binaries and tests that want a reasonable default.

use tracing::Level;

/// Configuration for fieldlens logging setup.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level for the application.
    pub level: Level,
    /// Log level for fieldlens components specifically.
    pub fieldlens_level: Level,
    /// Whether to use JSON output format.
    pub json_format: bool,
    /// Environment filter override.
    pub env_filter: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            fieldlens_level: Level::DEBUG,
            json_format: false,
            env_filter: None,
        }
    }
}

impl LoggingConfig {
    /// Creates a configuration for production use.
    pub fn production() -> Self {
        Self {
            level: Level::WARN,
            fieldlens_level: Level::INFO,
            json_format: true,
            env_filter: None,
        }
    }

    /// Creates a configuration for development use.
    pub fn development() -> Self {
        Self {
            level: Level::DEBUG,
            fieldlens_level: Level::DEBUG,
            json_format: false,
            env_filter: None,
        }
    }

    /// Sets the log level for the application.
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Sets the log level for fieldlens components.
    pub fn with_fieldlens_level(mut self, level: Level) -> Self {
        self.fieldlens_level = level;
        self
    }

    /// Sets whether to use JSON output format.
    pub fn with_json_format(mut self, enabled: bool) -> Self {
        self.json_format = enabled;
        self
    }

    /// Sets a custom environment filter.
    pub fn with_env_filter(mut self, filter: impl Into<String>) -> Self {
        self.env_filter = Some(filter.into());
        self
    }

    /// Builds the environment filter string.
    pub fn env_filter(&self) -> String {
        if let Some(ref filter) = self.env_filter {
            filter.clone()
        } else {
            format!(
                "{},fieldlens={}",
                self.level.as_str().to_lowercase(),
                self.fieldlens_level.as_str().to_lowercase()
            )
        }
    }
}

/// Initializes a global subscriber from the given configuration.
///
/// The `RUST_LOG` environment variable, when set, takes precedence over the
/// configured filter. Fails if a global subscriber is already installed.
///
/// # Examples
///
/// ```rust,no_run
/// use fieldlens::logging::{init_logging, LoggingConfig};
///
/// init_logging(LoggingConfig::development()).unwrap();
/// ```
pub fn init_logging(config: LoggingConfig) -> Result<(), Box<dyn std::error::Error>> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.env_filter()));

    let fmt_layer = if config.json_format {
        tracing_subscriber::fmt::layer().json().boxed()
    } else {
        tracing_subscriber::fmt::layer().boxed()
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_env_filter() {
        let config = LoggingConfig::default();
        assert_eq!(config.env_filter(), "info,fieldlens=debug");
    }

    #[test]
    fn test_env_filter_override() {
        let config = LoggingConfig::default().with_env_filter("warn,fieldlens=trace");
        assert_eq!(config.env_filter(), "warn,fieldlens=trace");
    }

    #[test]
    fn test_production_preset() {
        let config = LoggingConfig::production();
        assert_eq!(config.level, Level::WARN);
        assert!(config.json_format);
    }
}
