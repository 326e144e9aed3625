//! Logging setup

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

use crate::config::LoggingConfig;

/// Initialize the logging system.
///
/// `RUST_LOG` wins over the configured level. Safe to call more than once;
/// later calls are no-ops if a subscriber is already installed.
pub fn init_logging(config: &LoggingConfig) {
    let log_level_str = std::env::var("RUST_LOG").unwrap_or_else(|_| config.level.clone());

    let mut filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_level_str));

    // Apply module overrides from config
    for (module, level) in &config.overrides {
        // Directives must be valid
        if let Ok(directive) = format!("{}={}", module, level).parse() {
            filter = filter.add_directive(directive);
        } else {
            eprintln!("Invalid log directive: {}={}", module, level);
        }
    }

    let stdout_layer = fmt::layer().with_target(true);

    let _ = Registry::default().with(filter).with(stdout_layer).try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_reentrant() {
        let config = LoggingConfig::default();
        init_logging(&config);
        init_logging(&config);
    }

    #[test]
    fn test_invalid_override_is_skipped() {
        let mut config = LoggingConfig::default();
        config
            .overrides
            .insert("dialagent_core".to_string(), "not a level".to_string());
        init_logging(&config);
    }
}
