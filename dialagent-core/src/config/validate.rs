//! Configuration validation rules.

use super::schema::Config;
use crate::error::Error;

/// Validate configuration and return aggregated validation errors.
pub fn validate_config(config: &Config) -> crate::Result<()> {
    let mut errors = Vec::new();

    if config.storage.dir.trim().is_empty() {
        errors.push("storage.dir must not be empty".to_string());
    }
    if !(0.0..=2.0).contains(&config.generation.temperature) {
        errors.push("generation.temperature must be in [0.0, 2.0]".to_string());
    }
    if config.generation.max_tokens == 0 {
        errors.push("generation.max_tokens must be > 0".to_string());
    }
    if config.backends.local.max_new_tokens == 0 {
        errors.push("backends.local.max_new_tokens must be > 0".to_string());
    }
    if config.backends.local.base_url.trim().is_empty() {
        errors.push("backends.local.base_url must not be empty".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(Error::Config(errors.join("; ")))
    }
}
