//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check values that cannot cross the client boundary (URL, NUL bytes, app id)
//! - Leave seed phrase syntax to the client: mnemonics and secret URIs both pass
//! - Keep the report layout intact (no line breaks in the prefix)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: DemoConfig → Result<(), Vec<ValidationError>>
//! - Runs before any client call is made

use std::fmt;

use crate::client::simulated::parse_endpoint;
use crate::config::schema::DemoConfig;

/// Accepted log levels.
pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single rejected configuration value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a configuration, collecting every problem.
pub fn validate_config(config: &DemoConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if let Err(e) = parse_endpoint(&config.client.endpoint) {
        errors.push(ValidationError::new("client.endpoint", e.to_string()));
    }

    // Messages never echo the phrase itself.
    if config.signer.seed_phrase.trim().is_empty() {
        errors.push(ValidationError::new("signer.seed_phrase", "must not be empty"));
    }
    if config.signer.seed_phrase.contains('\0') {
        errors.push(ValidationError::new("signer.seed_phrase", "must not contain NUL bytes"));
    }

    if config.submission.payload.is_empty() {
        errors.push(ValidationError::new("submission.payload", "must not be empty"));
    }
    if config.submission.payload.contains('\0') {
        errors.push(ValidationError::new("submission.payload", "must not contain NUL bytes"));
    }

    if i32::try_from(config.submission.app_id).is_err() {
        errors.push(ValidationError::new(
            "submission.app_id",
            format!("{} exceeds {}", config.submission.app_id, i32::MAX),
        ));
    }

    if config.report.prefix.contains(['\n', '\r']) {
        errors.push(ValidationError::new("report.prefix", "must not contain line breaks"));
    }

    if !LOG_LEVELS.contains(&config.observability.log_level.as_str()) {
        errors.push(ValidationError::new(
            "observability.log_level",
            format!(
                "'{}' is not one of {}",
                config.observability.log_level,
                LOG_LEVELS.join(", ")
            ),
        ));
    }

    if config.simulation.start_height < 0 {
        errors.push(ValidationError::new("simulation.start_height", "must not be negative"));
    }
    if config.simulation.transaction_index < 0 {
        errors.push(ValidationError::new(
            "simulation.transaction_index",
            "must not be negative",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&DemoConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = DemoConfig::default();
        config.client.endpoint = "ftp://node".to_string();
        config.signer.seed_phrase = "   ".to_string();
        config.submission.payload = String::new();
        config.submission.app_id = u32::MAX;
        config.observability.log_level = "loud".to_string();

        let errors = validate_config(&config).unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec![
                "client.endpoint",
                "signer.seed_phrase",
                "submission.payload",
                "submission.app_id",
                "observability.log_level",
            ]
        );
    }

    #[test]
    fn test_seed_error_does_not_leak_phrase() {
        let mut config = DemoConfig::default();
        config.signer.seed_phrase = "secret\0secret".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().all(|e| !e.to_string().contains("secret")));
    }

    #[test]
    fn test_secret_uris_pass_through() {
        let mnemonic = DemoConfig::default().signer.seed_phrase;
        for seed in ["//Alice".to_string(), format!("{}//Alice", mnemonic)] {
            let mut config = DemoConfig::default();
            config.signer.seed_phrase = seed;
            assert!(validate_config(&config).is_ok());
        }
    }

    #[test]
    fn test_prefix_line_break_rejected() {
        let mut config = DemoConfig::default();
        config.report.prefix = "C\nD".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors[0].field, "report.prefix");
    }
}
