//! Startup orchestration.
//!
//! # Responsibilities
//! - Load and validate configuration
//! - Construct the configured client backend
//! - Hand the client to the driver and return its report

use std::io::Write;
use std::path::Path;

use crate::client::SimulatedClient;
use crate::config::validation::validate_config;
use crate::config::{read_config, BackendKind, ConfigError, DemoConfig, ReportStyle};
use crate::driver::{DemoDriver, DemoResult, ReceiptReport};

/// Command-line values that take precedence over the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub backend: Option<BackendKind>,
    pub style: Option<ReportStyle>,
}

/// Build the effective configuration: file (or defaults), environment, overrides.
pub fn prepare_config(path: Option<&Path>, overrides: &Overrides) -> Result<DemoConfig, ConfigError> {
    let mut config = match path {
        Some(path) => read_config(path)?,
        None => DemoConfig::default(),
    };
    config.apply_env();
    if let Some(backend) = overrides.backend {
        config.backend = backend;
    }
    if let Some(style) = overrides.style {
        config.report.style = style;
    }
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Warning to log before a run whose report does not come from a real chain.
pub fn backend_warning(backend: BackendKind) -> Option<&'static str> {
    match backend {
        BackendKind::Simulated => {
            Some("Simulated backend selected: nothing is submitted and the reported hashes are synthetic")
        }
        BackendKind::Ffi => None,
    }
}

/// Run the demo against the configured backend, writing the report to `out`.
pub fn execute<W: Write>(config: &DemoConfig, out: &mut W) -> DemoResult<ReceiptReport> {
    tracing::info!(
        backend = %config.backend,
        endpoint = %config.client.endpoint,
        app_id = config.submission.app_id,
        "Starting demo run"
    );
    if let Some(warning) = backend_warning(config.backend) {
        tracing::warn!(backend = %config.backend, "{}", warning);
    }

    match config.backend {
        BackendKind::Simulated => {
            let client = SimulatedClient::new(config.simulation.clone());
            DemoDriver::new(&client, config.request(), config.report.clone()).run(out)
        }
        #[cfg(feature = "ffi")]
        BackendKind::Ffi => {
            let client = crate::client::FfiClient::new();
            DemoDriver::new(&client, config.request(), config.report.clone()).run(out)
        }
        #[cfg(not(feature = "ffi"))]
        BackendKind::Ffi => Err(crate::driver::DemoError::BackendUnavailable(config.backend.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn test_overrides_win() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"backend = \"ffi\"\n[report]\nstyle = \"json\"\n").unwrap();

        let overrides = Overrides {
            backend: Some(BackendKind::Simulated),
            style: Some(ReportStyle::SingleLine),
        };
        let config = prepare_config(Some(file.path()), &overrides).unwrap();
        assert_eq!(config.backend, BackendKind::Simulated);
        assert_eq!(config.report.style, ReportStyle::SingleLine);
    }

    #[test]
    fn test_invalid_file_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"[client]\nendpoint = \"nowhere\"\n").unwrap();
        let err = prepare_config(Some(file.path()), &Overrides::default()).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_execute_simulated() {
        let mut config = DemoConfig::default();
        config.backend = BackendKind::Simulated;
        config.simulation.start_height = 77;

        let mut out = Vec::new();
        let report = execute(&config, &mut out).unwrap();
        assert_eq!(report.block_height, 77);
        assert!(String::from_utf8(out).unwrap().contains("Block Height: 77"));
    }

    #[test]
    fn test_simulated_backend_is_flagged() {
        assert!(backend_warning(BackendKind::Simulated).is_some());
        assert!(backend_warning(BackendKind::Ffi).is_none());
    }

    #[cfg(not(feature = "ffi"))]
    #[test]
    fn test_ffi_unavailable_without_feature() {
        use crate::driver::DemoError;

        let mut config = DemoConfig::default();
        config.backend = BackendKind::Ffi;
        let err = execute(&config, &mut Vec::new()).unwrap_err();
        assert!(matches!(err, DemoError::BackendUnavailable(_)));
    }
}
