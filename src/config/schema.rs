//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the demo.
//! All types derive Serde traits for deserialization from config files, and
//! every field has a default so that an empty file reproduces the fixed demo.

use serde::{Deserialize, Serialize};

use crate::client::{AppId, SeedPhrase};

/// Environment variable that overrides `signer.seed_phrase`.
pub const SEED_PHRASE_ENV_VAR: &str = "AVAIL_DEMO_SEED_PHRASE";

/// Root configuration for a demo run.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct DemoConfig {
    /// Node connection settings.
    pub client: ClientConfig,

    /// Signer derivation settings.
    pub signer: SignerConfig,

    /// What gets submitted.
    pub submission: SubmissionConfig,

    /// Which client implementation to drive.
    pub backend: BackendKind,

    /// How the receipt is printed.
    pub report: ReportConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Settings for the simulated backend.
    pub simulation: SimulationConfig,
}

impl DemoConfig {
    /// Apply `AVAIL_DEMO_SEED_PHRASE` if it is set.
    pub fn apply_env(&mut self) {
        if let Ok(phrase) = std::env::var(SEED_PHRASE_ENV_VAR) {
            if !phrase.trim().is_empty() {
                self.signer.seed_phrase = phrase;
            }
        }
    }

    /// The submission parameters the driver needs.
    pub fn request(&self) -> SubmissionRequest {
        SubmissionRequest {
            endpoint: self.client.endpoint.clone(),
            seed: SeedPhrase::new(self.signer.seed_phrase.clone()),
            payload: self.submission.payload.clone(),
            app_id: AppId(self.submission.app_id),
        }
    }
}

/// Everything one submission needs, in driver order.
#[derive(Debug, Clone)]
pub struct SubmissionRequest {
    pub endpoint: String,
    pub seed: SeedPhrase,
    pub payload: String,
    pub app_id: AppId,
}

/// Node connection configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ClientConfig {
    /// RPC endpoint URL.
    pub endpoint: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://turing-rpc.avail.so/rpc".to_string(),
        }
    }
}

/// Signer configuration.
#[derive(Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SignerConfig {
    /// Secret seed phrase. Never logged.
    pub seed_phrase: String,
}

impl Default for SignerConfig {
    fn default() -> Self {
        Self {
            // Public development account, funded on test networks only.
            seed_phrase: "bottom drive obey lake curtain smoke basket hold race lonely fit walk"
                .to_string(),
        }
    }
}

impl std::fmt::Debug for SignerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignerConfig")
            .field("seed_phrase", &"<redacted>")
            .finish()
    }
}

/// Submission configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SubmissionConfig {
    /// Data to submit.
    pub payload: String,

    /// Application the data is tagged with.
    pub app_id: u32,
}

impl Default for SubmissionConfig {
    fn default() -> Self {
        Self {
            payload: "Hello From C".to_string(),
            app_id: 2,
        }
    }
}

/// Client implementation to drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    /// Native library through the C interface.
    Ffi,
    /// In-process simulation.
    Simulated,
}

impl Default for BackendKind {
    fn default() -> Self {
        if cfg!(feature = "ffi") {
            BackendKind::Ffi
        } else {
            BackendKind::Simulated
        }
    }
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendKind::Ffi => f.write_str("ffi"),
            BackendKind::Simulated => f.write_str("simulated"),
        }
    }
}

/// Report output configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Tag printed before each line.
    pub prefix: String,

    /// Output layout.
    pub style: ReportStyle,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            prefix: "C".to_string(),
            style: ReportStyle::TwoLine,
        }
    }
}

/// Report layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ReportStyle {
    /// Height and index on one line, hashes on the next.
    #[default]
    TwoLine,
    /// Everything on one line.
    SingleLine,
    /// One JSON object.
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit logs as JSON.
    pub json: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json: false,
        }
    }
}

/// Simulated backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Height of the first block a transaction lands in.
    pub start_height: i32,

    /// Index every transaction gets within its block.
    pub transaction_index: i32,

    /// How long waiting for inclusion blocks, in milliseconds.
    pub inclusion_delay_ms: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            start_height: 1,
            transaction_index: 1,
            inclusion_delay_ms: 0,
        }
    }
}
