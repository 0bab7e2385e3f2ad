//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → DemoConfig::apply_env (seed phrase override)
//!     → CLI overrides (backend, report style)
//!     → validation.rs (semantic checks)
//!     → DemoConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - All fields have defaults; no file at all reproduces the fixed demo run
//! - Validation separates syntactic (serde) from semantic checks
//! - The seed phrase is redacted from every Debug and error rendering

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, read_config, ConfigError};
pub use schema::{BackendKind, DemoConfig, ReportConfig, ReportStyle, SubmissionRequest};
