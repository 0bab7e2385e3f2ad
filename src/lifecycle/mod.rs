//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Load config → Apply overrides → Validate → Pick backend → Run driver
//! ```
//!
//! # Design Decisions
//! - Ordered startup: config first, then logging, then the client
//! - A run ends when the driver returns; there is nothing to shut down

pub mod startup;

pub use startup::{execute, prepare_config, Overrides};
