//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! client + driver produce:
//!     → logging.rs (structured log events on stderr)
//!
//! stdout is reserved for the receipt report.
//! ```

pub mod logging;
