//! Data-availability submission demo library

pub mod client;
pub mod config;
pub mod driver;
pub mod encoding;
pub mod lifecycle;
pub mod observability;

pub use client::DaClient;
pub use config::DemoConfig;
pub use driver::{DemoDriver, DemoError, ReceiptReport};
