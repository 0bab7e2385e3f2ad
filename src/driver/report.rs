//! Receipt report rendering.
//!
//! # Layouts
//! ```text
//! two_line:    C: Block Height: 100, Tx Index: 2
//!              C: Block Hash: 0x11…11, Tx Hash: 0x22…22
//! single_line: C: Block Height: 100, Transaction Index: 2, Block Hash: 0x…, Transaction Hash: 0x…
//! json:        {"block_height":100,"transaction_index":2,"block_hash":"0x…","transaction_hash":"0x…"}
//! ```

use serde::Serialize;
use std::io::{self, Write};

use crate::client::Receipt;
use crate::config::{ReportConfig, ReportStyle};
use crate::driver::error::{DemoError, DemoResult};
use crate::encoding::encode_hex;

/// What a finished run reports: the receipt with both hashes hex-encoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReceiptReport {
    pub block_height: i32,
    pub transaction_index: i32,
    /// Lowercase hex, no `0x` prefix.
    pub block_hash: String,
    /// Lowercase hex, no `0x` prefix.
    pub transaction_hash: String,
}

#[derive(Serialize)]
struct JsonReport {
    block_height: i32,
    transaction_index: i32,
    block_hash: String,
    transaction_hash: String,
}

/// Hex-encode a 32-byte hash with `encode`, mapping an absent result to
/// `DemoError::Allocation`.
pub fn encode_hash<F>(hash: &[u8; 32], encode: F) -> DemoResult<String>
where
    F: Fn(&[u8]) -> Option<String>,
{
    encode(hash).ok_or(DemoError::Allocation {
        bytes: hash.len() * 2,
    })
}

impl ReceiptReport {
    /// Report for `receipt` with both hashes still empty.
    ///
    /// An empty `String` holds no allocation; the hashes are filled in by the
    /// caller, which owns their release order.
    pub fn pending(receipt: &Receipt) -> Self {
        Self {
            block_height: receipt.block_height,
            transaction_index: receipt.transaction_index,
            block_hash: String::new(),
            transaction_hash: String::new(),
        }
    }

    /// Encode both hashes of `receipt` in one go.
    pub fn from_receipt(receipt: &Receipt) -> DemoResult<Self> {
        let mut report = Self::pending(receipt);
        report.block_hash = encode_hash(&receipt.block_hash, encode_hex)?;
        report.transaction_hash = encode_hash(&receipt.transaction_hash, encode_hex)?;
        Ok(report)
    }

    /// Write the report in the configured layout.
    pub fn write_to<W: Write>(&self, out: &mut W, config: &ReportConfig) -> io::Result<()> {
        let prefix = &config.prefix;
        match config.style {
            ReportStyle::TwoLine => {
                writeln!(
                    out,
                    "{}: Block Height: {}, Tx Index: {}",
                    prefix, self.block_height, self.transaction_index
                )?;
                writeln!(
                    out,
                    "{}: Block Hash: 0x{}, Tx Hash: 0x{}",
                    prefix, self.block_hash, self.transaction_hash
                )?;
            }
            ReportStyle::SingleLine => {
                writeln!(
                    out,
                    "{}: Block Height: {}, Transaction Index: {}, Block Hash: 0x{}, Transaction Hash: 0x{}",
                    prefix,
                    self.block_height,
                    self.transaction_index,
                    self.block_hash,
                    self.transaction_hash
                )?;
            }
            ReportStyle::Json => {
                let json = JsonReport {
                    block_height: self.block_height,
                    transaction_index: self.transaction_index,
                    block_hash: format!("0x{}", self.block_hash),
                    transaction_hash: format!("0x{}", self.transaction_hash),
                };
                serde_json::to_writer(&mut *out, &json)?;
                writeln!(out)?;
            }
        }
        out.flush()
    }
}
