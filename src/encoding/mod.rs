//! Byte encodings used in reports.

pub mod hex;

pub use hex::encode_hex;
