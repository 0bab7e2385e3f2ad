//! Handle types, the receipt layout, and client error definitions.

use std::fmt;

use thiserror::Error;

/// Opaque signer reference minted by the client library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SignerHandle(pub i32);

/// Opaque reference to a transaction the client library has dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubmissionHandle(pub i32);

/// Opaque reference to a receipt held by the client library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReceiptHandle(pub i32);

impl fmt::Display for SignerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "signer#{}", self.0)
    }
}

impl fmt::Display for SubmissionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "submission#{}", self.0)
    }
}

impl fmt::Display for ReceiptHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "receipt#{}", self.0)
    }
}

/// Application identifier the submitted data is tagged with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AppId(pub u32);

impl From<u32> for AppId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl From<AppId> for u32 {
    fn from(id: AppId) -> Self {
        id.0
    }
}

impl fmt::Display for AppId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Secret seed phrase a signer is derived from.
///
/// `Debug` is redacted so the phrase never ends up in logs.
#[derive(Clone, PartialEq, Eq)]
pub struct SeedPhrase(String);

impl SeedPhrase {
    pub fn new(phrase: impl Into<String>) -> Self {
        Self(phrase.into())
    }

    /// Expose the phrase for handing it to the client library.
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Number of whitespace-separated words.
    pub fn word_count(&self) -> usize {
        self.0.split_whitespace().count()
    }
}

impl fmt::Debug for SeedPhrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SeedPhrase(<{} words redacted>)", self.word_count())
    }
}

/// Word counts accepted for a seed phrase.
pub const SEED_WORD_COUNTS: [usize; 5] = [12, 15, 18, 21, 24];

/// Check the shape of a seed phrase: an accepted word count, lowercase ASCII words.
pub fn check_seed_phrase(phrase: &SeedPhrase) -> Result<(), String> {
    let words = phrase.word_count();
    if !SEED_WORD_COUNTS.contains(&words) {
        return Err(format!(
            "expected one of {:?} words, got {}",
            SEED_WORD_COUNTS, words
        ));
    }
    if phrase
        .expose()
        .split_whitespace()
        .any(|word| !word.bytes().all(|b| b.is_ascii_lowercase()))
    {
        return Err("words must be lowercase ASCII letters".to_string());
    }
    Ok(())
}

/// Transaction receipt as laid out by the client library.
///
/// The field order and types match the native `Receipt` struct exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(C)]
pub struct Receipt {
    pub block_height: i32,
    pub block_hash: [u8; 32],
    pub transaction_index: i32,
    pub transaction_hash: [u8; 32],
    /// Receipt handle this struct was materialized from.
    pub handle: i32,
}

/// The six capabilities the client library exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    InitializeClient,
    InitializeSigner,
    SubmitData,
    GetTransactionReceipt,
    ReceiptMaterialize,
    ReceiptRelease,
}

impl Capability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::InitializeClient => "initialize_client",
            Capability::InitializeSigner => "initialize_signer",
            Capability::SubmitData => "submit_data",
            Capability::GetTransactionReceipt => "get_transaction_receipt",
            Capability::ReceiptMaterialize => "receipt_materialize",
            Capability::ReceiptRelease => "receipt_release",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kinds of opaque handle, for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleKind {
    Signer,
    Submission,
    Receipt,
}

impl fmt::Display for HandleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HandleKind::Signer => "signer",
            HandleKind::Submission => "submission",
            HandleKind::Receipt => "receipt",
        };
        f.write_str(name)
    }
}

/// Errors reported across the client boundary.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Endpoint could not be parsed or uses an unsupported scheme.
    #[error("Invalid endpoint '{endpoint}': {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    /// A call was made before `initialize_client`.
    #[error("Client not initialized")]
    NotInitialized,

    /// Seed phrase rejected during signer derivation.
    #[error("Invalid seed phrase: {0}")]
    InvalidSeed(String),

    /// The handle was never minted or has already been released.
    #[error("Unknown {kind} handle {handle}")]
    UnknownHandle { kind: HandleKind, handle: i32 },

    /// The library signalled failure for a call.
    #[error("{call} failed: {reason}")]
    CallFailed { call: Capability, reason: String },

    /// `receipt_new` handed back a null pointer.
    #[error("Receipt materialization returned null for handle {0}")]
    NullReceipt(i32),

    /// A string argument cannot cross the C boundary.
    #[error("String argument contains an interior NUL byte at {0}")]
    InteriorNul(usize),

    /// App id does not fit the C `int` the library expects.
    #[error("App id {0} exceeds the C int range")]
    AppIdOutOfRange(u32),
}

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;
