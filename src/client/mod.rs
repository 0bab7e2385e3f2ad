//! Data-availability client boundary.
//!
//! # Data Flow
//! ```text
//! endpoint URL        → initialize_client
//! seed phrase         → initialize_signer        → SignerHandle
//! payload + app id    → submit_data              → SubmissionHandle
//! SubmissionHandle    → transaction_receipt      → ReceiptHandle (blocks until inclusion)
//! ReceiptHandle       → receipt_new              → OwnedReceipt (caller-owned)
//! OwnedReceipt (drop) → receipt_free
//! ```
//!
//! # Implementations
//! - `ffi.rs`: the native library, linked when the `ffi` feature is enabled
//! - `simulated.rs`: in-process stand-in with the same handle bookkeeping
//!
//! # Constraints
//! - Handles are opaque; they are only ever passed back unchanged
//! - Seed phrases are never logged
//! - Signing, RPC and retry policy live behind this boundary

#[cfg(feature = "ffi")]
pub mod ffi;
pub mod receipt;
pub mod simulated;
pub mod types;

#[cfg(feature = "ffi")]
pub use ffi::FfiClient;
pub use receipt::OwnedReceipt;
pub use simulated::SimulatedClient;
pub use types::{
    AppId, Capability, ClientError, ClientResult, HandleKind, Receipt, ReceiptHandle,
    SeedPhrase, SignerHandle, SubmissionHandle,
};

/// The six capabilities of a data-availability client library.
///
/// Calls are synchronous. `transaction_receipt` may block for as long as the
/// library needs to see the transaction included.
pub trait DaClient {
    /// Receipt allocation owned by the caller between `receipt_new` and `receipt_free`.
    type Allocation;

    /// Connect to the node at `endpoint`.
    fn initialize_client(&self, endpoint: &str) -> ClientResult<()>;

    /// Derive a signer from a seed phrase.
    fn initialize_signer(&self, seed: &SeedPhrase) -> ClientResult<SignerHandle>;

    /// Sign and submit `data` under `app_id`.
    fn submit_data(
        &self,
        signer: SignerHandle,
        data: &str,
        app_id: AppId,
    ) -> ClientResult<SubmissionHandle>;

    /// Wait until the submitted transaction is included.
    fn transaction_receipt(&self, submission: SubmissionHandle) -> ClientResult<ReceiptHandle>;

    /// Materialize the receipt behind `receipt` as a caller-owned allocation.
    fn receipt_new(&self, receipt: ReceiptHandle) -> ClientResult<Self::Allocation>;

    /// Read the receipt stored in an allocation.
    fn receipt_view(allocation: &Self::Allocation) -> &Receipt;

    /// Give the allocation back. Consuming it rules out a second release.
    fn receipt_free(&self, allocation: Self::Allocation);
}
