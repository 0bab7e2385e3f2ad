//! Demo driver: one transaction lifecycle against a data-availability client.
//!
//! # Data Flow
//! ```text
//! SubmissionRequest
//!     → client: initialize_client → initialize_signer → submit_data
//!     → client: transaction_receipt (blocks until inclusion)
//!     → OwnedReceipt → ReceiptReport (hex hashes) → output sink
//!     → release receipt, then hex strings
//! ```
//!
//! # Design Decisions
//! - Strictly sequential; retry and timeout policy belong to the client
//! - The first failure ends the run, nothing after it executes
//! - Release order is fixed by field order in `ReportScope`, so it also holds
//!   when writing the report fails

pub mod error;
pub mod report;
pub mod state;

pub use error::{DemoError, DemoResult};
pub use report::ReceiptReport;
pub use state::DriverState;

use std::io::Write;

use crate::client::{Capability, DaClient, OwnedReceipt};
use crate::config::{ReportConfig, SubmissionRequest};
use crate::encoding::encode_hex;
use report::encode_hash;

/// Values that must be released receipt first, then hex strings.
///
/// Struct fields drop in declaration order, so an early return at any point
/// after the receipt is materialized keeps that order.
struct ReportScope<'c, C: DaClient + ?Sized> {
    receipt: OwnedReceipt<'c, C>,
    report: ReceiptReport,
}

impl<'c, C: DaClient + ?Sized> ReportScope<'c, C> {
    fn new(receipt: OwnedReceipt<'c, C>) -> Self {
        Self {
            report: ReceiptReport::pending(&receipt),
            receipt,
        }
    }

    fn encode_hashes<F>(&mut self, encode: F) -> DemoResult<()>
    where
        F: Fn(&[u8]) -> Option<String>,
    {
        self.report.block_hash = encode_hash(&self.receipt.block_hash, &encode)?;
        self.report.transaction_hash = encode_hash(&self.receipt.transaction_hash, &encode)?;
        Ok(())
    }
}

/// Runs one submission through a client and reports the receipt.
pub struct DemoDriver<'c, C: DaClient + ?Sized> {
    client: &'c C,
    request: SubmissionRequest,
    report: ReportConfig,
    state: DriverState,
    started: bool,
}

impl<'c, C: DaClient + ?Sized> DemoDriver<'c, C> {
    pub fn new(client: &'c C, request: SubmissionRequest, report: ReportConfig) -> Self {
        Self {
            client,
            request,
            report,
            state: DriverState::Uninitialized,
            started: false,
        }
    }

    /// Current state; after a failure, the last state that was reached.
    pub fn state(&self) -> DriverState {
        self.state
    }

    fn advance(&mut self, next: DriverState) {
        debug_assert!(self.state.can_advance_to(&next), "{} -> {}", self.state, next);
        tracing::debug!(from = %self.state, to = %next, "Driver state transition");
        self.state = next;
    }

    /// Run the whole sequence once, writing the report to `out`.
    ///
    /// A driver runs at most once, whether or not the first run succeeded.
    pub fn run<W: Write>(&mut self, out: &mut W) -> DemoResult<ReceiptReport> {
        self.run_with_encoder(out, encode_hex)
    }

    fn run_with_encoder<W, F>(&mut self, out: &mut W, encode: F) -> DemoResult<ReceiptReport>
    where
        W: Write,
        F: Fn(&[u8]) -> Option<String>,
    {
        if self.started {
            return Err(DemoError::AlreadyStarted(self.state));
        }
        self.started = true;

        let span = tracing::info_span!("demo_run", app_id = %self.request.app_id);
        let _guard = span.enter();

        self.client
            .initialize_client(&self.request.endpoint)
            .map_err(DemoError::at(Capability::InitializeClient))?;
        self.advance(DriverState::ClientReady);

        let signer = self
            .client
            .initialize_signer(&self.request.seed)
            .map_err(DemoError::at(Capability::InitializeSigner))?;
        self.advance(DriverState::SignerReady(signer));

        let submission = self
            .client
            .submit_data(signer, &self.request.payload, self.request.app_id)
            .map_err(DemoError::at(Capability::SubmitData))?;
        self.advance(DriverState::Submitted(submission));

        let receipt_handle = self
            .client
            .transaction_receipt(submission)
            .map_err(DemoError::at(Capability::GetTransactionReceipt))?;
        self.advance(DriverState::Received(receipt_handle));

        let receipt = OwnedReceipt::materialize(self.client, receipt_handle)
            .map_err(DemoError::at(Capability::ReceiptMaterialize))?;
        let mut scope = ReportScope::new(receipt);
        scope.encode_hashes(encode)?;

        scope.report.write_to(out, &self.report)?;
        self.advance(DriverState::Reported);

        let ReportScope { receipt, report } = scope;
        receipt.release();
        self.advance(DriverState::Done);

        tracing::info!(
            block_height = report.block_height,
            transaction_index = report.transaction_index,
            "Receipt reported"
        );
        Ok(report)
    }
}

impl<C: DaClient + ?Sized> std::fmt::Debug for DemoDriver<'_, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DemoDriver")
            .field("endpoint", &self.request.endpoint)
            .field("app_id", &self.request.app_id)
            .field("state", &self.state)
            .finish()
    }
}
