//! Shared utilities for integration testing.

use std::cell::RefCell;

use avail_demo::client::{
    AppId, Capability, ClientError, ClientResult, DaClient, Receipt, ReceiptHandle, SeedPhrase,
    SignerHandle, SubmissionHandle,
};

/// Something the stub client was asked to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    InitializeClient(String),
    InitializeSigner,
    SubmitData { signer: i32, data: String, app_id: u32 },
    TransactionReceipt(i32),
    ReceiptNew(i32),
    ReceiptFree { allocation: usize },
}

/// Allocation handed out by the stub; carries an id so releases can be counted.
#[derive(Debug)]
pub struct TrackedReceipt {
    pub id: usize,
    pub receipt: Receipt,
}

/// Client returning fixed values, recording every call.
pub struct StubClient {
    pub receipt: Receipt,
    pub fail_at: Option<Capability>,
    calls: RefCell<Vec<Call>>,
    allocated: RefCell<usize>,
}

impl StubClient {
    /// Height 100, index 2, block hash 32 × 0x11, tx hash 32 × 0x22.
    pub fn new() -> Self {
        Self {
            receipt: Receipt {
                block_height: 100,
                block_hash: [0x11; 32],
                transaction_index: 2,
                transaction_hash: [0x22; 32],
                handle: 0,
            },
            fail_at: None,
            calls: RefCell::new(Vec::new()),
            allocated: RefCell::new(0),
        }
    }

    pub fn failing_at(step: Capability) -> Self {
        Self {
            fail_at: Some(step),
            ..Self::new()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    /// Allocation ids released, in release order.
    pub fn released(&self) -> Vec<usize> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                Call::ReceiptFree { allocation } => Some(*allocation),
                _ => None,
            })
            .collect()
    }

    pub fn allocations(&self) -> usize {
        *self.allocated.borrow()
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    fn check(&self, step: Capability) -> ClientResult<()> {
        if self.fail_at == Some(step) {
            return Err(ClientError::CallFailed {
                call: step,
                reason: "injected failure".to_string(),
            });
        }
        Ok(())
    }
}

impl DaClient for StubClient {
    type Allocation = TrackedReceipt;

    fn initialize_client(&self, endpoint: &str) -> ClientResult<()> {
        self.record(Call::InitializeClient(endpoint.to_string()));
        self.check(Capability::InitializeClient)
    }

    fn initialize_signer(&self, _seed: &SeedPhrase) -> ClientResult<SignerHandle> {
        self.record(Call::InitializeSigner);
        self.check(Capability::InitializeSigner)?;
        Ok(SignerHandle(4))
    }

    fn submit_data(
        &self,
        signer: SignerHandle,
        data: &str,
        app_id: AppId,
    ) -> ClientResult<SubmissionHandle> {
        self.record(Call::SubmitData {
            signer: signer.0,
            data: data.to_string(),
            app_id: app_id.0,
        });
        self.check(Capability::SubmitData)?;
        Ok(SubmissionHandle(5))
    }

    fn transaction_receipt(&self, submission: SubmissionHandle) -> ClientResult<ReceiptHandle> {
        self.record(Call::TransactionReceipt(submission.0));
        self.check(Capability::GetTransactionReceipt)?;
        Ok(ReceiptHandle(6))
    }

    fn receipt_new(&self, receipt: ReceiptHandle) -> ClientResult<TrackedReceipt> {
        self.record(Call::ReceiptNew(receipt.0));
        self.check(Capability::ReceiptMaterialize)?;
        let mut allocated = self.allocated.borrow_mut();
        *allocated += 1;
        Ok(TrackedReceipt {
            id: *allocated,
            receipt: Receipt {
                handle: receipt.0,
                ..self.receipt
            },
        })
    }

    fn receipt_view(allocation: &TrackedReceipt) -> &Receipt {
        &allocation.receipt
    }

    fn receipt_free(&self, allocation: TrackedReceipt) {
        self.record(Call::ReceiptFree {
            allocation: allocation.id,
        });
    }
}

/// Writer that fails every write.
pub struct BrokenPipe;

impl std::io::Write for BrokenPipe {
    fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
        Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
