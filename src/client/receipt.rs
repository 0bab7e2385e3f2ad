//! Scoped ownership of a materialized receipt.
//!
//! # Responsibilities
//! - Materialize a receipt from its handle
//! - Expose the receipt read-only while it is held
//! - Release the allocation exactly once, on every exit path

use std::ops::Deref;

use crate::client::types::{ClientResult, Receipt, ReceiptHandle};
use crate::client::DaClient;

/// Receipt allocation owned by the caller.
///
/// Dropping the guard hands the allocation back through `receipt_free`.
/// Reads go to a copy taken at materialization, so the guard never reads
/// the allocation after it is gone.
pub struct OwnedReceipt<'c, C: DaClient + ?Sized> {
    client: &'c C,
    handle: ReceiptHandle,
    receipt: Receipt,
    allocation: Option<C::Allocation>,
}

impl<'c, C: DaClient + ?Sized> OwnedReceipt<'c, C> {
    /// Materialize the receipt behind `handle`.
    pub fn materialize(client: &'c C, handle: ReceiptHandle) -> ClientResult<Self> {
        let allocation = client.receipt_new(handle)?;
        let receipt = *C::receipt_view(&allocation);
        tracing::debug!(receipt = %handle, "Receipt materialized");
        Ok(Self {
            client,
            handle,
            receipt,
            allocation: Some(allocation),
        })
    }

    /// Handle the receipt was materialized from.
    pub fn handle(&self) -> ReceiptHandle {
        self.handle
    }

    /// Release the allocation now instead of at end of scope.
    pub fn release(self) {
        drop(self);
    }
}

impl<C: DaClient + ?Sized> Deref for OwnedReceipt<'_, C> {
    type Target = Receipt;

    fn deref(&self) -> &Receipt {
        &self.receipt
    }
}

impl<C: DaClient + ?Sized> Drop for OwnedReceipt<'_, C> {
    fn drop(&mut self) {
        if let Some(allocation) = self.allocation.take() {
            self.client.receipt_free(allocation);
            tracing::debug!(receipt = %self.handle, "Receipt released");
        }
    }
}

impl<C: DaClient + ?Sized> std::fmt::Debug for OwnedReceipt<'_, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OwnedReceipt")
            .field("handle", &self.handle)
            .field("receipt", &**self)
            .finish()
    }
}
