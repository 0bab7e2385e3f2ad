//! Binding to the native client library (`libavail_rust_ffi`).
//!
//! # Responsibilities
//! - Declare the six exported entry points
//! - Marshal strings and handles across the C boundary
//! - Turn what the C ABI lets us observe into typed errors
//!
//! The native ABI has no error channel. A negative handle or a null receipt
//! pointer is the only failure signal available here; anything else the library
//! does on failure happens on its side of the boundary.

use std::ffi::{c_char, c_int, CString};
use std::ptr::NonNull;

use crate::client::types::{
    AppId, Capability, ClientError, ClientResult, Receipt, ReceiptHandle, SeedPhrase,
    SignerHandle, SubmissionHandle,
};
use crate::client::DaClient;

mod sys {
    use super::{c_char, c_int, Receipt};

    #[link(name = "avail_rust_ffi")]
    extern "C" {
        pub fn initialize_client(endpoint: *const c_char);
        pub fn initialize_signer(secret_seed: *const c_char) -> c_int;
        pub fn do_submit_data(signer_handle: c_int, data: *const c_char, app_id: c_int) -> c_int;
        pub fn get_transaction_receipt(submitted_tx_handle: c_int) -> c_int;
        pub fn receipt_new(receipt_handle: c_int) -> *mut Receipt;
        pub fn receipt_free(receipt: *mut Receipt);
    }
}

/// Receipt allocated by the native library.
///
/// Not `Copy` or `Clone`: the pointer is handed back to `receipt_free` exactly once.
#[derive(Debug)]
pub struct ForeignReceipt(NonNull<Receipt>);

/// Client backed by the native library.
#[derive(Debug, Default)]
pub struct FfiClient {
    _private: (),
}

impl FfiClient {
    pub fn new() -> Self {
        Self::default()
    }
}

fn to_cstring(value: &str) -> ClientResult<CString> {
    CString::new(value).map_err(|e| ClientError::InteriorNul(e.nul_position()))
}

fn check_handle(call: Capability, raw: c_int) -> ClientResult<c_int> {
    if raw < 0 {
        return Err(ClientError::CallFailed {
            call,
            reason: format!("library returned negative handle {}", raw),
        });
    }
    Ok(raw)
}

impl DaClient for FfiClient {
    type Allocation = ForeignReceipt;

    fn initialize_client(&self, endpoint: &str) -> ClientResult<()> {
        let endpoint = to_cstring(endpoint)?;
        // SAFETY: `endpoint` is NUL-terminated and outlives the call.
        unsafe { sys::initialize_client(endpoint.as_ptr()) };
        Ok(())
    }

    fn initialize_signer(&self, seed: &SeedPhrase) -> ClientResult<SignerHandle> {
        let seed = to_cstring(seed.expose())?;
        // SAFETY: `seed` is NUL-terminated and outlives the call.
        let raw = unsafe { sys::initialize_signer(seed.as_ptr()) };
        check_handle(Capability::InitializeSigner, raw).map(SignerHandle)
    }

    fn submit_data(
        &self,
        signer: SignerHandle,
        data: &str,
        app_id: AppId,
    ) -> ClientResult<SubmissionHandle> {
        let app_id = c_int::try_from(app_id.0).map_err(|_| ClientError::AppIdOutOfRange(app_id.0))?;
        let data = to_cstring(data)?;
        // SAFETY: `data` is NUL-terminated and outlives the call.
        let raw = unsafe { sys::do_submit_data(signer.0, data.as_ptr(), app_id) };
        check_handle(Capability::SubmitData, raw).map(SubmissionHandle)
    }

    fn transaction_receipt(&self, submission: SubmissionHandle) -> ClientResult<ReceiptHandle> {
        // SAFETY: plain integer call.
        let raw = unsafe { sys::get_transaction_receipt(submission.0) };
        check_handle(Capability::GetTransactionReceipt, raw).map(ReceiptHandle)
    }

    fn receipt_new(&self, receipt: ReceiptHandle) -> ClientResult<ForeignReceipt> {
        // SAFETY: plain integer call; the returned pointer is checked for null.
        let ptr = unsafe { sys::receipt_new(receipt.0) };
        NonNull::new(ptr)
            .map(ForeignReceipt)
            .ok_or(ClientError::NullReceipt(receipt.0))
    }

    fn receipt_view(allocation: &ForeignReceipt) -> &Receipt {
        // SAFETY: the pointer came from `receipt_new` and stays valid until
        // `receipt_free` consumes the allocation.
        unsafe { allocation.0.as_ref() }
    }

    fn receipt_free(&self, allocation: ForeignReceipt) {
        // SAFETY: ownership of the pointer returns to the library here, once.
        unsafe { sys::receipt_free(allocation.0.as_ptr()) };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interior_nul_rejected() {
        let err = to_cstring("Hello\0World").unwrap_err();
        assert!(matches!(err, ClientError::InteriorNul(5)));
    }

    #[test]
    fn test_negative_handle_is_failure() {
        assert_eq!(check_handle(Capability::SubmitData, 0).unwrap(), 0);
        let err = check_handle(Capability::SubmitData, -1).unwrap_err();
        assert!(err.to_string().contains("submit_data failed"));
    }

    #[test]
    fn test_app_id_out_of_range_fails_before_call() {
        let client = FfiClient::new();
        let err = client
            .submit_data(SignerHandle(0), "data", AppId(u32::MAX))
            .unwrap_err();
        assert!(matches!(err, ClientError::AppIdOutOfRange(u32::MAX)));
    }
}
