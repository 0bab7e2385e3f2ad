//! Driver lifecycle states.
//!
//! # State Transitions
//! ```text
//! Uninitialized → ClientReady   initialize_client
//! ClientReady   → SignerReady   initialize_signer
//! SignerReady   → Submitted     submit_data
//! Submitted     → Received      get_transaction_receipt
//! Received      → Reported      materialize, encode, print
//! Reported      → Done          release
//! ```
//! There is no branching and no way back.

use std::fmt;

use crate::client::{ReceiptHandle, SignerHandle, SubmissionHandle};

/// Where a driver is in its single run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    Uninitialized,
    ClientReady,
    SignerReady(SignerHandle),
    Submitted(SubmissionHandle),
    Received(ReceiptHandle),
    Reported,
    Done,
}

impl DriverState {
    /// Position in the sequence, starting at 0.
    pub fn ordinal(&self) -> u8 {
        match self {
            DriverState::Uninitialized => 0,
            DriverState::ClientReady => 1,
            DriverState::SignerReady(_) => 2,
            DriverState::Submitted(_) => 3,
            DriverState::Received(_) => 4,
            DriverState::Reported => 5,
            DriverState::Done => 6,
        }
    }

    /// Whether `next` is the one state allowed to follow this one.
    pub fn can_advance_to(&self, next: &DriverState) -> bool {
        next.ordinal() == self.ordinal() + 1
    }

    pub fn name(&self) -> &'static str {
        match self {
            DriverState::Uninitialized => "uninitialized",
            DriverState::ClientReady => "client_ready",
            DriverState::SignerReady(_) => "signer_ready",
            DriverState::Submitted(_) => "submitted",
            DriverState::Received(_) => "received",
            DriverState::Reported => "reported",
            DriverState::Done => "done",
        }
    }
}

impl fmt::Display for DriverState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DriverState::SignerReady(handle) => write!(f, "{} ({})", self.name(), handle),
            DriverState::Submitted(handle) => write!(f, "{} ({})", self.name(), handle),
            DriverState::Received(handle) => write!(f, "{} ({})", self.name(), handle),
            _ => f.write_str(self.name()),
        }
    }
}
