//! Driver error definitions.

use thiserror::Error;

use crate::client::{Capability, ClientError};
use crate::driver::state::DriverState;

/// Errors that stop a demo run.
#[derive(Debug, Error)]
pub enum DemoError {
    /// A client call failed; no later step ran.
    #[error("{step} failed")]
    Client {
        step: Capability,
        #[source]
        source: ClientError,
    },

    /// Hex encoding could not allocate its output.
    #[error("Could not allocate {bytes} bytes for hex encoding")]
    Allocation { bytes: usize },

    /// The report could not be written.
    #[error("Failed to write report: {0}")]
    Report(#[from] std::io::Error),

    /// The driver has already left its initial state.
    #[error("Driver already started (state: {0})")]
    AlreadyStarted(DriverState),

    /// The requested backend is not compiled into this binary.
    #[error("Backend '{0}' is not available in this build")]
    BackendUnavailable(String),
}

impl DemoError {
    /// Adapter for `map_err` that tags a client error with its step.
    pub fn at(step: Capability) -> impl FnOnce(ClientError) -> DemoError {
        move |source| DemoError::Client { step, source }
    }

    /// The client step that failed, if any.
    pub fn failed_step(&self) -> Option<Capability> {
        match self {
            DemoError::Client { step, .. } => Some(*step),
            _ => None,
        }
    }
}

/// Render an error and every `source()` below it, joined by `": "`.
pub fn display_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut rendered = err.to_string();
    let mut next = err.source();
    while let Some(cause) = next {
        rendered.push_str(": ");
        rendered.push_str(&cause.to_string());
        next = cause.source();
    }
    rendered
}

/// Result type for driver operations.
pub type DemoResult<T> = Result<T, DemoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DemoError::at(Capability::SubmitData)(ClientError::NotInitialized);
        assert_eq!(err.to_string(), "submit_data failed");
        assert_eq!(err.failed_step(), Some(Capability::SubmitData));

        let source = std::error::Error::source(&err).unwrap();
        assert_eq!(source.to_string(), "Client not initialized");
        assert_eq!(display_chain(&err), "submit_data failed: Client not initialized");

        let err = DemoError::Allocation { bytes: 64 };
        assert!(err.to_string().contains("64"));
        assert_eq!(err.failed_step(), None);
    }
}
