//! In-process client with the native library's handle bookkeeping.
//!
//! Nothing leaves the process. Signers, submissions and receipts are kept in
//! per-kind tables keyed by handle, and every receipt lands in a fresh block.
//! Hashes are Keccak-256 digests of the submission, so identical inputs give
//! identical receipts.

use dashmap::DashMap;
use sha3::{Digest, Keccak256};
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::RwLock;
use std::time::Duration;
use url::Url;

use crate::client::types::{
    check_seed_phrase, AppId, ClientError, ClientResult, HandleKind, Receipt, ReceiptHandle,
    SeedPhrase, SignerHandle, SubmissionHandle,
};
use crate::client::DaClient;
use crate::config::schema::SimulationConfig;

/// Endpoint schemes the client accepts.
pub const SUPPORTED_SCHEMES: [&str; 4] = ["http", "https", "ws", "wss"];

/// A transaction that has been signed and handed to the node.
#[derive(Debug, Clone)]
struct Submission {
    tx_hash: [u8; 32],
}

/// Monotonic handle source for one handle kind.
#[derive(Debug, Default)]
struct HandleCounter(AtomicI32);

impl HandleCounter {
    fn next(&self) -> i32 {
        self.0.fetch_add(1, Ordering::SeqCst)
    }
}

/// Simulated data-availability client.
#[derive(Debug)]
pub struct SimulatedClient {
    settings: SimulationConfig,
    endpoint: RwLock<Option<Url>>,
    signers: DashMap<i32, [u8; 32]>,
    submissions: DashMap<i32, Submission>,
    receipts: DashMap<i32, Receipt>,
    next_signer: HandleCounter,
    next_submission: HandleCounter,
    next_receipt: HandleCounter,
    blocks_produced: AtomicI32,
}

/// Parse and check a node endpoint.
pub fn parse_endpoint(endpoint: &str) -> ClientResult<Url> {
    let url = Url::parse(endpoint).map_err(|e| ClientError::InvalidEndpoint {
        endpoint: endpoint.to_string(),
        reason: e.to_string(),
    })?;
    if !SUPPORTED_SCHEMES.contains(&url.scheme()) {
        return Err(ClientError::InvalidEndpoint {
            endpoint: endpoint.to_string(),
            reason: format!("unsupported scheme '{}'", url.scheme()),
        });
    }
    Ok(url)
}

fn keccak(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize().into()
}

impl SimulatedClient {
    pub fn new(settings: SimulationConfig) -> Self {
        Self {
            settings,
            endpoint: RwLock::new(None),
            signers: DashMap::new(),
            submissions: DashMap::new(),
            receipts: DashMap::new(),
            next_signer: HandleCounter::default(),
            next_submission: HandleCounter::default(),
            next_receipt: HandleCounter::default(),
            blocks_produced: AtomicI32::new(0),
        }
    }

    /// Endpoint the client was last initialized with.
    pub fn endpoint(&self) -> Option<Url> {
        self.endpoint.read().ok().and_then(|guard| guard.clone())
    }

    /// Number of receipts that have not been released yet.
    pub fn outstanding_receipts(&self) -> usize {
        self.receipts.len()
    }

    fn ensure_initialized(&self) -> ClientResult<()> {
        match self.endpoint.read() {
            Ok(guard) if guard.is_some() => Ok(()),
            _ => Err(ClientError::NotInitialized),
        }
    }
}

impl Default for SimulatedClient {
    fn default() -> Self {
        Self::new(SimulationConfig::default())
    }
}

impl DaClient for SimulatedClient {
    type Allocation = Box<Receipt>;

    fn initialize_client(&self, endpoint: &str) -> ClientResult<()> {
        let url = parse_endpoint(endpoint)?;
        tracing::info!(endpoint = %url, "Simulated client initialized");
        if let Ok(mut guard) = self.endpoint.write() {
            *guard = Some(url);
        }
        Ok(())
    }

    fn initialize_signer(&self, seed: &SeedPhrase) -> ClientResult<SignerHandle> {
        self.ensure_initialized()?;
        check_seed_phrase(seed).map_err(ClientError::InvalidSeed)?;

        let key = keccak(&[seed.expose().as_bytes()]);
        let handle = self.next_signer.next();
        self.signers.insert(handle, key);
        Ok(SignerHandle(handle))
    }

    fn submit_data(
        &self,
        signer: SignerHandle,
        data: &str,
        app_id: AppId,
    ) -> ClientResult<SubmissionHandle> {
        self.ensure_initialized()?;
        let key = self
            .signers
            .get(&signer.0)
            .map(|entry| *entry.value())
            .ok_or(ClientError::UnknownHandle {
                kind: HandleKind::Signer,
                handle: signer.0,
            })?;

        let tx_hash = keccak(&[&key, &app_id.0.to_be_bytes(), data.as_bytes()]);
        let handle = self.next_submission.next();
        self.submissions.insert(handle, Submission { tx_hash });
        tracing::debug!(submission = handle, app_id = %app_id, bytes = data.len(), "Data submitted");
        Ok(SubmissionHandle(handle))
    }

    fn transaction_receipt(&self, submission: SubmissionHandle) -> ClientResult<ReceiptHandle> {
        self.ensure_initialized()?;
        let tx_hash = self
            .submissions
            .get(&submission.0)
            .map(|entry| entry.value().tx_hash)
            .ok_or(ClientError::UnknownHandle {
                kind: HandleKind::Submission,
                handle: submission.0,
            })?;

        if self.settings.inclusion_delay_ms > 0 {
            std::thread::sleep(Duration::from_millis(self.settings.inclusion_delay_ms));
        }

        let offset = self.blocks_produced.fetch_add(1, Ordering::SeqCst);
        let block_height = self.settings.start_height.saturating_add(offset);
        let block_hash = keccak(&[&block_height.to_be_bytes(), &tx_hash]);

        let handle = self.next_receipt.next();
        self.receipts.insert(
            handle,
            Receipt {
                block_height,
                block_hash,
                transaction_index: self.settings.transaction_index,
                transaction_hash: tx_hash,
                handle,
            },
        );
        tracing::debug!(receipt = handle, block_height, "Transaction included");
        Ok(ReceiptHandle(handle))
    }

    fn receipt_new(&self, receipt: ReceiptHandle) -> ClientResult<Box<Receipt>> {
        self.receipts
            .get(&receipt.0)
            .map(|entry| Box::new(*entry.value()))
            .ok_or(ClientError::UnknownHandle {
                kind: HandleKind::Receipt,
                handle: receipt.0,
            })
    }

    fn receipt_view(allocation: &Box<Receipt>) -> &Receipt {
        allocation
    }

    fn receipt_free(&self, allocation: Box<Receipt>) {
        self.receipts.remove(&allocation.handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEV_SEED: &str =
        "bottom drive obey lake curtain smoke basket hold race lonely fit walk";
    const ENDPOINT: &str = "https://turing-rpc.avail.so/rpc";

    fn ready_client() -> SimulatedClient {
        let client = SimulatedClient::default();
        client.initialize_client(ENDPOINT).unwrap();
        client
    }

    #[test]
    fn test_calls_before_initialization_fail() {
        let client = SimulatedClient::default();
        let result = client.initialize_signer(&SeedPhrase::new(DEV_SEED));
        assert!(matches!(result, Err(ClientError::NotInitialized)));
    }

    #[test]
    fn test_invalid_endpoint() {
        let client = SimulatedClient::default();
        assert!(client.initialize_client("not a url").is_err());

        let err = client.initialize_client("ftp://node.example").unwrap_err();
        assert!(err.to_string().contains("unsupported scheme"));
        assert!(client.endpoint().is_none());
    }

    #[test]
    fn test_handles_are_minted_per_kind() {
        let client = ready_client();
        let seed = SeedPhrase::new(DEV_SEED);
        assert_eq!(client.initialize_signer(&seed).unwrap(), SignerHandle(0));
        assert_eq!(client.initialize_signer(&seed).unwrap(), SignerHandle(1));

        let submission = client.submit_data(SignerHandle(1), "Hello", AppId(2)).unwrap();
        assert_eq!(submission, SubmissionHandle(0));
    }

    #[test]
    fn test_unknown_signer() {
        let client = ready_client();
        let err = client.submit_data(SignerHandle(5), "Hello", AppId(2)).unwrap_err();
        assert!(matches!(
            err,
            ClientError::UnknownHandle { kind: HandleKind::Signer, handle: 5 }
        ));
    }

    #[test]
    fn test_invalid_seed() {
        let client = ready_client();
        let err = client.initialize_signer(&SeedPhrase::new("one two three")).unwrap_err();
        assert!(matches!(err, ClientError::InvalidSeed(_)));
    }

    #[test]
    fn test_receipts_land_in_consecutive_blocks() {
        let client = SimulatedClient::new(SimulationConfig {
            start_height: 100,
            transaction_index: 2,
            inclusion_delay_ms: 0,
        });
        client.initialize_client(ENDPOINT).unwrap();
        let signer = client.initialize_signer(&SeedPhrase::new(DEV_SEED)).unwrap();

        let first = client.submit_data(signer, "one", AppId(2)).unwrap();
        let second = client.submit_data(signer, "two", AppId(2)).unwrap();
        let first = client.transaction_receipt(first).unwrap();
        let second = client.transaction_receipt(second).unwrap();

        let first = client.receipt_new(first).unwrap();
        let second = client.receipt_new(second).unwrap();
        assert_eq!(first.block_height, 100);
        assert_eq!(second.block_height, 101);
        assert_eq!(first.transaction_index, 2);
        assert_ne!(first.transaction_hash, second.transaction_hash);
        assert_ne!(first.block_hash, second.block_hash);
    }

    #[test]
    fn test_transaction_hash_is_deterministic() {
        let a = ready_client();
        let b = ready_client();
        let seed = SeedPhrase::new(DEV_SEED);

        let hash = |client: &SimulatedClient| {
            let signer = client.initialize_signer(&seed).unwrap();
            let submission = client.submit_data(signer, "Hello From C", AppId(2)).unwrap();
            let receipt = client.transaction_receipt(submission).unwrap();
            client.receipt_new(receipt).unwrap().transaction_hash
        };
        assert_eq!(hash(&a), hash(&b));
    }

    #[test]
    fn test_free_forgets_the_receipt() {
        let client = ready_client();
        let signer = client.initialize_signer(&SeedPhrase::new(DEV_SEED)).unwrap();
        let submission = client.submit_data(signer, "Hello", AppId(2)).unwrap();
        let handle = client.transaction_receipt(submission).unwrap();
        assert_eq!(client.outstanding_receipts(), 1);

        let receipt = client.receipt_new(handle).unwrap();
        assert_eq!(receipt.handle, handle.0);
        client.receipt_free(receipt);
        assert_eq!(client.outstanding_receipts(), 0);

        let err = client.receipt_new(handle).unwrap_err();
        assert!(matches!(
            err,
            ClientError::UnknownHandle { kind: HandleKind::Receipt, .. }
        ));
    }
}
