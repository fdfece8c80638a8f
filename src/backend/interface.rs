use thiserror::Error;

use crate::core::Transaction;

/// Failure inside a storage backend. Never reaches the ledger.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("stored ledger is malformed: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("invalid storage key '{0}': use letters, digits, '-' or '_'")]
    InvalidKey(String)
}

pub type Result<T> = std::result::Result<T, BackendError>;

/// String values addressed by string keys.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn put(&self, key: &str, value: &str) -> Result<()>;
}

/// Persistence of the full transaction sequence.
///
/// Both calls are best effort: `save` swallows its failures and `load`
/// reports anything unreadable as absent.
pub trait LedgerStore {
    fn load(&self) -> Option<Vec<Transaction>>;
    fn save(&self, transactions: &[Transaction]);
}
