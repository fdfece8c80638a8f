use log::{debug, warn};

use crate::backend::interface::{KeyValueStore, LedgerStore, Result};
use crate::core::Transaction;

pub const DEFAULT_KEY: &str = "revenueData";

/// Stores the ledger as a JSON array of flat records under a single key.
pub struct JsonStore<S: KeyValueStore> {
    backend: S,
    key: String
}

impl<S: KeyValueStore> JsonStore<S> {
    pub fn new(backend: S) -> JsonStore<S> {
        Self::with_key(backend, DEFAULT_KEY)
    }

    pub fn with_key(backend: S, key: &str) -> JsonStore<S> {
        JsonStore { backend, key: key.to_owned() }
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    fn try_load(&self) -> Result<Option<Vec<Transaction>>> {
        match self.backend.get(&self.key)? {
            Some(content) => Ok(Some(serde_json::from_str(&content)?)),
            None => Ok(None)
        }
    }

    fn try_save(&self, transactions: &[Transaction]) -> Result<()> {
        let content = serde_json::to_string(transactions)?;
        self.backend.put(&self.key, &content)
    }
}

impl<S: KeyValueStore> LedgerStore for JsonStore<S> {
    fn load(&self) -> Option<Vec<Transaction>> {
        match self.try_load() {
            Ok(Some(transactions)) => {
                debug!("loaded {} transactions from '{}'", transactions.len(), self.key);
                Some(transactions)
            },
            Ok(None) => None,
            Err(err) => {
                warn!("ignoring stored ledger '{}': {}", self.key, err);
                None
            }
        }
    }

    fn save(&self, transactions: &[Transaction]) {
        if let Err(err) = self.try_save(transactions) {
            warn!("failed to save ledger '{}': {}", self.key, err);
        }
    }
}
