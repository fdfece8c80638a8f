mod interface;
mod file_store;
mod memory_store;
mod json_store;

pub use interface::{KeyValueStore, LedgerStore, Result, BackendError};
pub use file_store::{FileKeyValueStore, check_key};
pub use memory_store::MemoryKeyValueStore;
pub use json_store::{JsonStore, DEFAULT_KEY};
