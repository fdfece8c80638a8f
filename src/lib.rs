pub mod core;
pub mod backend;
pub mod config;
pub mod session;
pub mod render;

pub use crate::core::{Ledger, Transaction, ActivityType, ShareTable};
pub use crate::core::{activity, error, ledger, transaction};
pub use crate::session::{Session, Dashboard};
