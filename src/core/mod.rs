pub mod activity;
pub mod error;
pub mod transaction;
pub mod ledger;

pub use activity::{ActivityType, ShareTable, Split};
pub use error::{ValidationError, ShareTableError};
pub use transaction::{Transaction, Amount};
pub use ledger::{Ledger, Totals, ActivityBreakdown};
