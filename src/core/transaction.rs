use chrono::NaiveDate;
use serde::{Serialize, Deserialize};
use colored::Colorize;

use crate::core::activity::{ActivityType, Split};

pub type Amount = f64;
pub type TransactionId = u64;

/// One revenue entry. Shares are derived at creation and never change.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: TransactionId,
    pub date: NaiveDate,
    pub activity_type: ActivityType,
    pub amount: Amount,
    pub beneficiary: String,
    pub individual_share: Amount,
    pub community_share: Amount
}

impl std::fmt::Display for Transaction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{} {} {}: {} ", self.id, self.date, self.activity_type.label(), self.amount)?;
        write!(f, "{} {}; ", "to".bold(), self.beneficiary)?;
        write!(f, "{}: {}; ", "Individual".bold(), self.individual_share)?;
        write!(f, "{}: {}", "Community".bold(), self.community_share)
    }
}

impl Transaction {
    /// Inputs are expected to be validated already, see `Ledger::add`.
    pub(crate) fn new(id: TransactionId, date: NaiveDate, activity_type: ActivityType,
                      split: &Split, amount: Amount, beneficiary: &str) -> Transaction {
        let (individual_share, community_share) = split.apply(amount);
        Transaction {
            id,
            date,
            activity_type,
            amount,
            beneficiary: beneficiary.to_owned(),
            individual_share,
            community_share
        }
    }

    /// Difference between the amount and the sum of its shares.
    pub fn split_error(&self) -> Amount {
        (self.amount - (self.individual_share + self.community_share)).abs()
    }
}
