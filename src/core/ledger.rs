use std::collections::HashSet;

use chrono::{Local, NaiveDate};
use log::{debug, warn};
use serde::Serialize;

use crate::core::activity::{ActivityType, ShareTable};
use crate::core::error::{ValidationError, ValidationResult};
use crate::core::transaction::{Transaction, TransactionId, Amount};

#[derive(Clone, Copy, PartialEq, Debug, Default, Serialize)]
pub struct Totals {
    pub total_revenue: Amount,
    pub total_community_fund: Amount,
    pub total_individual_earnings: Amount
}

/// Revenue per activity, ordered by first occurrence in the ledger.
#[derive(Clone, PartialEq, Debug, Default, Serialize)]
pub struct ActivityBreakdown {
    entries: Vec<(ActivityType, Amount)>
}

impl ActivityBreakdown {
    fn add(&mut self, activity: ActivityType, amount: Amount) {
        match self.entries.iter_mut().find(|entry| entry.0 == activity) {
            Some(entry) => entry.1 += amount,
            None => self.entries.push((activity, amount))
        }
    }

    pub fn get(&self, activity: ActivityType) -> Option<Amount> {
        self.entries.iter()
            .find_map(|entry| if entry.0 == activity { Some(entry.1) } else { None })
    }

    pub fn iter(&self) -> impl Iterator<Item = &(ActivityType, Amount)> {
        self.entries.iter()
    }

    pub fn labels(&self) -> Vec<&'static str> {
        self.entries.iter().map(|entry| entry.0.label()).collect()
    }

    pub fn values(&self) -> Vec<Amount> {
        self.entries.iter().map(|entry| entry.1).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Append-only record of revenue transactions.
pub struct Ledger {
    share_table: ShareTable,
    transactions: Vec<Transaction>,
    next_id: TransactionId
}

impl Ledger {
    pub fn new(share_table: ShareTable) -> Ledger {
        return Ledger { share_table, transactions: Vec::new(), next_id: 1 };
    }

    /// Restores a persisted sequence. Records that repeat an earlier id, leave
    /// no id after them, or break the amount and share invariants are dropped.
    pub fn from_transactions(share_table: ShareTable, transactions: Vec<Transaction>) -> Ledger {
        let mut seen = HashSet::new();
        let mut kept = Vec::with_capacity(transactions.len());
        for transaction in transactions {
            if let Err(reason) = check_stored(&transaction) {
                warn!("dropping stored transaction {}: {}", transaction.id, reason);
            } else if seen.insert(transaction.id) {
                kept.push(transaction);
            } else {
                warn!("dropping stored transaction with duplicate id {}", transaction.id);
            }
        }

        // check_stored guarantees every kept id has a successor
        let next_id = kept.iter().map(|t| t.id).max().map_or(1, |id| id + 1);
        debug!("restored ledger with {} transactions", kept.len());
        return Ledger { share_table, transactions: kept, next_id };
    }

    pub fn share_table(&self) -> &ShareTable {
        &self.share_table
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Records a new transaction dated today.
    pub fn add(&mut self, activity: ActivityType, amount: Amount, beneficiary: &str) -> ValidationResult<&Transaction> {
        self.add_on(Local::now().date_naive(), activity, amount, beneficiary)
    }

    /// Same as `add` but takes the form fields as entered.
    pub fn add_raw(&mut self, activity: &str, amount: &str, beneficiary: &str) -> ValidationResult<&Transaction> {
        let amount = parse_amount(amount)?;
        if beneficiary.trim().is_empty() {
            return Err(ValidationError::MissingBeneficiary);
        }
        let activity = activity.parse::<ActivityType>()?;
        self.add(activity, amount, beneficiary)
    }

    pub(crate) fn add_on(&mut self, date: NaiveDate, activity: ActivityType, amount: Amount, beneficiary: &str) -> ValidationResult<&Transaction> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(ValidationError::InvalidAmount);
        }
        let beneficiary = beneficiary.trim();
        if beneficiary.is_empty() {
            return Err(ValidationError::MissingBeneficiary);
        }
        let split = self.share_table.split(activity)
            .ok_or_else(|| ValidationError::UnknownActivity(activity.key().to_owned()))?;

        let following = self.next_id.checked_add(1)
            .ok_or(ValidationError::IdsExhausted)?;

        let transaction = Transaction::new(self.next_id, date, activity, split, amount, beneficiary);
        debug!("adding transaction {}: {} {} for {}", transaction.id, activity, amount, beneficiary);
        self.next_id = following;
        self.transactions.push(transaction);
        return Ok(&self.transactions[self.transactions.len() - 1]);
    }

    pub fn totals(&self) -> Totals {
        self.transactions.iter()
            .fold(Totals::default(), |mut totals, t| {
                totals.total_revenue += t.amount;
                totals.total_community_fund += t.community_share;
                totals.total_individual_earnings += t.individual_share;
                totals
            })
    }

    pub fn activity_breakdown(&self) -> ActivityBreakdown {
        let mut breakdown = ActivityBreakdown::default();
        for transaction in &self.transactions {
            breakdown.add(transaction.activity_type, transaction.amount);
        }
        return breakdown;
    }

    /// The last `n` transactions, most recent first.
    pub fn recent_transactions(&self, n: usize) -> Vec<&Transaction> {
        self.transactions.iter().rev().take(n).collect()
    }
}

fn check_stored(transaction: &Transaction) -> Result<(), &'static str> {
    if transaction.id.checked_add(1).is_none() {
        return Err("id space exhausted");
    }
    if !transaction.amount.is_finite() || transaction.amount <= 0.0 {
        return Err("invalid amount");
    }
    if transaction.beneficiary.trim().is_empty() {
        return Err("missing beneficiary");
    }
    let shares_valid = transaction.individual_share.is_finite() && transaction.community_share.is_finite();
    if !shares_valid || transaction.split_error() > 1e-9 * transaction.amount {
        return Err("shares do not add up to the amount");
    }
    Ok(())
}

fn parse_amount(input: &str) -> ValidationResult<Amount> {
    let amount: Amount = input.trim().parse()
        .map_err(|_| ValidationError::InvalidAmount)?;
    if !amount.is_finite() || amount <= 0.0 {
        return Err(ValidationError::InvalidAmount);
    }
    Ok(amount)
}
