use std::collections::BTreeMap;

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, TrackerError};

use super::transaction::{Category, Transaction};

/// Ordered, mutable collection of transactions.
///
/// User-facing index operations are 1-based; monthly queries partition the
/// collection by the (month, year) of each transaction's date.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransactionStore {
    transactions: Vec<Transaction>,
}

impl TransactionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_transactions(transactions: Vec<Transaction>) -> Self {
        Self { transactions }
    }

    pub fn add(&mut self, transaction: Transaction) {
        tracing::debug!(description = %transaction.description, "Adding transaction");
        self.transactions.push(transaction);
    }

    /// Removes the 1-based inclusive index range, returning the deleted
    /// transactions in store order. The store is untouched on failure.
    pub fn delete_range(&mut self, start: usize, end: usize) -> Result<Vec<Transaction>> {
        let count = self.transactions.len();
        if start < 1 || end < start || end > count {
            return Err(TrackerError::InvalidRange { start, end, count });
        }
        let deleted: Vec<Transaction> = self.transactions.drain(start - 1..end).collect();
        tracing::info!(start, end, deleted = deleted.len(), "Deleted transactions");
        Ok(deleted)
    }

    pub fn count(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Sum of income amounts dated in the given month and year; 0 if none.
    pub fn monthly_total_income(&self, month: u32, year: i32) -> f64 {
        self.monthly(month, year)
            .filter(|txn| txn.is_income())
            .map(|txn| txn.amount)
            .fold(0.0, |acc, amount| acc + amount)
    }

    /// Sum of expense amounts dated in the given month and year; 0 if none.
    pub fn monthly_total_expense(&self, month: u32, year: i32) -> f64 {
        self.monthly(month, year)
            .filter(|txn| !txn.is_income())
            .map(|txn| txn.amount)
            .fold(0.0, |acc, amount| acc + amount)
    }

    /// Expense totals per category for the given month and year. Only
    /// categories with at least one expense appear.
    pub fn monthly_categorised_expenses(&self, month: u32, year: i32) -> BTreeMap<Category, f64> {
        let mut totals = BTreeMap::new();
        for txn in self.monthly(month, year) {
            if let Some(category) = txn.category() {
                *totals.entry(category).or_insert(0.0) += txn.amount;
            }
        }
        totals
    }

    /// All transactions dated in the given month and year, in store order.
    pub fn monthly_transactions(&self, month: u32, year: i32) -> Vec<&Transaction> {
        self.monthly(month, year).collect()
    }

    fn monthly(&self, month: u32, year: i32) -> impl Iterator<Item = &Transaction> {
        self.transactions
            .iter()
            .filter(move |txn| txn.date.month() == month && txn.date.year() == year)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn date(month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, month, day).unwrap()
    }

    fn seeded_store() -> TransactionStore {
        let mut store = TransactionStore::new();
        store.add(Transaction::income(1000.0, "Salary", Vec::new(), date(8, 1)));
        store.add(Transaction::expense(
            50.0,
            "Groceries",
            Category::Food,
            Vec::new(),
            date(8, 2),
        ));
        store.add(Transaction::expense(
            20.0,
            "Bus fare",
            Category::Transport,
            Vec::new(),
            date(8, 3),
        ));
        store
    }

    #[test]
    fn monthly_totals_partition_by_month_and_year() {
        let mut store = seeded_store();
        store.add(Transaction::expense(
            99.0,
            "Cinema",
            Category::Entertainment,
            Vec::new(),
            date(9, 1),
        ));

        assert_eq!(store.monthly_total_income(8, 2026), 1000.0);
        assert_eq!(store.monthly_total_expense(8, 2026), 70.0);
        assert_eq!(store.monthly_total_expense(9, 2026), 99.0);
        assert_eq!(store.monthly_total_income(1, 2025), 0.0);
    }

    #[test]
    fn categorised_expenses_sum_to_monthly_total() {
        let store = seeded_store();
        let categories = store.monthly_categorised_expenses(8, 2026);
        let total: f64 = categories.values().sum();
        assert_eq!(total, store.monthly_total_expense(8, 2026));
        assert_eq!(categories.get(&Category::Food), Some(&50.0));
        assert_eq!(categories.get(&Category::Transport), Some(&20.0));
        assert!(!categories.contains_key(&Category::Utilities));
    }

    #[test]
    fn delete_range_removes_inclusive_range() {
        let mut store = seeded_store();
        let deleted = store.delete_range(2, 2).unwrap();
        assert_eq!(deleted.len(), 1);
        assert_eq!(deleted[0].description, "Groceries");
        assert_eq!(store.count(), 2);
    }

    #[test]
    fn delete_range_rejects_out_of_bounds() {
        let mut store = seeded_store();
        for (start, end) in [(0, 0), (4, 4), (3, 2)] {
            let err = store.delete_range(start, end).unwrap_err();
            assert_eq!(
                err.to_string(),
                "Invalid index range. There are only 3 transactions."
            );
            assert_eq!(store.count(), 3);
        }
    }
}
