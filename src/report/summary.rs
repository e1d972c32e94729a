use std::collections::BTreeMap;

use crate::currency::format_amount;
use crate::errors::{Result, TrackerError};
use crate::ledger::{BudgetRegistry, Category, TransactionStore};

const MAX_CATEGORIES_TO_DISPLAY: usize = 3;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Aggregates a month of transactions into the formatted summary report:
/// income/expense totals, budget status, top expense categories, and the
/// per-tag breakdown.
pub struct SummaryService;

#[derive(Debug, Clone, Copy, Default)]
struct TagTotals {
    income: f64,
    expense: f64,
}

impl TagTotals {
    fn net(&self) -> f64 {
        self.income - self.expense
    }
}

impl SummaryService {
    /// Renders the full summary for the given month and year.
    ///
    /// Rejects months outside 1-12; every other input yields a report, even
    /// an empty month.
    pub fn monthly_summary(
        store: &TransactionStore,
        budgets: &BudgetRegistry,
        month: u32,
        year: i32,
        symbol: &str,
    ) -> Result<String> {
        let month_name = month_name(month)?;
        tracing::info!(month, year, "Generating financial summary");

        let total_income = store.monthly_total_income(month, year);
        let total_expense = store.monthly_total_expense(month, year);

        let mut out = format!("Financial Summary for {} {}:\n\n", month_name, year);
        out.push_str(&format!(
            "Total Income: {}\n",
            format_amount(total_income, symbol)
        ));
        out.push_str(&format!(
            "Total Expenses: {}\n",
            format_amount(total_expense, symbol)
        ));

        match budgets.budget(month, year) {
            None => {
                tracing::debug!(month, year, "No budget set");
                out.push_str(&format!("\nNo budget set for {} {}.\n", month_name, year));
            }
            Some(budget) => {
                tracing::debug!(month, year, budget, "Budget found");
                out.push_str(&format!(
                    "\nBudget for {} {}: {}\n",
                    month_name,
                    year,
                    format_amount(budget, symbol)
                ));
                let remaining = budget - total_expense;
                if remaining < 0.0 {
                    out.push_str(&format!(
                        "Budget exceeded by: {}\n",
                        format_amount(remaining.abs(), symbol)
                    ));
                } else {
                    out.push_str(&format!(
                        "Remaining budget: {}\n",
                        format_amount(remaining, symbol)
                    ));
                }
            }
        }

        Self::append_top_categories(&mut out, store, month, year, symbol);
        Self::append_tags_summary(&mut out, store, month, year, symbol);

        Ok(out)
    }

    /// Lists up to three categories by expense total, descending. Zero-total
    /// categories never print; ties break by category name.
    fn append_top_categories(
        out: &mut String,
        store: &TransactionStore,
        month: u32,
        year: i32,
        symbol: &str,
    ) {
        let mut categories: Vec<(Category, f64)> = store
            .monthly_categorised_expenses(month, year)
            .into_iter()
            .collect();
        categories.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.name().cmp(b.0.name())));

        if !categories.iter().any(|(_, amount)| *amount > 0.0) {
            return;
        }

        out.push_str("\nTop Expense Categories:\n");
        for (rank, (category, amount)) in categories.into_iter().enumerate() {
            if amount == 0.0 || rank >= MAX_CATEGORIES_TO_DISPLAY {
                break;
            }
            out.push_str(&format!(
                "{}. {}: {}\n",
                rank + 1,
                category,
                format_amount(amount, symbol)
            ));
        }
    }

    /// Lists every tag seen this month by net amount (income minus expense),
    /// descending, with a parenthesized income/expense breakdown. A
    /// transaction contributes its full amount to each of its distinct tags.
    fn append_tags_summary(
        out: &mut String,
        store: &TransactionStore,
        month: u32,
        year: i32,
        symbol: &str,
    ) {
        let mut totals: BTreeMap<String, TagTotals> = BTreeMap::new();
        for txn in store.monthly_transactions(month, year) {
            let mut seen: Vec<&str> = Vec::new();
            for tag in &txn.tags {
                if seen.contains(&tag.as_str()) {
                    continue;
                }
                seen.push(tag);
                let entry = totals.entry(tag.clone()).or_default();
                if txn.is_income() {
                    entry.income += txn.amount;
                } else {
                    entry.expense += txn.amount;
                }
            }
        }

        if totals.is_empty() {
            return;
        }

        let mut sorted: Vec<(String, TagTotals)> = totals.into_iter().collect();
        sorted.sort_by(|a, b| b.1.net().total_cmp(&a.1.net()).then_with(|| a.0.cmp(&b.0)));

        out.push_str("\nTags Summary:\n");
        for (rank, (tag, tag_totals)) in sorted.into_iter().enumerate() {
            let mut breakdown = String::new();
            if tag_totals.income > 0.0 {
                breakdown.push_str(&format!(
                    "Income: {}",
                    format_amount(tag_totals.income, symbol)
                ));
                if tag_totals.expense > 0.0 {
                    breakdown.push_str(&format!(
                        ", Expense: {}",
                        format_amount(tag_totals.expense, symbol)
                    ));
                }
            } else if tag_totals.expense > 0.0 {
                breakdown.push_str(&format!(
                    "Expense: {}",
                    format_amount(tag_totals.expense, symbol)
                ));
            }
            out.push_str(&format!(
                "{}. {}: {} ({})\n",
                rank + 1,
                tag,
                format_amount(tag_totals.net(), symbol),
                breakdown
            ));
        }
    }
}

fn month_name(month: u32) -> Result<&'static str> {
    MONTH_NAMES
        .get(month.wrapping_sub(1) as usize)
        .copied()
        .ok_or_else(|| TrackerError::InvalidInput(format!("month {} is out of range", month)))
}

#[cfg(test)]
mod tests {
    use super::month_name;

    #[test]
    fn month_names_resolve() {
        assert_eq!(month_name(1).unwrap(), "January");
        assert_eq!(month_name(12).unwrap(), "December");
        assert!(month_name(0).is_err());
        assert!(month_name(13).is_err());
    }
}
