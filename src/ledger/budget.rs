use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Monthly spending ceilings keyed by (month, year).
///
/// An absent key means no budget was ever set for that month; later sets
/// overwrite. Serialized as a flat entry list so the snapshot stays plain
/// JSON.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<BudgetEntry>", into = "Vec<BudgetEntry>")]
pub struct BudgetRegistry {
    budgets: HashMap<(u32, i32), f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetEntry {
    pub month: u32,
    pub year: i32,
    pub amount: f64,
}

impl BudgetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_budget(&mut self, month: u32, year: i32, amount: f64) {
        tracing::info!(month, year, amount, "Setting budget");
        self.budgets.insert((month, year), amount);
    }

    /// Returns the budget for the given month, or `None` if never set.
    pub fn budget(&self, month: u32, year: i32) -> Option<f64> {
        self.budgets.get(&(month, year)).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.budgets.is_empty()
    }
}

impl From<Vec<BudgetEntry>> for BudgetRegistry {
    fn from(entries: Vec<BudgetEntry>) -> Self {
        let budgets = entries
            .into_iter()
            .map(|entry| ((entry.month, entry.year), entry.amount))
            .collect();
        Self { budgets }
    }
}

impl From<BudgetRegistry> for Vec<BudgetEntry> {
    fn from(registry: BudgetRegistry) -> Self {
        let mut entries: Vec<BudgetEntry> = registry
            .budgets
            .into_iter()
            .map(|((month, year), amount)| BudgetEntry {
                month,
                year,
                amount,
            })
            .collect();
        entries.sort_by_key(|entry| (entry.year, entry.month));
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_budget_is_none() {
        let registry = BudgetRegistry::new();
        assert_eq!(registry.budget(8, 2026), None);
    }

    #[test]
    fn later_sets_overwrite() {
        let mut registry = BudgetRegistry::new();
        registry.set_budget(8, 2026, 500.0);
        registry.set_budget(8, 2026, 750.0);
        assert_eq!(registry.budget(8, 2026), Some(750.0));
        assert_eq!(registry.budget(9, 2026), None);
    }

    #[test]
    fn serializes_as_entry_list() {
        let mut registry = BudgetRegistry::new();
        registry.set_budget(8, 2026, 500.0);
        let json = serde_json::to_string(&registry).unwrap();
        let restored: BudgetRegistry = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.budget(8, 2026), Some(500.0));
    }
}
