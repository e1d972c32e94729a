//! JSON snapshot persistence for the transaction store and budget registry.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{
    errors::Result,
    ledger::{BudgetRegistry, Transaction, TransactionStore},
};

const DATA_DIR: &str = "finlog";
const DATA_FILE: &str = "journal.json";

/// On-disk snapshot of everything the tracker owns.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub budgets: BudgetRegistry,
}

impl Snapshot {
    pub fn new(store: &TransactionStore, budgets: &BudgetRegistry) -> Self {
        Self {
            transactions: store.transactions().to_vec(),
            budgets: budgets.clone(),
        }
    }

    pub fn into_parts(self) -> (TransactionStore, BudgetRegistry) {
        (
            TransactionStore::from_transactions(self.transactions),
            self.budgets,
        )
    }
}

/// Default snapshot location under the platform data directory.
pub fn default_data_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DATA_DIR)
        .join(DATA_FILE)
}

/// Writes the snapshot atomically by staging to a temporary file.
pub fn save_snapshot(snapshot: &Snapshot, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let tmp = path.with_extension("tmp");
    let json = serde_json::to_string_pretty(snapshot)?;
    fs::write(&tmp, json)?;
    fs::rename(tmp, path)?;
    tracing::debug!(path = %path.display(), "Snapshot saved");
    Ok(())
}

/// Loads a snapshot from disk; a missing file yields an empty snapshot.
pub fn load_snapshot(path: &Path) -> Result<Snapshot> {
    if !path.exists() {
        return Ok(Snapshot::default());
    }
    let data = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use crate::ledger::Category;

    use super::*;

    #[test]
    fn snapshot_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("journal.json");

        let mut store = TransactionStore::new();
        let date = NaiveDate::from_ymd_opt(2026, 8, 15).unwrap();
        store.add(Transaction::income(1000.0, "Salary", Vec::new(), date));
        store.add(Transaction::expense(
            50.0,
            "Groceries",
            Category::Food,
            vec!["weekly".into()],
            date,
        ));
        let mut budgets = BudgetRegistry::new();
        budgets.set_budget(8, 2026, 500.0);

        save_snapshot(&Snapshot::new(&store, &budgets), &path).unwrap();
        let (restored_store, restored_budgets) = load_snapshot(&path).unwrap().into_parts();

        assert_eq!(restored_store.count(), 2);
        assert_eq!(restored_store.transactions()[1].tags, vec!["weekly"]);
        assert_eq!(restored_budgets.budget(8, 2026), Some(500.0));
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let snapshot = load_snapshot(&dir.path().join("absent.json")).unwrap();
        assert!(snapshot.transactions.is_empty());
        assert!(snapshot.budgets.is_empty());
    }
}
