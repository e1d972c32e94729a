//! Ledger domain models: transactions, the ordered store, and budgets.

pub mod budget;
pub mod store;
pub mod transaction;

pub use budget::BudgetRegistry;
pub use store::TransactionStore;
pub use transaction::{Category, Transaction, TransactionKind};
