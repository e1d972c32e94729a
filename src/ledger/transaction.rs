use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::TrackerError;

/// A single recorded income or expense event.
///
/// Transactions are immutable once created; edits happen by delete-and-re-add
/// through the store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub amount: f64,
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub date: NaiveDate,
    pub kind: TransactionKind,
}

/// Discriminates income from expense; only expenses carry a category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum TransactionKind {
    Income,
    Expense { category: Category },
}

impl Transaction {
    pub fn income(
        amount: f64,
        description: impl Into<String>,
        tags: Vec<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            amount,
            description: description.into(),
            tags,
            date,
            kind: TransactionKind::Income,
        }
    }

    pub fn expense(
        amount: f64,
        description: impl Into<String>,
        category: Category,
        tags: Vec<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            amount,
            description: description.into(),
            tags,
            date,
            kind: TransactionKind::Expense { category },
        }
    }

    pub fn is_income(&self) -> bool {
        matches!(self.kind, TransactionKind::Income)
    }

    pub fn category(&self) -> Option<Category> {
        match self.kind {
            TransactionKind::Income => None,
            TransactionKind::Expense { category } => Some(category),
        }
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TransactionKind::Income => {
                write!(f, "[Income] ${:.2} - {}", self.amount, self.description)
            }
            TransactionKind::Expense { category } => {
                write!(
                    f,
                    "[Expense][{}] ${:.2} - {}",
                    category, self.amount, self.description
                )
            }
        }
    }
}

/// Fixed classification applied only to expense transactions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Food,
    Transport,
    Entertainment,
    Utilities,
    Others,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Food,
        Category::Transport,
        Category::Entertainment,
        Category::Utilities,
        Category::Others,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Category::Food => "FOOD",
            Category::Transport => "TRANSPORT",
            Category::Entertainment => "ENTERTAINMENT",
            Category::Utilities => "UTILITIES",
            Category::Others => "OTHERS",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = TrackerError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_uppercase().as_str() {
            "FOOD" => Ok(Category::Food),
            "TRANSPORT" => Ok(Category::Transport),
            "ENTERTAINMENT" => Ok(Category::Entertainment),
            "UTILITIES" => Ok(Category::Utilities),
            "OTHERS" => Ok(Category::Others),
            other => Err(TrackerError::InvalidInput(format!(
                "unknown category `{}`",
                other
            ))),
        }
    }
}
