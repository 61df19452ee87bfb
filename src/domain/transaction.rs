use std::hash::{Hash, Hasher};

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use super::Amount;

pub type TransactionId = u64;

/// Which aggregate a transaction contributes to.
///
/// `income` and `expense` are the canonical tags. Any other string is kept
/// verbatim as `Other` and only ever matches itself, so `"INCOME"` is not
/// income. Equality is exact, case-sensitive comparison of the tag text.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Kind {
    Income,
    Expense,
    Other(String),
}

impl Kind {
    pub fn as_str(&self) -> &str {
        match self {
            Kind::Income => "income",
            Kind::Expense => "expense",
            Kind::Other(tag) => tag,
        }
    }

    pub fn is_canonical(&self) -> bool {
        matches!(self.as_str(), "income" | "expense")
    }
}

impl From<&str> for Kind {
    fn from(tag: &str) -> Self {
        match tag {
            "income" => Kind::Income,
            "expense" => Kind::Expense,
            other => Kind::Other(other.to_string()),
        }
    }
}

impl From<String> for Kind {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "income" => Kind::Income,
            "expense" => Kind::Expense,
            _ => Kind::Other(tag),
        }
    }
}

impl From<Kind> for String {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Other(tag) => tag,
            canonical => canonical.as_str().to_string(),
        }
    }
}

// `Kind::Other("income".into())` must still equal `Kind::Income`.
impl PartialEq for Kind {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for Kind {}

impl Hash for Kind {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Anything that carries an amount and a kind can be totalled.
pub trait FinancialRecord {
    fn amount(&self) -> Amount;
    fn kind(&self) -> &Kind;
}

/// A single recorded income or expense event.
/// Transactions are created only by the ledger and never change afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// 0-based insertion rank within the ledger
    pub id: TransactionId,
    /// Exact amount as entered; rounding only happens on display
    pub amount: Amount,
    /// Free-text label (e.g. "Food", "Salary")
    pub category: String,
    /// When the ledger recorded the transaction
    pub timestamp: DateTime<Local>,
    #[serde(rename = "type")]
    pub kind: Kind,
}

impl Transaction {
    pub(crate) fn new(
        id: TransactionId,
        amount: Amount,
        category: String,
        kind: Kind,
        timestamp: DateTime<Local>,
    ) -> Self {
        Self {
            id,
            amount,
            category,
            timestamp,
            kind,
        }
    }

    /// Calendar date of the timestamp as `YYYY-MM-DD`.
    pub fn date_string(&self) -> String {
        self.timestamp.format("%Y-%m-%d").to_string()
    }
}

impl FinancialRecord for Transaction {
    fn amount(&self) -> Amount {
        self.amount
    }

    fn kind(&self) -> &Kind {
        &self.kind
    }
}
