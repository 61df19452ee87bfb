use serde::{Deserialize, Serialize};

use crate::domain::{Amount, Clock, Ledger};

/// Income vs expense overview of the whole ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub transaction_count: usize,
    pub total_income: Amount,
    pub total_expense: Amount,
    /// total_income - total_expense
    pub net: Amount,
    /// Sum over transactions tagged with anything other than income/expense
    pub other_total: Amount,
}

impl Summary {
    pub fn from_ledger<C: Clock>(ledger: &Ledger<C>) -> Self {
        let total_income = ledger.total_income();
        let total_expense = ledger.total_expense();

        Self {
            transaction_count: ledger.len(),
            total_income,
            total_expense,
            net: total_income.saturating_sub(total_expense),
            other_total: ledger.total_other(),
        }
    }
}
