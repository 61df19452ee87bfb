use rust_decimal::Decimal;
use thiserror::Error;

use super::{Amount, Clock, FinancialRecord, Kind, SystemClock, Transaction, TransactionId};

/// Sum the amounts of all records whose kind is exactly `kind`.
/// Records with any other kind contribute nothing. A sum that leaves the
/// decimal range saturates at `Decimal::MAX` / `Decimal::MIN`.
pub fn sum_by_kind<R: FinancialRecord>(records: &[R], kind: &Kind) -> Amount {
    records
        .iter()
        .filter(|record| record.kind() == kind)
        .fold(Decimal::ZERO, |total, record| total.saturating_add(record.amount()))
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("amount {amount} would push the ledger totals out of range")]
    TotalOutOfRange { amount: Amount },
}

/// Append-only, in-memory transaction history.
///
/// Ids are handed out from `next_id`, which always equals the number of
/// transactions appended so far, so every id is also the transaction's
/// position in `transactions()`.
///
/// `magnitude` is the sum of absolute amounts. While it fits in a decimal,
/// no total, partial sum or net figure over the ledger can overflow.
#[derive(Debug)]
pub struct Ledger<C: Clock = SystemClock> {
    transactions: Vec<Transaction>,
    next_id: TransactionId,
    magnitude: Amount,
    clock: C,
}

impl Ledger<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for Ledger<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> Ledger<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            transactions: Vec::new(),
            next_id: 0,
            magnitude: Decimal::ZERO,
            clock,
        }
    }

    /// Record a new transaction stamped with the clock's current time.
    pub fn append(
        &mut self,
        amount: Amount,
        category: impl Into<String>,
        kind: impl Into<Kind>,
    ) -> &Transaction {
        let id = self.next_id;
        let transaction = Transaction::new(
            id,
            amount,
            category.into(),
            kind.into(),
            self.clock.now(),
        );
        tracing::debug!(
            id,
            amount = %transaction.amount,
            category = %transaction.category,
            kind = %transaction.kind,
            "transaction appended"
        );

        self.transactions.push(transaction);
        self.next_id += 1;
        self.magnitude = self.magnitude.saturating_add(amount.abs());
        &self.transactions[self.transactions.len() - 1]
    }

    /// Like `append`, but refuses an amount that would make the ledger's
    /// totals unrepresentable. Nothing is recorded on error.
    pub fn try_append(
        &mut self,
        amount: Amount,
        category: impl Into<String>,
        kind: impl Into<Kind>,
    ) -> Result<&Transaction, LedgerError> {
        if self.magnitude.checked_add(amount.abs()).is_none() {
            return Err(LedgerError::TotalOutOfRange { amount });
        }
        Ok(self.append(amount, category, kind))
    }

    /// All transactions in insertion order.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn get(&self, id: TransactionId) -> Option<&Transaction> {
        usize::try_from(id)
            .ok()
            .and_then(|index| self.transactions.get(index))
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn next_id(&self) -> TransactionId {
        self.next_id
    }

    /// Total of all transactions tagged exactly `kind`. Recomputed on every call.
    pub fn total(&self, kind: &Kind) -> Amount {
        sum_by_kind(&self.transactions, kind)
    }

    pub fn total_income(&self) -> Amount {
        self.total(&Kind::Income)
    }

    pub fn total_expense(&self) -> Amount {
        self.total(&Kind::Expense)
    }

    /// Total of all transactions whose kind is neither income nor expense.
    pub fn total_other(&self) -> Amount {
        self.transactions
            .iter()
            .filter(|t| !t.kind.is_canonical())
            .fold(Decimal::ZERO, |total, t| total.saturating_add(t.amount))
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Local, TimeZone};

    use super::*;
    use crate::domain::FixedClock;

    fn dec(s: &str) -> Amount {
        s.parse().unwrap()
    }

    fn test_ledger() -> Ledger<FixedClock> {
        let now = Local.with_ymd_and_hms(2024, 1, 15, 9, 30, 0).unwrap();
        Ledger::with_clock(FixedClock(now))
    }

    #[test]
    fn test_empty_ledger() {
        let ledger = test_ledger();

        assert!(ledger.is_empty());
        assert_eq!(ledger.len(), 0);
        assert_eq!(ledger.next_id(), 0);
        assert_eq!(ledger.total_income(), Decimal::ZERO);
        assert_eq!(ledger.total_expense(), Decimal::ZERO);
        assert_eq!(ledger.total(&Kind::from("gift")), Decimal::ZERO);
    }

    #[test]
    fn test_append_assigns_sequential_ids() {
        let mut ledger = test_ledger();

        let first = ledger.append(dec("10"), "Food", "expense").id;
        let second = ledger.append(dec("20"), "Rent", "expense").id;
        let third = ledger.append(dec("30"), "Salary", "income").id;

        assert_eq!((first, second, third), (0, 1, 2));
        assert_eq!(ledger.next_id(), 3);
        let ids: Vec<_> = ledger.transactions().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![0, 1, 2]);
    }

    #[test]
    fn test_append_stamps_clock_time() {
        let mut ledger = test_ledger();
        let expected = Local.with_ymd_and_hms(2024, 1, 15, 9, 30, 0).unwrap();

        let transaction = ledger.append(dec("5"), "Coffee", "expense");

        assert_eq!(transaction.timestamp, expected);
        assert_eq!(transaction.date_string(), "2024-01-15");
    }

    #[test]
    fn test_append_accepts_unvalidated_values() {
        let mut ledger = test_ledger();

        ledger.append(dec("-12.5"), "", "refund");
        ledger.append(dec("0"), "Nothing", "expense");

        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.transactions()[0].category, "");
        assert_eq!(ledger.transactions()[0].kind.as_str(), "refund");
        assert_eq!(ledger.total_expense(), Decimal::ZERO);
    }

    #[test]
    fn test_total_by_kind() {
        let mut ledger = test_ledger();
        ledger.append(dec("100.00"), "Salary", "income");
        ledger.append(dec("42.505"), "Food", "expense");
        ledger.append(dec("10.00"), "Food", "gift");

        assert_eq!(ledger.total_income(), dec("100.00"));
        assert_eq!(ledger.total_expense(), dec("42.505"));
        assert_eq!(ledger.total(&Kind::from("gift")), dec("10.00"));
        assert_eq!(ledger.total_other(), dec("10.00"));
    }

    #[test]
    fn test_total_is_case_sensitive() {
        let mut ledger = test_ledger();
        ledger.append(dec("50"), "Salary", "income");
        ledger.append(dec("999"), "Bonus", "INCOME");

        assert_eq!(ledger.total_income(), dec("50"));
        assert_eq!(ledger.total(&Kind::from("INCOME")), dec("999"));
    }

    #[test]
    fn test_totals_reflect_live_state() {
        let mut ledger = test_ledger();
        ledger.append(dec("1"), "A", "expense");
        assert_eq!(ledger.total_expense(), dec("1"));

        ledger.append(dec("2"), "B", "expense");
        assert_eq!(ledger.total_expense(), dec("3"));
    }

    #[test]
    fn test_get_by_id() {
        let mut ledger = test_ledger();
        ledger.append(dec("1"), "A", "income");
        ledger.append(dec("2"), "B", "expense");

        assert_eq!(ledger.get(1).map(|t| t.category.as_str()), Some("B"));
        assert!(ledger.get(2).is_none());
    }

    #[test]
    fn test_sum_by_kind_over_slice() {
        let mut ledger = test_ledger();
        ledger.append(dec("1.10"), "A", "income");
        ledger.append(dec("2.20"), "B", "income");
        ledger.append(dec("3.30"), "C", "expense");

        let head = &ledger.transactions()[..2];
        assert_eq!(sum_by_kind(head, &Kind::Income), dec("3.30"));
        assert_eq!(sum_by_kind(head, &Kind::Expense), Decimal::ZERO);
    }

    #[test]
    fn test_try_append_rejects_amount_that_overflows_totals() {
        let mut ledger = test_ledger();
        ledger.try_append(Decimal::MAX, "Jackpot", "income").unwrap();

        let err = ledger.try_append(dec("1"), "Tip", "gift").unwrap_err();

        assert_eq!(err, LedgerError::TotalOutOfRange { amount: dec("1") });
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.next_id(), 1);
    }

    #[test]
    fn test_try_append_counts_negative_amounts_by_magnitude() {
        let mut ledger = test_ledger();
        ledger.try_append(Decimal::MIN, "Debt", "expense").unwrap();

        assert!(ledger.try_append(dec("-1"), "More debt", "expense").is_err());
        assert!(ledger.try_append(dec("0"), "Nothing", "income").is_ok());
    }

    #[test]
    fn test_totals_saturate_instead_of_panicking() {
        let mut ledger = test_ledger();
        ledger.append(Decimal::MAX, "A", "income");
        ledger.append(Decimal::MAX, "B", "income");
        ledger.append(Decimal::MIN, "C", "gift");
        ledger.append(Decimal::MIN, "D", "gift");

        assert_eq!(ledger.total_income(), Decimal::MAX);
        assert_eq!(ledger.total(&Kind::from("gift")), Decimal::MIN);
        assert_eq!(ledger.total_other(), Decimal::MIN);
    }
}
