// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use budget_tracker::domain::{Amount, Clock, Ledger};
use chrono::{DateTime, Local, NaiveDate, TimeZone};

/// Clock frozen at a single instant so dates in assertions are predictable
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Local>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        self.0
    }
}

/// Helper to parse a decimal amount
pub fn amount(text: &str) -> Amount {
    text.parse().unwrap()
}

/// Helper to turn a YYYY-MM-DD string into local noon of that day
pub fn local_noon(date_str: &str) -> DateTime<Local> {
    let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap();
    Local
        .from_local_datetime(&date.and_hms_opt(12, 0, 0).unwrap())
        .unwrap()
}

/// Helper to create an empty ledger whose clock is frozen at `date_str`
pub fn test_ledger(date_str: &str) -> Ledger<FixedClock> {
    Ledger::with_clock(FixedClock(local_noon(date_str)))
}

/// Test fixture: the salary / food / gift ledger used across suites
pub fn sample_ledger() -> Ledger<FixedClock> {
    let mut ledger = test_ledger("2024-01-15");
    ledger.append(amount("100.00"), "Salary", "income");
    ledger.append(amount("42.505"), "Food", "expense");
    ledger.append(amount("10.00"), "Food", "gift");
    ledger
}
