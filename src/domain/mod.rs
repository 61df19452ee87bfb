mod clock;
mod ledger;
mod money;
mod transaction;

pub use clock::{Clock, SystemClock};
pub use ledger::*;
pub use money::*;
pub use transaction::*;

#[cfg(test)]
pub(crate) use clock::FixedClock;
