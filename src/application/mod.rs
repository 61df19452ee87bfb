// Application layer - errors and reports built on top of the domain ledger.

pub mod error;
pub mod reporting;

pub use error::*;
pub use reporting::*;
