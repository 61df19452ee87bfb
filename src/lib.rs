pub mod application;
pub mod cli;
pub mod domain;
pub mod io;

pub use application::{ExportError, Summary};
pub use domain::*;
pub use io::{Exporter, export_csv};
