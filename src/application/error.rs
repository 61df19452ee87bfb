use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    /// The destination could not be created, opened or written.
    /// The ledger is never touched by a failed export.
    #[error("Cannot write to {}: {source}", .path.display())]
    DestinationUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ExportError {
    pub fn destination_unavailable(path: impl Into<PathBuf>, source: io::Error) -> Self {
        ExportError::DestinationUnavailable {
            path: path.into(),
            source,
        }
    }
}
