//! Failures that stop one file from being processed at all.
//!
//! Problems inside a file (parse errors, malformed `nameof` calls) are
//! diagnostics, not errors.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TransformError {
    #[error("failed to read '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write '{}': {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl TransformError {
    /// The file the failure is about.
    pub fn path(&self) -> &PathBuf {
        match self {
            TransformError::Read { path, .. } | TransformError::Write { path, .. } => path,
        }
    }
}
