//! Harness error types

use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type HarnessResult<T> = Result<T, HarnessError>;

#[derive(Debug, Error)]
pub enum HarnessError {
    /// The interpreter binary could not be executed at all. Fatal to the
    /// whole run; a missing binary must never be counted as a pass or fail.
    #[error("failed to run '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    /// The `.expect` fixture for a case is absent. Fatal for that case
    /// only; never treated as an empty expectation.
    #[error("missing fixture file: {}", .path.display())]
    MissingFixture { path: PathBuf },

    /// The test root is neither a regular file nor a directory.
    #[error("test root is neither a file nor a directory: {}", .path.display())]
    InvalidRoot { path: PathBuf },

    #[error("config error in '{}': {message}", .path.display())]
    Config { path: PathBuf, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
