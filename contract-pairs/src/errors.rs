use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while discovering and pairing example contracts.
#[derive(Debug, Error)]
pub enum PairingError {
    /// A root directory is missing or unreadable.
    #[error("io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File is not valid UTF-8. Recovered by the matcher (the file is skipped).
    #[error("file is not valid UTF-8: {0}")]
    Encoding(PathBuf),

    /// Two Solidity files normalize to the same logical name.
    #[error("duplicate logical name `{name}`: {first} and {second}")]
    DuplicateLogicalName {
        name: String,
        first: PathBuf,
        second: PathBuf,
    },
}

pub type Result<T> = std::result::Result<T, PairingError>;
