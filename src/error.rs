//! Error types for BookLedger

use std::fmt;

#[derive(Debug, Clone)]
pub enum LedgerError {
    MalformedRecord(String),
    InvalidRecord(String),
    StorageError(String),
    IoError(String),
}

impl fmt::Display for LedgerError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LedgerError::MalformedRecord(msg) => write!(f, "Malformed ledger record: {}", msg),
            LedgerError::InvalidRecord(msg) => write!(f, "Invalid issue record: {}", msg),
            LedgerError::StorageError(msg) => write!(f, "Storage error: {}", msg),
            LedgerError::IoError(msg) => write!(f, "IO error: {}", msg),
        }
    }
}

impl std::error::Error for LedgerError {}

impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        LedgerError::IoError(err.to_string())
    }
}

/// Convenience alias used across the crate
pub type Result<T> = std::result::Result<T, LedgerError>;
