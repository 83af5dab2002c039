//! Error types for overlap-engine operations.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum OverlapError {
    #[error("Invalid interval: {0}")]
    InvalidInterval(String),

    #[error("Invalid window: {0}")]
    InvalidWindow(String),

    #[error("Free/busy query issued with no accounts")]
    NoAccounts,

    #[error("Unknown status: '{0}' (expected 'free' or 'busy')")]
    UnknownStatus(String),
}

pub type Result<T> = std::result::Result<T, OverlapError>;
