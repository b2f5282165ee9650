use std::result::Result as StdResult;

use thiserror::Error;

/// Reasons an amount cannot be spelled.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    #[error("Invalid amount: {0} is negative")]
    Negative(String),
    #[error("Invalid amount: value is not a finite number")]
    NonFinite,
    #[error("Invalid amount: {0} exceeds 999 999 999 999.99")]
    OutOfRange(String),
    #[error("Invalid amount: cannot parse `{0}`")]
    Unparsable(String),
}

/// Unified error type for the amount, document and configuration layers.
#[derive(Debug, Error)]
pub enum StockError {
    #[error(transparent)]
    InvalidAmount(#[from] AmountError),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Persistence error: {0}")]
    StorageError(String),
}

pub type Result<T> = StdResult<T, StockError>;

/// User-facing CLI error wrapper.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] StockError),
    #[error("Invalid input: {0}")]
    Input(String),
    #[error("Command failed: {0}")]
    Command(String),
}

impl From<std::io::Error> for StockError {
    fn from(err: std::io::Error) -> Self {
        StockError::StorageError(err.to_string())
    }
}

impl From<serde_json::Error> for StockError {
    fn from(err: serde_json::Error) -> Self {
        StockError::ConfigError(err.to_string())
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::Command(err.to_string())
    }
}
