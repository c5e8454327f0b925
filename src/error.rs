use std::path::PathBuf;
use thiserror::Error;

use crate::transaction::TransactionId;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
    #[error("TLS needs both DASHBOARD_TLS_CERT and DASHBOARD_TLS_KEY")]
    IncompleteTls,
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Failed to read transaction data from {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid transaction data in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Duplicate transaction id: {0}")]
    DuplicateId(TransactionId),
    #[error("Transaction {id} has invalid amount {amount}")]
    InvalidAmount { id: TransactionId, amount: f64 },
}
