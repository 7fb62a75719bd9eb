use crate::domain::draft::DraftId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FeeError {
    #[error("Payment method lookup failed for draft {draft}: {reason}")]
    LookupFailed { draft: DraftId, reason: String },
    #[error("Tax configuration error: {0}")]
    TaxConfig(String),
    #[error("Tax engine error: {0}")]
    TaxEngine(String),
    #[error("Contract violation: {0}")]
    ContractViolation(String),
    #[error("Settings error: {0}")]
    Settings(#[from] config::ConfigError),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FeeError>;
