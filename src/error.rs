//! Error types for the loading surfaces.
//!
//! The scheduling core itself never fails: malformed catalog data, cycles
//! and bad pins are recovered locally and reported as plan diagnostics.
//! Only configuration files, catalog JSON and slot-key parsing return errors.

/// Result type for loading operations.
pub type PlanResult<T> = Result<T, PlanError>;

/// Error type for loading operations.
#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid slot key: {0}")]
    InvalidSlot(String),

    #[error("Invalid term number: {0}")]
    InvalidTerm(u8),
}

impl From<toml::de::Error> for PlanError {
    fn from(e: toml::de::Error) -> Self {
        PlanError::Config(e.to_string())
    }
}
