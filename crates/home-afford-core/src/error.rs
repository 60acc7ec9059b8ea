use thiserror::Error;

use crate::types::{FicoScore, LoanType};

#[derive(Debug, Error)]
pub enum AffordabilityError {
    #[error("Missing input: {field}: {reason}")]
    MissingInput { field: String, reason: String },

    #[error("Ineligible: FICO {fico} is below the {loan_type} floor of {floor}")]
    Ineligible {
        loan_type: LoanType,
        fico: FicoScore,
        floor: FicoScore,
    },

    #[error("Unaffordable: {0}")]
    Unaffordable(String),

    #[error("Out of domain: {field}: {reason}")]
    OutOfDomain { field: String, reason: String },

    #[error("Invalid input: {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for AffordabilityError {
    fn from(e: serde_json::Error) -> Self {
        AffordabilityError::SerializationError(e.to_string())
    }
}
