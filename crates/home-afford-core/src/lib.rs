pub mod amortization;
pub mod error;
pub mod types;
pub mod underwriting;

#[cfg(feature = "affordability")]
pub mod affordability;

pub use error::AffordabilityError;
pub use types::*;

/// Standard result type for all affordability operations
pub type AffordResult<T> = Result<T, AffordabilityError>;
