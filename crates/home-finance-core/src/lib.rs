pub mod error;
pub mod time_value;
pub mod types;

#[cfg(feature = "mortgage")]
pub mod mortgage;

pub use error::HomeFinanceError;
pub use types::*;

/// Standard result type for all home-finance operations
pub type HomeFinanceResult<T> = Result<T, HomeFinanceError>;
