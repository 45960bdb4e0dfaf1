pub mod error;
pub mod types;

#[cfg(feature = "analysis")]
pub mod analysis;

pub use error::SalesReportError;
pub use types::*;

/// Standard result type for all sales-report operations
pub type SalesReportResult<T> = Result<T, SalesReportError>;
