use thiserror::Error;

#[derive(Debug, Error)]
pub enum SalesReportError {
    #[error("Invalid input data: {field} — {reason}")]
    InvalidInputData { field: String, reason: String },

    #[error("Missing strategies: {0}")]
    MissingStrategies(String),

    #[error("Unknown reference: {entity} '{id}' does not exist")]
    UnknownReference { entity: String, id: String },

    #[error("Arithmetic overflow in {context}")]
    ArithmeticOverflow { context: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for SalesReportError {
    fn from(e: serde_json::Error) -> Self {
        SalesReportError::SerializationError(e.to_string())
    }
}
