use thiserror::Error;

#[derive(Error, Debug)]
pub enum AttendanceError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Store timeout: {0}")]
    Timeout(String),

    #[error("Database error: {0}")]
    Database(#[from] eyre::Report),

    #[error("Internal server error: {0}")]
    Internal(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl AttendanceError {
    /// The message shown to API callers, without the kind prefix.
    pub fn message(&self) -> String {
        match self {
            AttendanceError::NotFound(msg)
            | AttendanceError::Validation(msg)
            | AttendanceError::Authentication(msg)
            | AttendanceError::Forbidden(msg)
            | AttendanceError::Conflict(msg)
            | AttendanceError::Timeout(msg) => msg.clone(),
            AttendanceError::Database(report) => report.to_string(),
            AttendanceError::Internal(err) => err.to_string(),
        }
    }

    /// Timeouts are the only failures a caller may safely retry.
    pub fn is_retryable(&self) -> bool {
        matches!(self, AttendanceError::Timeout(_))
    }
}

pub type AttendanceResult<T> = Result<T, AttendanceError>;
