use shortdial_types::{EmployeeId, Field, TypeError};

/// Errors from employee store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A field was empty after trimming.
    #[error("invalid {field}: {reason}")]
    Validation { field: Field, reason: String },

    /// No record carries the requested id.
    #[error("employee not found: {0}")]
    NotFound(EmployeeId),

    /// No record id starts with the given prefix.
    #[error("no employee id matches '{0}'")]
    UnknownId(String),

    /// An id prefix matched more than one record.
    #[error("id prefix '{prefix}' is ambiguous ({candidates} matches)")]
    AmbiguousId { prefix: String, candidates: usize },

    /// Serialization or deserialization failure.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// I/O error from the underlying persistence backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Persistence backend refuses writes.
    #[error("store is read-only")]
    ReadOnly,
}

impl From<TypeError> for StoreError {
    fn from(err: TypeError) -> Self {
        match err {
            TypeError::EmptyField { field } => Self::Validation {
                field,
                reason: "must not be empty".into(),
            },
            TypeError::InvalidId(raw) => Self::UnknownId(raw),
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl StoreError {
    /// Returns `true` for errors caused by user input rather than storage.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::Validation { .. }
                | Self::NotFound(_)
                | Self::UnknownId(_)
                | Self::AmbiguousId { .. }
        )
    }
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
