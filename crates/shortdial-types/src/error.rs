use thiserror::Error;

use crate::field::Field;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid employee id: {0}")]
    InvalidId(String),

    #[error("{field} must not be empty")]
    EmptyField { field: Field },
}
