//! The user-editable record fields and their single rule: non-empty after
//! trimming surrounding whitespace.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// A user-editable field of an [`EmployeeRecord`](crate::EmployeeRecord).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    /// The employee's display name.
    Name,
    /// The short-dial (internal extension) number.
    Short,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name => write!(f, "name"),
            Self::Short => write!(f, "short number"),
        }
    }
}

/// Trim `raw` and reject it if nothing is left.
///
/// Short numbers are not required to be numeric; any non-blank text is
/// accepted.
///
/// # Examples
///
/// ```
/// use shortdial_types::{normalize_field, Field};
///
/// assert_eq!(normalize_field(Field::Name, "  Alice ").unwrap(), "Alice");
/// assert!(normalize_field(Field::Short, " \t").is_err());
/// ```
pub fn normalize_field(field: Field, raw: &str) -> Result<String, TypeError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(TypeError::EmptyField { field });
    }
    Ok(trimmed.to_string())
}
