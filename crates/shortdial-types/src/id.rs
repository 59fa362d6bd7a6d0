use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Stable identifier for an employee record (UUID v7 for time-ordering).
///
/// Assigned once when a record is created and carried unchanged through
/// edits. Edit and remove locate records by this id, never by comparing
/// names or short numbers.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeId(uuid::Uuid);

impl EmployeeId {
    /// Generate a new time-ordered employee ID (UUID v7).
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7())
    }

    /// Create from an existing UUID.
    pub fn from_uuid(uuid: uuid::Uuid) -> Self {
        Self(uuid)
    }

    /// The underlying UUID.
    pub fn as_uuid(&self) -> &uuid::Uuid {
        &self.0
    }

    /// Lowercase hex digits of the UUID without hyphens.
    pub fn simple(&self) -> String {
        self.0.simple().to_string()
    }

    /// Short representation (first 8 characters of UUID).
    ///
    /// UUID v7 puts the timestamp first, so records created within the
    /// same few seconds can share this prefix. Use it for display only.
    pub fn short_id(&self) -> String {
        self.0.to_string()[..8].to_string()
    }
}

impl Default for EmployeeId {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for EmployeeId {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        uuid::Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|e| TypeError::InvalidId(format!("{s}: {e}")))
    }
}

impl fmt::Debug for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EmployeeId({})", self.short_id())
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
