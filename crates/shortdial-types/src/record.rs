use std::fmt;

use serde::{Deserialize, Serialize};

use crate::id::EmployeeId;

/// One entry in the directory: an employee name and their short number.
///
/// Neither name nor short number is unique. Two records with equal
/// fields are still distinct because their ids differ.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    /// Stable identifier, fixed at creation.
    pub id: EmployeeId,
    /// Employee display name, trimmed and non-empty.
    pub name: String,
    /// Short-dial number, trimmed and non-empty.
    pub short: String,
}

impl EmployeeRecord {
    /// Create a record with a freshly generated id.
    ///
    /// The caller is responsible for normalising the fields first.
    pub fn new(name: impl Into<String>, short: impl Into<String>) -> Self {
        Self {
            id: EmployeeId::new(),
            name: name.into(),
            short: short.into(),
        }
    }
}

impl fmt::Display for EmployeeRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.name, self.short)
    }
}

/// On-disk shape of a record.
///
/// Directory files written before ids existed hold only `name` and
/// `short`, so `id` is optional here. The store assigns ids to entries
/// that lack one when it loads them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EmployeeId>,
    pub name: String,
    pub short: String,
}

impl From<EmployeeRecord> for PersistedRecord {
    fn from(record: EmployeeRecord) -> Self {
        Self {
            id: Some(record.id),
            name: record.name,
            short: record.short,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_joins_name_and_short() {
        let record = EmployeeRecord::new("张三", "101");
        assert_eq!(record.to_string(), "张三 - 101");
    }

    #[test]
    fn equal_fields_distinct_records() {
        let a = EmployeeRecord::new("Alice", "101");
        let b = EmployeeRecord::new("Alice", "101");
        assert_ne!(a, b);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn record_serializes_id_name_short() {
        let record = EmployeeRecord::new("Alice", "101");
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["name"], "Alice");
        assert_eq!(value["short"], "101");
        assert_eq!(value["id"], record.id.to_string());
    }

    #[test]
    fn persisted_record_accepts_missing_id() {
        let parsed: PersistedRecord =
            serde_json::from_str(r#"{"name": "张三", "short": "101"}"#).unwrap();
        assert!(parsed.id.is_none());
        assert_eq!(parsed.name, "张三");
        assert_eq!(parsed.short, "101");
    }

    #[test]
    fn persisted_record_reads_full_record() {
        let record = EmployeeRecord::new("Bob", "202");
        let json = serde_json::to_string(&record).unwrap();
        let parsed: PersistedRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, PersistedRecord::from(record));
    }

    #[test]
    fn persisted_record_rejects_missing_short() {
        let parsed = serde_json::from_str::<PersistedRecord>(r#"{"name": "x"}"#);
        assert!(parsed.is_err());
    }
}
