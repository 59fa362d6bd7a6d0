//! Foundation types for shortdial.
//!
//! Every other shortdial crate depends on `shortdial-types`.
//!
//! # Key Types
//!
//! - [`EmployeeId`] — Stable UUID v7 identifier assigned when a record is created
//! - [`EmployeeRecord`] — One employee name paired with a short-dial number
//! - [`PersistedRecord`] — On-disk shape of a record, tolerant of missing ids
//! - [`Field`] — The two user-editable fields, with [`normalize_field`]

pub mod error;
pub mod field;
pub mod id;
pub mod record;

pub use error::TypeError;
pub use field::{normalize_field, Field};
pub use id::EmployeeId;
pub use record::{EmployeeRecord, PersistedRecord};
