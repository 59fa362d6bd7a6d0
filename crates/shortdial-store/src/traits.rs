use shortdial_types::{EmployeeRecord, PersistedRecord};

use crate::error::StoreResult;

/// Backend that holds the persisted copy of the employee collection.
///
/// All implementations must satisfy these invariants:
/// - `save` replaces the whole collection; there are no partial writes.
/// - A `save` that returns `Err` leaves the previous persisted copy intact.
/// - `load` after a successful `save` returns the same records in the same
///   order, ids included.
/// - Backends never validate or reorder records.
pub trait RecordPersistence {
    /// Read the persisted collection.
    ///
    /// Returns `Ok(None)` if nothing has been persisted yet.
    /// Returns `Err` on I/O failure or malformed contents.
    fn load(&self) -> StoreResult<Option<Vec<PersistedRecord>>>;

    /// Replace the persisted collection with `records`.
    fn save(&self, records: &[EmployeeRecord]) -> StoreResult<()>;

    /// Human-readable location of the persisted copy, for logs and messages.
    fn describe(&self) -> String;
}
