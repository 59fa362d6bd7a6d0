use std::sync::RwLock;

use shortdial_types::{EmployeeRecord, PersistedRecord};

use crate::error::{StoreError, StoreResult};
use crate::traits::RecordPersistence;

/// In-memory persistence backend.
///
/// Intended for tests and embedding. Holds the last saved snapshot behind
/// a `RwLock`. It can be switched read-only to exercise save-failure
/// paths. Data is lost when the backend is dropped.
#[derive(Debug, Default)]
pub struct InMemoryPersistence {
    snapshot: RwLock<Option<Vec<PersistedRecord>>>,
    read_only: RwLock<bool>,
    saves: RwLock<usize>,
}

impl InMemoryPersistence {
    /// Create an empty backend with nothing persisted.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a backend that already holds `records`, as if a file existed.
    pub fn with_records(records: Vec<PersistedRecord>) -> Self {
        Self {
            snapshot: RwLock::new(Some(records)),
            ..Self::default()
        }
    }

    /// Make subsequent saves fail with [`StoreError::ReadOnly`].
    pub fn set_read_only(&self, read_only: bool) {
        *self.read_only.write().expect("lock poisoned") = read_only;
    }

    /// Number of successful saves so far.
    pub fn save_count(&self) -> usize {
        *self.saves.read().expect("lock poisoned")
    }

    /// The currently persisted snapshot, if any.
    pub fn snapshot(&self) -> Option<Vec<PersistedRecord>> {
        self.snapshot.read().expect("lock poisoned").clone()
    }
}

impl RecordPersistence for InMemoryPersistence {
    fn load(&self) -> StoreResult<Option<Vec<PersistedRecord>>> {
        let snapshot = self
            .snapshot
            .read()
            .map_err(|e| StoreError::Serialization(format!("lock poisoned: {e}")))?;
        Ok(snapshot.clone())
    }

    fn save(&self, records: &[EmployeeRecord]) -> StoreResult<()> {
        let read_only = *self
            .read_only
            .read()
            .map_err(|e| StoreError::Serialization(format!("lock poisoned: {e}")))?;
        if read_only {
            return Err(StoreError::ReadOnly);
        }

        let mut snapshot = self
            .snapshot
            .write()
            .map_err(|e| StoreError::Serialization(format!("lock poisoned: {e}")))?;
        *snapshot = Some(records.iter().cloned().map(PersistedRecord::from).collect());

        let mut saves = self
            .saves
            .write()
            .map_err(|e| StoreError::Serialization(format!("lock poisoned: {e}")))?;
        *saves += 1;
        Ok(())
    }

    fn describe(&self) -> String {
        "<memory>".into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_backend_loads_none() {
        let backend = InMemoryPersistence::new();
        assert!(backend.load().unwrap().is_none());
        assert_eq!(backend.save_count(), 0);
    }

    #[test]
    fn save_replaces_snapshot() {
        let backend = InMemoryPersistence::new();
        let first = EmployeeRecord::new("Alice", "101");
        let second = EmployeeRecord::new("Bob", "102");

        backend.save(&[first.clone(), second]).unwrap();
        backend.save(std::slice::from_ref(&first)).unwrap();

        let loaded = backend.load().unwrap().unwrap();
        assert_eq!(loaded, vec![PersistedRecord::from(first)]);
        assert_eq!(backend.save_count(), 2);
    }

    #[test]
    fn read_only_rejects_save_and_keeps_snapshot() {
        let existing = PersistedRecord {
            id: None,
            name: "Alice".into(),
            short: "101".into(),
        };
        let backend = InMemoryPersistence::with_records(vec![existing.clone()]);
        backend.set_read_only(true);

        let err = backend.save(&[]).unwrap_err();
        assert!(matches!(err, StoreError::ReadOnly));
        assert_eq!(backend.snapshot(), Some(vec![existing]));
        assert_eq!(backend.save_count(), 0);
    }
}
