//! The employee record store.
//!
//! [`EmployeeStore`] owns the ordered collection and writes it back through
//! its [`RecordPersistence`] backend after every mutation.

use std::collections::HashSet;

use shortdial_types::{normalize_field, EmployeeId, EmployeeRecord, Field, PersistedRecord};
use tracing::{debug, warn};

use crate::error::{StoreError, StoreResult};
use crate::search::{Matches, Query};
use crate::traits::RecordPersistence;

/// Shortest id prefix [`EmployeeStore::resolve`] will consider.
const MIN_ID_PREFIX: usize = 4;

/// Outcome of [`EmployeeStore::load`].
///
/// Loading never fails; this tells the caller what happened instead.
#[derive(Debug)]
pub enum LoadReport {
    /// The persisted collection was read.
    Loaded {
        /// Number of records now in memory.
        count: usize,
        /// Records that had no id (or a duplicate one) and got a fresh id.
        /// These ids are not persisted until the next save.
        assigned_ids: usize,
    },
    /// Nothing was persisted yet; the collection starts empty.
    Missing,
    /// The persisted copy could not be read; the collection starts empty.
    Recovered {
        /// Why the persisted copy was rejected.
        error: StoreError,
    },
}

impl LoadReport {
    /// Number of records loaded (zero unless [`LoadReport::Loaded`]).
    pub fn count(&self) -> usize {
        match self {
            Self::Loaded { count, .. } => *count,
            Self::Missing | Self::Recovered { .. } => 0,
        }
    }

    /// Returns `true` if the store holds ids that are not yet on disk.
    pub fn needs_save(&self) -> bool {
        matches!(self, Self::Loaded { assigned_ids, .. } if *assigned_ids > 0)
    }
}

/// Result of a mutation that was applied in memory.
///
/// The mutation itself has succeeded once you hold a `Saved`. Whether the
/// follow-up save also succeeded is reported separately, because a failed
/// save keeps the in-memory change.
#[derive(Debug)]
#[must_use = "a failed save is only reported through `Saved`"]
pub struct Saved<T> {
    value: T,
    save_error: Option<StoreError>,
}

impl<T> Saved<T> {
    /// The mutation's result.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Discard the save status and keep the value.
    pub fn into_value(self) -> T {
        self.value
    }

    /// Returns `true` if the collection was written to the backend.
    pub fn is_persisted(&self) -> bool {
        self.save_error.is_none()
    }

    /// The error from the follow-up save, if it failed.
    pub fn save_error(&self) -> Option<&StoreError> {
        self.save_error.as_ref()
    }

    /// Split into the value and the save result.
    pub fn into_parts(self) -> (T, StoreResult<()>) {
        let status = match self.save_error {
            Some(err) => Err(err),
            None => Ok(()),
        };
        (self.value, status)
    }
}

/// Ordered, persisted collection of employee records.
///
/// Not safe for concurrent use: mutation takes `&mut self` and the backend
/// does no locking. One process, one owner.
#[derive(Debug)]
pub struct EmployeeStore<P> {
    persistence: P,
    records: Vec<EmployeeRecord>,
}

impl<P: RecordPersistence> EmployeeStore<P> {
    /// Create a store over `persistence` and load its collection.
    pub fn open(persistence: P) -> (Self, LoadReport) {
        let mut store = Self {
            persistence,
            records: Vec::new(),
        };
        let report = store.load();
        (store, report)
    }

    /// Replace the in-memory collection with the persisted one.
    ///
    /// On any read or parse failure the collection becomes empty and the
    /// failure is logged and returned in [`LoadReport::Recovered`].
    pub fn load(&mut self) -> LoadReport {
        match self.persistence.load() {
            Ok(Some(persisted)) => {
                let (records, assigned_ids) = hydrate(persisted);
                if assigned_ids > 0 {
                    debug!(assigned_ids, "assigned ids to records without a unique id");
                }
                debug!(
                    source = %self.persistence.describe(),
                    count = records.len(),
                    "loaded directory"
                );
                let count = records.len();
                self.records = records;
                LoadReport::Loaded {
                    count,
                    assigned_ids,
                }
            }
            Ok(None) => {
                debug!(source = %self.persistence.describe(), "no directory yet; starting empty");
                self.records.clear();
                LoadReport::Missing
            }
            Err(error) => {
                warn!(
                    source = %self.persistence.describe(),
                    error = %error,
                    "failed to load directory; starting empty"
                );
                self.records.clear();
                LoadReport::Recovered { error }
            }
        }
    }

    /// Write the whole collection to the backend.
    ///
    /// A failure is logged and returned; in-memory state is untouched.
    pub fn save(&self) -> StoreResult<()> {
        self.persistence.save(&self.records).inspect_err(|error| {
            warn!(
                target_file = %self.persistence.describe(),
                error = %error,
                "failed to save directory"
            );
        })
    }

    /// All records, in insertion order.
    pub fn records(&self) -> &[EmployeeRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The persistence backend.
    pub fn persistence(&self) -> &P {
        &self.persistence
    }

    /// Look up a record by id.
    pub fn get(&self, id: &EmployeeId) -> Option<&EmployeeRecord> {
        self.records.iter().find(|record| record.id == *id)
    }

    /// Records whose name contains `query` ignoring case, or whose short
    /// number contains `query` exactly. Insertion order is preserved and
    /// an empty query yields everything.
    pub fn search(&self, query: &str) -> Matches<'_> {
        Matches::new(Query::new(query), &self.records)
    }

    /// Append a new record and save.
    ///
    /// Both fields are trimmed and must be non-empty; otherwise nothing is
    /// changed and [`StoreError::Validation`] is returned.
    pub fn add(&mut self, name: &str, short: &str) -> StoreResult<Saved<EmployeeRecord>> {
        let name = normalize_field(Field::Name, name)?;
        let short = normalize_field(Field::Short, short)?;

        let record = EmployeeRecord::new(name, short);
        debug!(id = %record.id, "added employee");
        self.records.push(record.clone());
        Ok(self.commit(record))
    }

    /// Replace the name and short number of the record with `id`, keeping
    /// its position and id, and save.
    ///
    /// The same non-empty rule as [`add`](Self::add) applies.
    pub fn edit(
        &mut self,
        id: &EmployeeId,
        name: &str,
        short: &str,
    ) -> StoreResult<Saved<EmployeeRecord>> {
        let index = self.position(id)?;
        let name = normalize_field(Field::Name, name)?;
        let short = normalize_field(Field::Short, short)?;

        let record = &mut self.records[index];
        record.name = name;
        record.short = short;
        let updated = record.clone();
        debug!(id = %updated.id, index, "edited employee");
        Ok(self.commit(updated))
    }

    /// Remove the record with `id` and save.
    pub fn remove(&mut self, id: &EmployeeId) -> StoreResult<Saved<EmployeeRecord>> {
        let index = self.position(id)?;
        let removed = self.records.remove(index);
        debug!(id = %removed.id, index, "removed employee");
        Ok(self.commit(removed))
    }

    /// Turn user-supplied text into the id of a record in this store.
    ///
    /// Accepts a full id in any UUID notation, or an unambiguous prefix of
    /// at least four hex digits (hyphens ignored).
    pub fn resolve(&self, token: &str) -> StoreResult<EmployeeId> {
        let token = token.trim();
        if let Ok(id) = token.parse::<EmployeeId>() {
            return self.get(&id).map(|record| record.id).ok_or(StoreError::NotFound(id));
        }

        let prefix: String = token
            .chars()
            .filter(|c| *c != '-')
            .map(|c| c.to_ascii_lowercase())
            .collect();
        if prefix.len() < MIN_ID_PREFIX || !prefix.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(StoreError::UnknownId(token.to_string()));
        }

        let mut candidates = self
            .records
            .iter()
            .filter(|record| record.id.simple().starts_with(&prefix));
        match (candidates.next(), candidates.count()) {
            (None, _) => Err(StoreError::UnknownId(token.to_string())),
            (Some(record), 0) => Ok(record.id),
            (Some(_), rest) => Err(StoreError::AmbiguousId {
                prefix: token.to_string(),
                candidates: rest + 1,
            }),
        }
    }

    fn position(&self, id: &EmployeeId) -> StoreResult<usize> {
        self.records
            .iter()
            .position(|record| record.id == *id)
            .ok_or(StoreError::NotFound(*id))
    }

    fn commit<T>(&self, value: T) -> Saved<T> {
        Saved {
            value,
            save_error: self.save().err(),
        }
    }
}

/// Convert persisted entries to records, giving every entry a unique id.
fn hydrate(persisted: Vec<PersistedRecord>) -> (Vec<EmployeeRecord>, usize) {
    let mut seen = HashSet::with_capacity(persisted.len());
    let mut assigned = 0;
    let records = persisted
        .into_iter()
        .map(|entry| {
            let id = match entry.id {
                Some(id) if seen.insert(id) => id,
                _ => {
                    assigned += 1;
                    let id = EmployeeId::new();
                    seen.insert(id);
                    id
                }
            };
            EmployeeRecord {
                id,
                name: entry.name,
                short: entry.short,
            }
        })
        .collect();
    (records, assigned)
}
