//! Employee record store for shortdial.
//!
//! This crate owns the directory's ordered collection of
//! [`EmployeeRecord`]s, keeps it synchronised with a persisted file, and
//! answers search queries over it.
//!
//! # Persistence Backends
//!
//! All backends implement the [`RecordPersistence`] trait:
//!
//! - [`JsonFilePersistence`] -- pretty-printed JSON file, replaced atomically
//! - [`InMemoryPersistence`] -- `RwLock`-guarded snapshot for tests and embedding
//!
//! # Design Rules
//!
//! 1. Records keep insertion order; nothing is ever sorted.
//! 2. Every mutation rewrites the whole collection through the backend.
//! 3. Edit and remove address records by [`EmployeeId`], never by value.
//! 4. Load failures degrade to an empty collection and are reported, not raised.
//! 5. Save failures leave in-memory state intact and are returned to the caller.
//! 6. The store is single-owner: mutation takes `&mut self` and there is no
//!    file locking. Wrap it in external synchronisation to share it.

pub mod error;
pub mod file;
pub mod memory;
pub mod search;
pub mod store;
pub mod traits;

// Re-export primary types at crate root for ergonomic imports.
pub use error::{StoreError, StoreResult};
pub use file::{JsonFilePersistence, DEFAULT_DATA_FILE};
pub use memory::InMemoryPersistence;
pub use search::{Matches, Query};
pub use store::{EmployeeStore, LoadReport, Saved};
pub use traits::RecordPersistence;

pub use shortdial_types::{EmployeeId, EmployeeRecord, Field, PersistedRecord};
