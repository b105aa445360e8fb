//! Secondary index subsystem for rowindex
//!
//! Indexes are derived, in-memory state materialized from a row snapshot.
//!
//! # Design Principles
//!
//! - Derived state: an index is a point-in-time view of the snapshot it was built from
//! - In-memory only: no persistence
//! - Deterministic: BTreeMap ordering, ties kept in snapshot order
//!
//! # Invariants
//!
//! - At most one live index per key across all value types
//! - Replacing the snapshot clears every index
//! - Lookup misses are `None`/`false`, never errors

mod bucket;
mod combine;
mod config;
mod errors;
mod registry;
mod scalar;
mod source;

pub use bucket::{TypeBucket, ValueType};
pub use combine::CombineOp;
pub use config::{DuplicateKeyPolicy, RegistryConfig};
pub use errors::{ErrorSeverity, IndexError, IndexResult};
pub use registry::{IndexRegistry, IndexStats};
pub use scalar::{RowId, ScalarIndex, TotalF64};
pub use source::Snapshot;
