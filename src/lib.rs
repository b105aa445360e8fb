//! rowindex - named, range-queryable secondary indexes over a row snapshot
//!
//! ```
//! use rowindex::{CombineOp, IndexRegistry};
//!
//! // (user id, age)
//! let mut registry = IndexRegistry::new(vec![(1_u32, 31_i32), (2, 27), (3, 31)]);
//! registry.create_index("age", |row: &(u32, i32)| row.1).unwrap();
//!
//! let thirties = registry.retrieve_range("age", &30, &39).unwrap();
//! assert_eq!(thirties, vec![&(1, 31), &(3, 31)]);
//!
//! let either = registry.retrieve_combined("age", "age", &27, CombineOp::Or);
//! assert_eq!(either, vec![&(2, 27)]);
//! ```

pub mod index;
pub mod observability;

pub use index::{
    CombineOp, DuplicateKeyPolicy, IndexError, IndexRegistry, IndexResult, IndexStats,
    RegistryConfig, RowId, ScalarIndex, Snapshot, TotalF64,
};
