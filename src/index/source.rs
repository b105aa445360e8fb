//! Shared row snapshots
//!
//! Indexes refer to rows by position; the snapshot owns the rows and is
//! shared, never copied or mutated.

use std::sync::Arc;

use super::scalar::RowId;

/// An immutable, shared, ordered sequence of rows
#[derive(Debug)]
pub struct Snapshot<R> {
    rows: Arc<[R]>,
}

impl<R> Snapshot<R> {
    pub fn new(rows: Vec<R>) -> Self {
        Self { rows: rows.into() }
    }

    /// A snapshot with no rows
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn get(&self, row_id: RowId) -> Option<&R> {
        self.rows.get(row_id)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Map positions to rows, keeping the order of `row_ids`.
    ///
    /// Positions outside the snapshot are skipped.
    pub fn resolve(&self, row_ids: &[RowId]) -> Vec<&R> {
        row_ids.iter().filter_map(|&id| self.rows.get(id)).collect()
    }
}

impl<R> Clone for Snapshot<R> {
    fn clone(&self) -> Self {
        Self {
            rows: Arc::clone(&self.rows),
        }
    }
}

impl<R> Default for Snapshot<R> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<R> From<Vec<R>> for Snapshot<R> {
    fn from(rows: Vec<R>) -> Self {
        Self::new(rows)
    }
}

impl<R> From<Arc<[R]>> for Snapshot<R> {
    fn from(rows: Arc<[R]>) -> Self {
        Self { rows }
    }
}
