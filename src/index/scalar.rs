//! BTreeMap-based scalar index
//!
//! A `ScalarIndex<V>` maps each extracted value to the positions of the rows
//! that produced it. Positions within one value keep snapshot order.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};
use std::ops::Bound;

/// Position of a row in the registry's snapshot
pub type RowId = usize;

/// Totally ordered `f64`, so float fields can be indexed.
///
/// Ordering: negative NaN < -inf < negatives < 0.0 < positives < +inf < NaN.
/// `-0.0` and `+0.0` are the same key.
#[derive(Debug, Clone, Copy)]
pub struct TotalF64(pub f64);

impl TotalF64 {
    /// Returns the wrapped float
    pub fn get(self) -> f64 {
        self.0
    }

    fn ordered_bits(self) -> u64 {
        // Fold -0.0 into +0.0
        let value = if self.0 == 0.0 { 0.0 } else { self.0 };
        let bits = value.to_bits();
        if (bits >> 63) == 1 {
            !bits
        } else {
            bits ^ (1 << 63)
        }
    }
}

impl From<f64> for TotalF64 {
    fn from(v: f64) -> Self {
        TotalF64(v)
    }
}

impl PartialEq for TotalF64 {
    fn eq(&self, other: &Self) -> bool {
        self.ordered_bits() == other.ordered_bits()
    }
}

impl Eq for TotalF64 {}

impl PartialOrd for TotalF64 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TotalF64 {
    fn cmp(&self, other: &Self) -> Ordering {
        self.ordered_bits().cmp(&other.ordered_bits())
    }
}

impl Hash for TotalF64 {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.ordered_bits().hash(state);
    }
}

/// A single named ordered index, materialized from one snapshot.
#[derive(Debug, Clone)]
pub struct ScalarIndex<V> {
    tree: BTreeMap<V, Vec<RowId>>,
    row_count: usize,
}

impl<V: Ord> ScalarIndex<V> {
    /// Build an index by running `extractor` over every row once.
    ///
    /// Rows sharing a value are all kept, in snapshot order.
    pub fn build<R, F>(rows: &[R], extractor: F) -> Self
    where
        F: Fn(&R) -> V,
    {
        let mut tree: BTreeMap<V, Vec<RowId>> = BTreeMap::new();
        for (row_id, row) in rows.iter().enumerate() {
            tree.entry(extractor(row)).or_default().push(row_id);
        }

        Self {
            tree,
            row_count: rows.len(),
        }
    }

    /// Rows whose value lies in `[from, to]`, ascending by value.
    ///
    /// An inverted range (`from > to`) is empty.
    pub fn range(&self, from: &V, to: &V) -> Vec<RowId> {
        // BTreeMap::range panics on inverted bounds
        if from > to {
            return Vec::new();
        }

        self.tree
            .range((Bound::Included(from), Bound::Included(to)))
            .flat_map(|(_, row_ids)| row_ids.iter().copied())
            .collect()
    }

    /// Rows whose value equals `value`
    pub fn lookup_eq(&self, value: &V) -> Vec<RowId> {
        self.tree.get(value).cloned().unwrap_or_default()
    }

    /// Number of distinct values
    pub fn key_count(&self) -> usize {
        self.tree.len()
    }

    /// Number of rows indexed
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn min_value(&self) -> Option<&V> {
        self.tree.keys().next()
    }

    pub fn max_value(&self) -> Option<&V> {
        self.tree.keys().next_back()
    }
}
