//! Index Registry for rowindex
//!
//! Owns the row snapshot and every index built over it.
//!
//! # API
//!
//! - `create_index(key, extractor)` - Build a named index over the snapshot
//! - `drop_index(key)` / `contains_index(key)`
//! - `retrieve_range(key, from, to)` - Inclusive range lookup
//! - `retrieve_equal(key, value)` - Exact match lookup
//! - `retrieve_combined(first, second, value, op)` - Two-field Or/And
//! - `update_source(snapshot)` - Swap the snapshot, clearing all indexes
//!
//! Lookup misses return `None`, never an error.

use std::any::TypeId;
use std::collections::HashMap;

use serde::Serialize;

use super::bucket::{TypeBucket, ValueType};
use super::combine::CombineOp;
use super::config::{DuplicateKeyPolicy, RegistryConfig};
use super::errors::{IndexError, IndexResult};
use super::scalar::{RowId, ScalarIndex};
use super::source::Snapshot;
use crate::observability::{log_event, Event, IndexMetrics};

/// Size and type of one live index
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexStats {
    pub key: String,
    pub value_type: &'static str,
    pub distinct_values: usize,
    pub rows: usize,
}

/// Registry of named secondary indexes over one row snapshot.
///
/// Single-writer: share it behind an `RwLock` for concurrent readers.
pub struct IndexRegistry<R> {
    source: Snapshot<R>,
    /// Indexes grouped by value type
    buckets: HashMap<TypeId, TypeBucket>,
    /// Every live key and the bucket holding it
    keys: HashMap<String, TypeId>,
    config: RegistryConfig,
    metrics: IndexMetrics,
}

impl<R> IndexRegistry<R> {
    /// Creates a registry over `source` with no indexes
    pub fn new(source: impl Into<Snapshot<R>>) -> Self {
        Self::with_config(source, RegistryConfig::default())
    }

    pub fn with_config(source: impl Into<Snapshot<R>>, config: RegistryConfig) -> Self {
        Self {
            source: source.into(),
            buckets: HashMap::new(),
            keys: HashMap::new(),
            config,
            metrics: IndexMetrics::new(),
        }
    }

    /// Build an index named `key` by running `extractor` over every row.
    ///
    /// Fails with `EmptySource` if the snapshot has no rows. A live `key` is
    /// replaced or rejected according to `RegistryConfig::duplicate_keys`.
    pub fn create_index<V, F>(&mut self, key: impl Into<String>, extractor: F) -> IndexResult<()>
    where
        V: Ord + Send + Sync + 'static,
        F: Fn(&R) -> V,
    {
        let key = key.into();

        if self.source.is_empty() {
            return Err(self.reject_build(&key, IndexError::EmptySource));
        }

        let value_type = ValueType::of::<V>();
        let previous = self.keys.get(&key).copied();

        if previous.is_some() && self.config.duplicate_keys == DuplicateKeyPolicy::Reject {
            return Err(self.reject_build(&key, IndexError::DuplicateKey(key.clone())));
        }

        // An overwrite may move the key to another value type
        if let Some(old_type) = previous {
            if old_type != value_type.id() {
                self.remove_from_bucket(old_type, &key);
            }
        }

        let bucket = self
            .buckets
            .entry(value_type.id())
            .or_insert_with(|| TypeBucket::new(value_type));
        bucket.create_index(&key, self.source.rows(), extractor);
        self.keys.insert(key.clone(), value_type.id());

        let rows = self.source.len();
        self.metrics.record_build(rows as u64);
        let rows_field = rows.to_string();

        let event = if previous.is_some() {
            Event::IndexReplaced
        } else {
            Event::IndexCreated
        };
        self.emit(
            event,
            &[
                ("key", key.as_str()),
                ("rows", rows_field.as_str()),
                ("value_type", value_type.name()),
            ],
        );

        Ok(())
    }

    /// Remove the index named `key`. Returns false if there was none.
    pub fn drop_index(&mut self, key: &str) -> bool {
        let Some(type_id) = self.keys.remove(key) else {
            return false;
        };

        self.remove_from_bucket(type_id, key);
        self.metrics.record_drops(1);
        self.emit(Event::IndexDropped, &[("key", key)]);
        true
    }

    pub fn contains_index(&self, key: &str) -> bool {
        self.keys.contains_key(key)
    }

    /// Rows whose value under `key` lies in `[from, to]`, ascending by value.
    ///
    /// Returns None if `key` is not live or its values are not a `V`.
    pub fn retrieve_range<V: Ord + 'static>(&self, key: &str, from: &V, to: &V) -> Option<Vec<&R>> {
        self.retrieve_range_ids(key, from, to)
            .map(|ids| self.source.resolve(&ids))
    }

    /// Rows whose value under `key` equals `value`
    pub fn retrieve_equal<V: Ord + 'static>(&self, key: &str, value: &V) -> Option<Vec<&R>> {
        self.retrieve_range(key, value, value)
    }

    /// Snapshot positions for `retrieve_range`
    pub fn retrieve_range_ids<V: Ord + 'static>(
        &self,
        key: &str,
        from: &V,
        to: &V,
    ) -> Option<Vec<RowId>> {
        let ids = self.index::<V>(key).map(|index| index.range(from, to));
        self.metrics.record_lookup(ids.is_some());
        ids
    }

    /// Snapshot positions for `retrieve_equal`
    pub fn retrieve_equal_ids<V: Ord + 'static>(&self, key: &str, value: &V) -> Option<Vec<RowId>> {
        self.retrieve_range_ids(key, value, value)
    }

    /// Combine equality lookups on two indexes.
    ///
    /// `second`'s hits lead and `first`'s follow; each row appears once, at
    /// its first occurrence. `And` keeps only rows present in both. A
    /// missing key contributes no rows.
    pub fn retrieve_combined<V: Ord + 'static>(
        &self,
        first: &str,
        second: &str,
        value: &V,
        op: CombineOp,
    ) -> Vec<&R> {
        let ids = self.retrieve_combined_ids(first, second, value, op);
        self.source.resolve(&ids)
    }

    /// Snapshot positions for `retrieve_combined`
    pub fn retrieve_combined_ids<V: Ord + 'static>(
        &self,
        first: &str,
        second: &str,
        value: &V,
        op: CombineOp,
    ) -> Vec<RowId> {
        self.metrics.increment_combined_queries();

        let second_hits = self.retrieve_equal_ids(second, value).unwrap_or_default();
        let first_hits = self.retrieve_equal_ids(first, value).unwrap_or_default();

        op.combine(second_hits, first_hits)
    }

    /// Replace the snapshot and clear every index.
    ///
    /// `None` fails with `NullSource` and leaves the registry unchanged.
    pub fn update_source(&mut self, source: Option<Snapshot<R>>) -> IndexResult<()> {
        match source {
            Some(source) => {
                self.replace_source(source);
                Ok(())
            }
            None => {
                self.metrics.increment_rejected();
                self.emit(
                    Event::SourceRejected,
                    &[("code", IndexError::NullSource.code())],
                );
                Err(IndexError::NullSource)
            }
        }
    }

    /// Replace the snapshot and clear every index
    pub fn replace_source(&mut self, source: impl Into<Snapshot<R>>) {
        let dropped = self.clear_all().to_string();
        self.source = source.into();
        self.metrics.increment_source_replacements();

        let rows = self.source.len().to_string();
        self.emit(
            Event::SourceReplaced,
            &[("dropped_indexes", dropped.as_str()), ("rows", rows.as_str())],
        );
    }

    /// Drop every index, keeping the snapshot
    pub fn clear_indexes(&mut self) {
        self.clear_all();
    }

    /// Typed access to the index named `key`
    pub fn index<V: Ord + 'static>(&self, key: &str) -> Option<&ScalarIndex<V>> {
        let type_id = self.keys.get(key)?;
        let bucket = self.buckets.get(type_id)?;
        let index = bucket.get::<V>(key);

        if index.is_none() {
            self.emit(
                Event::LookupTypeMismatch,
                &[
                    ("key", key),
                    ("requested", std::any::type_name::<V>()),
                    ("stored", bucket.value_type().name()),
                ],
            );
        }

        index
    }

    pub fn source(&self) -> &Snapshot<R> {
        &self.source
    }

    /// Number of rows in the current snapshot
    pub fn len(&self) -> usize {
        self.source.len()
    }

    pub fn is_empty(&self) -> bool {
        self.source.is_empty()
    }

    /// Number of distinct value types with at least one live index
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Live index keys, sorted
    pub fn index_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.keys.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    /// Type name of the values indexed under `key`
    pub fn value_type_of(&self, key: &str) -> Option<&'static str> {
        let type_id = self.keys.get(key)?;
        self.buckets.get(type_id).map(|b| b.value_type().name())
    }

    pub fn index_stats(&self, key: &str) -> Option<IndexStats> {
        let type_id = self.keys.get(key)?;
        let bucket = self.buckets.get(type_id)?;
        let (distinct_values, rows) = bucket.counts(key)?;

        Some(IndexStats {
            key: key.to_string(),
            value_type: bucket.value_type().name(),
            distinct_values,
            rows,
        })
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    pub fn metrics(&self) -> &IndexMetrics {
        &self.metrics
    }

    fn clear_all(&mut self) -> usize {
        let dropped = self.keys.len();
        self.buckets.clear();
        self.keys.clear();
        self.metrics.record_drops(dropped as u64);
        dropped
    }

    /// Remove `key` from the bucket for `type_id`, pruning the bucket if empty
    fn remove_from_bucket(&mut self, type_id: TypeId, key: &str) -> bool {
        let Some(bucket) = self.buckets.get_mut(&type_id) else {
            return false;
        };

        let removed = bucket.drop(key);
        if bucket.is_empty() {
            self.buckets.remove(&type_id);
        }
        removed
    }

    fn reject_build(&self, key: &str, err: IndexError) -> IndexError {
        self.metrics.increment_rejected();
        self.emit(
            Event::IndexBuildRejected,
            &[("code", err.code()), ("key", key)],
        );
        err
    }

    fn emit(&self, event: Event, fields: &[(&str, &str)]) {
        if self.config.should_log(event.severity()) {
            log_event(event, fields);
        }
    }
}
