//! Per-value-type index buckets
//!
//! Ordering is only defined within one concrete value type, so every index
//! whose values are a `V` lives in the bucket for `V`. Indexes are stored
//! type-erased and recovered with a typed downcast.

use std::any::{Any, TypeId};
use std::collections::HashMap;

use super::scalar::ScalarIndex;

/// The concrete value type of an index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ValueType {
    id: TypeId,
    name: &'static str,
}

impl ValueType {
    /// The value type for `V`
    pub fn of<V: 'static>() -> Self {
        Self {
            id: TypeId::of::<V>(),
            name: std::any::type_name::<V>(),
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Human-readable type name, for diagnostics only
    pub fn name(&self) -> &'static str {
        self.name
    }
}

/// Object-safe view of a `ScalarIndex<V>` with `V` erased
pub(crate) trait ErasedIndex: Send + Sync {
    fn as_any(&self) -> &dyn Any;
    fn key_count(&self) -> usize;
    fn row_count(&self) -> usize;
}

impl<V> ErasedIndex for ScalarIndex<V>
where
    V: Ord + Send + Sync + 'static,
{
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn key_count(&self) -> usize {
        ScalarIndex::key_count(self)
    }

    fn row_count(&self) -> usize {
        ScalarIndex::row_count(self)
    }
}

/// All indexes sharing one value type, by key
pub struct TypeBucket {
    value_type: ValueType,
    indexes: HashMap<String, Box<dyn ErasedIndex>>,
}

impl TypeBucket {
    /// Creates an empty bucket for `value_type`
    pub fn new(value_type: ValueType) -> Self {
        Self {
            value_type,
            indexes: HashMap::new(),
        }
    }

    pub fn value_type(&self) -> ValueType {
        self.value_type
    }

    /// Build an index over `rows` and store it under `key`.
    ///
    /// Returns true if an index already stored under `key` was replaced.
    pub fn create_index<R, V, F>(&mut self, key: &str, rows: &[R], extractor: F) -> bool
    where
        V: Ord + Send + Sync + 'static,
        F: Fn(&R) -> V,
    {
        debug_assert_eq!(ValueType::of::<V>(), self.value_type);

        let index = ScalarIndex::build(rows, extractor);
        self.indexes.insert(key.to_string(), Box::new(index)).is_some()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.indexes.contains_key(key)
    }

    /// Remove the index under `key`. Returns false if there was none.
    pub fn drop(&mut self, key: &str) -> bool {
        self.indexes.remove(key).is_some()
    }

    /// Typed access to the index under `key`.
    ///
    /// Returns None if the key is absent or `V` is not this bucket's type.
    pub fn get<V: Ord + 'static>(&self, key: &str) -> Option<&ScalarIndex<V>> {
        self.indexes.get(key)?.as_any().downcast_ref::<ScalarIndex<V>>()
    }

    /// `(distinct values, rows)` for the index under `key`
    pub fn counts(&self, key: &str) -> Option<(usize, usize)> {
        self.indexes
            .get(key)
            .map(|index| (index.key_count(), index.row_count()))
    }

    pub fn len(&self) -> usize {
        self.indexes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indexes.is_empty()
    }
}
