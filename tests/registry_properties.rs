//! Registry Property Tests
//!
//! Tests for registry invariants:
//! - Range lookups return exactly the matching rows
//! - Equality is a degenerate range
//! - Replacing the snapshot invalidates every index
//! - Indexes are routed to buckets by value type
//! - Combined Or/And ordering and dedup

use rowindex::{
    CombineOp, DuplicateKeyPolicy, IndexError, IndexRegistry, RegistryConfig, Snapshot, TotalF64,
};

// =============================================================================
// Helper Functions
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
struct Order {
    id: u32,
    customer: String,
    quantity: i64,
    price: f64,
}

fn order(id: u32, customer: &str, quantity: i64, price: f64) -> Order {
    Order {
        id,
        customer: customer.to_string(),
        quantity,
        price,
    }
}

fn orders() -> Vec<Order> {
    vec![
        order(1, "acme", 5, 19.5),
        order(2, "globex", 12, 3.0),
        order(3, "acme", 7, 19.5),
        order(4, "initech", 5, 120.0),
        order(5, "globex", 1, 0.5),
        order(6, "umbrella", 7, 42.0),
    ]
}

fn ids(rows: &[&Order]) -> Vec<u32> {
    rows.iter().map(|o| o.id).collect()
}

fn registry_with_quantity() -> IndexRegistry<Order> {
    let mut registry = IndexRegistry::new(orders());
    registry
        .create_index("quantity", |o: &Order| o.quantity)
        .unwrap();
    registry
}

// =============================================================================
// Range Correctness Tests
// =============================================================================

/// Range returns exactly the rows inside the inclusive bounds.
#[test]
fn test_range_matches_scan() {
    let registry = registry_with_quantity();
    let all = orders();

    for from in 0..14 {
        for to in from..14 {
            let got = registry.retrieve_range("quantity", &from, &to).unwrap();
            let mut got_ids = ids(&got);
            got_ids.sort();

            let expected: Vec<u32> = all
                .iter()
                .filter(|o| o.quantity >= from && o.quantity <= to)
                .map(|o| o.id)
                .collect();

            assert_eq!(got_ids, expected, "range [{}, {}]", from, to);
        }
    }
}

/// Results ascend by value; ties keep snapshot order.
#[test]
fn test_range_order() {
    let registry = registry_with_quantity();

    let rows = registry.retrieve_range("quantity", &1_i64, &12_i64).unwrap();
    assert_eq!(ids(&rows), vec![5, 1, 4, 3, 6, 2]);
}

/// Inverted bounds yield an empty result, not a miss.
#[test]
fn test_inverted_range_empty() {
    let registry = registry_with_quantity();

    let rows = registry.retrieve_range("quantity", &10_i64, &2_i64).unwrap();
    assert!(rows.is_empty());
}

/// Equality equals the degenerate range.
#[test]
fn test_equal_is_degenerate_range() {
    let registry = registry_with_quantity();

    for v in 0..14_i64 {
        assert_eq!(
            registry.retrieve_equal("quantity", &v),
            registry.retrieve_range("quantity", &v, &v)
        );
    }
}

/// Float fields index through TotalF64.
#[test]
fn test_float_index() {
    let mut registry = IndexRegistry::new(orders());
    registry
        .create_index("price", |o: &Order| TotalF64(o.price))
        .unwrap();

    let rows = registry
        .retrieve_range("price", &TotalF64(1.0), &TotalF64(50.0))
        .unwrap();
    assert_eq!(ids(&rows), vec![2, 1, 3, 6]);
}

/// Equality on 0.0 also finds rows holding -0.0.
#[test]
fn test_float_signed_zero_lookup() {
    let mut registry = IndexRegistry::new(vec![0.0_f64, -0.0, 2.5]);
    registry.create_index("v", |v: &f64| TotalF64(*v)).unwrap();

    let rows = registry.retrieve_equal("v", &TotalF64(0.0)).unwrap();
    assert_eq!(rows.len(), 2);

    let rows = registry.retrieve_equal("v", &TotalF64(-0.0)).unwrap();
    assert_eq!(rows.len(), 2);
}

// =============================================================================
// Not Found Tests
// =============================================================================

/// Unknown keys are soft misses.
#[test]
fn test_unknown_key() {
    let mut registry = registry_with_quantity();

    assert!(registry.retrieve_range("nope", &1_i64, &2_i64).is_none());
    assert!(registry.retrieve_equal("nope", &1_i64).is_none());
    assert!(!registry.contains_index("nope"));
    assert!(!registry.drop_index("nope"));
}

/// Dropping twice returns false the second time.
#[test]
fn test_drop_idempotent() {
    let mut registry = registry_with_quantity();

    assert!(registry.drop_index("quantity"));
    assert!(!registry.drop_index("quantity"));
    assert!(!registry.contains_index("quantity"));
    assert_eq!(registry.bucket_count(), 0);
}

// =============================================================================
// Source Lifecycle Tests
// =============================================================================

/// Replacing the snapshot clears every index.
#[test]
fn test_update_source_invalidates() {
    let mut registry = registry_with_quantity();
    registry
        .create_index("customer", |o: &Order| o.customer.clone())
        .unwrap();

    registry
        .update_source(Some(Snapshot::new(vec![order(9, "hooli", 3, 1.0)])))
        .unwrap();

    assert!(!registry.contains_index("quantity"));
    assert!(!registry.contains_index("customer"));
    assert_eq!(registry.bucket_count(), 0);
    assert_eq!(registry.len(), 1);

    registry
        .create_index("quantity", |o: &Order| o.quantity)
        .unwrap();
    let rows = registry.retrieve_equal("quantity", &3_i64).unwrap();
    assert_eq!(ids(&rows), vec![9]);
}

/// A missing snapshot is rejected and existing indexes survive.
#[test]
fn test_null_source_rejected() {
    let mut registry = registry_with_quantity();

    let err = registry.update_source(None).unwrap_err();
    assert_eq!(err, IndexError::NullSource);
    assert_eq!(err.code(), "ROWINDEX_NULL_SOURCE");

    assert!(registry.contains_index("quantity"));
    assert_eq!(registry.len(), 6);
}

/// Building over an empty snapshot fails and creates no bucket.
#[test]
fn test_empty_source_rejected() {
    let mut registry: IndexRegistry<Order> = IndexRegistry::new(Vec::new());

    let err = registry
        .create_index("quantity", |o: &Order| o.quantity)
        .unwrap_err();
    assert_eq!(err, IndexError::EmptySource);
    assert_eq!(registry.bucket_count(), 0);

    // Registry stays usable
    registry.replace_source(orders());
    registry
        .create_index("quantity", |o: &Order| o.quantity)
        .unwrap();
    assert!(registry.contains_index("quantity"));
}

/// Lookups hand back the snapshot's own rows, never copies.
#[test]
fn test_lookup_returns_snapshot_rows() {
    let registry = registry_with_quantity();
    let snapshot_rows = registry.source().rows();

    let rows = registry.retrieve_equal("quantity", &5_i64).unwrap();
    assert_eq!(ids(&rows), vec![1, 4]);
    assert!(std::ptr::eq(rows[0], &snapshot_rows[0]));
    assert!(std::ptr::eq(rows[1], &snapshot_rows[3]));

    let combined = registry.retrieve_combined("quantity", "quantity", &12_i64, CombineOp::Or);
    assert!(std::ptr::eq(combined[0], &snapshot_rows[1]));
}

/// A snapshot kept by the caller is untouched by a source swap.
#[test]
fn test_kept_snapshot_survives_replace() {
    let mut registry = registry_with_quantity();
    let kept = registry.source().clone();
    let kept_first: *const Order = &kept.rows()[0];

    registry.replace_source(vec![order(9, "hooli", 5, 1.0)]);
    registry
        .create_index("quantity", |o: &Order| o.quantity)
        .unwrap();

    assert_eq!(kept.len(), 6);
    assert_eq!(kept.rows()[0].id, 1);
    assert!(std::ptr::eq(kept_first, &kept.rows()[0]));

    let rows = registry.retrieve_equal("quantity", &5_i64).unwrap();
    assert_eq!(ids(&rows), vec![9]);
    assert!(!std::ptr::eq(rows[0], &kept.rows()[0]));
}

// =============================================================================
// Bucket Routing Tests
// =============================================================================

/// Same value type shares a bucket; different types do not.
#[test]
fn test_bucket_routing() {
    let mut registry = IndexRegistry::new(orders());

    registry.create_index("quantity", |o: &Order| o.quantity).unwrap();
    registry.create_index("neg_quantity", |o: &Order| -o.quantity).unwrap();
    assert_eq!(registry.bucket_count(), 1);

    registry.create_index("customer", |o: &Order| o.customer.clone()).unwrap();
    assert_eq!(registry.bucket_count(), 2);

    assert_eq!(
        registry.index_keys(),
        vec!["customer", "neg_quantity", "quantity"]
    );
    assert!(registry.value_type_of("customer").unwrap().ends_with("String"));
}

/// Overwrite moves a colliding key into the new value type's bucket.
#[test]
fn test_cross_bucket_collision_overwrites() {
    let mut registry = IndexRegistry::new(orders());

    registry.create_index("field", |o: &Order| o.quantity).unwrap();
    registry.create_index("field", |o: &Order| o.customer.clone()).unwrap();

    assert_eq!(registry.bucket_count(), 1);
    assert_eq!(registry.index_keys(), vec!["field"]);
    assert!(registry.retrieve_equal("field", &5_i64).is_none());

    let rows = registry
        .retrieve_equal("field", &"globex".to_string())
        .unwrap();
    assert_eq!(ids(&rows), vec![2, 5]);
}

/// Reject policy refuses a colliding key, whatever its type.
#[test]
fn test_cross_bucket_collision_rejected() {
    let config = RegistryConfig::default().with_duplicate_keys(DuplicateKeyPolicy::Reject);
    let mut registry = IndexRegistry::with_config(orders(), config);

    registry.create_index("field", |o: &Order| o.quantity).unwrap();
    let err = registry
        .create_index("field", |o: &Order| o.customer.clone())
        .unwrap_err();

    assert_eq!(err.code(), "ROWINDEX_DUPLICATE_KEY");
    assert_eq!(registry.bucket_count(), 1);
    assert!(registry.retrieve_equal("field", &5_i64).is_some());
}

// =============================================================================
// Combined Query Tests
// =============================================================================

/// Rows [A, B, C]; first: 5 -> [A, C]; second: 5 -> [B, C].
fn abc_registry() -> IndexRegistry<&'static str> {
    let mut registry = IndexRegistry::new(vec!["A", "B", "C"]);
    registry
        .create_index("first", |r: &&'static str| if *r == "B" { 0 } else { 5 })
        .unwrap();
    registry
        .create_index("second", |r: &&'static str| if *r == "A" { 0 } else { 5 })
        .unwrap();
    registry
}

/// Or: second's hits first, then first's, deduplicated.
#[test]
fn test_combined_or_ordering() {
    let registry = abc_registry();

    let rows = registry.retrieve_combined("first", "second", &5, CombineOp::Or);
    assert_eq!(rows, vec![&"B", &"C", &"A"]);
}

/// And is a real intersection rather than a fallthrough to Or.
#[test]
fn test_combined_and_intersects() {
    let registry = abc_registry();

    let rows = registry.retrieve_combined("first", "second", &5, CombineOp::And);
    assert_eq!(rows, vec![&"C"]);
}

/// A missing key contributes nothing.
#[test]
fn test_combined_missing_key() {
    let registry = abc_registry();

    let or = registry.retrieve_combined("first", "missing", &5, CombineOp::Or);
    assert_eq!(or, vec![&"A", &"C"]);

    let and = registry.retrieve_combined("first", "missing", &5, CombineOp::And);
    assert!(and.is_empty());
}

// =============================================================================
// Severity Tests
// =============================================================================

/// Error severity and log severity are separate public types.
#[test]
fn test_error_and_log_severity_paths() {
    use rowindex::index::ErrorSeverity;
    use rowindex::observability::Severity;

    assert_eq!(IndexError::NullSource.severity(), ErrorSeverity::Reject);

    let config = RegistryConfig::default().with_logging(Severity::Warn);
    assert!(config.should_log(Severity::Warn));
    assert!(!config.should_log(Severity::Info));
}

// =============================================================================
// Metrics Tests
// =============================================================================

/// Counters track builds, lookups and misses.
#[test]
fn test_metrics_track_operations() {
    let mut registry = registry_with_quantity();
    registry.retrieve_equal("quantity", &5_i64);
    registry.retrieve_equal("missing", &5_i64);
    registry.drop_index("quantity");

    let snapshot = registry.metrics().snapshot();
    assert_eq!(snapshot.indexes_built, 1);
    assert_eq!(snapshot.rows_indexed, 6);
    assert_eq!(snapshot.lookups, 2);
    assert_eq!(snapshot.lookup_misses, 1);
    assert_eq!(snapshot.indexes_dropped, 1);
}
