//! Integration tests for the vector store

use vdb::distance::compute_distance;
use vdb::{DistanceMetric, VdbError, VectorStore};

fn ramp(offset: f32) -> Vec<f32> {
    (0..128).map(|x| (x as f32 + offset) / 128.0).collect()
}

#[test]
fn test_basic_workflow() {
    let store = VectorStore::create(3, DistanceMetric::Euclidean).unwrap();

    // Insert vectors
    store.add(&[1.0, 0.0, 0.0], Some("v1"), None).unwrap();
    store.add(&[0.0, 1.0, 0.0], Some("v2"), None).unwrap();
    store.add(&[0.0, 0.0, 1.0], Some("v3"), None).unwrap();

    // Verify store size
    assert_eq!(store.count(), 3);

    // Search
    let results = store.search(&[1.0, 0.1, 0.0], 2).unwrap().unwrap();

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].id.as_deref(), Some("v1"));
    assert_eq!(results[0].index, 0);

    // Remove
    store.remove(1).unwrap();
    assert_eq!(store.count(), 2);
    assert_eq!(store.get(1).unwrap().id(), Some("v3"));
}

#[test]
fn test_different_metrics() {
    for metric in DistanceMetric::ALL {
        let store = VectorStore::create(3, metric).unwrap();
        store.add(&[1.0, 2.0, 3.0], Some("v1"), None).unwrap();

        let results = store.search(&[1.0, 2.0, 3.0], 1).unwrap().unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id.as_deref(), Some("v1"));
    }
}

#[test]
fn test_reference_cosine_search() {
    let store = VectorStore::create(128, DistanceMetric::Cosine).unwrap();
    store.add(&ramp(0.0), Some("vec1"), None).unwrap();
    store.add(&ramp(10.0), Some("vec2"), None).unwrap();
    store.add(&ramp(50.0), Some("vec3"), None).unwrap();

    let query = ramp(5.0);
    let to_v3 = compute_distance(&query, &ramp(50.0), DistanceMetric::Cosine);

    let results = store.search(&query, 2).unwrap().unwrap();
    assert_eq!(results.len(), 2);
    for result in &results {
        assert!(result.distance >= 0.0);
        assert!(result.distance <= to_v3);
        assert_ne!(result.id.as_deref(), Some("vec3"));
    }
    assert!(results[0].distance <= results[1].distance);

    let all = store.search(&query, 3).unwrap().unwrap();
    assert_eq!(all.len(), 3);
    assert_eq!(all[2].id.as_deref(), Some("vec3"));
}

#[test]
fn test_dot_product_prefers_larger_projection() {
    let store = VectorStore::create(2, DistanceMetric::DotProduct).unwrap();
    store.add(&[1.0, 0.0], Some("small"), None).unwrap();
    store.add(&[5.0, 0.0], Some("large"), None).unwrap();
    store.add(&[-3.0, 0.0], Some("opposite"), None).unwrap();

    let results = store.search(&[1.0, 0.0], 3).unwrap().unwrap();
    let ids: Vec<_> = results.iter().map(|r| r.id.as_deref().unwrap()).collect();
    assert_eq!(ids, vec!["large", "small", "opposite"]);
    assert!(results[0].distance < 0.0);
}

#[test]
fn test_search_absent_cases() {
    let store = VectorStore::create(2, DistanceMetric::Cosine).unwrap();
    assert!(store.search(&[1.0, 0.0], 3).unwrap().is_none());

    store.add(&[1.0, 0.0], None, None).unwrap();
    assert!(store.search(&[1.0, 0.0], 0).unwrap().is_none());
    assert_eq!(store.search(&[1.0, 0.0], 10).unwrap().unwrap().len(), 1);
}

#[test]
fn test_results_survive_mutation() {
    let store = VectorStore::create(1, DistanceMetric::Euclidean).unwrap();
    store.add(&[1.0], Some("a"), None).unwrap();
    store.add(&[2.0], Some("b"), None).unwrap();

    let results = store.search(&[1.0], 2).unwrap().unwrap();
    let entry = store.get(0).unwrap();
    store.remove(0).unwrap();

    assert_eq!(results[0].id.as_deref(), Some("a"));
    assert_eq!(entry.data, vec![1.0]);
    assert_eq!(store.count(), 1);
}

#[test]
fn test_error_codes() {
    let store = VectorStore::create(2, DistanceMetric::Euclidean).unwrap();
    assert_eq!(store.remove(0).unwrap_err().code(), -5);
    assert_eq!(VectorStore::create(0, DistanceMetric::Euclidean).unwrap_err().code(), -2);
    assert!(matches!(
        store.add(&[1.0], None, None),
        Err(VdbError::DimensionMismatch { .. })
    ));
}
