//! Brute-force k-NN search over a store's entries.
//!
//! Every search computes the distance from the query to every stored vector,
//! then stable-sorts the candidates by distance. Equal distances therefore
//! keep insertion order: the entry with the lower index ranks first.

use crate::distance::{compute_distance, DistanceMetric};
use crate::vector::StoredVector;
use std::ops::Index;

/// A single ranked match.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult<M = ()> {
    /// Position of the match in the store when the search ran.
    pub index: usize,
    /// Metric-dependent distance; lower is closer.
    pub distance: f32,
    pub id: Option<String>,
    pub metadata: Option<M>,
}

/// Matches ordered by ascending distance.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultSet<M = ()> {
    results: Vec<SearchResult<M>>,
}

impl<M> ResultSet<M> {
    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SearchResult<M>> {
        self.results.iter()
    }

    pub fn get(&self, rank: usize) -> Option<&SearchResult<M>> {
        self.results.get(rank)
    }

    /// The closest match.
    pub fn best(&self) -> Option<&SearchResult<M>> {
        self.results.first()
    }

    pub fn as_slice(&self) -> &[SearchResult<M>] {
        &self.results
    }

    pub fn into_vec(self) -> Vec<SearchResult<M>> {
        self.results
    }
}

impl<M> Index<usize> for ResultSet<M> {
    type Output = SearchResult<M>;

    fn index(&self, rank: usize) -> &SearchResult<M> {
        &self.results[rank]
    }
}

impl<M> IntoIterator for ResultSet<M> {
    type Item = SearchResult<M>;
    type IntoIter = std::vec::IntoIter<SearchResult<M>>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.into_iter()
    }
}

impl<'a, M> IntoIterator for &'a ResultSet<M> {
    type Item = &'a SearchResult<M>;
    type IntoIter = std::slice::Iter<'a, SearchResult<M>>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.iter()
    }
}

/// Find the `k` entries closest to `query`.
///
/// Returns `None` when `k == 0` or there are no entries. `query` must already
/// have the store's dimension.
pub(crate) fn k_nearest<M: Clone>(
    entries: &[StoredVector<M>],
    query: &[f32],
    k: usize,
    metric: DistanceMetric,
    parallel_threshold: usize,
) -> Option<ResultSet<M>> {
    if k == 0 || entries.is_empty() {
        return None;
    }
    let k = k.min(entries.len());

    let mut scored = if use_parallel_scan(entries.len(), parallel_threshold) {
        scan_parallel(entries, query, metric)
    } else {
        scan(entries, query, metric)
    };

    // `sort_by` is stable, which gives the insertion-order tie-break.
    scored.sort_by(|a, b| a.1.total_cmp(&b.1));
    scored.truncate(k);

    let results = scored
        .into_iter()
        .map(|(index, distance)| {
            let entry = &entries[index];
            SearchResult {
                index,
                distance,
                id: entry.id.clone(),
                metadata: entry.metadata.clone(),
            }
        })
        .collect();

    Some(ResultSet { results })
}

fn scan<M>(entries: &[StoredVector<M>], query: &[f32], metric: DistanceMetric) -> Vec<(usize, f32)> {
    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| (i, compute_distance(query, &entry.data, metric)))
        .collect()
}

#[cfg(feature = "multithreaded")]
fn use_parallel_scan(len: usize, threshold: usize) -> bool {
    len >= threshold
}

#[cfg(not(feature = "multithreaded"))]
fn use_parallel_scan(_len: usize, _threshold: usize) -> bool {
    false
}

#[cfg(feature = "multithreaded")]
fn scan_parallel<M>(
    entries: &[StoredVector<M>],
    query: &[f32],
    metric: DistanceMetric,
) -> Vec<(usize, f32)> {
    use rayon::prelude::*;

    // Only the float rows cross threads; the metadata handle type need not be Sync.
    let rows: Vec<&[f32]> = entries.iter().map(|entry| entry.data.as_slice()).collect();
    rows.par_iter()
        .enumerate()
        .map(|(i, row)| (i, compute_distance(query, row, metric)))
        .collect()
}

#[cfg(not(feature = "multithreaded"))]
fn scan_parallel<M>(
    entries: &[StoredVector<M>],
    query: &[f32],
    metric: DistanceMetric,
) -> Vec<(usize, f32)> {
    scan(entries, query, metric)
}
