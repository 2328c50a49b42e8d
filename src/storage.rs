//! In-memory vector storage

use crate::config::StoreConfig;
use crate::distance::DistanceMetric;
use crate::error::{Result, VdbError};
use crate::persistence;
use crate::search::{self, ResultSet};
use crate::sync::{ReadGuard, StoreLock};
use crate::vector::StoredVector;
use std::path::Path;
use tracing::{debug, trace};

/// A fixed-dimension collection of vectors searched by linear scan.
///
/// Entries keep insertion order; removing one shifts every later entry down
/// by one index. All methods take `&self`: mutation goes through the store's
/// reader-writer guard, so a `VectorStore` can be shared between threads
/// (with the `multithreaded` feature) behind an `Arc`.
///
/// `M` is the metadata handle type, `()` by default.
#[derive(Debug)]
pub struct VectorStore<M = ()> {
    entries: StoreLock<Vec<StoredVector<M>>>,
    dimensions: usize,
    metric: DistanceMetric,
    initial_capacity: usize,
    parallel_threshold: usize,
}

impl VectorStore {
    /// Create an empty store for `dimensions`-long vectors.
    pub fn create(dimensions: usize, metric: DistanceMetric) -> Result<Self> {
        Self::with_config(StoreConfig::new(dimensions, metric))
    }

    /// Load a store written by [`VectorStore::save`].
    ///
    /// Use [`persistence::load`] directly for a store with a metadata type.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        persistence::load(path)
    }
}

impl<M> VectorStore<M> {
    /// Create an empty store from a full configuration.
    ///
    /// This is the constructor for stores with a metadata type; pair it with
    /// [`persistence::load`] to read one back from disk.
    pub fn with_config(config: StoreConfig) -> Result<Self> {
        if config.dimensions == 0 {
            return Err(VdbError::InvalidDimensions);
        }

        debug!(
            dimensions = config.dimensions,
            metric = %config.metric,
            "created vector store"
        );

        Ok(Self {
            entries: StoreLock::new(Vec::new()),
            dimensions: config.dimensions,
            metric: config.metric,
            initial_capacity: config.initial_capacity.max(1),
            parallel_threshold: config.parallel_threshold,
        })
    }

    /// Append a copy of `data`, with an optional id and metadata handle.
    ///
    /// The backing array starts at the configured initial capacity and
    /// doubles when full. If that growth cannot be reserved the store is
    /// left untouched.
    pub fn add(&self, data: &[f32], id: Option<&str>, metadata: Option<M>) -> Result<()> {
        if data.len() != self.dimensions {
            return Err(VdbError::DimensionMismatch {
                expected: self.dimensions,
                actual: data.len(),
            });
        }

        let mut owned = Vec::new();
        owned
            .try_reserve_exact(self.dimensions)
            .map_err(|_| VdbError::OutOfMemory { requested: 1 })?;
        owned.extend_from_slice(data);

        let mut entries = self.entries.write()?;
        if entries.len() == entries.capacity() {
            let new_capacity = if entries.capacity() == 0 {
                self.initial_capacity
            } else {
                entries.capacity() * 2
            };
            let additional = new_capacity - entries.len();
            entries
                .try_reserve_exact(additional)
                .map_err(|_| VdbError::OutOfMemory {
                    requested: new_capacity,
                })?;
            trace!(capacity = entries.capacity(), "grew vector store");
        }

        entries.push(StoredVector {
            data: owned,
            id: id.map(str::to_owned),
            metadata,
        });
        trace!(index = entries.len() - 1, id = ?id, "added vector");
        Ok(())
    }

    /// Remove the entry at `index`, shifting later entries down by one.
    ///
    /// Only the store's copy of the metadata handle is dropped.
    pub fn remove(&self, index: usize) -> Result<()> {
        let mut entries = self.entries.write()?;
        if index >= entries.len() {
            return Err(VdbError::InvalidIndex {
                index,
                count: entries.len(),
            });
        }
        entries.remove(index);
        trace!(index, remaining = entries.len(), "removed vector");
        Ok(())
    }

    /// Number of stored vectors
    pub fn count(&self) -> usize {
        self.entries.read_recovering().len()
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Length of every stored vector
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Get the distance metric used by this store
    pub fn metric(&self) -> DistanceMetric {
        self.metric
    }

    /// Slots currently allocated in the backing array.
    pub fn capacity(&self) -> usize {
        self.entries.read_recovering().capacity()
    }

    /// Index of the first entry whose id equals `id`.
    pub fn position_of(&self, id: &str) -> Result<usize> {
        let entries = self.entries.read()?;
        entries
            .iter()
            .position(|entry| entry.id.as_deref() == Some(id))
            .ok_or_else(|| VdbError::NotFound { id: id.to_string() })
    }

    /// Write the store to `path` in the binary store format.
    ///
    /// Holds a shared guard for the whole write, so the file is a consistent
    /// snapshot even while other threads add or remove.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        persistence::save(self, path)
    }

    /// Tear the store down, dropping every entry and the backing array.
    pub fn destroy(self) {
        let entries = self.entries.into_inner();
        debug!(count = entries.len(), "destroyed vector store");
        drop(entries);
    }

    /// [`destroy`](Self::destroy) a store that may be absent; `None` is a no-op.
    pub fn destroy_opt(store: Option<Self>) {
        if let Some(store) = store {
            store.destroy();
        }
    }

    pub(crate) fn read_entries(&self) -> Result<ReadGuard<'_, Vec<StoredVector<M>>>> {
        self.entries.read()
    }
}

impl<M: Clone> VectorStore<M> {
    /// Get an owned copy of the entry at `index`.
    pub fn get(&self, index: usize) -> Result<StoredVector<M>> {
        let entries = self.entries.read()?;
        entries
            .get(index)
            .cloned()
            .ok_or(VdbError::InvalidIndex {
                index,
                count: entries.len(),
            })
    }

    /// Search for the `k` nearest neighbors of `query`.
    ///
    /// Returns `Ok(None)` when `k` is zero or the store is empty. Results are
    /// ordered by ascending distance; equal distances keep insertion order.
    pub fn search(&self, query: &[f32], k: usize) -> Result<Option<ResultSet<M>>> {
        if query.len() != self.dimensions {
            return Err(VdbError::DimensionMismatch {
                expected: self.dimensions,
                actual: query.len(),
            });
        }

        let entries = self.entries.read()?;
        trace!(k, count = entries.len(), metric = %self.metric, "searching");
        Ok(search::k_nearest(
            &entries,
            query,
            k,
            self.metric,
            self.parallel_threshold,
        ))
    }
}
