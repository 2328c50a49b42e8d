//! # vdb
//!
//! An in-memory vector store with exhaustive nearest-neighbor search.
//!
//! This library provides:
//! - A growable, fixed-dimension vector store with optional ids and
//!   caller-owned metadata handles
//! - Distance metrics (Cosine, Euclidean, Dot Product)
//! - Brute-force k-NN search
//! - A compact binary file format for saving and loading stores
//!
//! With the default `multithreaded` feature the store is guarded by a
//! reader-writer lock and can be shared across threads.
//!
//! ## Example
//!
//! ```rust
//! use vdb::{DistanceMetric, VectorStore};
//!
//! // Create a vector store
//! let store = VectorStore::create(3, DistanceMetric::Euclidean).unwrap();
//!
//! // Insert vectors
//! store.add(&[1.0, 2.0, 3.0], Some("v1"), None).unwrap();
//! store.add(&[9.0, 9.0, 9.0], Some("v2"), None).unwrap();
//!
//! // Search for similar vectors
//! let results = store.search(&[1.1, 2.1, 3.1], 1).unwrap().unwrap();
//! assert_eq!(results[0].id.as_deref(), Some("v1"));
//! ```

pub mod config;
pub mod distance;
pub mod error;
pub mod persistence;
pub mod search;
pub mod storage;
pub mod sync;
pub mod vector;

pub use config::StoreConfig;
pub use distance::DistanceMetric;
pub use error::{Result, VdbError};
pub use search::{ResultSet, SearchResult};
pub use storage::VectorStore;
pub use vector::StoredVector;
