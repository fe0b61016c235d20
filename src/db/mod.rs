//! Thread-safe geohash index.
//!
//! `GeoIndex` wraps a [`PrefixTrie`] in an `Arc<RwLock<_>>` so it can be
//! cloned and shared between threads. Inserts, deletes and `clear` take the
//! write lock; lookups, prefix searches and stats take the read lock and run
//! concurrently with each other. Encoding and distance never lock.
//!
//! ```rust
//! use geotrie::{GeoIndex, Point};
//! use std::thread;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let index = GeoIndex::new();
//! let index_clone = index.clone();
//!
//! let handle = thread::spawn(move || {
//!     index_clone.add(Point::new(-0.1278, 51.5074)).unwrap();
//! });
//!
//! index.add(Point::new(2.3522, 48.8566))?;
//! handle.join().unwrap();
//!
//! assert_eq!(index.len(), 2);
//! # Ok(())
//! # }
//! ```

use crate::builder::GeoIndexBuilder;
use crate::compute::geohash;
use crate::compute::spatial::distance_between;
use crate::compute::validation::validate_geographic_point;
use crate::config::{Config, IndexStats};
use crate::error::{GeoTrieError, Result};
use crate::trie::{IndexEntry, PrefixTrie};
use geo::Point;
use parking_lot::RwLock;
use std::sync::Arc;

/// Shared geohash index.
///
/// # Thread Safety
///
/// - `Clone` is cheap and every clone sees the same data
/// - A mutation is either fully visible to later reads or not at all
/// - A prefix search holds the read lock for its whole traversal, so writers
///   wait for it
#[derive(Clone)]
pub struct GeoIndex {
    inner: Arc<RwLock<PrefixTrie>>,
    config: Arc<Config>,
}

impl GeoIndex {
    /// Creates an empty index with default configuration.
    pub fn new() -> Self {
        Self::from_parts(PrefixTrie::new(), Config::default())
    }

    /// Creates an empty index with custom configuration.
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().map_err(GeoTrieError::InvalidInput)?;
        Ok(Self::from_parts(PrefixTrie::new(), config))
    }

    pub fn builder() -> GeoIndexBuilder {
        GeoIndexBuilder::new()
    }

    pub(crate) fn from_parts(trie: PrefixTrie, config: Config) -> Self {
        Self {
            inner: Arc::new(RwLock::new(trie)),
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    // ===== Mutations =====

    /// Stores a point and returns the code it was filed under.
    ///
    /// The code is computed before the write lock is taken.
    ///
    /// # Errors
    ///
    /// [`GeoTrieError::OutOfRange`] for invalid coordinates.
    pub fn add(&self, point: Point) -> Result<String> {
        let code = geohash::encode(&point)?;
        self.inner.write().insert_encoded(code, point)
    }

    /// Removes a code together with all of its points.
    ///
    /// # Errors
    ///
    /// [`GeoTrieError::InvalidHash`] if the code is malformed or not stored.
    pub fn delete(&self, code: &str) -> Result<()> {
        self.inner.write().delete(code)
    }

    /// Removes every code.
    pub fn clear(&self) {
        self.inner.write().clear();
        log::debug!("geo index cleared");
    }

    // ===== Queries =====

    /// Computes the code for a point without touching the index.
    pub fn hash(&self, point: &Point) -> Result<String> {
        geohash::encode(point)
    }

    /// Points stored under exactly `code`, oldest first. Empty if the code is
    /// well formed but not stored.
    ///
    /// # Errors
    ///
    /// [`GeoTrieError::InvalidHash`] if the code contains invalid symbols.
    pub fn position(&self, code: &str) -> Result<Vec<Point>> {
        self.inner.read().lookup(code).map(<[Point]>::to_vec)
    }

    /// Every entry in the cell named by `prefix`, in pre-order.
    ///
    /// # Errors
    ///
    /// - [`GeoTrieError::InvalidHash`] if the prefix contains invalid symbols
    /// - [`GeoTrieError::InvalidInput`] if the prefix is shorter than
    ///   [`Config::min_prefix_len`]
    pub fn find_by_prefix(&self, prefix: &str) -> Result<Vec<IndexEntry>> {
        let len = prefix.chars().count();
        if len < self.config.min_prefix_len {
            return Err(GeoTrieError::InvalidInput(format!(
                "prefix {:?} is shorter than the minimum length {}",
                prefix, self.config.min_prefix_len
            )));
        }

        let inner = self.inner.read();
        let entries = inner.prefix_search(prefix)?;
        Ok(entries.into_iter().cloned().collect())
    }

    /// Distance in meters between two points using the configured metric.
    ///
    /// # Errors
    ///
    /// - [`GeoTrieError::OutOfRange`] if either point is invalid
    /// - [`GeoTrieError::NotImplemented`] if distance is disabled in the
    ///   configuration
    pub fn distance(&self, a: &Point, b: &Point) -> Result<f64> {
        let metric = self
            .config
            .distance()
            .ok_or(GeoTrieError::NotImplemented("distance"))?;
        validate_geographic_point(a)?;
        validate_geographic_point(b)?;
        Ok(distance_between(a, b, metric))
    }

    /// Number of distinct codes stored.
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    pub fn stats(&self) -> IndexStats {
        self.inner.read().stats()
    }
}

impl Default for GeoIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for GeoIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeoIndex")
            .field("codes", &self.len())
            .field("config", &self.config)
            .finish()
    }
}
