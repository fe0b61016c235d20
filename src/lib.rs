//! In-memory geohash index with prefix (cell) queries.
//!
//! Points are filed under a fixed 8-symbol geohash built from 20 bits of
//! longitude and 20 bits of latitude (roughly one meter at the equator).
//! Codes live in a reference-counted prefix trie, so every point inside a
//! cell of any size can be listed by asking for the cell's prefix.
//!
//! ## Features
//! - **Codec**: point to code, symbol to index, code to cell bounds
//! - **Prefix trie**: exact lookup, collision accumulation, pruning delete,
//!   pre-order prefix search
//! - **Shared index**: `GeoIndex` behind one reader/writer lock
//! - **Distance**: haversine, geodesic or rhumb via the `geo` crate, or
//!   disabled
//!
//! ```rust
//! use geotrie::{GeoIndex, Point};
//!
//! let index = GeoIndex::new();
//!
//! let sf = Point::new(-122.4194, 37.7749);
//! let code = index.add(sf)?;
//! assert_eq!(code, "9Q8YYK8Y");
//!
//! index.add(Point::new(-122.2711, 37.8044))?; // Oakland
//! assert_eq!(index.find_by_prefix("9Q")?.len(), 2);
//!
//! index.delete(&code)?;
//! assert!(index.position(&code)?.is_empty());
//! # Ok::<(), geotrie::GeoTrieError>(())
//! ```

pub mod builder;
pub mod compute;
pub mod config;
pub mod db;
pub mod error;
pub mod trie;

pub use builder::GeoIndexBuilder;
pub use db::GeoIndex;
pub use error::{Axis, GeoTrieError, Result};
pub use trie::{IndexEntry, PrefixTrie};

pub use geo::{Point, Rect};

pub use compute::geohash::{ALPHABET, CODE_LENGTH, cell_bounds, encode, symbol_index};
pub use compute::spatial::DistanceMetric;
pub use config::{Config, IndexStats};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {

    pub use crate::{GeoIndex, GeoIndexBuilder, GeoTrieError, Result};

    pub use crate::{IndexEntry, PrefixTrie};

    pub use crate::{Point, Rect};

    pub use crate::{Config, DistanceMetric, IndexStats};

    pub use crate::compute::geohash::{cell_bounds, encode};
}
