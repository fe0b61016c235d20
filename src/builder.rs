//! Index builder for flexible configuration

use crate::compute::spatial::DistanceMetric;
use crate::config::Config;
use crate::db::GeoIndex;
use crate::error::{GeoTrieError, Result};
use crate::trie::PrefixTrie;
use geo::Point;

/// Builder for [`GeoIndex`] with optional seed points.
#[derive(Debug, Default)]
pub struct GeoIndexBuilder {
    config: Config,
    seed: Vec<Point>,
}

impl GeoIndexBuilder {
    /// Create a new builder with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Use `metric` for distance calculations.
    pub fn distance_metric(mut self, metric: DistanceMetric) -> Self {
        self.config = self.config.with_distance_metric(metric);
        self
    }

    /// Leave distance unimplemented; `GeoIndex::distance` will report
    /// `NotImplemented`.
    pub fn without_distance(mut self) -> Self {
        self.config = self.config.without_distance();
        self
    }

    /// Reject prefix searches shorter than `len` symbols.
    pub fn min_prefix_len(mut self, len: usize) -> Self {
        self.config.min_prefix_len = len;
        self
    }

    /// Points inserted before the index is shared.
    pub fn points<I: IntoIterator<Item = Point>>(mut self, points: I) -> Self {
        self.seed.extend(points);
        self
    }

    /// Build the index.
    ///
    /// # Errors
    ///
    /// [`GeoTrieError::InvalidInput`] if the configuration is invalid, or the
    /// first seed point error. No index is returned on error.
    pub fn build(self) -> Result<GeoIndex> {
        self.config.validate().map_err(GeoTrieError::InvalidInput)?;

        if !self.config.distance_enabled {
            log::warn!("Building geo index without a distance metric; distance calls will fail");
        }

        let mut trie = PrefixTrie::new();
        for point in self.seed {
            trie.insert(point)?;
        }

        log::debug!(
            "Built geo index with {} codes (config: {:?})",
            trie.len(),
            self.config
        );
        Ok(GeoIndex::from_parts(trie, self.config))
    }
}
