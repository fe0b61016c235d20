//! Configuration and statistics types for geotrie.
use crate::compute::geohash::CODE_LENGTH;
use crate::compute::spatial::DistanceMetric;
use serde::de::Error;

/// Index configuration
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Whether `distance` is wired to a metric. When false it reports
    /// `NotImplemented`.
    #[serde(default = "Config::default_distance_enabled")]
    pub distance_enabled: bool,

    #[serde(default)]
    pub distance_metric: DistanceMetric,

    /// Shortest prefix accepted by prefix search. Zero allows whole-index
    /// scans.
    #[serde(default)]
    pub min_prefix_len: usize,
}

impl Config {
    const fn default_distance_enabled() -> bool {
        true
    }

    pub fn with_distance_metric(mut self, metric: DistanceMetric) -> Self {
        self.distance_enabled = true;
        self.distance_metric = metric;
        self
    }

    pub fn without_distance(mut self) -> Self {
        self.distance_enabled = false;
        self
    }

    pub fn with_min_prefix_len(mut self, len: usize) -> Self {
        assert!(
            len <= CODE_LENGTH,
            "Minimum prefix length cannot exceed the code length"
        );
        self.min_prefix_len = len;
        self
    }

    /// The metric `distance` uses, if any.
    pub fn distance(&self) -> Option<DistanceMetric> {
        self.distance_enabled.then_some(self.distance_metric)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.min_prefix_len > CODE_LENGTH {
            return Err(format!(
                "Minimum prefix length {} exceeds code length {}",
                self.min_prefix_len, CODE_LENGTH
            ));
        }

        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let config: Config = serde_json::from_str(json)?;
        if let Err(e) = config.validate() {
            return Err(Error::custom(e));
        }
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    #[cfg(feature = "toml")]
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let config: Config = toml::from_str(toml_str)?;
        if let Err(e) = config.validate() {
            return Err(toml::de::Error::custom(e));
        }
        Ok(config)
    }

    #[cfg(feature = "toml")]
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            distance_enabled: Self::default_distance_enabled(),
            distance_metric: DistanceMetric::default(),
            min_prefix_len: 0,
        }
    }
}

/// Index statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct IndexStats {
    /// Distinct codes with a live entry
    pub codes: usize,
    /// Points across all entries
    pub points: usize,
    /// Trie nodes below the root
    pub nodes: usize,
}
