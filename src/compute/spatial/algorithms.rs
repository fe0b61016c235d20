//! Great-circle and loxodrome distances using the geo crate.

use geo::{Distance, Geodesic, Haversine, Point, Rhumb};
use serde::{Deserialize, Serialize};

/// Distance metrics for point-to-point calculations.
///
/// - **Haversine**: spherical Earth, fast
/// - **Geodesic**: ellipsoidal Earth (Karney 2013), slower and more accurate
/// - **Rhumb**: constant-bearing path length
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceMetric {
    #[default]
    Haversine,
    Geodesic,
    Rhumb,
}

/// Distance between two lon/lat points in meters.
///
/// Inputs are not validated here; [`crate::GeoIndex::distance`] checks
/// coordinate ranges before calling this.
///
/// # Examples
///
/// ```rust
/// use geotrie::{Point, compute::spatial::{distance_between, DistanceMetric}};
///
/// let nyc = Point::new(-74.0060, 40.7128);
/// let la = Point::new(-118.2437, 34.0522);
///
/// let dist = distance_between(&nyc, &la, DistanceMetric::Haversine);
/// assert!(dist > 3_900_000.0); // ~3,944 km
/// ```
pub fn distance_between(point1: &Point, point2: &Point, metric: DistanceMetric) -> f64 {
    match metric {
        DistanceMetric::Haversine => Haversine.distance(*point1, *point2),
        DistanceMetric::Geodesic => Geodesic.distance(*point1, *point2),
        DistanceMetric::Rhumb => Rhumb.distance(*point1, *point2),
    }
}
