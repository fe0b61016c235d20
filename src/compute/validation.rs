//! Validation for geographic coordinates.

use crate::error::{Axis, GeoTrieError, Result};
use geo::Point;

/// Validates a 2D point has valid longitude and latitude.
///
/// Longitude: [-180.0, 180.0], Latitude: [-90.0, 90.0]. Non-finite values
/// are rejected as out of range.
///
/// # Examples
///
/// ```
/// use geotrie::compute::validation::validate_geographic_point;
/// use geotrie::Point;
///
/// let nyc = Point::new(-74.0060, 40.7128);
/// assert!(validate_geographic_point(&nyc).is_ok());
///
/// let invalid = Point::new(200.0, 40.0);
/// assert!(validate_geographic_point(&invalid).is_err());
///
/// let invalid = Point::new(-74.0, f64::NAN);
/// assert!(validate_geographic_point(&invalid).is_err());
/// ```
pub fn validate_geographic_point(point: &Point) -> Result<()> {
    validate_axis(Axis::Longitude, point.x())?;
    validate_axis(Axis::Latitude, point.y())
}

fn validate_axis(axis: Axis, value: f64) -> Result<()> {
    let (min, max) = axis.bounds();
    // NaN fails the range check as well
    if !value.is_finite() || !(min..=max).contains(&value) {
        return Err(GeoTrieError::OutOfRange { axis, value });
    }
    Ok(())
}

/// Validates multiple points, reporting the first failure.
pub fn validate_points(points: &[Point]) -> Result<()> {
    points.iter().try_for_each(validate_geographic_point)
}
