//! Argument validation for the checked encoding entry points.

use crate::MAX_PRECISION;
use crate::error::{GeohashError, Result};
use geo::Point;

/// Validates a precision level is in `0..=MAX_PRECISION`.
pub fn validate_precision(precision: u32) -> Result<()> {
    if precision > MAX_PRECISION {
        return Err(GeohashError::InvalidPrecision(precision));
    }
    Ok(())
}

/// Validates a latitude is finite and within `[-90, 90]`.
pub fn validate_latitude(lat: f64) -> Result<()> {
    if !lat.is_finite() {
        return Err(GeohashError::InvalidInput(format!(
            "Latitude must be finite, got: {}",
            lat
        )));
    }
    if !(-90.0..=90.0).contains(&lat) {
        return Err(GeohashError::InvalidInput(format!(
            "Latitude out of range [-90.0, 90.0]: {}",
            lat
        )));
    }
    Ok(())
}

/// Validates a longitude is finite and within `[-180, 180]`.
///
/// `180` is accepted and encodes into the same column as `-180`.
pub fn validate_longitude(lng: f64) -> Result<()> {
    if !lng.is_finite() {
        return Err(GeohashError::InvalidInput(format!(
            "Longitude must be finite, got: {}",
            lng
        )));
    }
    if !(-180.0..=180.0).contains(&lng) {
        return Err(GeohashError::InvalidInput(format!(
            "Longitude out of range [-180.0, 180.0]: {}",
            lng
        )));
    }
    Ok(())
}

/// Validates a point (x = longitude, y = latitude) is a geographic coordinate.
///
/// # Examples
///
/// ```
/// use spatio_geohash::validation::validate_geographic_point;
/// use geo::Point;
///
/// let sf = Point::new(-122.4194, 37.7749);
/// assert!(validate_geographic_point(&sf).is_ok());
///
/// let swapped = Point::new(37.7749, -122.4194);
/// assert!(validate_geographic_point(&swapped).is_err());
/// ```
pub fn validate_geographic_point(point: &Point) -> Result<()> {
    validate_longitude(point.x())?;
    validate_latitude(point.y())
}
