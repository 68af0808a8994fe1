//! The [`Geohash`] value type: forward mapping, inverse mapping, validity
//! and the rectangle predicate.
//!
//! A geohash packs a latitude sub-hash and a longitude sub-hash into one
//! `u64`, latitude on the odd bits and longitude on the even bits:
//!
//! ```text
//!   bit   63 62 61 60 ...  3  2  1  0
//!   lane  la lo la lo ... la lo la lo
//! ```
//!
//! The longitude precision is not free: it is derived from the latitude
//! sub-hash (see [`SubHash::paired_longitude_precision`]), which is what
//! keeps every cell roughly square on the ground.

use crate::bits::{compact, highest_set_bit, spread};
use crate::bounds::CellBounds;
use crate::error::{GeohashError, Result};
use crate::subhash::{Axis, FRACTION_MASK, SENTINEL_31, SubHash};
use crate::validation::validate_geographic_point;
use geo::{Point, Rect};

/// Highest supported precision. A precision-30 cell spans roughly 2 cm.
pub const MAX_PRECISION: u32 = 30;

/// Longitude span of the narrowest representable cell, in degrees.
pub const SMALLEST_SPAN_DEGREES: f64 = 360.0 / SENTINEL_31 as f64;

/// Recommended tolerance when comparing coordinates against cell edges.
pub const ERROR_TOLERANCE: f64 = SMALLEST_SPAN_DEGREES / 1000.0;

/// A rectangular cell on the earth's surface.
///
/// Cells form a prefix tree: the single precision-0 cell ([`Geohash::WORLD`])
/// covers the earth and every cell of precision `p > 0` has exactly one
/// parent of precision `p - 1`.
///
/// Accessors and navigation methods trust their input. Values built with
/// [`Geohash::from_u64_unchecked`] from an untrusted source should be checked
/// with [`is_valid`] first; for invalid input the results are unspecified
/// (but never a panic).
///
/// # Examples
///
/// ```rust
/// use spatio_geohash::Geohash;
///
/// let sf = Geohash::value_of(37.7749, -122.4194, 20)?;
/// assert_eq!(sf.precision(), 20);
/// assert_eq!(sf.to_string(), "6mdjxx4jx");
///
/// let south = sf.southern_latitude();
/// assert!(south <= 37.7749 && 37.7749 < south + sf.latitude_span());
/// # Ok::<(), spatio_geohash::GeohashError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u64", into = "u64"))]
pub struct Geohash(u64);

/// Returns true if `code` denotes a cell: its latitude sub-hash has a
/// precision in `0..=MAX_PRECISION` and its longitude sub-hash has exactly
/// the precision paired with that latitude.
///
/// ```
/// use spatio_geohash::is_valid;
///
/// assert!(is_valid(0b11));
/// assert!(!is_valid(0));
/// assert!(!is_valid(0b10));
/// ```
pub fn is_valid(code: u64) -> bool {
    let latitude = SubHash::from_bits(compact(code >> 1));
    if !(1..=FRACTION_MASK).contains(&latitude.bits()) {
        return false;
    }
    highest_set_bit(compact(code)) == 1 << latitude.paired_longitude_precision()
}

impl Geohash {
    /// The whole earth, the only precision-0 cell.
    pub const WORLD: Geohash = Geohash(0b11);

    /// Returns the cell of the given precision containing `(lat, lng)`.
    ///
    /// Latitudes beyond the poles saturate into the polar rows; longitudes
    /// wrap, so `180` and `-180` encode alike.
    ///
    /// # Errors
    ///
    /// Returns `GeohashError::InvalidPrecision` if `precision` exceeds
    /// [`MAX_PRECISION`].
    pub fn value_of(lat: f64, lng: f64, precision: u32) -> Result<Self> {
        if !lat.is_finite() || !lng.is_finite() {
            log::warn!(
                "Encoding non-finite coordinate ({}, {}); the cell saturates",
                lat,
                lng
            );
        }
        let latitude = SubHash::latitude(lat, precision)?;
        Ok(Self::from_parts(latitude, SubHash::longitude(lng, latitude)))
    }

    /// Like [`Geohash::value_of`] but rejects non-finite or out-of-range
    /// coordinates instead of saturating. x is longitude, y is latitude.
    ///
    /// ```rust
    /// use spatio_geohash::{Geohash, Point};
    ///
    /// let nyc = Geohash::from_point(&Point::new(-74.0060, 40.7128), 12)?;
    /// assert_eq!(nyc.to_string(), "3dr5re");
    /// assert!(Geohash::from_point(&Point::new(-74.0, 95.0), 12).is_err());
    /// # Ok::<(), spatio_geohash::GeohashError>(())
    /// ```
    pub fn from_point(point: &Point, precision: u32) -> Result<Self> {
        validate_geographic_point(point)?;
        Self::value_of(point.y(), point.x(), precision)
    }

    pub(crate) const fn from_parts(latitude: SubHash, longitude: SubHash) -> Self {
        Geohash((spread(latitude.bits()) << 1) | spread(longitude.bits()))
    }

    /// Wraps `code` after checking it with [`is_valid`].
    pub fn from_u64(code: u64) -> Result<Self> {
        if is_valid(code) {
            Ok(Geohash(code))
        } else {
            Err(GeohashError::InvalidGeohash(format!("{:#b}", code)))
        }
    }

    /// Wraps `code` without checking it.
    pub const fn from_u64_unchecked(code: u64) -> Self {
        Geohash(code)
    }

    pub const fn as_u64(self) -> u64 {
        self.0
    }

    pub fn is_valid(&self) -> bool {
        is_valid(self.0)
    }

    pub const fn latitude_subhash(self) -> SubHash {
        SubHash::from_bits(compact(self.0 >> 1))
    }

    pub const fn longitude_subhash(self) -> SubHash {
        SubHash::from_bits(compact(self.0))
    }

    /// Precision level, read from the latitude sub-hash's sentinel.
    pub const fn precision(self) -> u32 {
        self.latitude_subhash().precision()
    }

    pub fn southern_latitude(self) -> f64 {
        self.latitude_subhash().lower_bound(Axis::Latitude)
    }

    pub fn western_longitude(self) -> f64 {
        self.longitude_subhash().lower_bound(Axis::Longitude)
    }

    pub fn latitude_span(self) -> f64 {
        self.latitude_subhash().span(Axis::Latitude)
    }

    pub fn longitude_span(self) -> f64 {
        self.longitude_subhash().span(Axis::Longitude)
    }

    pub fn northern_latitude(self) -> f64 {
        self.southern_latitude() + self.latitude_span()
    }

    pub fn eastern_longitude(self) -> f64 {
        self.western_longitude() + self.longitude_span()
    }

    /// The cell's bounding box.
    pub fn bounds(self) -> CellBounds {
        CellBounds::new(
            self.western_longitude(),
            self.southern_latitude(),
            self.eastern_longitude(),
            self.northern_latitude(),
        )
    }

    pub fn center(self) -> Point {
        self.bounds().center()
    }

    /// True if `point` lies inside the cell or on its edges.
    pub fn contains(self, point: &Point) -> bool {
        self.bounds().contains_point(point)
    }

    /// Returns true if the cell intersects the rectangle bounded by the given
    /// edges. Edges touching counts as intersecting.
    ///
    /// A rectangle with `west_lng > east_lng` crosses the antimeridian. A
    /// rectangle starting at `-180` meets a cell ending at `180` and vice
    /// versa. Results are unspecified for longitudes outside `[-180, 180]`.
    ///
    /// # Errors
    ///
    /// Returns `GeohashError::InvertedLatitudeRange` if `south_lat` is
    /// greater than `north_lat` (or either is NaN).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use spatio_geohash::Geohash;
    ///
    /// let fiji = Geohash::value_of(-17.7, 179.9, 10)?;
    /// // Rectangle from 170E across the antimeridian to 170W.
    /// assert!(fiji.intersects(-20.0, 170.0, -10.0, -170.0)?);
    /// assert!(!fiji.intersects(-20.0, -170.0, -10.0, 170.0)?);
    /// # Ok::<(), spatio_geohash::GeohashError>(())
    /// ```
    pub fn intersects(
        self,
        south_lat: f64,
        west_lng: f64,
        north_lat: f64,
        east_lng: f64,
    ) -> Result<bool> {
        if south_lat > north_lat || south_lat.is_nan() || north_lat.is_nan() {
            return Err(GeohashError::InvertedLatitudeRange {
                south: south_lat,
                north: north_lat,
            });
        }
        if !west_lng.is_finite() || !east_lng.is_finite() {
            log::warn!(
                "Intersection query with non-finite longitudes ({}, {})",
                west_lng,
                east_lng
            );
        }

        let cell = self.bounds();
        if south_lat > cell.max_y() || north_lat < cell.min_y() {
            return Ok(false);
        }

        if east_lng >= west_lng {
            if (west_lng == -180.0 && cell.max_x() == 180.0)
                || (cell.min_x() == -180.0 && east_lng == 180.0)
            {
                return Ok(true);
            }
            Ok(!(west_lng > cell.max_x() || east_lng < cell.min_x()))
        } else {
            Ok(!(west_lng > cell.max_x() && east_lng < cell.min_x()))
        }
    }

    /// [`Geohash::intersects`] for a `geo::Rect`. A `Rect` never crosses the
    /// antimeridian; NaN edges never intersect.
    pub fn intersects_rect(self, rect: &Rect) -> bool {
        self.intersects(rect.min().y, rect.min().x, rect.max().y, rect.max().x)
            .unwrap_or(false)
    }

    /// Diagnostic dump of the raw bits, precision and corners. Not a stable
    /// format.
    ///
    /// ```
    /// use spatio_geohash::Geohash;
    ///
    /// assert_eq!(
    ///     Geohash::WORLD.to_debug_string(),
    ///     "0b11<pre:0 SW:(-90,-180) NE:(90,180)>"
    /// );
    /// ```
    pub fn to_debug_string(self) -> String {
        let bounds = self.bounds();
        format!(
            "{:#b}<pre:{} SW:({},{}) NE:({},{})>",
            self.0,
            self.precision(),
            bounds.min_y() as f32,
            bounds.min_x() as f32,
            bounds.max_y() as f32,
            bounds.max_x() as f32
        )
    }
}

impl From<Geohash> for u64 {
    fn from(geohash: Geohash) -> u64 {
        geohash.0
    }
}

impl TryFrom<u64> for Geohash {
    type Error = GeohashError;

    fn try_from(code: u64) -> Result<Self> {
        Geohash::from_u64(code)
    }
}

/// Encodes every point at `precision`, stopping at the first rejected point.
///
/// # Errors
///
/// Returns `GeohashError::InvalidInput` naming the index of the first point
/// that is out of range, or of the first point when `precision` is invalid.
pub fn encode_points(points: &[Point], precision: u32) -> Result<Vec<Geohash>> {
    points
        .iter()
        .enumerate()
        .map(|(idx, point)| {
            Geohash::from_point(point, precision).map_err(|e| {
                log::debug!("Batch encode aborted at index {}: {}", idx, e);
                GeohashError::InvalidInput(format!("Point at index {}: {}", idx, e))
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_world_cell() {
        let world = Geohash::value_of(0.0, 0.0, 0).unwrap();
        assert_eq!(world, Geohash::WORLD);
        assert_eq!(world.as_u64(), 0b11);
        assert_eq!(world.precision(), 0);
        assert_eq!(world.southern_latitude(), -90.0);
        assert_eq!(world.western_longitude(), -180.0);
        assert_eq!(world.latitude_span(), 180.0);
        assert_eq!(world.longitude_span(), 360.0);
        assert_eq!(world.northern_latitude(), 90.0);
        assert_eq!(world.eastern_longitude(), 180.0);

        for (lat, lng) in [(90.0, 179.0), (-90.0, -180.0), (12.5, 44.0)] {
            assert_eq!(Geohash::value_of(lat, lng, 0).unwrap(), Geohash::WORLD);
        }
    }

    #[test]
    fn test_invalid_precision() {
        assert_eq!(
            Geohash::value_of(0.0, 0.0, 31),
            Err(GeohashError::InvalidPrecision(31))
        );
        assert!(Geohash::value_of(0.0, 0.0, 30).is_ok());
    }

    #[test]
    fn test_known_cells() {
        let sf = Geohash::value_of(37.7749, -122.4194, 20).unwrap();
        assert_eq!(sf.as_u64(), 7_263_391_486_525);

        // Precision-1 cells: two rows by four columns.
        assert_eq!(Geohash::value_of(0.0, 0.0, 1).unwrap().as_u64(), 0b11110);
        assert_eq!(Geohash::value_of(-45.0, -100.0, 1).unwrap().as_u64(), 0b11000);
    }

    #[test]
    fn test_round_trip_contains_coordinate() {
        let coordinates = [
            (37.7749, -122.4194),
            (-33.8688, 151.2093),
            (51.5074, -0.1278),
            (0.0, 0.0),
            (89.9999, 179.9999),
            (-89.9999, -179.9999),
        ];
        for precision in 0..=MAX_PRECISION {
            for (lat, lng) in coordinates {
                let cell = Geohash::value_of(lat, lng, precision).unwrap();
                assert!(cell.is_valid());
                assert_eq!(cell.precision(), precision);
                assert!(cell.southern_latitude() <= lat + ERROR_TOLERANCE);
                assert!(lat < cell.northern_latitude() + ERROR_TOLERANCE);
                assert!(cell.western_longitude() <= lng + ERROR_TOLERANCE);
                assert!(lng < cell.eastern_longitude() + ERROR_TOLERANCE);
            }
        }
    }

    #[test]
    fn test_validity() {
        assert!(is_valid(0b11));
        assert!(!is_valid(0));
        assert!(!is_valid(0b01));
        assert!(!is_valid(0b10));
        assert!(!is_valid(u64::MAX));

        // Precision-1 latitude needs exactly two longitude bits.
        for code in 0b11000..=0b11111u64 {
            assert!(is_valid(code));
        }
        let lat = spread(0b10) << 1;
        assert!(!is_valid(lat | spread(0b10)));
        assert!(!is_valid(lat | spread(0b1000)));

        assert!(Geohash::from_u64(0b11).is_ok());
        assert!(Geohash::try_from(0b10u64).is_err());
    }

    #[test]
    fn test_from_point_validates() {
        let cell = Geohash::from_point(&Point::new(-122.4194, 37.7749), 20).unwrap();
        assert_eq!(cell, Geohash::value_of(37.7749, -122.4194, 20).unwrap());

        assert!(Geohash::from_point(&Point::new(f64::NAN, 0.0), 5).is_err());
        assert!(Geohash::from_point(&Point::new(0.0, 91.0), 5).is_err());
        assert_eq!(
            Geohash::from_point(&Point::new(0.0, 0.0), 40),
            Err(GeohashError::InvalidPrecision(40))
        );
    }

    #[test]
    fn test_value_of_saturates_non_finite() {
        let cell = Geohash::value_of(f64::INFINITY, 0.0, 10).unwrap();
        assert!(cell.is_valid());
        assert!(cell.latitude_subhash().is_last());

        let cell = Geohash::value_of(f64::NAN, f64::NAN, 10).unwrap();
        assert!(cell.is_valid());
    }

    #[test]
    fn test_encode_points() {
        let points = vec![
            Point::new(-74.0060, 40.7128),
            Point::new(-0.1278, 51.5074),
        ];
        let cells = encode_points(&points, 12).unwrap();
        assert_eq!(cells.len(), 2);
        assert_eq!(cells[0].to_string(), "3dr5re");

        let points = vec![Point::new(-74.0, 40.7), Point::new(999.0, 40.0)];
        let err = encode_points(&points, 12).unwrap_err();
        assert!(err.to_string().contains("index 1"));
    }

    #[test]
    fn test_bounds_match_accessors() {
        let cell = Geohash::value_of(-33.8688, 151.2093, 8).unwrap();
        let bounds = cell.bounds();
        assert_eq!(bounds.min_y(), cell.southern_latitude());
        assert_eq!(bounds.min_x(), cell.western_longitude());
        assert_eq!(bounds.height(), cell.latitude_span());
        assert_eq!(bounds.width(), cell.longitude_span());
        assert!(cell.contains(&Point::new(151.2093, -33.8688)));
        assert!(cell.contains(&cell.center()));
    }

    #[test]
    fn test_intersects_own_bounds() {
        let cell = Geohash::value_of(37.7749, -122.4194, 20).unwrap();
        let b = cell.bounds();
        assert!(cell.intersects(b.min_y(), b.min_x(), b.max_y(), b.max_x()).unwrap());
        assert!(cell.intersects_rect(&b.rect));

        // Strictly outside: a box north-east of the cell.
        assert!(!cell
            .intersects(b.max_y() + 0.1, b.max_x() + 0.1, b.max_y() + 1.0, b.max_x() + 1.0)
            .unwrap());
        assert!(!cell.intersects(-10.0, -122.0, 10.0, -121.0).unwrap());
    }

    #[test]
    fn test_intersects_rejects_inverted_latitudes() {
        let cell = Geohash::WORLD;
        assert_eq!(
            cell.intersects(20.0, 0.0, 10.0, 1.0),
            Err(GeohashError::InvertedLatitudeRange {
                south: 20.0,
                north: 10.0
            })
        );
        assert!(cell.intersects(f64::NAN, 0.0, 10.0, 1.0).is_err());
        assert!(!cell.intersects_rect(&Rect::new(
            geo::coord! { x: 0.0, y: f64::NAN },
            geo::coord! { x: 1.0, y: 1.0 },
        )));
    }

    #[test]
    fn test_intersects_antimeridian() {
        let east_edge = Geohash::value_of(15.0, 179.99, 10).unwrap();
        let west_edge = Geohash::value_of(15.0, -179.99, 10).unwrap();
        assert!(east_edge.intersects(10.0, 170.0, 20.0, -170.0).unwrap());
        assert!(west_edge.intersects(10.0, 170.0, 20.0, -170.0).unwrap());

        let greenwich = Geohash::value_of(15.0, 0.0, 10).unwrap();
        assert!(!greenwich.intersects(10.0, 170.0, 20.0, -170.0).unwrap());

        // A query starting at -180 meets the cell whose eastern edge is 180.
        assert_eq!(east_edge.eastern_longitude(), 180.0);
        assert!(east_edge.intersects(10.0, -180.0, 20.0, -179.0).unwrap());
        assert!(west_edge.intersects(10.0, 179.0, 20.0, 180.0).unwrap());
    }

    #[test]
    fn test_debug_string() {
        let cell = Geohash::value_of(0.0, 0.0, 1).unwrap();
        assert_eq!(cell.to_debug_string(), "0b11110<pre:1 SW:(0,0) NE:(90,90)>");
    }
}
