//! Precision-encoded sub-hashes.
//!
//! A sub-hash is one coordinate axis quantized into a 32-bit integer of the
//! form `1 b1 b2 .. bp`: a sentinel `1` followed by `p` significant bits.
//! The position of the sentinel is the precision, so the value carries its
//! own length and no separate field is needed.
//!
//! ```text
//!  precision 0   ........................1         whole axis
//!  precision 3   .....................1 011        cell 3 of 8
//!  precision 30  .1 0110...........0110            cell of ~2 cm
//! ```

use crate::bits::{fill_below_highest_set_bit, highest_set_bit, inverse_precision};
use crate::error::Result;
use crate::validation::validate_precision;

/// Sentinel of a 31-bit sub-hash.
pub(crate) const SENTINEL_31: u32 = 1 << 31;

/// Fraction bits below the 31-bit sentinel; also the largest valid latitude
/// sub-hash (precision 30, northern-most row).
pub(crate) const FRACTION_MASK: u32 = SENTINEL_31 - 1;

/// Coordinate axis a sub-hash quantizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Axis {
    /// Degrees north, `[-90, 90]`.
    Latitude,
    /// Degrees east, `[-180, 180)`.
    Longitude,
}

impl Axis {
    /// Smallest coordinate on this axis.
    pub const fn origin(self) -> f64 {
        match self {
            Axis::Latitude => -90.0,
            Axis::Longitude => -180.0,
        }
    }

    /// Extent of this axis in degrees.
    pub const fn range(self) -> f64 {
        match self {
            Axis::Latitude => 180.0,
            Axis::Longitude => 360.0,
        }
    }

    /// Fixed-point units per degree.
    pub fn scale(self) -> f64 {
        SENTINEL_31 as f64 / self.range()
    }

    /// Offset of `value` from the origin in fixed-point units, saturating at
    /// the `i64` limits. NaN maps to zero.
    fn quantize(self, value: f64) -> i64 {
        ((value - self.origin()) * self.scale()) as i64
    }
}

/// One axis of a geohash: quantized coordinate plus sentinel bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubHash(u32);

impl SubHash {
    /// The precision-0 sub-hash spanning the whole axis.
    pub const ROOT: SubHash = SubHash(1);

    pub const fn from_bits(bits: u32) -> Self {
        SubHash(bits)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Quantizes `lat` to `precision` significant bits.
    ///
    /// Latitudes outside `[-90, 90]` saturate to the polar rows instead of
    /// wrapping.
    ///
    /// # Errors
    ///
    /// Returns `GeohashError::InvalidPrecision` if `precision` exceeds
    /// `MAX_PRECISION`.
    ///
    /// # Examples
    ///
    /// ```
    /// use spatio_geohash::subhash::SubHash;
    ///
    /// let north = SubHash::latitude(45.0, 1)?;
    /// assert_eq!(north.bits(), 0b11);
    /// assert_eq!(SubHash::latitude(-95.0, 3)?.bits(), 0b1000);
    /// # Ok::<(), spatio_geohash::GeohashError>(())
    /// ```
    pub fn latitude(lat: f64, precision: u32) -> Result<Self> {
        validate_precision(precision)?;
        let shift = 31 - precision;
        let fixed = Axis::Latitude.quantize(lat);
        let bits = if fixed > FRACTION_MASK as i64 {
            u32::MAX >> shift
        } else if fixed <= 0 {
            SENTINEL_31 >> shift
        } else {
            (fixed as u32 | SENTINEL_31) >> shift
        };
        Ok(SubHash(bits))
    }

    /// Quantizes `lng` at the precision `latitude` calls for.
    ///
    /// Longitude is cyclic: `180` lands in the same column as `-180`.
    pub fn longitude(lng: f64, latitude: SubHash) -> Self {
        let precision = latitude.paired_longitude_precision();
        let fixed = (Axis::Longitude.quantize(lng) as u64 & FRACTION_MASK as u64) as u32;
        SubHash((fixed | SENTINEL_31) >> (31 - precision))
    }

    /// Number of significant bits, i.e. the index of the sentinel.
    pub const fn precision(self) -> u32 {
        31u32.saturating_sub(inverse_precision(self.0))
    }

    /// The sentinel bit alone.
    pub const fn sentinel(self) -> u32 {
        highest_set_bit(self.0)
    }

    /// True for the first cell along the axis (southern-most row or
    /// western-most column).
    pub const fn is_first(self) -> bool {
        self.0 == self.sentinel()
    }

    /// True for the last cell along the axis (northern-most row or
    /// eastern-most column).
    pub const fn is_last(self) -> bool {
        self.0 == fill_below_highest_set_bit(self.0)
    }

    /// True for a latitude row touching either pole.
    pub const fn is_edge(self) -> bool {
        self.is_first() || self.is_last()
    }

    /// Row index counted from the nearer pole inside this row's hemisphere.
    const fn polar_offset(self) -> u32 {
        let sentinel = self.sentinel();
        let body = self.0 ^ sentinel;
        let hemisphere = sentinel >> 1;
        if body & hemisphere != 0 {
            body ^ (sentinel - 1)
        } else {
            body
        }
    }

    /// Longitude precision paired with this latitude sub-hash.
    ///
    /// Rows in the polar half of each hemisphere get one longitude bit fewer
    /// for every halving of their distance to the pole, with a floor of two
    /// bits, so that cell height over width in metres stays within
    /// `[0.5, 1.5)`. Rows within 45 degrees of the equator carry one bit more
    /// than the latitude. The whole-earth row is the single exception and
    /// carries none.
    ///
    /// ```
    /// use spatio_geohash::subhash::SubHash;
    ///
    /// assert_eq!(SubHash::ROOT.paired_longitude_precision(), 0);
    /// let rows: Vec<u32> = (0b100..=0b111)
    ///     .map(|bits| SubHash::from_bits(bits).paired_longitude_precision())
    ///     .collect();
    /// assert_eq!(rows, vec![2, 3, 3, 2]);
    /// ```
    pub const fn paired_longitude_precision(self) -> u32 {
        if self.0 == Self::ROOT.0 {
            return 0;
        }
        31 - inverse_precision((self.polar_offset() << 3) | 0b100)
    }

    /// Drops the least significant bit. The parent of `ROOT` is zero, which
    /// is not a sub-hash; callers special-case the root.
    pub const fn parent(self) -> Self {
        SubHash(self.0 >> 1)
    }

    /// Appends one bit: the upper (northern/eastern) half when `upper`.
    pub const fn child(self, upper: bool) -> Self {
        SubHash((self.0 << 1) | upper as u32)
    }

    /// The next cell along the axis, `None` past the last one.
    pub const fn next(self) -> Option<Self> {
        if self.is_last() {
            None
        } else {
            Some(SubHash(self.0 + 1))
        }
    }

    /// The previous cell along the axis, `None` before the first one.
    pub const fn prev(self) -> Option<Self> {
        if self.is_first() {
            None
        } else {
            Some(SubHash(self.0 - 1))
        }
    }

    /// The next cell along a cyclic axis.
    pub const fn next_wrapping(self) -> Self {
        let last = fill_below_highest_set_bit(self.0);
        SubHash((self.0.wrapping_add(1) & last) | self.sentinel())
    }

    /// The previous cell along a cyclic axis.
    pub const fn prev_wrapping(self) -> Self {
        let last = fill_below_highest_set_bit(self.0);
        SubHash((self.0.wrapping_sub(1) & last) | self.sentinel())
    }

    /// Lower edge of the cell along `axis`, in degrees.
    pub fn lower_bound(self, axis: Axis) -> f64 {
        let fraction = (u64::from(self.0) << inverse_precision(self.0)) & u64::from(FRACTION_MASK);
        fraction as f64 / axis.scale() + axis.origin()
    }

    /// Extent of the cell along `axis`, in degrees.
    pub fn span(self, axis: Axis) -> f64 {
        axis.range() / (u64::from(SENTINEL_31) >> inverse_precision(self.0)) as f64
    }
}
