//! Error types for geohash encoding, parsing and spatial predicates.

use thiserror::Error;

/// Errors raised by the checked geohash operations.
///
/// Every variant describes an invalid argument; nothing is retried or
/// recovered internally.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeohashError {
    /// Precision outside `0..=MAX_PRECISION`.
    #[error("invalid precision: {0} (expected 0..={max})", max = crate::MAX_PRECISION)]
    InvalidPrecision(u32),

    /// Text form empty or longer than 13 characters.
    #[error("geohash length out of range: {0} (expected 1..=13 characters)")]
    InvalidLength(usize),

    /// Character outside the base-32 alphabet.
    #[error("illegal geohash digit: {0:?}")]
    IllegalDigit(char),

    /// 13-character text whose leading digit does not fit in 64 bits.
    #[error("geohash too big: {0}")]
    Overflow(String),

    /// Well-formed text or integer that does not denote a cell.
    #[error("invalid geohash: {0}")]
    InvalidGeohash(String),

    /// Query rectangle with its southern edge north of its northern edge.
    #[error("southern latitude {south} is greater than northern latitude {north}")]
    InvertedLatitudeRange { south: f64, north: f64 },

    /// Coordinate rejected by validation.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, GeohashError>;
