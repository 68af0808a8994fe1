//! Base-32 text form of a geohash.
//!
//! The text is the raw 64-bit code written most significant digit first
//! without leading zeros, using the conventional geohash alphabet (digits,
//! then lowercase letters without `a`, `i`, `l` and `o`). It is at most 13
//! characters long.

use crate::error::{GeohashError, Result};
use crate::geohash::Geohash;
use std::fmt;
use std::str::FromStr;

/// Digit alphabet, indexed by digit value.
pub const ALPHABET: &[u8; 32] = b"0123456789bcdefghjkmnpqrstuvwxyz";

/// Longest text form: 13 digits of 5 bits cover 64 bits.
pub const MAX_TEXT_LEN: usize = 13;

/// Largest leading digit of a 13-digit text (the top 4 of 64 bits).
const MAX_LEADING_DIGIT: u64 = 0b1111;

/// ASCII to digit value, -1 for characters outside the alphabet.
const DIGIT_VALUES: [i8; 128] = build_digit_values();

const fn build_digit_values() -> [i8; 128] {
    let mut table = [-1i8; 128];
    let mut i = 0;
    while i < ALPHABET.len() {
        table[ALPHABET[i] as usize] = i as i8;
        i += 1;
    }
    table
}

fn digit_value(c: char) -> Result<u64> {
    DIGIT_VALUES
        .get(c as usize)
        .and_then(|&value| u64::try_from(value).ok())
        .ok_or(GeohashError::IllegalDigit(c))
}

impl fmt::Display for Geohash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buf = [0u8; MAX_TEXT_LEN];
        let mut pos = MAX_TEXT_LEN;
        let mut code = self.as_u64();
        loop {
            pos -= 1;
            buf[pos] = ALPHABET[(code & 31) as usize];
            code >>= 5;
            if code == 0 {
                break;
            }
        }
        let text = std::str::from_utf8(&buf[pos..]).map_err(|_| fmt::Error)?;
        f.pad(text)
    }
}

/// Parses the text form of a geohash.
///
/// # Errors
///
/// Returns an error if the text is empty or longer than 13 characters,
/// contains a character outside [`ALPHABET`], does not fit in 64 bits, or
/// decodes to an invalid geohash.
///
/// # Examples
///
/// ```rust
/// use spatio_geohash::{Geohash, parse_geohash};
///
/// let cell = parse_geohash("6mdjxx4jx")?;
/// assert_eq!(cell, Geohash::value_of(37.7749, -122.4194, 20)?);
/// assert!(parse_geohash("zzzzzzzzzzzzz").is_err());
/// # Ok::<(), spatio_geohash::GeohashError>(())
/// ```
pub fn parse_geohash(text: &str) -> Result<Geohash> {
    let len = text.chars().count();
    if !(1..=MAX_TEXT_LEN).contains(&len) {
        return Err(GeohashError::InvalidLength(len));
    }

    let mut code = 0u64;
    for (idx, c) in text.chars().enumerate() {
        let digit = digit_value(c)?;
        if idx == 0 && len == MAX_TEXT_LEN && digit > MAX_LEADING_DIGIT {
            return Err(GeohashError::Overflow(text.to_string()));
        }
        code = (code << 5) | digit;
    }

    Geohash::from_u64(code).map_err(|_| GeohashError::InvalidGeohash(text.to_string()))
}

/// Parses every text in order, stopping at the first failure.
///
/// ```rust
/// use spatio_geohash::parse_geohashes;
///
/// let cells = parse_geohashes(["3", "y", "6mdjxx4jx"])?;
/// assert_eq!(cells.len(), 3);
/// assert!(parse_geohashes(vec!["3", "a"]).is_err());
/// # Ok::<(), spatio_geohash::GeohashError>(())
/// ```
pub fn parse_geohashes<I, S>(texts: I) -> Result<Vec<Geohash>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    texts
        .into_iter()
        .enumerate()
        .map(|(idx, text)| {
            parse_geohash(text.as_ref())
                .inspect_err(|e| log::debug!("Batch parse aborted at index {}: {}", idx, e))
        })
        .collect()
}

impl FromStr for Geohash {
    type Err = GeohashError;

    fn from_str(s: &str) -> Result<Self> {
        parse_geohash(s)
    }
}
