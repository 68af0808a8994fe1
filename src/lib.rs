//! Variable-precision geohashing with bounded cell aspect ratio.
//!
//! A [`Geohash`] maps a latitude/longitude to a 64-bit code naming a
//! rectangular cell. Unlike the conventional scheme, which alternates bits
//! evenly, the number of longitude bits is chosen per latitude row so that
//! every cell's height over width in metres stays within `[0.5, 1.5)`.
//! Codes carry their own precision, and neighbours, parents and children are
//! reached by bit manipulation alone.
//!
//! ```rust
//! use spatio_geohash::{Geohash, Half, Quarter, Tiebreak};
//!
//! let cell = Geohash::value_of(37.7749, -122.4194, 20)?;
//! assert_eq!(cell.to_string(), "6mdjxx4jx");
//! assert_eq!("6mdjxx4jx".parse::<Geohash>()?, cell);
//!
//! let north = cell.shift_north(Tiebreak::West).unwrap();
//! let parent = cell.zoom_out().unwrap();
//! let child = cell.zoom_in(Half::South, Quarter::FarWest).unwrap();
//! assert_eq!(child.zoom_out(), Some(cell));
//! assert!(parent.precision() < cell.precision());
//! assert!(north.is_valid());
//! # Ok::<(), spatio_geohash::GeohashError>(())
//! ```

pub mod bits;
pub mod bounds;
pub mod error;
pub mod geohash;
pub mod navigate;
pub mod subhash;
pub mod text;
pub mod validation;

pub use bounds::CellBounds;
pub use error::{GeohashError, Result};
pub use geohash::{
    ERROR_TOLERANCE, Geohash, MAX_PRECISION, SMALLEST_SPAN_DEGREES, encode_points, is_valid,
};
pub use navigate::{Half, Quarter, Tiebreak};
pub use subhash::{Axis, SubHash};
pub use text::{ALPHABET, MAX_TEXT_LEN, parse_geohash, parse_geohashes};

pub use geo::{Point, Rect};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {

    pub use crate::{Geohash, GeohashError, Result};

    pub use crate::{Half, Quarter, Tiebreak};

    pub use crate::{parse_geohash, parse_geohashes};

    pub use geo::{Point, Rect};
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_types_are_thread_safe() {
        assert_send_sync::<Geohash>();
        assert_send_sync::<SubHash>();
        assert_send_sync::<CellBounds>();
        assert_send_sync::<GeohashError>();
    }

    #[test]
    fn test_concurrent_encoding() {
        let handles: Vec<_> = (0..4)
            .map(|i| {
                std::thread::spawn(move || {
                    let lat = -60.0 + 30.0 * i as f64;
                    Geohash::value_of(lat, 10.0, 15).unwrap()
                })
            })
            .collect();
        for (i, handle) in handles.into_iter().enumerate() {
            let cell = handle.join().unwrap();
            let lat = -60.0 + 30.0 * i as f64;
            assert_eq!(cell, Geohash::value_of(lat, 10.0, 15).unwrap());
        }
    }
}
