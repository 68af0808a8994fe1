//! Cell algebra: neighbours, parents and children.
//!
//! Every operation rewrites the two sub-hashes directly; no coordinates are
//! reconstructed. Moving north or south may cross into a row whose paired
//! longitude precision differs by one bit, in which case the longitude
//! sub-hash is merged (one bit dropped) or split (one bit appended, the
//! [`Tiebreak`] choosing which half).
//!
//! All methods trust their input; see [`Geohash`] for the contract.

use crate::MAX_PRECISION;
use crate::geohash::Geohash;
use crate::subhash::SubHash;
use smallvec::SmallVec;
use std::cmp::Ordering;

/// Which cell to pick when a move lands on two cells side by side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Tiebreak {
    #[default]
    West,
    East,
}

impl Tiebreak {
    const fn is_east(self) -> bool {
        matches!(self, Tiebreak::East)
    }
}

/// Latitude half of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Half {
    South,
    North,
}

impl Half {
    pub const ALL: [Half; 2] = [Half::South, Half::North];

    const fn is_north(self) -> bool {
        matches!(self, Half::North)
    }
}

/// Longitude selector for [`Geohash::zoom_in`], the suffixes `00` to `11`.
///
/// The whole-earth cell is split into four columns and each quarter picks
/// one of them. Every other cell is split into two columns (or kept whole in
/// a polar row): `FarWest` and `MiddleWest` pick the western one,
/// `MiddleEast` and `FarEast` the eastern one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Quarter {
    FarWest = 0b00,
    MiddleWest = 0b01,
    MiddleEast = 0b10,
    FarEast = 0b11,
}

impl Quarter {
    pub const ALL: [Quarter; 4] = [
        Quarter::FarWest,
        Quarter::MiddleWest,
        Quarter::MiddleEast,
        Quarter::FarEast,
    ];

    const fn bits(self) -> u32 {
        self as u32
    }

    const fn side(self) -> Tiebreak {
        match self {
            Quarter::FarWest | Quarter::MiddleWest => Tiebreak::West,
            Quarter::MiddleEast | Quarter::FarEast => Tiebreak::East,
        }
    }
}

impl Geohash {
    /// Moves one row north. Returns `None` from the northern-most row.
    ///
    /// When the row to the north has finer longitude cells, two cells touch
    /// this one and `tiebreak` picks between them.
    ///
    /// ```
    /// use spatio_geohash::{Geohash, Tiebreak};
    ///
    /// let cell = Geohash::value_of(-10.0, 10.0, 6)?;
    /// let north = cell.shift_north(Tiebreak::West).unwrap();
    /// assert_eq!(north.precision(), 6);
    /// assert!(north.southern_latitude() > cell.southern_latitude());
    ///
    /// let pole = Geohash::value_of(90.0, 0.0, 6)?;
    /// assert_eq!(pole.shift_north(Tiebreak::East), None);
    /// # Ok::<(), spatio_geohash::GeohashError>(())
    /// ```
    pub fn shift_north(self, tiebreak: Tiebreak) -> Option<Geohash> {
        let target = self.latitude_subhash().next()?;
        Some(self.with_latitude(target, tiebreak))
    }

    /// Moves one row south. Returns `None` from the southern-most row.
    pub fn shift_south(self, tiebreak: Tiebreak) -> Option<Geohash> {
        let target = self.latitude_subhash().prev()?;
        Some(self.with_latitude(target, tiebreak))
    }

    /// Replaces the latitude with a neighbouring row of the same precision,
    /// re-fitting the longitude to that row's paired precision.
    fn with_latitude(self, target: SubHash, tiebreak: Tiebreak) -> Geohash {
        let current = self.latitude_subhash().paired_longitude_precision();
        let wanted = target.paired_longitude_precision();
        let longitude = self.longitude_subhash();
        let longitude = match wanted.cmp(&current) {
            Ordering::Equal => longitude,
            Ordering::Less => longitude.parent(),
            Ordering::Greater => longitude.child(tiebreak.is_east()),
        };
        Geohash::from_parts(target, longitude)
    }

    /// Moves one column east, wrapping from the eastern-most column to the
    /// western-most.
    pub fn shift_east(self) -> Geohash {
        Geohash::from_parts(
            self.latitude_subhash(),
            self.longitude_subhash().next_wrapping(),
        )
    }

    /// Moves one column west, wrapping from the western-most column to the
    /// eastern-most.
    pub fn shift_west(self) -> Geohash {
        Geohash::from_parts(
            self.latitude_subhash(),
            self.longitude_subhash().prev_wrapping(),
        )
    }

    /// Returns the containing cell one precision level up, or `None` for
    /// [`Geohash::WORLD`].
    ///
    /// ```
    /// use spatio_geohash::Geohash;
    ///
    /// let cell = Geohash::value_of(51.5074, -0.1278, 12)?;
    /// let parent = cell.zoom_out().unwrap();
    /// assert_eq!(parent, Geohash::value_of(51.5074, -0.1278, 11)?);
    /// assert_eq!(Geohash::WORLD.zoom_out(), None);
    /// # Ok::<(), spatio_geohash::GeohashError>(())
    /// ```
    pub fn zoom_out(self) -> Option<Geohash> {
        let latitude = self.latitude_subhash();
        match latitude.precision() {
            0 => None,
            1 => Some(Geohash::WORLD),
            _ => {
                // Polar rows keep two longitude bits at every precision.
                let longitude = self.longitude_subhash();
                let longitude = if latitude.is_edge() {
                    longitude
                } else {
                    longitude.parent()
                };
                Some(Geohash::from_parts(latitude.parent(), longitude))
            }
        }
    }

    /// Returns the child cell one precision level down in the given latitude
    /// `half`, with `quarter` selecting the column. Returns `None` at
    /// [`MAX_PRECISION`].
    ///
    /// ```
    /// use spatio_geohash::{Geohash, Half, Quarter};
    ///
    /// let child = Geohash::WORLD.zoom_in(Half::North, Quarter::FarWest).unwrap();
    /// assert_eq!(child.as_u64(), 0b11010);
    /// assert_eq!(child.western_longitude(), -180.0);
    /// assert_eq!(child.zoom_out(), Some(Geohash::WORLD));
    /// ```
    pub fn zoom_in(self, half: Half, quarter: Quarter) -> Option<Geohash> {
        let latitude = self.latitude_subhash();
        if latitude.precision() >= MAX_PRECISION {
            return None;
        }
        let child = latitude.child(half.is_north());
        if self == Geohash::WORLD {
            // The only cell split into four columns.
            let longitude = SubHash::from_bits(0b100 | quarter.bits());
            return Some(Geohash::from_parts(child, longitude));
        }
        let longitude = self.longitude_subhash();
        let longitude = if child.is_edge() {
            longitude
        } else {
            longitude.child(quarter.side().is_east())
        };
        Some(Geohash::from_parts(child, longitude))
    }

    /// All distinct children, south-west first. Eight for the whole earth,
    /// one to four for any other cell, none at [`MAX_PRECISION`].
    pub fn children(self) -> SmallVec<[Geohash; 8]> {
        let mut children = SmallVec::new();
        for half in Half::ALL {
            for quarter in Quarter::ALL {
                if let Some(child) = self.zoom_in(half, quarter) {
                    if !children.contains(&child) {
                        children.push(child);
                    }
                }
            }
        }
        children
    }

    /// Distinct cells sharing an edge with this one: both candidates north,
    /// east, both candidates south and west. The cell itself is never
    /// included, even when a wrapping move returns to it.
    pub fn adjacent(self) -> SmallVec<[Geohash; 6]> {
        let candidates = [
            self.shift_north(Tiebreak::West),
            self.shift_north(Tiebreak::East),
            Some(self.shift_east()),
            self.shift_south(Tiebreak::East),
            self.shift_south(Tiebreak::West),
            Some(self.shift_west()),
        ];
        let mut adjacent = SmallVec::new();
        for cell in candidates.into_iter().flatten() {
            if cell != self && !adjacent.contains(&cell) {
                adjacent.push(cell);
            }
        }
        adjacent
    }
}
