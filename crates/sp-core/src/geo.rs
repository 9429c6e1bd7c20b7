//! Fixed-point geographic coordinates and bounding boxes.
//!
//! `Coord` stores latitude/longitude as `i32` micro-degrees (degrees × 1e6),
//! the unit used by the DIMACS road-network files.  At the equator one
//! micro-degree is ~0.11 m.  All arithmetic inside the core stays integer;
//! conversion to floating point happens only at the edges (text input,
//! rendering).

use std::fmt;
use std::str::FromStr;

use crate::{CoreError, CoreResult};

/// Number of micro-degrees in one degree.
pub const MICRO_DEGREES: f64 = 1e6;

// ── Coord ─────────────────────────────────────────────────────────────────────

/// A geographic point in micro-degrees.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coord {
    pub lat: i32,
    pub lon: i32,
}

impl Coord {
    #[inline]
    pub const fn new(lat: i32, lon: i32) -> Self {
        Self { lat, lon }
    }

    /// Build from floating-point degrees, rounding to the nearest micro-degree.
    ///
    /// Fails with [`CoreError::CoordinateOutOfRange`] if `lat ∉ [-90, 90]`,
    /// `lon ∉ [-180, 180]`, or either value is not finite.
    pub fn from_degrees(lat: f64, lon: f64) -> CoreResult<Self> {
        let valid = lat.is_finite()
            && lon.is_finite()
            && (-90.0..=90.0).contains(&lat)
            && (-180.0..=180.0).contains(&lon);
        if !valid {
            return Err(CoreError::CoordinateOutOfRange { lat, lon });
        }
        Ok(Self {
            lat: (lat * MICRO_DEGREES).round() as i32,
            lon: (lon * MICRO_DEGREES).round() as i32,
        })
    }

    #[inline]
    pub fn lat_degrees(self) -> f64 {
        f64::from(self.lat) / MICRO_DEGREES
    }

    #[inline]
    pub fn lon_degrees(self) -> f64 {
        f64::from(self.lon) / MICRO_DEGREES
    }

    /// Squared planar distance in micro-degrees².  Only meaningful for
    /// comparing distances (nearest-vertex snapping), not as a length.
    #[inline]
    pub fn distance_2(self, other: Coord) -> i64 {
        let dlat = i64::from(self.lat) - i64::from(other.lat);
        let dlon = i64::from(self.lon) - i64::from(other.lon);
        dlat * dlat + dlon * dlon
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat_degrees(), self.lon_degrees())
    }
}

/// Parses `"lat,lon"` in decimal degrees, e.g. `"44.0,-85.0"`.
impl FromStr for Coord {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lat, lon) = s.split_once(',').ok_or_else(|| {
            CoreError::Parse(format!("invalid coordinate {s:?}: expected \"lat,lon\""))
        })?;
        let parse = |part: &str| {
            part.trim().parse::<f64>().map_err(|_| {
                CoreError::Parse(format!("invalid coordinate component {part:?} in {s:?}"))
            })
        };
        Coord::from_degrees(parse(lat)?, parse(lon)?)
    }
}

// ── BoundingBox ───────────────────────────────────────────────────────────────

/// Axis-aligned box in micro-degrees.  Both corners are inclusive.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundingBox {
    pub min: Coord,
    pub max: Coord,
}

impl BoundingBox {
    /// Box from two arbitrary corners (normalised so `min <= max`).
    pub fn from_corners(a: Coord, b: Coord) -> Self {
        Self {
            min: Coord::new(a.lat.min(b.lat), a.lon.min(b.lon)),
            max: Coord::new(a.lat.max(b.lat), a.lon.max(b.lon)),
        }
    }

    /// Square window of half-width `radius` micro-degrees centred on `center`.
    pub fn around(center: Coord, radius: i32) -> Self {
        let r = radius.saturating_abs();
        Self {
            min: Coord::new(center.lat.saturating_sub(r), center.lon.saturating_sub(r)),
            max: Coord::new(center.lat.saturating_add(r), center.lon.saturating_add(r)),
        }
    }

    /// Smallest box containing every coordinate, or `None` for an empty input.
    pub fn enclosing<I>(coords: I) -> Option<Self>
    where
        I: IntoIterator<Item = Coord>,
    {
        let mut iter = coords.into_iter();
        let first = iter.next()?;
        let mut bbox = Self { min: first, max: first };
        for c in iter {
            bbox.min.lat = bbox.min.lat.min(c.lat);
            bbox.min.lon = bbox.min.lon.min(c.lon);
            bbox.max.lat = bbox.max.lat.max(c.lat);
            bbox.max.lon = bbox.max.lon.max(c.lon);
        }
        Some(bbox)
    }

    #[inline]
    pub fn contains(&self, c: Coord) -> bool {
        c.lat >= self.min.lat && c.lat <= self.max.lat
            && c.lon >= self.min.lon && c.lon <= self.max.lon
    }

    pub fn center(&self) -> Coord {
        let mid = |a: i32, b: i32| ((i64::from(a) + i64::from(b)) / 2) as i32;
        Coord::new(mid(self.min.lat, self.max.lat), mid(self.min.lon, self.max.lon))
    }

    /// Latitude extent in micro-degrees.
    pub fn lat_span(&self) -> i64 {
        i64::from(self.max.lat) - i64::from(self.min.lat)
    }

    /// Longitude extent in micro-degrees.
    pub fn lon_span(&self) -> i64 {
        i64::from(self.max.lon) - i64::from(self.min.lon)
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{} .. {}]", self.min, self.max)
    }
}
