//! Core geobin data structures.

use crate::constants::{MAX_BIN_BNDRY_VERTS, MAX_BIN_SIZE_M, MIN_BIN_SIZE_M, NUM_HEX_VERTS, NUM_SQUARE_VERTS};
use crate::error::EncodeErrors;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
#[cfg(feature = "serde")]
use serde_repr::{Deserialize_repr, Serialize_repr};

/// Geographic coordinates in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LonLat {
  /// Longitude in degrees.
  pub lon: f64,
  /// Latitude in degrees.
  pub lat: f64,
}

impl LonLat {
  /// Creates a coordinate from longitude and latitude in degrees.
  #[must_use]
  pub const fn new(lon: f64, lat: f64) -> Self {
    Self { lon, lat }
  }
}

/// Bin topology, stored as a single digit inside a GeoID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
#[cfg_attr(feature = "serde", derive(Serialize_repr, Deserialize_repr))]
pub enum BinType {
  /// Axis aligned square bins.
  Square = 0,
  /// Flat-top hexagon bins on an offset grid.
  Hexagon = 1,
}

impl BinType {
  /// The digit written at the bin type offset of a GeoID.
  #[must_use]
  pub fn digit(self) -> char {
    match self {
      BinType::Square => '0',
      BinType::Hexagon => '1',
    }
  }

  /// Number of vertices in a boundary ring of this topology.
  #[must_use]
  pub fn num_verts(self) -> usize {
    match self {
      BinType::Square => NUM_SQUARE_VERTS,
      BinType::Hexagon => NUM_HEX_VERTS,
    }
  }
}

impl TryFrom<u8> for BinType {
  type Error = EncodeErrors;

  fn try_from(value: u8) -> Result<Self, Self::Error> {
    match value {
      0 => Ok(BinType::Square),
      1 => Ok(BinType::Hexagon),
      _ => Err(EncodeErrors::BIN_TYPE),
    }
  }
}

/// Bin size and topology. Always valid once constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BinSpec {
  size_m: u16,
  bin_type: BinType,
}

impl BinSpec {
  /// Validates a raw bin size (meters) and bin type digit.
  ///
  /// Both inputs are checked; the error carries every failing flag.
  pub fn new(size_m: u32, bin_type: u8) -> Result<Self, EncodeErrors> {
    let mut errors = EncodeErrors::empty();
    if !(MIN_BIN_SIZE_M..=MAX_BIN_SIZE_M).contains(&size_m) {
      errors |= EncodeErrors::BIN_SIZE;
    }
    let bin_type = BinType::try_from(bin_type);
    if bin_type.is_err() {
      errors |= EncodeErrors::BIN_TYPE;
    }
    match bin_type {
      Ok(bin_type) if errors.is_empty() => Ok(Self {
        size_m: size_m as u16,
        bin_type,
      }),
      _ => Err(errors),
    }
  }

  /// Square bins of `size_m` meters.
  pub fn square(size_m: u32) -> Result<Self, EncodeErrors> {
    Self::new(size_m, BinType::Square as u8)
  }

  /// Hexagon bins `size_m` meters across (vertex to vertex).
  pub fn hexagon(size_m: u32) -> Result<Self, EncodeErrors> {
    Self::new(size_m, BinType::Hexagon as u8)
  }

  /// Bin size in meters.
  #[must_use]
  pub fn size_m(&self) -> u32 {
    u32::from(self.size_m)
  }

  /// Bin size in meters as a float, for grid math.
  #[must_use]
  pub fn size(&self) -> f64 {
    f64::from(self.size_m)
  }

  /// Bin topology.
  #[must_use]
  pub fn bin_type(&self) -> BinType {
    self.bin_type
  }
}

/// Grid indices of a bin in the projected plane of one zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Cell {
  /// Column index.
  pub x: i64,
  /// Row index.
  pub y: i64,
}

/// A point in a UTM zone frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UtmCoord {
  /// Easting in meters.
  pub easting: f64,
  /// Northing in meters (false northing applied south of the equator).
  pub northing: f64,
  /// Zone number, 1-60.
  pub zone: u8,
  /// Latitude band letter.
  pub band: char,
}

/// A bare easting/northing pair inside an already known zone frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlanePoint {
  /// Easting in meters.
  pub easting: f64,
  /// Northing in meters.
  pub northing: f64,
}

impl PlanePoint {
  /// Creates a planar point.
  #[must_use]
  pub const fn new(easting: f64, northing: f64) -> Self {
    Self { easting, northing }
  }
}

/// The boundary ring of a bin.
///
/// Vertices are in fixed rotational order and the ring is implicitly closed:
/// square bins use SW, NW, NE, SE; hexagon bins start at the west vertex and
/// run clockwise.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CellBoundary {
  /// Number of vertices in the boundary.
  pub num_verts: usize,
  /// Array of vertices. Entries past `num_verts` are not significant.
  pub verts: [LonLat; MAX_BIN_BNDRY_VERTS],
}

impl Default for CellBoundary {
  fn default() -> Self {
    Self {
      num_verts: 0,
      verts: [LonLat::default(); MAX_BIN_BNDRY_VERTS],
    }
  }
}

impl CellBoundary {
  /// The significant vertices. A `num_verts` past the array is clamped.
  #[must_use]
  pub fn as_slice(&self) -> &[LonLat] {
    &self.verts[..self.num_verts.min(self.verts.len())]
  }
}

/// A caller supplied region ring in lon/lat, implicitly closed.
///
/// `num_verts` is the number of vertices the caller asks to use; it may not
/// exceed `verts.len()`.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GeoLoop {
  /// Number of vertices in the loop.
  pub num_verts: usize,
  /// Vertices forming the loop.
  pub verts: Vec<LonLat>,
}

impl GeoLoop {
  /// Builds a loop using every supplied vertex.
  #[must_use]
  pub fn new(verts: Vec<LonLat>) -> Self {
    Self {
      num_verts: verts.len(),
      verts,
    }
  }

  /// The vertices that take part in tests, clamped to what is stored.
  #[must_use]
  pub fn active_verts(&self) -> &[LonLat] {
    &self.verts[..self.num_verts.min(self.verts.len())]
  }
}

impl From<Vec<LonLat>> for GeoLoop {
  fn from(verts: Vec<LonLat>) -> Self {
    Self::new(verts)
  }
}

/// Geographic bounding box in degrees.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BBox {
  /// West longitude.
  pub west: f64,
  /// South latitude.
  pub south: f64,
  /// East longitude.
  pub east: f64,
  /// North latitude.
  pub north: f64,
}
