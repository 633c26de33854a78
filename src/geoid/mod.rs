//! GeoID keys: fixed-width textual identifiers of a single bin.

pub mod string_conv;

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::DecodeErrors;
use crate::types::{BinSpec, Cell};

pub use string_conv::{decode, encode};

/// A 40 character bin key, always in canonical form (upper case band, full width).
///
/// Two points in the same bin always produce equal keys, so `GeoId` is a
/// natural map or set key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct GeoId(pub(crate) String);

impl GeoId {
  /// The key text.
  #[must_use]
  pub fn as_str(&self) -> &str {
    &self.0
  }

  /// Consumes the key and returns its text.
  #[must_use]
  pub fn into_string(self) -> String {
    self.0
  }

  /// Decodes the fields of this key.
  pub fn parts(&self) -> Result<GeoIdParts, DecodeErrors> {
    decode(&self.0)
  }
}

impl fmt::Display for GeoId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl AsRef<str> for GeoId {
  fn as_ref(&self) -> &str {
    &self.0
  }
}

impl FromStr for GeoId {
  type Err = DecodeErrors;

  /// Parses and canonicalizes a key. Truncated keys and lower case bands are
  /// accepted when they decode cleanly.
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let parts = decode(s)?;
    // decoded fields always fit their widths
    encode(&parts).map_err(|_| DecodeErrors::CELL_INDEX)
  }
}

/// The decoded fields of a GeoID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GeoIdParts {
  /// Bin size and topology.
  pub bin: BinSpec,
  /// UTM zone number, 1-60.
  pub zone: u8,
  /// Latitude band letter, upper case.
  pub band: char,
  /// Grid indices inside the zone frame.
  pub cell: Cell,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_from_str_canonicalizes() {
    let short: GeoId = "00000000001010032u00000005269000001".parse().unwrap();
    assert_eq!(short.as_str(), "00000000001010032U0000000526900000000001");
    assert_eq!(short.to_string().len(), 40);
    assert_eq!("bogus".parse::<GeoId>(), Err(DecodeErrors::LENGTH));
  }

  #[test]
  fn test_parts_round_trip() {
    let id: GeoId = "00000000000002510S0000000219200000167212".parse().unwrap();
    let parts = id.parts().unwrap();
    assert_eq!(parts.zone, 10);
    assert_eq!(parts.bin.size_m(), 25);
    assert_eq!(encode(&parts).unwrap(), id);
  }
}
