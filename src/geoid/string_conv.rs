// src/geoid/string_conv.rs

use crate::constants::{
  BIN_SIZE_OFFSET, BIN_TYPE_OFFSET, GEOID_LEN, GEOID_RESERVED, LAT_BAND_OFFSET, MAX_BIN_SIZE_M, MAX_CELL_INDEX,
  MIN_BIN_SIZE_M, MIN_GEOID_LEN, X_OFFSET, Y_OFFSET, ZONE_OFFSET,
};
use crate::error::{DecodeErrors, EncodeErrors};
use crate::projection::{is_valid_band, is_valid_zone};
use crate::types::{BinSpec, BinType, Cell};

use super::{GeoId, GeoIdParts};

/// Builds the 40 character GeoID for a bin.
///
/// Layout: 10 reserved zeros, bin type digit, 4 digit size, 2 digit zone,
/// band letter, 11 digit x, 11 digit y.
pub fn encode(parts: &GeoIdParts) -> Result<GeoId, EncodeErrors> {
  let mut errors = EncodeErrors::empty();
  if !(0..=MAX_CELL_INDEX).contains(&parts.cell.x) || !(0..=MAX_CELL_INDEX).contains(&parts.cell.y) {
    errors |= EncodeErrors::CELL_RANGE;
  }
  if !is_valid_zone(parts.zone) {
    errors |= EncodeErrors::ZONE;
  }
  let band = parts.band.to_ascii_uppercase();
  if !is_valid_band(band) {
    errors |= EncodeErrors::LAT_BAND;
  }
  if !errors.is_empty() {
    return Err(errors);
  }

  let s = format!(
    "{GEOID_RESERVED}{}{:04}{:02}{band}{:011}{:011}",
    parts.bin.bin_type().digit(),
    parts.bin.size_m(),
    parts.zone,
    parts.cell.x,
    parts.cell.y,
  );
  debug_assert_eq!(s.len(), GEOID_LEN);
  Ok(GeoId(s))
}

/// Splits a GeoID into its fields.
///
/// A length outside (25, 40] is reported alone. Otherwise every malformed
/// field is reported together. Fields are read at their fixed offsets; a
/// truncated key simply yields shorter trailing fields. The band letter is
/// accepted in either case.
pub fn decode(s: &str) -> Result<GeoIdParts, DecodeErrors> {
  let bytes = s.as_bytes();
  if bytes.len() <= MIN_GEOID_LEN || bytes.len() > GEOID_LEN {
    return Err(DecodeErrors::LENGTH);
  }

  let mut errors = DecodeErrors::empty();

  let bin_type = match field(bytes, BIN_TYPE_OFFSET, BIN_SIZE_OFFSET) {
    b"0" => Some(BinType::Square),
    b"1" => Some(BinType::Hexagon),
    _ => {
      errors |= DecodeErrors::BIN_TYPE;
      None
    }
  };

  let size_m = parse_digits(field(bytes, BIN_SIZE_OFFSET, ZONE_OFFSET)).and_then(|v| u32::try_from(v).ok());
  let bin = match (bin_type, size_m) {
    (Some(t), Some(size)) => BinSpec::new(size, t as u8).ok(),
    _ => None,
  };
  if !size_m.is_some_and(|size| (MIN_BIN_SIZE_M..=MAX_BIN_SIZE_M).contains(&size)) {
    errors |= DecodeErrors::BIN_SIZE;
  }

  let zone = parse_digits(field(bytes, ZONE_OFFSET, LAT_BAND_OFFSET))
    .and_then(|v| u8::try_from(v).ok())
    .filter(|&z| is_valid_zone(z));
  if zone.is_none() {
    errors |= DecodeErrors::ZONE;
  }

  let band = char::from(bytes[LAT_BAND_OFFSET]).to_ascii_uppercase();
  if !is_valid_band(band) {
    errors |= DecodeErrors::LAT_BAND;
  }

  let x = parse_digits(field(bytes, X_OFFSET, Y_OFFSET));
  let y = parse_digits(field(bytes, Y_OFFSET, GEOID_LEN));
  if x.is_none() || y.is_none() {
    errors |= DecodeErrors::CELL_INDEX;
  }

  match (bin, zone, x, y) {
    (Some(bin), Some(zone), Some(x), Some(y)) if errors.is_empty() => Ok(GeoIdParts {
      bin,
      zone,
      band,
      cell: Cell {
        x: x as i64,
        y: y as i64,
      },
    }),
    _ => Err(errors),
  }
}

/// Byte range `[start, end)` clamped to the input.
fn field(bytes: &[u8], start: usize, end: usize) -> &[u8] {
  let end = end.min(bytes.len());
  let start = start.min(end);
  &bytes[start..end]
}

/// Parses a non-empty run of ASCII digits. At most 11 digits are ever passed in.
fn parse_digits(digits: &[u8]) -> Option<u64> {
  if digits.is_empty() || !digits.iter().all(u8::is_ascii_digit) {
    return None;
  }
  Some(digits.iter().fold(0u64, |acc, d| acc * 10 + u64::from(d - b'0')))
}

#[cfg(test)]
mod tests {
  use super::*;

  const REFERENCE: &str = "00000000001010032U0000000526900000131015";

  #[test]
  fn test_decode_reference() {
    let parts = decode(REFERENCE).unwrap();
    assert_eq!(parts.bin.bin_type(), BinType::Hexagon);
    assert_eq!(parts.bin.size_m(), 100);
    assert_eq!(parts.zone, 32);
    assert_eq!(parts.band, 'U');
    assert_eq!(parts.cell, Cell { x: 5269, y: 131015 });
  }

  #[test]
  fn test_encode_layout() {
    let parts = GeoIdParts {
      bin: BinSpec::hexagon(100).unwrap(),
      zone: 32,
      band: 'u',
      cell: Cell { x: 5269, y: 131015 },
    };
    let id = encode(&parts).unwrap();
    assert_eq!(id.as_str(), REFERENCE, "band is written upper case");
    assert_eq!(id.as_str().len(), GEOID_LEN);

    let square = GeoIdParts {
      bin: BinSpec::square(5).unwrap(),
      zone: 1,
      band: 'C',
      cell: Cell { x: 0, y: 0 },
    };
    assert_eq!(encode(&square).unwrap().as_str(), "00000000000000501C0000000000000000000000");
  }

  #[test]
  fn test_encode_rejects_unrepresentable_fields() {
    let mut parts = decode(REFERENCE).unwrap();
    parts.cell.x = -1;
    assert_eq!(encode(&parts), Err(EncodeErrors::CELL_RANGE));
    parts.cell.x = MAX_CELL_INDEX + 1;
    parts.zone = 0;
    parts.band = 'I';
    assert_eq!(
      encode(&parts),
      Err(EncodeErrors::CELL_RANGE | EncodeErrors::ZONE | EncodeErrors::LAT_BAND)
    );
  }

  #[test]
  fn test_decode_length() {
    assert_eq!(decode(""), Err(DecodeErrors::LENGTH));
    assert_eq!(decode(&REFERENCE[..25]), Err(DecodeErrors::LENGTH));
    let long = format!("{REFERENCE}0");
    assert_eq!(decode(&long), Err(DecodeErrors::LENGTH));
    // Length is reported alone even with other bad fields.
    assert_eq!(decode("x"), Err(DecodeErrors::LENGTH));
  }

  #[test]
  fn test_decode_truncated_key() {
    // 30 chars: y field has a single digit left
    let parts = decode(&REFERENCE[..30]).unwrap();
    assert_eq!(parts.cell, Cell { x: 5269, y: 0 });
    // 29 chars: y field is empty
    assert_eq!(decode(&REFERENCE[..29]), Err(DecodeErrors::CELL_INDEX));
  }

  #[test]
  fn test_decode_field_errors() {
    let bad_type = REFERENCE.replacen("00000000001", "00000000002", 1);
    assert_eq!(decode(&bad_type), Err(DecodeErrors::BIN_TYPE));

    let zero_size = "00000000001000032U0000000526900000131015";
    assert_eq!(decode(zero_size), Err(DecodeErrors::BIN_SIZE));

    let bad_zone_and_band = "00000000001010061I0000000526900000131015";
    assert_eq!(decode(bad_zone_and_band), Err(DecodeErrors::ZONE | DecodeErrors::LAT_BAND));

    let all = "00000000009x00000O0000000526900000131015";
    assert_eq!(
      decode(all),
      Err(DecodeErrors::BIN_TYPE | DecodeErrors::BIN_SIZE | DecodeErrors::ZONE | DecodeErrors::LAT_BAND)
    );

    let bad_cell = "00000000001010032U00000005269000001310-5";
    assert_eq!(decode(bad_cell), Err(DecodeErrors::CELL_INDEX));
  }

  #[test]
  fn test_decode_lowercase_band() {
    let lower = REFERENCE.replace('U', "u");
    assert_eq!(decode(&lower).unwrap().band, 'U');
  }
}
