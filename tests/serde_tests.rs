// tests/serde_tests.rs

// Only compile and run these tests if the "serde" feature is enabled.
#![cfg(feature = "serde")]

use geobin::*;

#[test]
fn test_lonlat_serde() {
  let p = LonLat::new(-122.5, 37.75);
  let serialized = serde_json::to_string(&p).unwrap();
  assert_eq!(serialized, r#"{"lon":-122.5,"lat":37.75}"#);
  let deserialized: LonLat = serde_json::from_str(&serialized).unwrap();
  assert_eq!(p, deserialized);
}

#[test]
fn test_bin_type_serde() {
  // serde_repr writes the GeoID digit value
  assert_eq!(serde_json::to_string(&BinType::Hexagon).unwrap(), "1");
  assert_eq!(serde_json::from_str::<BinType>("0").unwrap(), BinType::Square);
  assert!(serde_json::from_str::<BinType>("2").is_err());
}

#[test]
fn test_geoid_serde() {
  let key: GeoId = "00000000001010032U0000000526900000131015".parse().unwrap();
  let serialized = serde_json::to_string(&key).unwrap();
  assert_eq!(serialized, r#""00000000001010032U0000000526900000131015""#);
  let deserialized: GeoId = serde_json::from_str(&serialized).unwrap();
  assert_eq!(key, deserialized);
}

#[test]
fn test_geoid_parts_serde() {
  let parts = decode("00000000000002510S0000000219200000167212").unwrap();
  let value = serde_json::to_value(parts).unwrap();
  assert_eq!(value["zone"], 10);
  assert_eq!(value["band"], "S");
  assert_eq!(value["cell"]["x"], 2192);
  assert_eq!(value["bin"]["bin_type"], 0);
  let back: GeoIdParts = serde_json::from_value(value).unwrap();
  assert_eq!(back, parts);
}

#[test]
fn test_cell_record_serde() {
  let proj = UtmProjection::new().unwrap();
  let geometry = cell_geometry(&proj, "00000000001010010S0000000725200000096535").unwrap();
  let record = CellRecord {
    geoid: "00000000001010010S0000000725200000096535".parse().unwrap(),
    center: geometry.center,
    boundary: geometry.boundary,
  };
  let text = serde_json::to_string(&record).unwrap();
  let back: CellRecord = serde_json::from_str(&text).unwrap();
  assert_eq!(back, record);
}

#[cfg(feature = "geojson")]
#[test]
fn test_feature_style_serde() {
  let style: FeatureStyle = serde_json::from_str(r##"{"strokeColor":"#FF0000","fillOpacity":0.5}"##).unwrap();
  assert_eq!(style.stroke_color, "#FF0000");
  assert_eq!(style.fill_opacity, 0.5);
  assert_eq!(style.fill_color, "#FFFFFF", "missing fields keep their defaults");

  let props: PropertyBag = serde_json::from_str(r#"[["binSize",100.0],["label","sf"]]"#).unwrap();
  assert_eq!(props.get("BINSIZE"), Some(&PropertyValue::Number(100.0)));
  assert_eq!(props.get("label"), Some(&PropertyValue::from("sf")));
}
