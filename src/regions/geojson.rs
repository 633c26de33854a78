// src/regions/geojson.rs

//! GeoJSON output for scanned bins.
//!
//! Bins are written as a streaming `FeatureCollection`: a header carrying a
//! `defaultProperties` member, one closed `Polygon` feature per bin with a
//! `geoid` property, then the footer.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use geojson::{Feature, Geometry, JsonObject, JsonValue, Value};
use log::{debug, warn};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::constants::{
  DEFAULT_FILL_COLOR, DEFAULT_FILL_OPACITY, DEFAULT_STROKE_COLOR, DEFAULT_STROKE_OPACITY, DEFAULT_STROKE_WEIGHT,
  GEOBIN_BOUND_FILE_STEM, GEOBIN_CENTER_FILE_STEM, GEOBIN_FILE_NAME, GEOBOUND_FILE_STEM,
};
use crate::error::{GeoBinError, ScanErrors};
use crate::indexing::cell_geometry;
use crate::projection::Projection;
use crate::types::{CellBoundary, GeoLoop};

use super::mif::{write_region_outline, MifLayer, MifSink};
use super::scanner::RegionScanner;
use super::sink::{CellRecord, CellSink};

/// A caller supplied feature property.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum PropertyValue {
  Number(f64),
  Text(String),
}

impl PropertyValue {
  fn to_json(&self) -> JsonValue {
    match self {
      PropertyValue::Text(s) => JsonValue::String(s.clone()),
      // whole numbers print without a fraction
      PropertyValue::Number(n) if n.fract() == 0.0 && n.abs() < 9.0e15 => JsonValue::from(*n as i64),
      PropertyValue::Number(n) => serde_json::Number::from_f64(*n).map_or(JsonValue::Null, JsonValue::Number),
    }
  }
}

impl From<&str> for PropertyValue {
  fn from(value: &str) -> Self {
    PropertyValue::Text(value.to_owned())
  }
}

impl From<String> for PropertyValue {
  fn from(value: String) -> Self {
    PropertyValue::Text(value)
  }
}

impl From<f64> for PropertyValue {
  fn from(value: f64) -> Self {
    PropertyValue::Number(value)
  }
}

impl From<i64> for PropertyValue {
  fn from(value: i64) -> Self {
    PropertyValue::Number(value as f64)
  }
}

impl From<u32> for PropertyValue {
  fn from(value: u32) -> Self {
    PropertyValue::Number(f64::from(value))
  }
}

/// Ordered caller key/values. Keys are matched case-insensitively.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PropertyBag(Vec<(String, PropertyValue)>);

impl PropertyBag {
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  /// Sets `key`, replacing an existing entry with the same key in any case.
  pub fn insert(&mut self, key: impl Into<String>, value: impl Into<PropertyValue>) -> &mut Self {
    let key = key.into();
    let value = value.into();
    match self.0.iter_mut().find(|(k, _)| k.eq_ignore_ascii_case(&key)) {
      Some(entry) => *entry = (key, value),
      None => self.0.push((key, value)),
    }
    self
  }

  #[must_use]
  pub fn get(&self, key: &str) -> Option<&PropertyValue> {
    self.0.iter().find(|(k, _)| k.eq_ignore_ascii_case(key)).map(|(_, v)| v)
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyValue)> {
    self.0.iter().map(|(k, v)| (k.as_str(), v))
  }

  #[must_use]
  pub fn len(&self) -> usize {
    self.0.len()
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }
}

impl<K: Into<String>, V: Into<PropertyValue>> FromIterator<(K, V)> for PropertyBag {
  fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
    let mut bag = PropertyBag::new();
    for (k, v) in iter {
      bag.insert(k, v);
    }
    bag
  }
}

/// Default drawing style of the written features.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct FeatureStyle {
  pub stroke_color: String,
  pub stroke_weight: f64,
  pub stroke_opacity: f64,
  pub fill_color: String,
  pub fill_opacity: f64,
}

impl Default for FeatureStyle {
  fn default() -> Self {
    Self {
      stroke_color: DEFAULT_STROKE_COLOR.to_owned(),
      stroke_weight: DEFAULT_STROKE_WEIGHT,
      stroke_opacity: DEFAULT_STROKE_OPACITY,
      fill_color: DEFAULT_FILL_COLOR.to_owned(),
      fill_opacity: DEFAULT_FILL_OPACITY,
    }
  }
}

impl FeatureStyle {
  fn entries(&self) -> [(&'static str, PropertyValue); 5] {
    [
      ("strokeColor", PropertyValue::Text(self.stroke_color.clone())),
      ("strokeWeight", PropertyValue::Number(self.stroke_weight)),
      ("strokeOpacity", PropertyValue::Number(self.stroke_opacity)),
      ("fillColor", PropertyValue::Text(self.fill_color.clone())),
      ("fillOpacity", PropertyValue::Number(self.fill_opacity)),
    ]
  }

  /// Caller properties in order, followed by every style entry the caller did not set.
  #[must_use]
  pub fn default_properties(&self, props: &PropertyBag) -> JsonObject {
    let mut object: JsonObject = props.iter().map(|(k, v)| (k.to_owned(), v.to_json())).collect();
    for (key, value) in self.entries() {
      if props.get(key).is_none() {
        object.insert(key.to_owned(), value.to_json());
      }
    }
    object
  }

  fn is_default_entry(&self, key: &str, value: &PropertyValue) -> bool {
    self.entries().iter().any(|(k, v)| {
      k.eq_ignore_ascii_case(key)
        && match (v, value) {
          // colors compare without regard to hex digit case
          (PropertyValue::Text(a), PropertyValue::Text(b)) => a.eq_ignore_ascii_case(b),
          _ => v == value,
        }
    })
  }
}

fn polygon(boundary: &CellBoundary) -> Geometry {
  let mut ring: Vec<Vec<f64>> = boundary.as_slice().iter().map(|v| vec![v.lon, v.lat]).collect();
  if let Some(first) = ring.first().cloned() {
    ring.push(first);
  }
  Geometry::new(Value::Polygon(vec![ring]))
}

fn feature(boundary: &CellBoundary, properties: JsonObject) -> Feature {
  Feature {
    bbox: None,
    geometry: Some(polygon(boundary)),
    id: None,
    properties: Some(properties),
    foreign_members: None,
  }
}

/// GeoJSON feature of the bin named by `geoid`.
///
/// Properties are the caller values that differ from `style`, plus `geoid`.
pub fn bin_feature<P: Projection>(
  proj: &P,
  geoid: &str,
  props: &PropertyBag,
  style: &FeatureStyle,
) -> Result<Feature, GeoBinError> {
  let geometry = cell_geometry(proj, geoid)?;
  let mut properties: JsonObject = props
    .iter()
    .filter(|(k, v)| !style.is_default_entry(k, v))
    .map(|(k, v)| (k.to_owned(), v.to_json()))
    .collect();
  properties.insert("geoid".to_owned(), JsonValue::String(geoid.to_owned()));
  Ok(feature(&geometry.boundary, properties))
}

/// Streams scanned bins into a GeoJSON `FeatureCollection`.
pub struct GeoJsonSink<W: Write> {
  writer: W,
  default_properties: JsonObject,
  written: usize,
  started: bool,
}

impl<W: Write> GeoJsonSink<W> {
  pub fn new(writer: W, props: &PropertyBag, style: &FeatureStyle) -> Self {
    Self {
      writer,
      default_properties: style.default_properties(props),
      written: 0,
      started: false,
    }
  }

  /// Features written so far.
  #[must_use]
  pub fn written(&self) -> usize {
    self.written
  }

  pub fn into_inner(self) -> W {
    self.writer
  }

  fn start(&mut self) -> Result<(), GeoBinError> {
    if !self.started {
      self.writer.write_all(br#"{"type":"FeatureCollection","defaultProperties":"#)?;
      serde_json::to_writer(&mut self.writer, &self.default_properties)?;
      self.writer.write_all(br#","features":["#)?;
      self.started = true;
    }
    Ok(())
  }
}

impl<W: Write> CellSink for GeoJsonSink<W> {
  fn emit(&mut self, record: CellRecord) -> Result<(), GeoBinError> {
    self.start()?;
    if self.written > 0 {
      self.writer.write_all(b",")?;
    }
    let mut properties = JsonObject::new();
    properties.insert("geoid".to_owned(), JsonValue::String(record.geoid.into_string()));
    serde_json::to_writer(&mut self.writer, &feature(&record.boundary, properties))?;
    self.written += 1;
    Ok(())
  }

  fn finish(&mut self) -> Result<(), GeoBinError> {
    self.start()?;
    self.writer.write_all(b"]}")?;
    self.writer.flush()?;
    Ok(())
  }
}

fn create_file(dir: &Path, name: &str) -> Result<(PathBuf, BufWriter<File>), GeoBinError> {
  let path = dir.join(name);
  match File::create(&path) {
    Ok(file) => Ok((path, BufWriter::new(file))),
    Err(e) => {
      warn!("cannot create {}: {e}", path.display());
      Err(GeoBinError::Scan(ScanErrors::CREATE_FILE))
    }
  }
}

/// `.mid` and `.mif` writers for one MapInfo layer.
fn create_layer(dir: &Path, stem: &str) -> Result<(BufWriter<File>, BufWriter<File>), GeoBinError> {
  let (_, mid) = create_file(dir, &format!("{stem}.mid"))?;
  let (_, mif) = create_file(dir, &format!("{stem}.mif"))?;
  Ok((mid, mif))
}

/// Scans `region` and writes its bins under `dir`.
///
/// Writes `GeoBin.json` (a GeoJSON collection of bin outlines), the region
/// outline as `GeoBound.mid/.mif`, bin centers as `GeoBinCenter.mid/.mif` and
/// bin outlines as `GeoBinBound.mid/.mif`.
///
/// Scan validation and an empty `dir` are reported together as
/// [`GeoBinError::Scan`]; directory and file creation failures set
/// `CREATE_DIR` / `CREATE_FILE`. Nothing is written for invalid input.
///
/// # Returns
/// The number of bins written.
#[allow(clippy::too_many_arguments)]
pub fn write_bins_in_region<P: Projection>(
  proj: &P,
  dir: &Path,
  region: &GeoLoop,
  bin_size_m: u32,
  bin_type: u8,
  zone: Option<u8>,
  props: &PropertyBag,
  style: &FeatureStyle,
) -> Result<usize, GeoBinError> {
  let destination = if dir.as_os_str().is_empty() {
    ScanErrors::DESTINATION
  } else {
    ScanErrors::empty()
  };
  let scanner = match RegionScanner::new(proj, region, bin_size_m, bin_type, zone) {
    Ok(scanner) if destination.is_empty() => scanner,
    Ok(_) => return Err(GeoBinError::Scan(destination)),
    Err(GeoBinError::Scan(errors)) => return Err(GeoBinError::Scan(errors | destination)),
    Err(e) => return Err(e),
  };

  if let Err(e) = fs::create_dir_all(dir) {
    warn!("cannot create {}: {e}", dir.display());
    return Err(GeoBinError::Scan(ScanErrors::CREATE_DIR));
  }
  let (path, json) = create_file(dir, GEOBIN_FILE_NAME)?;
  let (mut bound_mid, mut bound_mif) = create_layer(dir, GEOBOUND_FILE_STEM)?;
  let (center_mid, center_mif) = create_layer(dir, GEOBIN_CENTER_FILE_STEM)?;
  let (outline_mid, outline_mif) = create_layer(dir, GEOBIN_BOUND_FILE_STEM)?;

  write_region_outline(&mut bound_mid, &mut bound_mif, region.active_verts())?;
  let mut sink = (
    GeoJsonSink::new(json, props, style),
    (
      MifSink::new(center_mid, center_mif, MifLayer::Centers),
      MifSink::new(outline_mid, outline_mif, MifLayer::Outlines),
    ),
  );
  let count = scanner.drain_into(&mut sink)?;
  debug!("wrote {count} bins to {}", path.display());
  Ok(count)
}
