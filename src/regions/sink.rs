// src/regions/sink.rs

use crate::error::GeoBinError;
use crate::geoid::GeoId;
use crate::types::{CellBoundary, LonLat};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One bin produced by a region scan.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CellRecord {
  /// Bin key.
  pub geoid: GeoId,
  /// Bin center.
  pub center: LonLat,
  /// Bin outline as scanned.
  pub boundary: CellBoundary,
}

/// Receives scanned bins in scan order.
pub trait CellSink {
  /// Accepts the next bin.
  fn emit(&mut self, record: CellRecord) -> Result<(), GeoBinError>;

  /// Called once after the last bin of a successful scan.
  fn finish(&mut self) -> Result<(), GeoBinError> {
    Ok(())
  }
}

impl CellSink for Vec<CellRecord> {
  fn emit(&mut self, record: CellRecord) -> Result<(), GeoBinError> {
    self.push(record);
    Ok(())
  }
}

impl<S: CellSink + ?Sized> CellSink for &mut S {
  fn emit(&mut self, record: CellRecord) -> Result<(), GeoBinError> {
    (**self).emit(record)
  }

  fn finish(&mut self) -> Result<(), GeoBinError> {
    (**self).finish()
  }
}

/// Feeds every bin to both sinks in turn.
impl<A: CellSink, B: CellSink> CellSink for (A, B) {
  fn emit(&mut self, record: CellRecord) -> Result<(), GeoBinError> {
    self.0.emit(record.clone())?;
    self.1.emit(record)
  }

  fn finish(&mut self) -> Result<(), GeoBinError> {
    self.0.finish()?;
    self.1.finish()
  }
}
