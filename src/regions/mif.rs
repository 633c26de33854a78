// src/regions/mif.rs

//! MapInfo interchange output for scanned bins.
//!
//! Each layer is a pair of files: the `.mif` file holds a header and one
//! graphic object per row, the `.mid` file the matching attribute row (the
//! GeoID). Rows pair up by position.

use std::io::Write;

use crate::error::GeoBinError;
use crate::types::LonLat;

use super::sink::{CellRecord, CellSink};

/// Header of every `.mif` file written here: WGS84 lon/lat, one ID column.
pub const MIF_HEADER: &str = "Version 450\n\
  Charset \"WindowsLatin1\"\n\
  Delimiter \",\"\n\
  CoordSys Earth Projection 1, 104\n\
  Columns 1\n  ID Char(60)\n\
  Data\n\n";

const CENTER_SYMBOL: &str = "    Symbol(32,0,4)\n";
// red outline, white fill
const BIN_STYLE: &str = "  Pen (3,2,16711680)\n    Brush (1,0,16777215)\n";
// blue outline and fill
const OUTLINE_STYLE: &str = "  Pen (3,2,255)\n    Brush (1,0,255)\n";

/// What a [`MifSink`] draws for each bin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MifLayer {
  /// A `Point` at the bin center.
  Centers,
  /// A closed `Region` along the bin outline.
  Outlines,
}

/// Writes a closed `Region` object through `ring`, repeating its first vertex.
fn write_region<W: Write>(mif: &mut W, ring: &[LonLat], style: &str) -> std::io::Result<()> {
  writeln!(mif, "Region 1\n  {}", ring.len() + 1)?;
  for v in ring.iter().chain(ring.first()) {
    writeln!(mif, "{} {}", v.lon, v.lat)?;
  }
  mif.write_all(style.as_bytes())
}

/// Streams scanned bins into a `.mid`/`.mif` pair.
pub struct MifSink<W: Write> {
  mid: W,
  mif: W,
  layer: MifLayer,
  written: usize,
  started: bool,
}

impl<W: Write> MifSink<W> {
  pub fn new(mid: W, mif: W, layer: MifLayer) -> Self {
    Self {
      mid,
      mif,
      layer,
      written: 0,
      started: false,
    }
  }

  /// Objects written so far.
  #[must_use]
  pub fn written(&self) -> usize {
    self.written
  }

  /// The `(mid, mif)` writers.
  pub fn into_inner(self) -> (W, W) {
    (self.mid, self.mif)
  }

  fn start(&mut self) -> Result<(), GeoBinError> {
    if !self.started {
      self.mif.write_all(MIF_HEADER.as_bytes())?;
      self.started = true;
    }
    Ok(())
  }
}

impl<W: Write> CellSink for MifSink<W> {
  fn emit(&mut self, record: CellRecord) -> Result<(), GeoBinError> {
    self.start()?;
    writeln!(self.mid, "{}", record.geoid)?;
    match self.layer {
      MifLayer::Centers => {
        writeln!(self.mif, "Point {} {}", record.center.lon, record.center.lat)?;
        self.mif.write_all(CENTER_SYMBOL.as_bytes())?;
      }
      MifLayer::Outlines => write_region(&mut self.mif, record.boundary.as_slice(), BIN_STYLE)?,
    }
    self.written += 1;
    Ok(())
  }

  fn finish(&mut self) -> Result<(), GeoBinError> {
    self.start()?;
    self.mid.flush()?;
    self.mif.flush()?;
    Ok(())
  }
}

/// Writes a region outline as a single-object `.mid`/`.mif` pair.
pub fn write_region_outline<W: Write>(mid: &mut W, mif: &mut W, ring: &[LonLat]) -> Result<(), GeoBinError> {
  mid.write_all(b"0\n")?;
  mif.write_all(MIF_HEADER.as_bytes())?;
  write_region(mif, ring, OUTLINE_STYLE)?;
  mid.flush()?;
  mif.flush()?;
  Ok(())
}
