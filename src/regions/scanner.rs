// src/regions/scanner.rs

//! Enumerates every bin touching a lon/lat region.
//!
//! The region's bounding box is cut into one slice per UTM zone, and each
//! zone slice again at the equator. Each slice is scanned row by row in its
//! own zone and hemisphere frame over a window of grid cells that covers the
//! slice plus some overscan. A cell is kept when one of its vertices lies in
//! the region or one of the region's vertices lies in the cell.
//!
//! Near the inner edges of a zone slice a cell is dropped only when it lies
//! wholly in the neighbouring zone. Cells straddling a seam are emitted by
//! both slices under different zone numbers, so the seam has no gaps and no
//! key repeats. The equator works the same way: the northern frame keeps
//! cells centered on or north of it, the southern frame keeps cells reaching
//! south of it. Every key carries the band of its own cell center.

use log::{debug, trace};

use crate::bbox::{
  bbox_from_geoloop, geodesic_extents_m, hemisphere_slices, projected_envelope, zone_slices, zone_span,
};
use crate::constants::{
  MAX_UTM_LAT, MIN_UTM_LAT, OVERSCAN_COLUMNS, OVERSCAN_ROWS, SOUTH_FALSE_NORTHING_M, ZONE_GUARD_COLUMNS,
};
use crate::error::{EncodeErrors, GeoBinError, ScanErrors};
use crate::indexing::{boundary_from_center, cell_from_projected, center_of, geoid_from_projected, hexagon};
use crate::latlng::{is_utm_lat, is_valid_lon};
use crate::polygon::ring_contains;
use crate::projection::{is_northern, is_valid_zone, lat_band, to_hemisphere, zone_from_lon, Projection};
use crate::types::{BBox, BinSpec, BinType, Cell, GeoLoop, LonLat, PlanePoint, UtmCoord};

use super::sink::{CellRecord, CellSink};

/// Scan window of one zone slice, in grid cells of that zone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlicePlan {
  /// Zone frame of the slice.
  pub zone: u8,
  /// Band of the slice frame; it fixes the hemisphere of every conversion.
  /// Keys carry the band of their own cell center.
  pub band: char,
  /// South-west cell of the window.
  pub start: Cell,
  /// Cells per row. Hexagon rows visit every other column.
  pub cols: usize,
  /// Number of rows.
  pub rows: usize,
  /// Whether cells near the slice's east and west edges are checked for zone ownership.
  pub guard: bool,
}

/// Extremes carried from one slice to the next so that every slice of a
/// zone-crossing scan starts on a shared row and spans the tallest height.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Carry {
  min_north: f64,
  height: f64,
}

fn validate(region: &GeoLoop, bin_size_m: u32, bin_type: u8) -> Result<BinSpec, ScanErrors> {
  let mut errors = ScanErrors::empty();
  if region.num_verts < 3 {
    errors |= ScanErrors::VERTEX_COUNT;
  }
  if region.num_verts > region.verts.len()
    || region
      .active_verts()
      .iter()
      .any(|v| !is_valid_lon(v.lon) || !is_utm_lat(v.lat))
  {
    errors |= ScanErrors::COORDINATES;
  }
  match BinSpec::new(bin_size_m, bin_type) {
    Ok(spec) if errors.is_empty() => Ok(spec),
    Ok(_) => Err(errors),
    Err(bin_errors) => {
      if bin_errors.contains(EncodeErrors::BIN_SIZE) {
        errors |= ScanErrors::BIN_SIZE;
      }
      if bin_errors.contains(EncodeErrors::BIN_TYPE) {
        errors |= ScanErrors::BIN_TYPE;
      }
      Err(errors)
    }
  }
}

/// Plans the scan window of one slice and returns the values to carry on.
fn plan_slice<P: Projection>(
  proj: &P,
  spec: BinSpec,
  bbox: &BBox,
  zone: u8,
  northern: bool,
  carried: Option<Carry>,
  guard: bool,
) -> Result<(SlicePlan, Carry), GeoBinError> {
  // The bin holding the south-west corner anchors the window.
  let corner = to_hemisphere(proj.forward(LonLat::new(bbox.west, bbox.south), Some(zone))?, northern);
  let (_, corner_bin) = cell_from_projected(spec, PlanePoint::new(corner.easting, corner.northing));
  let origin = UtmCoord {
    easting: corner_bin.easting,
    northing: corner_bin.northing,
    ..corner
  };

  let (geo_width, geo_height) = geodesic_extents_m(bbox);
  let envelope = projected_envelope(proj, bbox, zone, northern)?;
  let width = geo_width.max(envelope.width());
  let mut height = geo_height.max(envelope.height());
  let mut min_north = origin.northing;
  if let Some(carried) = carried {
    min_north = min_north.min(carried.min_north);
    height = height.max(carried.height);
  }

  let size = spec.size();
  let (step_h, step_v, col_stride, row_pad) = match spec.bin_type() {
    BinType::Square => (size, size, 1, 1),
    BinType::Hexagon => (6.0 * hexagon::x_seg(size), hexagon::y_seg(size), 2, 2),
  };

  let mut start = match spec.bin_type() {
    BinType::Square => Cell {
      x: (origin.easting / size).floor() as i64,
      y: (min_north / size).floor() as i64,
    },
    BinType::Hexagon => {
      let xs = hexagon::x_seg(size);
      let mut cell = Cell {
        x: ((origin.easting + xs) / (3.0 * xs)).round() as i64,
        y: (min_north / hexagon::y_seg(size)).round() as i64,
      };
      // rows start even, columns odd
      if cell.x.rem_euclid(2) == 0 {
        cell.x -= 1;
      }
      if cell.y.rem_euclid(2) == 1 {
        cell.y -= 1;
      }
      cell
    }
  };
  let carry = Carry {
    min_north: center_of(spec, start).northing,
    height,
  };

  let mut cols = (width / step_h).floor() as usize + OVERSCAN_COLUMNS;
  let mut rows = (height / step_v).floor() as usize + OVERSCAN_ROWS;

  // Grid convergence bends the box outline away from its corner, so the
  // window must reach the projected envelope plus one step on every side.
  let anchor = center_of(spec, start);
  let extra_rows = ((anchor.northing - envelope.min_north).max(0.0) / step_v).ceil() as usize + row_pad;
  let extra_rows = extra_rows.next_multiple_of(row_pad);
  let extra_cols = ((anchor.easting - envelope.min_east).max(0.0) / step_h).ceil() as usize + 1;
  start.y -= extra_rows as i64;
  start.x -= (extra_cols * col_stride) as i64;
  rows += extra_rows;
  cols += extra_cols;

  let window_sw = center_of(spec, start);
  let reach_rows = ((envelope.max_north - window_sw.northing).max(0.0) / step_v).ceil() as usize + row_pad + 1;
  let reach_cols = ((envelope.max_east - window_sw.easting).max(0.0) / step_h).ceil() as usize + 2;
  rows = rows.max(reach_rows);
  cols = cols.max(reach_cols);

  let plan = SlicePlan {
    zone,
    band: origin.band,
    start,
    cols,
    rows,
    guard,
  };
  debug!(
    "zone {zone}{} slice lon [{}, {}] lat [{}, {}]: start {:?}, {cols} x {rows} cells",
    plan.band, bbox.west, bbox.east, bbox.south, bbox.north, plan.start
  );
  Ok((plan, carry))
}

/// Iterator over the bins touching a region.
///
/// All validation and slice planning happens in [`RegionScanner::new`]; the
/// iterator itself only fails on projection errors, after which it is fused.
pub struct RegionScanner<'a, P: Projection> {
  proj: &'a P,
  region: Vec<LonLat>,
  spec: BinSpec,
  plans: Vec<SlicePlan>,
  slice: usize,
  row: usize,
  col: usize,
  done: bool,
}

impl<'a, P: Projection> RegionScanner<'a, P> {
  /// Validates the request and plans every zone slice.
  ///
  /// `zone` forces a single zone frame for the whole region; values outside
  /// 1-60 are ignored.
  ///
  /// # Returns
  /// The scanner, or [`GeoBinError::Scan`] naming every invalid input.
  pub fn new(
    proj: &'a P,
    region: &GeoLoop,
    bin_size_m: u32,
    bin_type: u8,
    zone: Option<u8>,
  ) -> Result<Self, GeoBinError> {
    let spec = validate(region, bin_size_m, bin_type)?;
    let bbox = bbox_from_geoloop(region);
    let (mut first, mut last) = zone_span(&bbox);
    let crossing = first != last;

    let forced = match zone {
      Some(z) if is_valid_zone(z) => Some(z),
      Some(z) => {
        log::warn!("ignoring out of range zone {z} for region scan");
        None
      }
      None => None,
    };
    if let Some(z) = forced {
      first = z;
      last = z;
    }
    let guard = crossing && forced.is_none();
    debug!(
      "scanning {} vertex region, bbox {bbox:?}, zones {first}..={last}, crossing {crossing}, forced {forced:?}",
      region.num_verts
    );

    // northings only compare within one hemisphere frame
    let mut carried: [Option<Carry>; 2] = [None, None];
    let mut plans = Vec::new();
    for (slice_zone, zone_box) in zone_slices(&bbox, first, last) {
      for (northern, slice_box) in hemisphere_slices(&zone_box) {
        let slot = &mut carried[usize::from(northern)];
        let (plan, carry) = plan_slice(proj, spec, &slice_box, slice_zone, northern, *slot, guard)?;
        if guard {
          *slot = Some(carry);
        }
        plans.push(plan);
      }
    }

    Ok(Self {
      proj,
      region: region.active_verts().to_vec(),
      spec,
      plans,
      slice: 0,
      row: 0,
      col: 0,
      done: false,
    })
  }

  /// The planned slices, west to east and south to north within a zone.
  #[must_use]
  pub fn plans(&self) -> &[SlicePlan] {
    &self.plans
  }

  /// Bin size and type of the scan.
  #[must_use]
  pub fn bin_spec(&self) -> BinSpec {
    self.spec
  }

  /// Feeds every remaining bin to `sink`, then finishes it.
  ///
  /// # Returns
  /// The number of bins emitted.
  pub fn drain_into<S: CellSink>(self, sink: &mut S) -> Result<usize, GeoBinError> {
    let mut count = 0;
    for record in self {
      sink.emit(record?)?;
      count += 1;
    }
    sink.finish()?;
    debug!("emitted {count} bins");
    Ok(count)
  }

  fn advance(&mut self) {
    let Some(plan) = self.plans.get(self.slice) else {
      return;
    };
    self.col += 1;
    if self.col == plan.cols {
      self.col = 0;
      self.row += 1;
      if self.row == plan.rows {
        self.row = 0;
        self.slice += 1;
      }
    }
  }

  fn cell_at(&self, plan: &SlicePlan) -> Cell {
    match self.spec.bin_type() {
      BinType::Square => Cell {
        x: plan.start.x + self.col as i64,
        y: plan.start.y + self.row as i64,
      },
      BinType::Hexagon => Cell {
        x: plan.start.x + 2 * self.col as i64 + (self.row % 2) as i64,
        y: plan.start.y + self.row as i64,
      },
    }
  }

  /// Whether the plan's hemisphere frame owns a cell centered at `center`.
  ///
  /// The northern frame takes cells centered on or north of the equator,
  /// the southern frame every cell reaching south of it.
  fn in_hemisphere(&self, plan: &SlicePlan, center: PlanePoint) -> bool {
    if is_northern(plan.band) {
      return center.northing >= 0.0;
    }
    let half_height = match self.spec.bin_type() {
      BinType::Square => self.spec.size() / 2.0,
      BinType::Hexagon => hexagon::y_seg(self.spec.size()),
    };
    center.northing - half_height < SOUTH_FALSE_NORTHING_M
  }

  /// Examines the current cell; `Ok(None)` when it is not emitted.
  fn visit(&self, plan: &SlicePlan) -> Result<Option<CellRecord>, GeoBinError> {
    let cell = self.cell_at(plan);
    let center = center_of(self.spec, cell);
    if !self.in_hemisphere(plan, center) {
      return Ok(None);
    }
    let boundary = boundary_from_center(self.proj, self.spec, center, plan.zone, plan.band)?;
    let ring = boundary.as_slice();

    let touches = ring.iter().any(|v| ring_contains(*v, &self.region))
      || self.region.iter().any(|v| ring_contains(*v, ring));
    if !touches {
      return Ok(None);
    }

    // slices are cut on plain 6 degree meridians, so ownership follows them too
    if plan.guard
      && (self.col < ZONE_GUARD_COLUMNS || self.col > plan.cols.saturating_sub(ZONE_GUARD_COLUMNS))
      && !ring.iter().any(|v| zone_from_lon(v.lon) == plan.zone)
    {
      trace!("cell {cell:?} of zone {} lies wholly outside it", plan.zone);
      return Ok(None);
    }

    let mut frame = UtmCoord {
      easting: center.easting,
      northing: center.northing,
      zone: plan.zone,
      band: plan.band,
    };
    frame.band = band_in_frame(self.proj.inverse(&frame)?.lat, plan.band);
    let binned = geoid_from_projected(self.proj, &frame, self.spec)?;
    trace!("cell {cell:?} in zone {} -> {}", plan.zone, binned.geoid);

    Ok(Some(CellRecord {
      geoid: binned.geoid,
      center: binned.center,
      boundary,
    }))
  }
}

/// Band of a cell centered at `lat`, kept on the hemisphere of `frame_band`.
fn band_in_frame(lat: f64, frame_band: char) -> char {
  let northern = is_northern(frame_band);
  match lat_band(lat.clamp(MIN_UTM_LAT, MAX_UTM_LAT)) {
    Ok(band) if is_northern(band) == northern => band,
    _ if northern => 'N',
    _ => 'M',
  }
}

impl<P: Projection> Iterator for RegionScanner<'_, P> {
  type Item = Result<CellRecord, GeoBinError>;

  fn next(&mut self) -> Option<Self::Item> {
    if self.done {
      return None;
    }
    while let Some(plan) = self.plans.get(self.slice).copied() {
      let visited = self.visit(&plan);
      self.advance();
      match visited {
        Ok(Some(record)) => return Some(Ok(record)),
        Ok(None) => {}
        Err(e) => {
          self.done = true;
          return Some(Err(e));
        }
      }
    }
    self.done = true;
    None
  }
}

impl<P: Projection> std::iter::FusedIterator for RegionScanner<'_, P> {}

/// Scans a region and feeds every bin to `sink` in scan order.
///
/// Invalid input is reported before anything reaches the sink.
///
/// # Returns
/// The number of bins emitted.
pub fn bins_in_region<P: Projection, S: CellSink>(
  proj: &P,
  region: &GeoLoop,
  bin_size_m: u32,
  bin_type: u8,
  zone: Option<u8>,
  sink: &mut S,
) -> Result<usize, GeoBinError> {
  RegionScanner::new(proj, region, bin_size_m, bin_type, zone)?.drain_into(sink)
}
