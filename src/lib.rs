#![deny(clippy::all)] // Enforce clippy lints
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)] // Often a matter of taste
#![allow(clippy::missing_errors_doc)] // error flags are documented on the flag types
#![allow(clippy::cast_possible_truncation)] // cell indices come from floored f64 values
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::unreadable_literal)] // reference GeoIDs and UTM coordinates
#![allow(clippy::similar_names)] // easting/northing, x_seg/y_seg
#![allow(clippy::wildcard_imports)]

//! `geobin` bins points on the Earth into square or hexagonal cells laid out
//! on the UTM grid, and names each cell with a fixed-width 40 character key,
//! the GeoID.
//!
//! - [`geoid_from_lon_lat`] finds the bin of a point.
//! - [`cell_geometry`] rebuilds a bin's center and outline from its GeoID.
//! - [`point_inside_geoloop`] and [`geoid_in_region`] test region membership.
//! - [`RegionScanner`] / [`bins_in_region`] enumerate every bin touching a region,
//!   including regions that cross UTM zones or the equator.
//! - [`MifSink`] and, with the `geojson` feature, `GeoJsonSink` write scanned
//!   bins out as MapInfo and GeoJSON files.
//!
//! Coordinate transforms go through the [`Projection`] trait; [`UtmProjection`]
//! is the stock implementation on top of the `geodesy` crate.

// Declare modules
pub mod bbox;
pub mod constants;
pub mod error;
pub mod geoid;
pub mod indexing;
pub mod latlng;
pub mod polygon;
pub mod projection;
pub mod regions;
pub mod types;

// Re-export key public types and functions for easier use
pub use constants::{GEOID_LEN, MAX_BIN_BNDRY_VERTS, MAX_BIN_SIZE_M, MIN_BIN_SIZE_M};
pub use error::{DecodeErrors, EncodeErrors, GeoBinError, ProjectionError, RingErrors, ScanErrors};
pub use geoid::{decode, encode, GeoId, GeoIdParts};
pub use indexing::{
  cell_geometry, geoid_from_lon_lat, geoid_from_point, geoid_from_projected, BinnedPoint, CellGeometry,
};
pub use latlng::{great_circle_distance_km, great_circle_distance_m};
pub use polygon::{geoid_in_region, point_inside_geoloop, point_inside_projected_ring};
pub use projection::{Projection, UtmProjection};
pub use regions::{bins_in_region, write_region_outline, CellRecord, CellSink, MifLayer, MifSink, RegionScanner, SlicePlan};
#[cfg(feature = "geojson")]
pub use regions::{bin_feature, write_bins_in_region, FeatureStyle, GeoJsonSink, PropertyBag, PropertyValue};
pub use types::{BBox, BinSpec, BinType, Cell, CellBoundary, GeoLoop, LonLat, PlanePoint, UtmCoord};
