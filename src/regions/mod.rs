// src/regions/mod.rs
#![allow(clippy::module_name_repetitions)]

#[cfg(feature = "geojson")]
pub mod geojson;
pub mod mif;
pub mod scanner;
pub mod sink;

pub use mif::{write_region_outline, MifLayer, MifSink};
pub use scanner::{bins_in_region, RegionScanner, SlicePlan};
pub use sink::{CellRecord, CellSink};

#[cfg(feature = "geojson")]
pub use self::geojson::{bin_feature, write_bins_in_region, FeatureStyle, GeoJsonSink, PropertyBag, PropertyValue};
