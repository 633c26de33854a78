//! GeoID layout, validation ranges and scan tuning constants.

/// Total number of characters in an encoded GeoID.
pub const GEOID_LEN: usize = 40;
/// A GeoID must be strictly longer than this to be decoded.
pub const MIN_GEOID_LEN: usize = 25;

/// Reserved leading block of every GeoID.
pub const GEOID_RESERVED: &str = "0000000000";

// Field offsets inside the 40 character key.
pub(crate) const BIN_TYPE_OFFSET: usize = 10;
pub(crate) const BIN_SIZE_OFFSET: usize = 11;
pub(crate) const ZONE_OFFSET: usize = 15;
pub(crate) const LAT_BAND_OFFSET: usize = 17;
pub(crate) const X_OFFSET: usize = 18;
pub(crate) const Y_OFFSET: usize = 29;

/// Width of each cell index field (x and y).
pub const CELL_INDEX_DIGITS: usize = 11;
/// Largest cell index that fits in an 11 digit field.
pub const MAX_CELL_INDEX: i64 = 99_999_999_999;

/// Smallest bin size in meters.
pub const MIN_BIN_SIZE_M: u32 = 1;
/// Largest bin size in meters (4 digit field).
pub const MAX_BIN_SIZE_M: u32 = 9999;

/// Number of UTM zones.
pub const NUM_ZONES: u8 = 60;
/// Width of a UTM zone in degrees of longitude.
pub const ZONE_WIDTH_DEG: f64 = 6.0;

/// Latitude band letters, 8 degrees each from 80S (I and O are skipped).
pub const LAT_BANDS: &str = "CDEFGHJKLMNPQRSTUVWX";
/// Southern limit of the UTM grid.
pub const MIN_UTM_LAT: f64 = -80.0;
/// Northern limit of the UTM grid.
pub const MAX_UTM_LAT: f64 = 84.0;
/// False northing applied in the southern hemisphere.
pub const SOUTH_FALSE_NORTHING_M: f64 = 10_000_000.0;

/// Mean earth radius used by the haversine distance, in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// sin(60 degrees)
pub const M_SQRT3_2: f64 = 0.866_025_403_784_438_6;

/// Number of vertices of a square bin boundary.
pub const NUM_SQUARE_VERTS: usize = 4;
/// Number of vertices of a hexagon bin boundary.
pub const NUM_HEX_VERTS: usize = 6;
/// Maximum number of vertices in any bin boundary.
pub const MAX_BIN_BNDRY_VERTS: usize = NUM_HEX_VERTS;

/// Extra columns scanned beyond the bounding box width.
pub const OVERSCAN_COLUMNS: usize = 2;
/// Extra rows scanned beyond the bounding box height.
pub const OVERSCAN_ROWS: usize = 6;
/// Columns at each edge of a zone slice whose true zone is re-derived.
pub const ZONE_GUARD_COLUMNS: usize = 10;

/// Default GeoJSON stroke color.
pub const DEFAULT_STROKE_COLOR: &str = "#000000";
/// Default GeoJSON stroke weight.
pub const DEFAULT_STROKE_WEIGHT: f64 = 1.0;
/// Default GeoJSON stroke opacity.
pub const DEFAULT_STROKE_OPACITY: f64 = 1.0;
/// Default GeoJSON fill color.
pub const DEFAULT_FILL_COLOR: &str = "#FFFFFF";
/// Default GeoJSON fill opacity.
pub const DEFAULT_FILL_OPACITY: f64 = 0.3;

/// File name written by the region-to-file helper.
pub const GEOBIN_FILE_NAME: &str = "GeoBin.json";
/// MapInfo file stem for the region outline.
pub const GEOBOUND_FILE_STEM: &str = "GeoBound";
/// MapInfo file stem for bin center points.
pub const GEOBIN_CENTER_FILE_STEM: &str = "GeoBinCenter";
/// MapInfo file stem for bin outlines.
pub const GEOBIN_BOUND_FILE_STEM: &str = "GeoBinBound";
