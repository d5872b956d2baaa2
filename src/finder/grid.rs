//! Candidate grid around a search origin.

use crate::config::MAX_DISTANCE_CEILING_KM;
use crate::models::Coordinate;

/// Grid resolution in degrees, used for both axes
pub const STEP_DEGREES: f64 = 0.01;

/// Approximate degrees of latitude per kilometre.
/// Not corrected for latitude; kept for compatibility with existing results.
const LAT_DEGREES_PER_KM: f64 = 0.009;

/// Approximate degrees of longitude per kilometre at Korean latitudes
const LON_DEGREES_PER_KM: f64 = 0.011;

/// Rectangular grid of `(2*lat_cells+1) x (2*lon_cells+1)` points centred on `origin`
#[derive(Debug, Clone, Copy)]
pub struct SearchGrid {
    origin: Coordinate,
    lat_cells: i64,
    lon_cells: i64,
}

impl SearchGrid {
    /// Negative distances collapse to the origin-only grid; distances beyond
    /// `MAX_DISTANCE_CEILING_KM` are cut to it.
    pub fn new(origin: Coordinate, distance_km: i64) -> Self {
        let distance = distance_km.clamp(0, MAX_DISTANCE_CEILING_KM) as f64;
        // Same operation order as the original formula: (d * k) / step, then floor
        let lat_cells = ((distance * LAT_DEGREES_PER_KM) / STEP_DEGREES).floor() as i64;
        let lon_cells = ((distance * LON_DEGREES_PER_KM) / STEP_DEGREES).floor() as i64;

        Self {
            origin,
            lat_cells,
            lon_cells,
        }
    }

    /// Half-extents as (latitude rows, longitude columns)
    pub fn half_extents(&self) -> (i64, i64) {
        (self.lat_cells, self.lon_cells)
    }

    /// Number of cells, i.e. reverse-geocode calls
    pub fn len(&self) -> usize {
        ((2 * self.lat_cells + 1) * (2 * self.lon_cells + 1)) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Cell coordinates, latitude rows outer and longitude columns inner, both ascending
    pub fn cells(&self) -> impl Iterator<Item = Coordinate> + Send + 'static {
        let origin = self.origin;
        let (lat_cells, lon_cells) = (self.lat_cells, self.lon_cells);
        (-lat_cells..=lat_cells).flat_map(move |i| {
            (-lon_cells..=lon_cells).map(move |j| origin.offset(i, j, STEP_DEGREES))
        })
    }
}
