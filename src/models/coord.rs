//! Geographic coordinate in decimal degrees.

/// Geographic point (lon/lat), WGS84 decimal degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub lon: f64,
    pub lat: f64,
}

impl Coordinate {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Shift by `i` rows (latitude) and `j` columns (longitude) of `step` degrees
    pub fn offset(&self, i: i64, j: i64, step: f64) -> Self {
        Self {
            lon: self.lon + j as f64 * step,
            lat: self.lat + i as f64 * step,
        }
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.lon, self.lat)
    }
}
