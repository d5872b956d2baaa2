//! Core data models for nearby-neighbourhood discovery.

pub mod coord;
pub mod region;
pub mod request;

pub use coord::Coordinate;
pub use region::RegionName;
pub use request::{SearchOutcome, SearchRequest, DEFAULT_DISTANCE_KM, NO_REGIONS_FOUND};
