//! Dongne - nearby administrative neighbourhood discovery
//!
//! Geocodes an address, samples a grid of points around it and reverse-geocodes
//! each one to collect the surrounding "sgg dong" region names.

pub mod api;
pub mod config;
pub mod error;
pub mod finder;
pub mod geocoding;
pub mod models;

pub use error::FinderError;
pub use finder::NeighborhoodFinder;
pub use models::{Coordinate, RegionName, SearchOutcome, SearchRequest};
