//! Nearby-region discovery.
//!
//! Geocodes the query, lays a grid of candidate points around it and
//! reverse-geocodes each cell into a set of region names.

mod grid;
mod service;

pub use grid::{SearchGrid, STEP_DEGREES};
pub use service::NeighborhoodFinder;
