//! Nearby-region search over a geocoded origin.

use futures::stream::{self, StreamExt, TryStreamExt};
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, instrument};

use super::SearchGrid;
use crate::config::SearchConfig;
use crate::error::{FinderError, Result};
use crate::geocoding::GeocodingService;
use crate::models::{RegionName, SearchOutcome, SearchRequest};

/// Finds the administrative regions surrounding an address
#[derive(Clone)]
pub struct NeighborhoodFinder {
    geocoder: Arc<dyn GeocodingService>,
    config: SearchConfig,
}

impl NeighborhoodFinder {
    pub fn new(geocoder: Arc<dyn GeocodingService>, config: SearchConfig) -> Self {
        Self { geocoder, config }
    }

    /// Geocode `request.query`, reverse-geocode every grid cell around it and
    /// return the distinct region names in ascending order.
    ///
    /// Any upstream failure aborts the search; partial results are never
    /// returned. Dropping the future cancels calls still in flight.
    #[instrument(skip(self, request), fields(query = %request.query, distance_km = request.distance_km))]
    pub async fn find_nearby_regions(&self, request: &SearchRequest) -> Result<SearchOutcome> {
        let query = request.query.trim();
        if query.is_empty() {
            return Err(FinderError::missing_query());
        }

        if request.distance_km > self.config.max_distance_km {
            return Err(FinderError::InvalidRequest(format!(
                "distance must be at most {} km",
                self.config.max_distance_km
            )));
        }

        let start = Instant::now();

        let origin = self
            .geocoder
            .geocode(query)
            .await?
            .ok_or_else(FinderError::address_not_found)?;

        let grid = SearchGrid::new(origin, request.distance_km);
        let (lat_cells, lon_cells) = grid.half_extents();
        debug!(
            "Origin {} → grid ±{} rows × ±{} columns ({} cells)",
            origin,
            lat_cells,
            lon_cells,
            grid.len()
        );

        let geocoder = &self.geocoder;
        let regions: BTreeSet<RegionName> = stream::iter(grid.cells())
            .map(|cell| async move { geocoder.reverse_geocode(cell).await })
            .buffer_unordered(self.config.concurrency.max(1))
            .try_fold(BTreeSet::new(), |mut regions, region| async move {
                if let Some(region) = region {
                    regions.insert(region);
                }
                Ok::<_, FinderError>(regions)
            })
            .await?;

        info!(
            "Found {} regions in {} cells in {:?}",
            regions.len(),
            grid.len(),
            start.elapsed()
        );

        Ok(SearchOutcome::from_sorted(regions.into_iter().collect()))
    }
}
