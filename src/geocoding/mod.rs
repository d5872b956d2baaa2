//! Geocoding collaborator: forward and reverse lookups.

mod kakao;
#[cfg(test)]
mod stub;

pub use kakao::KakaoClient;
#[cfg(test)]
pub(crate) use stub::StubGeocoder;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Coordinate, RegionName};

/// Address ↔ coordinate lookups needed by the finder
#[async_trait]
pub trait GeocodingService: Send + Sync {
    /// Coordinate of the first candidate for `address`, or `None` if there is none
    async fn geocode(&self, address: &str) -> Result<Option<Coordinate>>;

    /// Region containing `at`, or `None` when the point has no named sgg/dong
    async fn reverse_geocode(&self, at: Coordinate) -> Result<Option<RegionName>>;
}
