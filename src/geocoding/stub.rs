//! Deterministic in-memory geocoder for tests.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use super::GeocodingService;
use crate::error::Result;
use crate::models::{Coordinate, RegionName};

type Resolver = Box<dyn Fn(Coordinate) -> Result<Option<RegionName>> + Send + Sync>;

/// Fixed forward result, closure-driven reverse lookups
pub(crate) struct StubGeocoder {
    origin: Option<Coordinate>,
    resolve: Resolver,
    /// Sleep before answering each reverse lookup
    delay: Option<Duration>,
    reverse_calls: AtomicUsize,
}

impl StubGeocoder {
    pub(crate) fn new(
        origin: Option<Coordinate>,
        resolve: impl Fn(Coordinate) -> Result<Option<RegionName>> + Send + Sync + 'static,
    ) -> Arc<Self> {
        Arc::new(Self {
            origin,
            resolve: Box::new(resolve),
            delay: None,
            reverse_calls: AtomicUsize::new(0),
        })
    }

    /// Like `new`, but every reverse lookup first sleeps for `delay`
    pub(crate) fn slow(
        origin: Option<Coordinate>,
        delay: Duration,
        resolve: impl Fn(Coordinate) -> Result<Option<RegionName>> + Send + Sync + 'static,
    ) -> Arc<Self> {
        Arc::new(Self {
            origin,
            resolve: Box::new(resolve),
            delay: Some(delay),
            reverse_calls: AtomicUsize::new(0),
        })
    }

    /// Reverse-geocode calls started so far
    pub(crate) fn calls(&self) -> usize {
        self.reverse_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GeocodingService for StubGeocoder {
    async fn geocode(&self, _address: &str) -> Result<Option<Coordinate>> {
        Ok(self.origin)
    }

    async fn reverse_geocode(&self, at: Coordinate) -> Result<Option<RegionName>> {
        self.reverse_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        (self.resolve)(at)
    }
}
