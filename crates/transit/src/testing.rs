//! Shared fixtures for unit tests.

use std::collections::HashMap;
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::identifiers::*;
use crate::models::{request::StopSearchRequest, traits::*, types::*};
use crate::provider::StaticTransportIndex;
use crate::spatial::tile::{lat_lon, GeoBox};

pub fn stop_a() -> TransportStop {
    TransportStop::new(StopId::new(1), "A", lat_lon(50.001, 14.401), vec![RouteRef::new(7)])
}

pub fn stop_b() -> TransportStop {
    TransportStop::new(
        StopId::new(2),
        "B",
        lat_lon(50.002, 14.402),
        vec![RouteRef::new(7), RouteRef::new(9)],
    )
}

pub fn route_7() -> TransportRoute {
    TransportRoute::new(RouteRef::new(7), "7", RouteType::Tram, vec![stop_a(), stop_b()], vec![])
}

pub fn route_9() -> TransportRoute {
    TransportRoute::new(RouteRef::new(9), "9", RouteType::Bus, vec![stop_b()], vec![])
}

/// Two stops near (50.0, 14.4): route 7 runs A then B, route 9 serves only B
pub fn scenario_index() -> StaticTransportIndex {
    StaticTransportIndex::from_data(vec![stop_a(), stop_b()], vec![route_7(), route_9()])
}

/// Reader whose every read fails as a broken disk would
pub struct FailingReader;

impl TransportIndexReader for FailingReader {
    fn has_coverage(&self, _latitude: f64, _longitude: f64) -> bool {
        true
    }

    fn has_coverage_box(&self, _bbox: GeoBox) -> bool {
        true
    }

    fn search_stops(
        &self,
        _request: &StopSearchRequest,
        _matcher: Option<&mut StopMatcher<'_>>,
    ) -> Result<Vec<TransportStop>> {
        Err(io::Error::new(io::ErrorKind::InvalidData, "corrupt partition").into())
    }

    fn get_routes(&self, _refs: &[RouteRef]) -> Result<HashMap<RouteRef, Arc<TransportRoute>>> {
        Err(io::Error::new(io::ErrorKind::InvalidData, "corrupt partition").into())
    }

    fn belongs_to_partition(&self, _stop: &TransportStop) -> bool {
        false
    }

    fn close(&self) -> Result<()> {
        Err(io::Error::new(io::ErrorKind::Other, "close failed").into())
    }
}

/// Wraps a reader and counts route batch lookups
pub struct CountingReader<R> {
    pub inner: R,
    route_calls: AtomicUsize,
}

impl<R> CountingReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            route_calls: AtomicUsize::new(0),
        }
    }

    pub fn route_calls(&self) -> usize {
        self.route_calls.load(Ordering::SeqCst)
    }
}

impl<R: TransportIndexReader> TransportIndexReader for CountingReader<R> {
    fn has_coverage(&self, latitude: f64, longitude: f64) -> bool {
        self.inner.has_coverage(latitude, longitude)
    }

    fn has_coverage_box(&self, bbox: GeoBox) -> bool {
        self.inner.has_coverage_box(bbox)
    }

    fn search_stops(
        &self,
        request: &StopSearchRequest,
        matcher: Option<&mut StopMatcher<'_>>,
    ) -> Result<Vec<TransportStop>> {
        self.inner.search_stops(request, matcher)
    }

    fn get_routes(&self, refs: &[RouteRef]) -> Result<HashMap<RouteRef, Arc<TransportRoute>>> {
        self.route_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.get_routes(refs)
    }

    fn belongs_to_partition(&self, stop: &TransportStop) -> bool {
        self.inner.belongs_to_partition(stop)
    }

    fn close(&self) -> Result<()> {
        self.inner.close()
    }
}
