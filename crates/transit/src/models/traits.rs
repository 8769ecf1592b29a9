//! Core traits at the edges of the search engine.
//!
//! [`TransportIndexReader`] is implemented by whatever owns the index file;
//! [`TransportIndexRepository`] is what the engine offers to the layers above.

use std::collections::HashMap;
use std::ops::ControlFlow;
use std::sync::Arc;

use geo::Point;

use crate::identifiers::*;
use crate::models::request::StopSearchRequest;
use crate::models::route_info::RouteInfoLocation;
use crate::models::types::*;
use crate::spatial::tile::GeoBox;

/// Visitor called for every stop a box search accepts.
///
/// Returning `Break` ends the scan after the current stop.
pub type StopMatcher<'a> = dyn FnMut(&TransportStop) -> ControlFlow<()> + 'a;

// ============================================================================
// Reader Trait
// ============================================================================

/// Read-only access to a pre-built transport index partition.
///
/// Implementations must tolerate concurrent `&self` calls if they are shared
/// between threads; the engine adds no locking of its own.
pub trait TransportIndexReader: Send + Sync {
    /// Does this partition hold transport data at the point?
    fn has_coverage(&self, latitude: f64, longitude: f64) -> bool;

    /// Does this partition hold transport data overlapping the box?
    fn has_coverage_box(&self, bbox: GeoBox) -> bool;

    /// Stops inside the request's tile box
    fn search_stops(
        &self,
        request: &StopSearchRequest,
        matcher: Option<&mut StopMatcher<'_>>,
    ) -> Result<Vec<TransportStop>>;

    /// Batch lookup of route records; unknown references are left out of the map
    fn get_routes(&self, refs: &[RouteRef]) -> Result<HashMap<RouteRef, Arc<TransportRoute>>>;

    /// Was this stop read from this partition?
    fn belongs_to_partition(&self, stop: &TransportStop) -> bool;

    /// Release the underlying handle. Calling it twice is not an error.
    fn close(&self) -> Result<()>;
}

// ============================================================================
// Repository Trait
// ============================================================================

/// Stop and route search over one or more opened indexes.
///
/// Every method swallows index failures: they are logged and the call
/// returns an empty result.
pub trait TransportIndexRepository: Send + Sync {
    fn check_contains(&self, latitude: f64, longitude: f64) -> bool;

    fn check_contains_box(&self, bbox: GeoBox) -> bool;

    /// Stops inside `bbox`; a negative `limit` means unbounded
    fn search_stops_in_box(&self, bbox: GeoBox, limit: i32) -> Vec<TransportStop> {
        self.search_stops_in_box_with(bbox, limit, None)
    }

    /// Like [`search_stops_in_box`](Self::search_stops_in_box) with an
    /// early-terminating matcher
    fn search_stops_in_box_with(
        &self,
        bbox: GeoBox,
        limit: i32,
        matcher: Option<&mut StopMatcher<'_>>,
    ) -> Vec<TransportStop>;

    /// Routes serving `stop` that the index can resolve
    fn routes_for_stop(&self, stop: &TransportStop) -> Vec<Arc<TransportRoute>>;

    /// Routes that can be boarded within one `zoom` tile of the point,
    /// ranked closest first
    fn route_options_from(
        &self,
        latitude: f64,
        longitude: f64,
        target: Option<Point>,
        zoom: u8,
    ) -> Vec<RouteInfoLocation>;

    /// Does `stop` come from an index this repository reads?
    fn accept_stop(&self, stop: &TransportStop) -> bool;

    fn close(&self);
}
