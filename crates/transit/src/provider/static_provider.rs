//! In-memory transport index reader.
//!
//! Holds a fully materialised partition with an R-tree over stop positions.
//! Embedders with pre-decoded data use it directly; it also stands in for
//! the binary index in tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rstar::RTree;

use crate::identifiers::*;
use crate::models::{request::StopSearchRequest, traits::*, types::*};
use crate::spatial::index::{tile_envelopes, StopNode};
use crate::spatial::tile::{lat_lon, GeoBox};

// ============================================================================
// Static Index
// ============================================================================

/// In-memory index partition with spatial indexing
pub struct StaticTransportIndex {
    // Lookup maps
    stop_map: HashMap<StopId, Arc<TransportStop>>,
    route_map: HashMap<RouteRef, Arc<TransportRoute>>,

    // Spatial index
    stop_tree: RTree<StopNode>,

    coverage: Option<GeoBox>,
    closed: AtomicBool,
}

impl StaticTransportIndex {
    /// Create a new empty index
    pub fn new() -> Self {
        Self::from_data(Vec::new(), Vec::new())
    }

    /// Build an index from decoded records.
    ///
    /// Coverage defaults to the envelope of the stops.
    pub fn from_data(stops: Vec<TransportStop>, routes: Vec<TransportRoute>) -> Self {
        let stops: Vec<Arc<TransportStop>> = stops.into_iter().map(Arc::new).collect();

        let coverage = GeoBox::enclosing(stops.iter().map(|s| s.location));

        let stop_map: HashMap<_, _> = stops.iter().map(|s| (s.id, s.clone())).collect();

        let route_map: HashMap<_, _> = routes
            .into_iter()
            .map(|r| (r.id, Arc::new(r)))
            .collect();

        let stop_tree = RTree::bulk_load(stops.into_iter().map(StopNode::new).collect());

        Self {
            stop_map,
            route_map,
            stop_tree,
            coverage,
            closed: AtomicBool::new(false),
        }
    }

    /// Override the area this partition claims to cover
    pub fn with_coverage(mut self, coverage: GeoBox) -> Self {
        self.coverage = Some(coverage);
        self
    }

    pub fn coverage(&self) -> Option<GeoBox> {
        self.coverage
    }

    pub fn stop_count(&self) -> usize {
        self.stop_map.len()
    }

    pub fn route_count(&self) -> usize {
        self.route_map.len()
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    fn ensure_open(&self) -> Result<()> {
        if self.is_closed() {
            return Err(TransitError::IndexClosed);
        }
        Ok(())
    }
}

impl Default for StaticTransportIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl TransportIndexReader for StaticTransportIndex {
    fn has_coverage(&self, latitude: f64, longitude: f64) -> bool {
        self.coverage
            .is_some_and(|c| c.contains(lat_lon(latitude, longitude)))
    }

    fn has_coverage_box(&self, bbox: GeoBox) -> bool {
        self.coverage.is_some_and(|c| c.intersects(&bbox))
    }

    fn search_stops(
        &self,
        request: &StopSearchRequest,
        mut matcher: Option<&mut StopMatcher<'_>>,
    ) -> Result<Vec<TransportStop>> {
        self.ensure_open()?;

        let mut candidates: Vec<&StopNode> = tile_envelopes(&request.tiles)
            .iter()
            .flat_map(|envelope| self.stop_tree.locate_in_envelope(envelope))
            .collect();
        // tree order depends on bulk loading; id order keeps limits stable
        candidates.sort_by_key(|node| node.stop.id);

        let mut found = Vec::new();
        for node in candidates {
            if request.is_full(found.len()) {
                break;
            }
            found.push(node.stop.as_ref().clone());
            if let Some(matcher) = matcher.as_deref_mut() {
                if matcher(node.stop.as_ref()).is_break() {
                    break;
                }
            }
        }
        Ok(found)
    }

    fn get_routes(&self, refs: &[RouteRef]) -> Result<HashMap<RouteRef, Arc<TransportRoute>>> {
        self.ensure_open()?;

        Ok(refs
            .iter()
            .filter_map(|r| self.route_map.get(r).map(|route| (*r, route.clone())))
            .collect())
    }

    fn belongs_to_partition(&self, stop: &TransportStop) -> bool {
        self.stop_map.contains_key(&stop.id)
            && self.coverage.is_some_and(|c| c.contains(stop.location))
    }

    fn close(&self) -> Result<()> {
        self.closed.store(true, Ordering::Release);
        Ok(())
    }
}
