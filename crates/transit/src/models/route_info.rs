//! Per-route results of a "route options from here" query.

use std::sync::Arc;

use geo::Point;

use crate::models::types::{Direction, TransportRoute, TransportStop};
use crate::spatial::queries::distance_to_stop;

/// Stop on the remaining path that comes closest to the target
#[derive(Clone, Debug, PartialEq)]
pub struct NearestStop {
    pub stop: TransportStop,
    /// Distance from `stop` to the target in meters
    pub distance: f64,
}

/// A route that can be boarded near the origin, in one direction of travel.
///
/// The result does not copy the route's stops: [`RouteInfoLocation::path`]
/// is a view into the shared route record starting at the boarding stop.
#[derive(Clone, Debug)]
pub struct RouteInfoLocation {
    route: Arc<TransportRoute>,
    direction: Direction,
    start_index: usize,
    nearest: Option<NearestStop>,
}

impl RouteInfoLocation {
    /// Returns `None` when `start_index` is past the end of the sequence
    pub fn new(route: Arc<TransportRoute>, direction: Direction, start_index: usize) -> Option<Self> {
        if start_index >= route.stops(direction).len() {
            return None;
        }
        Some(Self {
            route,
            direction,
            start_index,
            nearest: None,
        })
    }

    pub fn with_nearest(mut self, nearest: Option<NearestStop>) -> Self {
        self.nearest = nearest;
        self
    }

    pub fn route(&self) -> &Arc<TransportRoute> {
        &self.route
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Remaining stops, starting with the boarding stop
    pub fn path(&self) -> &[TransportStop] {
        &self.route.stops(self.direction)[self.start_index..]
    }

    /// The stop where the route is boarded
    pub fn start(&self) -> &TransportStop {
        &self.path()[0]
    }

    pub fn start_index(&self) -> usize {
        self.start_index
    }

    pub fn nearest_to_target(&self) -> Option<&NearestStop> {
        self.nearest.as_ref()
    }

    /// Distance from the best stop to the target, when a target was given
    pub fn distance_to_target(&self) -> Option<f64> {
        self.nearest.as_ref().map(|n| n.distance)
    }

    /// Walk to the boarding stop plus the remaining gap to the target.
    ///
    /// This is the ranking key; it ignores the distance travelled on the
    /// route itself.
    pub fn total_distance(&self, origin: Point) -> f64 {
        distance_to_stop(origin, self.start()) + self.distance_to_target().unwrap_or(0.0)
    }
}
