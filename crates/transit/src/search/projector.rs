//! Follows each resolved route onward from its boarding stop.

use geo::Point;

use crate::identifiers::StopId;
use crate::models::route_info::{NearestStop, RouteInfoLocation};
use crate::models::types::{Direction, TransportStop};
use crate::search::resolver::ResolvedRoute;
use crate::spatial::queries::nearest_stop;

/// Position of the first stop with the given id
pub fn start_position(stops: &[TransportStop], stop: StopId) -> Option<usize> {
    stops.iter().position(|s| s.id == stop)
}

/// One result per route and direction in which the boarding stop appears.
///
/// With a `target`, each result also records the stop on the remaining path
/// that comes closest to it.
pub fn project_routes(resolved: &[ResolvedRoute], target: Option<Point>) -> Vec<RouteInfoLocation> {
    let mut results = Vec::with_capacity(resolved.len() * 2);

    for ResolvedRoute { route, stop } in resolved {
        for direction in Direction::BOTH {
            let Some(start) = start_position(route.stops(direction), stop.id) else {
                continue;
            };
            let Some(info) = RouteInfoLocation::new(route.clone(), direction, start) else {
                continue;
            };

            let nearest = target.and_then(|target| {
                nearest_stop(target, info.path()).map(|(stop, distance)| NearestStop {
                    stop: stop.clone(),
                    distance,
                })
            });
            results.push(info.with_nearest(nearest));
        }
    }

    results
}
