//! Distance calculations between stops and query points.
//!
//! Uses Haversine formula for accurate distances on Earth's surface.

use geo::{HaversineDistance, Point};

use crate::models::types::TransportStop;

/// Calculate Haversine distance between two points in meters
pub fn haversine_distance(p1: Point, p2: Point) -> f64 {
    p1.haversine_distance(&p2)
}

/// Distance from a query point to a stop's location in meters
pub fn distance_to_stop(point: Point, stop: &TransportStop) -> f64 {
    haversine_distance(point, stop.location)
}

/// Closest stop to `point` and its distance.
///
/// Ties keep the earliest stop in iteration order.
pub fn nearest_stop<'a>(
    point: Point,
    stops: impl IntoIterator<Item = &'a TransportStop>,
) -> Option<(&'a TransportStop, f64)> {
    stops.into_iter().fold(None, |best, stop| {
        let dist = distance_to_stop(point, stop);
        match best {
            Some((_, best_dist)) if best_dist <= dist => best,
            _ => Some((stop, dist)),
        }
    })
}
