//! Picks one boarding stop per route and loads the route records.

use std::collections::HashMap;
use std::sync::Arc;

use geo::Point;
use tracing::debug;

use crate::identifiers::*;
use crate::models::{traits::*, types::*};
use crate::spatial::queries::distance_to_stop;

/// A route together with the stop it is boarded at
#[derive(Clone, Debug)]
pub struct ResolvedRoute {
    pub route: Arc<TransportRoute>,
    /// Closest stop to the origin among the found stops serving the route
    pub stop: TransportStop,
}

/// For every route reference on `stops`, the stop closest to `origin`.
///
/// References come back in the order they were first seen. When two stops
/// are equally close the earlier one is kept.
pub fn representative_stops<'a>(
    origin: Point,
    stops: &'a [TransportStop],
) -> Vec<(RouteRef, &'a TransportStop)> {
    let mut slots: HashMap<RouteRef, usize> = HashMap::new();
    let mut picked: Vec<(RouteRef, &TransportStop, f64)> = Vec::new();

    for stop in stops {
        let dist = distance_to_stop(origin, stop);
        for &route in &stop.route_refs {
            match slots.get(&route) {
                Some(&slot) => {
                    if dist < picked[slot].2 {
                        picked[slot] = (route, stop, dist);
                    }
                }
                None => {
                    slots.insert(route, picked.len());
                    picked.push((route, stop, dist));
                }
            }
        }
    }

    picked.into_iter().map(|(route, stop, _)| (route, stop)).collect()
}

/// Resolve the routes serving `stops` with one batch lookup.
///
/// References the index cannot resolve are skipped. No lookup is made when
/// there is nothing to resolve.
pub fn resolve_routes_near_stops<R: TransportIndexReader + ?Sized>(
    reader: &R,
    origin: Point,
    stops: &[TransportStop],
) -> Result<Vec<ResolvedRoute>> {
    let picked = representative_stops(origin, stops);
    if picked.is_empty() {
        return Ok(Vec::new());
    }

    let refs: Vec<RouteRef> = picked.iter().map(|(route, _)| *route).collect();
    let mut routes = reader.get_routes(&refs)?;

    Ok(picked
        .into_iter()
        .filter_map(|(id, stop)| match routes.remove(&id) {
            Some(route) => Some(ResolvedRoute {
                route,
                stop: stop.clone(),
            }),
            None => {
                debug!(route = %id, stop = %stop.id, "route reference not in index, skipping");
                None
            }
        })
        .collect())
}

/// Routes recorded on `stop` that the index can resolve, in the stop's order
pub fn routes_for_stop<R: TransportIndexReader + ?Sized>(
    reader: &R,
    stop: &TransportStop,
) -> Result<Vec<Arc<TransportRoute>>> {
    if stop.route_refs.is_empty() {
        return Ok(Vec::new());
    }

    let mut routes = reader.get_routes(&stop.route_refs)?;
    Ok(stop
        .route_refs
        .iter()
        .filter_map(|id| routes.remove(id))
        .collect())
}
