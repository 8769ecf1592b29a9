//! Repository over a single opened index.
//!
//! The `try_*` methods report index failures; the [`TransportIndexRepository`]
//! methods log them and answer with an empty result instead, which makes
//! "nothing here" and "could not read" look the same to the caller.

use std::sync::Arc;
use std::time::Instant;

use geo::Point;
use tracing::{debug, error, warn};

use crate::config::SearchConfig;
use crate::models::{route_info::RouteInfoLocation, traits::*, types::*};
use crate::search::{
    project_routes, rank_routes, resolve_routes_near_stops, routes_for_stop, search_stops, RankMode,
};
use crate::spatial::tile::{lat_lon, GeoBox};

/// Log a failed index call and replace it with an empty value
fn collapse<T: Default>(result: Result<T>, log: impl FnOnce(&TransitError)) -> T {
    result.unwrap_or_else(|err| {
        log(&err);
        T::default()
    })
}

/// Stop and route search over one index reader
pub struct IndexRepository<R> {
    reader: R,
    config: SearchConfig,
}

impl<R: TransportIndexReader> IndexRepository<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            config: SearchConfig::default(),
        }
    }

    pub fn with_config(reader: R, config: SearchConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { reader, config })
    }

    pub fn reader(&self) -> &R {
        &self.reader
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn try_search_stops_in_box(
        &self,
        bbox: GeoBox,
        limit: i32,
        matcher: Option<&mut StopMatcher<'_>>,
    ) -> Result<Vec<TransportStop>> {
        search_stops(&self.reader, bbox, limit, matcher)
    }

    pub fn try_routes_for_stop(&self, stop: &TransportStop) -> Result<Vec<Arc<TransportRoute>>> {
        routes_for_stop(&self.reader, stop)
    }

    /// Search the tile-sized box around the origin and rank every route
    /// that can be boarded in it
    pub fn try_route_options_from(
        &self,
        latitude: f64,
        longitude: f64,
        target: Option<Point>,
        zoom: u8,
    ) -> Result<Vec<RouteInfoLocation>> {
        let started = Instant::now();
        let origin = lat_lon(latitude, longitude);
        let bbox = GeoBox::around(zoom, latitude, longitude, self.config.box_half_width_tiles);

        let stops = search_stops(&self.reader, bbox, self.config.stop_limit_i32(), None)?;
        let resolved = resolve_routes_near_stops(&self.reader, origin, &stops)?;

        let mut results = project_routes(&resolved, target);
        rank_routes(origin, RankMode::for_target(target), &mut results);

        debug!(
            latitude,
            longitude,
            zoom,
            elapsed_ms = started.elapsed().as_millis() as u64,
            found = results.len(),
            "route search done"
        );
        Ok(results)
    }
}

impl<R: TransportIndexReader> TransportIndexRepository for IndexRepository<R> {
    fn check_contains(&self, latitude: f64, longitude: f64) -> bool {
        self.reader.has_coverage(latitude, longitude)
    }

    fn check_contains_box(&self, bbox: GeoBox) -> bool {
        self.reader.has_coverage_box(bbox)
    }

    fn search_stops_in_box_with(
        &self,
        bbox: GeoBox,
        limit: i32,
        matcher: Option<&mut StopMatcher<'_>>,
    ) -> Vec<TransportStop> {
        collapse(self.try_search_stops_in_box(bbox, limit, matcher), |err| {
            error!(
                top = bbox.top,
                left = bbox.left,
                bottom = bbox.bottom,
                right = bbox.right,
                error = %err,
                "disk error during stop search"
            )
        })
    }

    fn routes_for_stop(&self, stop: &TransportStop) -> Vec<Arc<TransportRoute>> {
        collapse(self.try_routes_for_stop(stop), |err| {
            error!(
                stop = %stop.id,
                routes = ?stop.route_refs,
                error = %err,
                "disk error during route lookup"
            )
        })
    }

    fn route_options_from(
        &self,
        latitude: f64,
        longitude: f64,
        target: Option<Point>,
        zoom: u8,
    ) -> Vec<RouteInfoLocation> {
        collapse(
            self.try_route_options_from(latitude, longitude, target, zoom),
            |err| error!(latitude, longitude, zoom, error = %err, "disk error during route search"),
        )
    }

    fn accept_stop(&self, stop: &TransportStop) -> bool {
        self.reader.belongs_to_partition(stop)
    }

    fn close(&self) {
        if let Err(err) = self.reader.close() {
            warn!(error = %err, "failed to close transport index");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identifiers::StopId;
    use crate::models::types::Direction;
    use crate::spatial::queries::haversine_distance;
    use crate::testing::*;

    #[test]
    fn test_search_stops_in_box() {
        let repo = IndexRepository::new(scenario_index());
        let bbox = GeoBox::new(50.01, 14.39, 49.99, 14.41);

        let stops = repo.search_stops_in_box(bbox, -1);
        assert_eq!(stops.len(), 2);
        assert!(stops.iter().all(|s| bbox.contains(s.location)));
        assert_eq!(repo.search_stops_in_box(bbox, 1).len(), 1);
    }

    #[test]
    fn test_route_options_without_target() {
        let repo = IndexRepository::new(scenario_index());
        let origin = lat_lon(50.0, 14.4);

        // a zoom 15 tile around the origin reaches both stops
        let results = repo.route_options_from(50.0, 14.4, None, 15);
        let summary: Vec<_> = results
            .iter()
            .map(|r| (r.route().id.get(), r.start().id.get()))
            .collect();

        assert_eq!(summary, vec![(7, 1), (9, 2)]);
        assert!(results.iter().all(|r| r.direction() == Direction::Forward));
        assert!(results.iter().all(|r| r.distance_to_target().is_none()));
        assert!(
            haversine_distance(origin, results[0].start().location)
                <= haversine_distance(origin, results[1].start().location)
        );
    }

    #[test]
    fn test_route_options_with_target() {
        let repo = IndexRepository::new(scenario_index());
        let origin = lat_lon(50.0, 14.4);
        let target = lat_lon(50.003, 14.403);

        let results = repo.route_options_from(50.0, 14.4, Some(target), 15);
        assert_eq!(results.len(), 2);

        let first = &results[0];
        let nearest = first.nearest_to_target().unwrap();
        assert_eq!(first.route().id.get(), 7);
        assert_eq!(first.start().id, StopId::new(1));
        assert_eq!(nearest.stop.id, StopId::new(2));

        let expected = haversine_distance(origin, stop_a().location)
            + haversine_distance(stop_b().location, target);
        approx::assert_relative_eq!(first.total_distance(origin), expected, epsilon = 1e-6);
    }

    #[test]
    fn test_zoom_16_tile_only_reaches_a() {
        let repo = IndexRepository::new(scenario_index());

        // half a zoom 16 tile is ~0.0018 degrees of latitude here, so B is outside
        let results = repo.route_options_from(50.0, 14.4, None, 16);
        let summary: Vec<_> = results
            .iter()
            .map(|r| (r.route().id.get(), r.start().id.get()))
            .collect();

        assert_eq!(summary, vec![(7, 1)]);
    }

    #[test]
    fn test_dateline_search_stays_on_its_side() {
        let world = GeoBox::new(85.0, -180.0, -85.0, 180.0);
        let repo = IndexRepository::new(scenario_index().with_coverage(world));

        // the box edge stops at -180 instead of wrapping east
        assert!(repo.route_options_from(50.0, -179.9999, None, 16).is_empty());
        assert!(repo.route_options_from(50.0, 179.9999, None, 16).is_empty());
        assert!(repo
            .search_stops_in_box(GeoBox::new(50.01, 179.9, 49.99, -179.9), -1)
            .is_empty());
    }

    #[test]
    fn test_nothing_found_makes_no_route_lookup() {
        let reader = CountingReader::new(scenario_index());
        let repo = IndexRepository::new(reader);

        assert!(repo.route_options_from(10.0, 10.0, None, 16).is_empty());
        assert_eq!(repo.reader().route_calls(), 0);
    }

    #[test]
    fn test_failures_collapse_to_empty() {
        let repo = IndexRepository::new(FailingReader);
        let bbox = GeoBox::new(50.01, 14.39, 49.99, 14.41);

        assert!(repo.search_stops_in_box(bbox, -1).is_empty());
        assert!(repo.routes_for_stop(&stop_b()).is_empty());
        assert!(repo.route_options_from(50.0, 14.4, None, 15).is_empty());
        assert!(repo.try_search_stops_in_box(bbox, -1, None).is_err());
        assert!(repo.try_route_options_from(50.0, 14.4, None, 15).is_err());

        // close failures are only logged
        repo.close();
    }

    #[test]
    fn test_closed_index_answers_empty() {
        let repo = IndexRepository::new(scenario_index());
        repo.close();
        repo.close();

        assert!(repo.route_options_from(50.0, 14.4, None, 15).is_empty());
        assert!(matches!(
            repo.try_routes_for_stop(&stop_a()),
            Err(TransitError::IndexClosed)
        ));
    }

    #[test]
    fn test_containment_delegates() {
        let repo = IndexRepository::new(scenario_index());

        assert!(repo.check_contains(50.0015, 14.4015));
        assert!(!repo.check_contains(0.0, 0.0));
        assert!(repo.check_contains_box(GeoBox::new(50.01, 14.39, 49.99, 14.41)));
        assert!(repo.accept_stop(&stop_a()));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = SearchConfig::default().with_box_half_width(-1.0);
        assert!(IndexRepository::with_config(scenario_index(), config).is_err());
    }
}
