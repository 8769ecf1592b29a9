//! Searches spanning several opened indexes, one per region file.

use std::collections::HashSet;
use std::ops::ControlFlow;
use std::sync::Arc;

use geo::Point;
use tracing::debug;

use crate::config::SearchConfig;
use crate::models::{route_info::RouteInfoLocation, traits::*, types::*};
use crate::search::{rank_routes, RankMode};
use crate::spatial::tile::{lat_lon, GeoBox};

/// A group of repositories queried as one
pub struct TransportIndexSet {
    repositories: Vec<Box<dyn TransportIndexRepository>>,
    config: SearchConfig,
}

impl TransportIndexSet {
    pub fn new() -> Self {
        Self {
            repositories: Vec::new(),
            config: SearchConfig::default(),
        }
    }

    pub fn with_config(config: SearchConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            repositories: Vec::new(),
            config,
        })
    }

    pub fn add(&mut self, repository: impl TransportIndexRepository + 'static) {
        self.repositories.push(Box::new(repository));
    }

    pub fn len(&self) -> usize {
        self.repositories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.repositories.is_empty()
    }

    /// Route options at the configured default zoom
    pub fn route_options_near(&self, latitude: f64, longitude: f64, target: Option<Point>) -> Vec<RouteInfoLocation> {
        self.route_options_from(latitude, longitude, target, self.config.default_zoom)
    }
}

impl Default for TransportIndexSet {
    fn default() -> Self {
        Self::new()
    }
}

impl TransportIndexRepository for TransportIndexSet {
    fn check_contains(&self, latitude: f64, longitude: f64) -> bool {
        self.repositories
            .iter()
            .any(|r| r.check_contains(latitude, longitude))
    }

    fn check_contains_box(&self, bbox: GeoBox) -> bool {
        self.repositories.iter().any(|r| r.check_contains_box(bbox))
    }

    /// Stops from every covering repository; a stop id found in more than
    /// one keeps the copy from the repository added first
    fn search_stops_in_box_with(
        &self,
        bbox: GeoBox,
        limit: i32,
        mut matcher: Option<&mut StopMatcher<'_>>,
    ) -> Vec<TransportStop> {
        let limit = usize::try_from(limit).ok();
        let mut seen = HashSet::new();
        let mut found = Vec::new();
        let mut stopped = false;

        for repository in self.repositories.iter().filter(|r| r.check_contains_box(bbox)) {
            if stopped || limit.is_some_and(|limit| found.len() >= limit) {
                break;
            }
            let wanted = limit.map(|limit| limit - found.len());

            // only stops no earlier repository returned count towards the limit
            let mut fresh = HashSet::new();
            let mut accept_new = |stop: &TransportStop| {
                if seen.contains(&stop.id) || !fresh.insert(stop.id) {
                    return ControlFlow::Continue(());
                }
                if let Some(matcher) = matcher.as_deref_mut() {
                    if matcher(stop).is_break() {
                        stopped = true;
                        return ControlFlow::Break(());
                    }
                }
                if wanted.is_some_and(|wanted| fresh.len() >= wanted) {
                    return ControlFlow::Break(());
                }
                ControlFlow::Continue(())
            };
            let accept: &mut StopMatcher<'_> = &mut accept_new;
            let stops = repository.search_stops_in_box_with(bbox, -1, Some(accept));

            found.extend(stops.into_iter().filter(|s| seen.insert(s.id)));
        }

        if let Some(limit) = limit {
            found.truncate(limit);
        }
        found
    }

    fn routes_for_stop(&self, stop: &TransportStop) -> Vec<Arc<TransportRoute>> {
        self.repositories
            .iter()
            .find(|r| r.accept_stop(stop))
            .map(|r| r.routes_for_stop(stop))
            .unwrap_or_default()
    }

    fn route_options_from(
        &self,
        latitude: f64,
        longitude: f64,
        target: Option<Point>,
        zoom: u8,
    ) -> Vec<RouteInfoLocation> {
        let mut results: Vec<RouteInfoLocation> = self
            .repositories
            .iter()
            .filter(|r| r.check_contains(latitude, longitude))
            .flat_map(|r| r.route_options_from(latitude, longitude, target, zoom))
            .collect();

        rank_routes(lat_lon(latitude, longitude), RankMode::for_target(target), &mut results);
        debug!(repositories = self.repositories.len(), found = results.len(), "merged route search");
        results
    }

    fn accept_stop(&self, stop: &TransportStop) -> bool {
        self.repositories.iter().any(|r| r.accept_stop(stop))
    }

    fn close(&self) {
        for repository in &self.repositories {
            repository.close();
        }
    }
}
