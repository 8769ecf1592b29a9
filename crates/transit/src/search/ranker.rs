//! Orders route results for presentation.

use geo::Point;

use crate::models::route_info::RouteInfoLocation;
use crate::spatial::queries::distance_to_stop;

/// How results are scored
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RankMode {
    /// Distance from the origin to the boarding stop
    Boarding,
    /// Boarding distance plus the gap left between the route and the target
    ViaTarget,
}

impl RankMode {
    pub fn for_target(target: Option<Point>) -> Self {
        match target {
            Some(_) => Self::ViaTarget,
            None => Self::Boarding,
        }
    }

    /// Score of one result, lower is better
    pub fn score(self, origin: Point, info: &RouteInfoLocation) -> f64 {
        match self {
            Self::Boarding => distance_to_stop(origin, info.start()),
            Self::ViaTarget => info.total_distance(origin),
        }
    }
}

/// Sort `results` ascending by score.
///
/// The sort is stable, so equal scores keep their incoming order.
pub fn rank_routes(origin: Point, mode: RankMode, results: &mut [RouteInfoLocation]) {
    results.sort_by(|a, b| mode.score(origin, a).total_cmp(&mode.score(origin, b)));
}
