//! The route search pipeline.
//!
//! A query flows through the stages in order: [`stop_search`] finds stops
//! in a box, [`resolver`] picks one stop per route and loads the routes,
//! [`projector`] follows each route onward from that stop, and [`ranker`]
//! orders the results.

pub mod projector;
pub mod ranker;
pub mod resolver;
pub mod stop_search;

pub use projector::project_routes;
pub use ranker::{rank_routes, RankMode};
pub use resolver::{resolve_routes_near_stops, routes_for_stop, ResolvedRoute};
pub use stop_search::search_stops;
