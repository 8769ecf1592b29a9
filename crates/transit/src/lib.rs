//! # transit-search
//!
//! Stop and route search over read-only, tile-partitioned transport indexes.
//!
//! ## Features
//!
//! - **Tile-aligned queries**: geographic boxes are quantized onto the index's 31-bit grid
//! - **Route options**: which routes can be boarded near a point, and where to get off for a target
//! - **Pluggable readers**: implement [`TransportIndexReader`] over your own index format
//! - **Multi-index**: query several region files as one with [`TransportIndexSet`]
//!
//! Index failures never reach the caller as errors from the
//! [`TransportIndexRepository`] methods; they are logged through `tracing`
//! and produce empty results. Use the `try_*` methods on
//! [`IndexRepository`] to observe them.
//!
//! ## Example
//!
//! ```
//! use transit_search::prelude::*;
//!
//! let a = TransportStop::new(StopId::new(1), "Main St", lat_lon(50.001, 14.401), vec![RouteRef::new(7)]);
//! let b = TransportStop::new(StopId::new(2), "Park", lat_lon(50.002, 14.402), vec![RouteRef::new(7)]);
//! let route = TransportRoute::new(RouteRef::new(7), "7", RouteType::Tram, vec![a.clone(), b.clone()], vec![b.clone(), a.clone()]);
//!
//! let index = StaticTransportIndex::from_data(vec![a, b], vec![route]);
//! let repository = IndexRepository::new(index);
//!
//! // Which routes can take me from here towards the park?
//! let options = repository.route_options_from(50.0, 14.4, Some(lat_lon(50.002, 14.402)), 15);
//! assert_eq!(options[0].start().name.as_ref(), "Main St");
//! assert_eq!(options[0].nearest_to_target().unwrap().stop.name.as_ref(), "Park");
//! ```

pub mod config;
pub mod identifiers;
pub mod models;
pub mod provider;
pub mod repository;
pub mod search;
pub mod spatial;

#[cfg(test)]
mod testing;

// Re-exports for convenience
pub mod prelude {
    pub use crate::config::SearchConfig;
    pub use crate::identifiers::*;
    pub use crate::models::{
        request::StopSearchRequest,
        route_info::{NearestStop, RouteInfoLocation},
        traits::*,
        types::*,
    };
    pub use crate::provider::StaticTransportIndex;
    pub use crate::repository::{IndexRepository, TransportIndexSet};
    pub use crate::spatial::tile::{lat_lon, GeoBox, TileBox};
}

pub use prelude::*;
