//! Transport index records, search requests, results and traits.

pub mod request;
pub mod route_info;
pub mod traits;
pub mod types;

// Re-exports for convenience
pub use request::StopSearchRequest;
pub use route_info::{NearestStop, RouteInfoLocation};
pub use traits::{StopMatcher, TransportIndexReader, TransportIndexRepository};
pub use types::{Direction, Result, RouteType, TransitError, TransportRoute, TransportStop};
