//! Spatial indexing, tile coordinates and distance utilities.

pub mod index;
pub mod queries;
pub mod tile;

pub use queries::{distance_to_stop, haversine_distance, nearest_stop};
pub use tile::{lat_lon, GeoBox, TileBox};
