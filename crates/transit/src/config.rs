//! Tunables for route searches.

use crate::models::types::{Result, TransitError};
use crate::spatial::tile::INDEX_ZOOM;

/// Search parameters shared by a repository's queries
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SearchConfig {
    /// Tiles on each side of the origin covered by a route search
    pub box_half_width_tiles: f64,
    /// Zoom used when a caller has no map zoom to offer
    pub default_zoom: u8,
    /// Cap on stops fetched for a route search; `None` is unbounded
    pub stop_limit: Option<usize>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            box_half_width_tiles: 0.5,
            default_zoom: 15,
            stop_limit: None,
        }
    }
}

impl SearchConfig {
    pub fn with_box_half_width(mut self, tiles: f64) -> Self {
        self.box_half_width_tiles = tiles;
        self
    }

    pub fn with_default_zoom(mut self, zoom: u8) -> Self {
        self.default_zoom = zoom;
        self
    }

    pub fn with_stop_limit(mut self, limit: Option<usize>) -> Self {
        self.stop_limit = limit;
        self
    }

    /// Signed limit as the index readers expect it (negative is unbounded)
    pub fn stop_limit_i32(&self) -> i32 {
        self.stop_limit
            .map(|limit| i32::try_from(limit).unwrap_or(i32::MAX))
            .unwrap_or(-1)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.box_half_width_tiles.is_finite() || self.box_half_width_tiles <= 0.0 {
            return Err(TransitError::InvalidData(format!(
                "box half width must be a positive number of tiles, got {}",
                self.box_half_width_tiles
            )));
        }
        if self.default_zoom > INDEX_ZOOM {
            return Err(TransitError::InvalidData(format!(
                "zoom {} is deeper than the index grid ({})",
                self.default_zoom, INDEX_ZOOM
            )));
        }
        Ok(())
    }
}
