//! Box search requests handed to index readers.

use crate::spatial::tile::{GeoBox, TileBox};

/// A stop search on the index grid
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StopSearchRequest {
    pub tiles: TileBox,
    /// Maximum number of stops to return; `None` is unbounded
    pub limit: Option<usize>,
}

impl StopSearchRequest {
    pub fn new(tiles: TileBox, limit: Option<usize>) -> Self {
        Self { tiles, limit }
    }

    /// Quantize a geographic box onto the index grid.
    ///
    /// A negative `limit` means no limit.
    pub fn from_box(bbox: GeoBox, limit: i32) -> Self {
        Self::new(TileBox::from(bbox), usize::try_from(limit).ok())
    }

    /// Whether `found` results already satisfy the limit
    pub fn is_full(&self, found: usize) -> bool {
        self.limit.is_some_and(|limit| found >= limit)
    }
}
