//! R-tree nodes for spatial indexing.
//!
//! Stops are placed in the tree by their position on the index's 31-bit tile
//! grid, so a tile box search is an envelope lookup with no reprojection.

use std::sync::Arc;

use rstar::{RTreeObject, AABB};

use crate::models::types::TransportStop;
use crate::spatial::tile::{tile31_x, tile31_y, TileBox};

// ============================================================================
// Stop Spatial Node
// ============================================================================

#[derive(Clone, Debug)]
pub struct StopNode {
    pub stop: Arc<TransportStop>,
    point: [f64; 2],
}

impl StopNode {
    pub fn new(stop: Arc<TransportStop>) -> Self {
        let point = [
            tile31_x(stop.longitude()) as f64,
            tile31_y(stop.latitude()) as f64,
        ];
        Self { stop, point }
    }

    pub fn tile_x(&self) -> u32 {
        self.point[0] as u32
    }

    pub fn tile_y(&self) -> u32 {
        self.point[1] as u32
    }
}

impl RTreeObject for StopNode {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

/// Envelopes covering a tile box, edges included.
///
/// A box that crosses the antimeridian yields one envelope per side.
pub fn tile_envelopes(tiles: &TileBox) -> Vec<AABB<[f64; 2]>> {
    tiles
        .column_ranges()
        .map(|(left, right)| {
            AABB::from_corners(
                [left as f64, tiles.top as f64],
                [right as f64, tiles.bottom as f64],
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identifiers::StopId;
    use crate::spatial::tile::{lat_lon, GeoBox};
    use rstar::RTree;

    #[test]
    fn test_envelope_lookup_matches_tile_box() {
        let inside = Arc::new(TransportStop::new(StopId::new(1), "in", lat_lon(50.001, 14.401), vec![]));
        let outside = Arc::new(TransportStop::new(StopId::new(2), "out", lat_lon(50.2, 14.401), vec![]));
        let tree = RTree::bulk_load(vec![StopNode::new(inside), StopNode::new(outside)]);

        let tiles = TileBox::from(GeoBox::new(50.01, 14.39, 49.99, 14.41));
        let envelopes = tile_envelopes(&tiles);
        assert_eq!(envelopes.len(), 1);

        let found: Vec<_> = tree
            .locate_in_envelope(&envelopes[0])
            .map(|node| node.stop.id)
            .collect();

        assert_eq!(found, vec![StopId::new(1)]);
    }

    #[test]
    fn test_envelopes_split_at_antimeridian() {
        let stop = |id, lon| Arc::new(TransportStop::new(StopId::new(id), "s", lat_lon(50.0, lon), vec![]));
        let tree = RTree::bulk_load(vec![
            StopNode::new(stop(1, 14.4)),
            StopNode::new(stop(2, 179.95)),
            StopNode::new(stop(3, -179.95)),
        ]);

        let tiles = TileBox::from(GeoBox::new(50.01, 179.9, 49.99, -179.9));
        let envelopes = tile_envelopes(&tiles);
        assert_eq!(envelopes.len(), 2);

        let mut found: Vec<_> = envelopes
            .iter()
            .flat_map(|envelope| tree.locate_in_envelope(envelope))
            .map(|node| node.stop.id.get())
            .collect();
        found.sort();

        assert_eq!(found, vec![2, 3]);
    }

    #[test]
    fn test_node_keeps_grid_position() {
        let stop = Arc::new(TransportStop::new(StopId::new(1), "a", lat_lon(50.0, 14.4), vec![]));
        let node = StopNode::new(stop);

        assert_eq!(node.tile_x(), tile31_x(14.4));
        assert_eq!(node.tile_y(), tile31_y(50.0));
    }
}
