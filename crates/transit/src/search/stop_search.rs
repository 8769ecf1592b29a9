//! Geographic box searches against an index reader.

use std::time::Instant;

use tracing::debug;

use crate::models::{request::StopSearchRequest, traits::*, types::*};
use crate::spatial::tile::GeoBox;

/// Stops inside `bbox`, read through `reader`.
///
/// The box is quantized onto the index grid first, so stops sitting right on
/// an edge may fall either side of it. A negative `limit` is unbounded.
pub fn search_stops<R: TransportIndexReader + ?Sized>(
    reader: &R,
    bbox: GeoBox,
    limit: i32,
    matcher: Option<&mut StopMatcher<'_>>,
) -> Result<Vec<TransportStop>> {
    let started = Instant::now();
    let request = StopSearchRequest::from_box(bbox, limit);

    let stops = reader.search_stops(&request, matcher)?;

    debug!(
        top = bbox.top,
        left = bbox.left,
        elapsed_ms = started.elapsed().as_millis() as u64,
        found = stops.len(),
        "stop search done"
    );
    Ok(stops)
}
