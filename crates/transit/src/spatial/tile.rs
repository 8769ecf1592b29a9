//! Web Mercator tile coordinates.
//!
//! The transport index partitions its data on a 31-bit tile grid (zoom 31),
//! so every geographic box has to be quantized onto that grid before it is
//! handed to a reader. Fractional tile numbers at lower zooms are used to
//! build the search box around a query point.

use std::f64::consts::PI;

use geo::Point;

/// Latitude limit of the Web Mercator projection
pub const MAX_LATITUDE: f64 = 85.0511;
pub const MIN_LATITUDE: f64 = -MAX_LATITUDE;

/// Zoom level of the index's fixed-point grid
pub const INDEX_ZOOM: u8 = 31;

const INDEX_TILES: f64 = (1u64 << INDEX_ZOOM) as f64;

/// Build a `geo` point from latitude/longitude order
pub fn lat_lon(latitude: f64, longitude: f64) -> Point {
    Point::new(longitude, latitude)
}

/// Wrap latitude into [-90, 90] and clamp to the projection limit
pub fn check_latitude(mut latitude: f64) -> f64 {
    if !latitude.is_finite() {
        return 0.0;
    }
    while !(-90.0..=90.0).contains(&latitude) {
        if latitude < 0.0 {
            latitude += 180.0;
        } else {
            latitude -= 180.0;
        }
    }
    latitude.clamp(MIN_LATITUDE, MAX_LATITUDE)
}

/// Wrap longitude into [-180, 180]
pub fn check_longitude(mut longitude: f64) -> f64 {
    if !longitude.is_finite() {
        return 0.0;
    }
    while !(-180.0..=180.0).contains(&longitude) {
        if longitude < 0.0 {
            longitude += 360.0;
        } else {
            longitude -= 360.0;
        }
    }
    longitude
}

fn pow_zoom(zoom: u8) -> f64 {
    2f64.powi(zoom as i32)
}

fn mercator_y(latitude: f64) -> f64 {
    let rad = latitude.to_radians();
    let eval = (rad.tan() + 1.0 / rad.cos()).ln();
    if eval.is_finite() {
        return eval;
    }
    let edge: f64 = if latitude < 0.0 { -89.9 } else { 89.9 };
    let rad = edge.to_radians();
    (rad.tan() + 1.0 / rad.cos()).ln()
}

/// Fractional tile column of `longitude` at `zoom`
pub fn tile_x(zoom: u8, longitude: f64) -> f64 {
    let longitude = check_longitude(longitude);
    let pow = pow_zoom(zoom);
    let dz = (longitude + 180.0) / 360.0 * pow;
    if dz >= pow {
        return pow - 0.01;
    }
    dz
}

/// Fractional tile row of `latitude` at `zoom`; row 0 is the northern edge
pub fn tile_y(zoom: u8, latitude: f64) -> f64 {
    let latitude = check_latitude(latitude);
    (1.0 - mercator_y(latitude) / PI) / 2.0 * pow_zoom(zoom)
}

pub fn tile_to_longitude(zoom: u8, x: f64) -> f64 {
    x / pow_zoom(zoom) * 360.0 - 180.0
}

pub fn tile_to_latitude(zoom: u8, y: f64) -> f64 {
    (PI * (1.0 - 2.0 * y / pow_zoom(zoom))).sinh().atan().to_degrees()
}

/// Column on the index grid
pub fn tile31_x(longitude: f64) -> u32 {
    let longitude = check_longitude(longitude);
    let x = ((longitude + 180.0) / 360.0 * INDEX_TILES) as u64;
    x.min(INDEX_TILES as u64 - 1) as u32
}

/// Row on the index grid
pub fn tile31_y(latitude: f64) -> u32 {
    let latitude = check_latitude(latitude);
    let y = ((1.0 - mercator_y(latitude) / PI) / 2.0 * INDEX_TILES).max(0.0) as u64;
    y.min(INDEX_TILES as u64 - 1) as u32
}

pub fn tile31_to_longitude(x: u32) -> f64 {
    tile_to_longitude(INDEX_ZOOM, x as f64)
}

pub fn tile31_to_latitude(y: u32) -> f64 {
    tile_to_latitude(INDEX_ZOOM, y as f64)
}

/// Geographic bounding box given by its north-west and south-east corners
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeoBox {
    pub top: f64,
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
}

impl GeoBox {
    pub fn new(top: f64, left: f64, bottom: f64, right: f64) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }

    /// Box spanning `half_width` tiles on each side of a point at `zoom`.
    ///
    /// With the usual half width of 0.5 this is one tile's worth of area
    /// centred on the point.
    pub fn around(zoom: u8, latitude: f64, longitude: f64, half_width: f64) -> Self {
        let x = tile_x(zoom, longitude);
        let y = tile_y(zoom, latitude);
        // edges stop at the map border instead of wrapping onto the far side
        Self {
            top: tile_to_latitude(zoom, y - half_width),
            left: tile_to_longitude(zoom, x - half_width).max(-180.0),
            bottom: tile_to_latitude(zoom, y + half_width),
            right: tile_to_longitude(zoom, x + half_width).min(180.0),
        }
    }

    /// A box whose left edge is east of its right edge spans the antimeridian
    pub fn crosses_antimeridian(&self) -> bool {
        self.left > self.right
    }

    /// Longitude intervals covered by the box, split at the antimeridian
    fn longitude_ranges(&self) -> impl Iterator<Item = (f64, f64)> {
        let ranges = if self.crosses_antimeridian() {
            [Some((self.left, 180.0)), Some((-180.0, self.right))]
        } else {
            [Some((self.left, self.right)), None]
        };
        ranges.into_iter().flatten()
    }

    pub fn contains(&self, point: Point) -> bool {
        let (lon, lat) = (point.x(), point.y());
        lat <= self.top
            && lat >= self.bottom
            && self
                .longitude_ranges()
                .any(|(left, right)| lon >= left && lon <= right)
    }

    pub fn intersects(&self, other: &GeoBox) -> bool {
        self.bottom <= other.top
            && other.bottom <= self.top
            && self.longitude_ranges().any(|(left, right)| {
                other
                    .longitude_ranges()
                    .any(|(other_left, other_right)| left <= other_right && other_left <= right)
            })
    }

    /// Smallest box containing every point; `None` when there are none
    pub fn enclosing(points: impl IntoIterator<Item = Point>) -> Option<Self> {
        points.into_iter().fold(None, |acc, p| {
            let (lon, lat) = (p.x(), p.y());
            Some(match acc {
                None => Self::new(lat, lon, lat, lon),
                Some(b) => Self::new(
                    b.top.max(lat),
                    b.left.min(lon),
                    b.bottom.min(lat),
                    b.right.max(lon),
                ),
            })
        })
    }
}

/// A box on the index's 31-bit tile grid (edges inclusive)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TileBox {
    pub left: u32,
    pub right: u32,
    pub top: u32,
    pub bottom: u32,
}

impl TileBox {
    pub fn crosses_antimeridian(&self) -> bool {
        self.left > self.right
    }

    /// Column intervals covered by the box, split at the antimeridian
    pub fn column_ranges(&self) -> impl Iterator<Item = (u32, u32)> {
        let ranges = if self.crosses_antimeridian() {
            [Some((self.left, INDEX_TILES as u32 - 1)), Some((0, self.right))]
        } else {
            [Some((self.left, self.right)), None]
        };
        ranges.into_iter().flatten()
    }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        y >= self.top
            && y <= self.bottom
            && self
                .column_ranges()
                .any(|(left, right)| x >= left && x <= right)
    }
}

impl From<GeoBox> for TileBox {
    fn from(b: GeoBox) -> Self {
        Self {
            left: tile31_x(b.left),
            right: tile31_x(b.right),
            top: tile31_y(b.top),
            bottom: tile31_y(b.bottom),
        }
    }
}
