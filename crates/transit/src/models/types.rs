//! Core data types and enums for transport index records.

use std::sync::Arc;

use geo::Point;

use crate::identifiers::*;

// ============================================================================
// Enums
// ============================================================================

/// Vehicle type of a transport route, as tagged in the index
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum RouteType {
    Bus = 0,
    Tram = 1,
    Trolleybus = 2,
    Subway = 3,
    Train = 4,
    Ferry = 5,
    SharedTaxi = 6,
    Other = 7,
}

impl RouteType {
    /// Parse the textual type tag stored on route records.
    ///
    /// Unknown tags map to [`RouteType::Other`] rather than failing; the index
    /// carries whatever the source data used.
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "bus" => Self::Bus,
            "tram" => Self::Tram,
            "trolleybus" => Self::Trolleybus,
            "subway" | "metro" => Self::Subway,
            "train" | "railway" | "light_rail" => Self::Train,
            "ferry" => Self::Ferry,
            "share_taxi" | "shared_taxi" => Self::SharedTaxi,
            _ => Self::Other,
        }
    }
}

/// Which of a route's two stop sequences is being followed
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Direction {
    Forward = 0,
    Backward = 1,
}

impl Direction {
    pub const BOTH: [Direction; 2] = [Direction::Forward, Direction::Backward];

    pub fn is_forward(self) -> bool {
        self == Direction::Forward
    }
}

// ============================================================================
// Data Structures
// ============================================================================

/// A stop record read from the transport index.
///
/// `location` follows the `geo` convention: x is longitude, y is latitude.
#[derive(Clone, Debug, PartialEq)]
pub struct TransportStop {
    pub id: StopId,
    pub name: Arc<str>,
    pub location: Point,
    pub route_refs: Vec<RouteRef>,
}

impl TransportStop {
    pub fn new(
        id: StopId,
        name: impl Into<Arc<str>>,
        location: Point,
        route_refs: Vec<RouteRef>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            location,
            route_refs,
        }
    }

    pub fn latitude(&self) -> f64 {
        self.location.y()
    }

    pub fn longitude(&self) -> f64 {
        self.location.x()
    }

    /// Whether this stop is served by the given route
    pub fn serves(&self, route: RouteRef) -> bool {
        self.route_refs.contains(&route)
    }
}

/// A route record: public labels plus the stop sequence in each direction.
#[derive(Clone, Debug, PartialEq)]
pub struct TransportRoute {
    pub id: RouteRef,
    pub reference: Arc<str>,
    pub name: Arc<str>,
    pub route_type: RouteType,
    pub operator: Option<Arc<str>>,
    pub forward_stops: Vec<TransportStop>,
    pub backward_stops: Vec<TransportStop>,
}

impl TransportRoute {
    pub fn new(
        id: RouteRef,
        reference: impl Into<Arc<str>>,
        route_type: RouteType,
        forward_stops: Vec<TransportStop>,
        backward_stops: Vec<TransportStop>,
    ) -> Self {
        let reference = reference.into();
        Self {
            id,
            name: reference.clone(),
            reference,
            route_type,
            operator: None,
            forward_stops,
            backward_stops,
        }
    }

    pub fn with_name(mut self, name: impl Into<Arc<str>>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_operator(mut self, operator: impl Into<Arc<str>>) -> Self {
        self.operator = Some(operator.into());
        self
    }

    /// Stop sequence for one direction of travel
    pub fn stops(&self, direction: Direction) -> &[TransportStop] {
        match direction {
            Direction::Forward => &self.forward_stops,
            Direction::Backward => &self.backward_stops,
        }
    }

    /// A well-formed index never stores a route with an empty direction
    pub fn is_well_formed(&self) -> bool {
        !self.forward_stops.is_empty() && !self.backward_stops.is_empty()
    }
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum TransitError {
    #[error("Index I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Index handle is closed")]
    IndexClosed,

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl TransitError {
    /// Failures that mean the index itself could not be read
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io(_) | Self::IndexClosed)
    }
}

pub type Result<T> = std::result::Result<T, TransitError>;
