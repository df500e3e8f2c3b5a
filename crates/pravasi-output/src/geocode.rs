//! Geocoding seam for artifact annotation.
//!
//! Coordinates are a visualization concern: the pipeline never looks at
//! them, and the concrete lookup table lives with the application, not
//! here. The artifact only needs "some function from district to a point".

use serde::{Deserialize, Serialize};

/// A longitude/latitude pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Longitude in degrees.
    pub lng: f64,
    /// Latitude in degrees.
    pub lat: f64,
}

impl GeoPoint {
    /// Create a new point.
    pub const fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }
}

/// Maps a district name to an origin coordinate.
///
/// Implementations must be total: unmapped districts get an explicit
/// default point rather than an error, so annotation can never fail a run.
pub trait Geocoder {
    /// Locate a district. `district` is already trimmed and lower-cased by
    /// the pipeline.
    fn locate(&self, district: &str) -> GeoPoint;
}
