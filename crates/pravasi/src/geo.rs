//! Static district geocoding.
//!
//! A lookup table for map visualization only; no pipeline stage reads
//! coordinates. Unmapped districts fall back to an explicit default point
//! near the national center so they still render somewhere sensible.

use pravasi_output::{GeoPoint, Geocoder};

/// Fallback origin for districts not in the table.
pub const DEFAULT_ORIGIN: GeoPoint = GeoPoint::new(78.0, 20.5);

/// Demo destination all arcs point at (Bangalore).
pub const DESTINATION: GeoPoint = GeoPoint::new(77.5946, 12.9716);

/// Geocoder backed by a built-in table of district centroids.
#[derive(Debug, Default, Clone, Copy)]
pub struct StaticGeocoder;

impl StaticGeocoder {
    /// Look up a known district, `None` for unmapped ones.
    ///
    /// Expects a trimmed, lower-cased name; callers going through
    /// [`Geocoder::locate`] get normalization for free.
    pub fn lookup(district: &str) -> Option<GeoPoint> {
        let point = match district {
            "bangalore" => GeoPoint::new(77.5946, 12.9716),
            "patna" => GeoPoint::new(85.1376, 25.5941),
            "mumbai" => GeoPoint::new(72.8777, 19.0760),
            "delhi" => GeoPoint::new(77.2090, 28.6139),
            "yadgir" => GeoPoint::new(77.1442, 16.7613),
            "udupi" => GeoPoint::new(74.7421, 13.3409),
            "mysore" => GeoPoint::new(76.6394, 12.2958),
            "belagavi" => GeoPoint::new(74.5089, 15.8497),
            "kalaburagi" => GeoPoint::new(76.8343, 17.3297),
            "dharwad" => GeoPoint::new(75.0078, 15.4589),
            "ballari" => GeoPoint::new(76.9214, 15.1394),
            "bidar" => GeoPoint::new(77.5039, 17.9104),
            _ => return None,
        };
        Some(point)
    }
}

impl Geocoder for StaticGeocoder {
    fn locate(&self, district: &str) -> GeoPoint {
        Self::lookup(district.trim().to_lowercase().as_str()).unwrap_or(DEFAULT_ORIGIN)
    }
}
