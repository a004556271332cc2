//! Spherical geometry: great-circle distance, initial bearing, and
//! 16-point compass classification.
//!
//! All public functions take decimal degrees and use the mean Earth
//! radius of 6371 km.

use std::f64::consts::PI;

const DEG: f64 = PI / 180.0;

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// The 16 compass points, clockwise from north in 22.5-degree sectors.
pub const COMPASS_POINTS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE",
    "S", "SSW", "SW", "WSW", "W", "WNW", "NW", "NNW",
];

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    /// Construct a validated point.
    ///
    /// Rejects latitude outside [-90, 90] and longitude outside [-180, 180].
    /// The range checks are NaN-rejecting, so meaningless values never reach
    /// the distance formulas.
    pub fn new(lat: f64, lon: f64) -> Option<Self> {
        if (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lon) {
            Some(Self { lat, lon })
        } else {
            None
        }
    }
}

/// Great-circle distance between two points in kilometers (haversine).
pub fn distance_km(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let dlat = (b.lat - a.lat) * DEG;
    let dlon = (b.lon - a.lon) * DEG;
    let lat1 = a.lat * DEG;
    let lat2 = b.lat * DEG;

    let h = (dlat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().atan2((1.0 - h).sqrt())
}

/// Initial bearing from `a` toward `b` in degrees, normalized to [0, 360).
///
/// Coincident points yield atan2(0, 0) = 0, i.e. due north.
pub fn initial_bearing_deg(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let lat1 = a.lat * DEG;
    let lat2 = b.lat * DEG;
    let dlon = (b.lon - a.lon) * DEG;

    let x = dlon.sin() * lat2.cos();
    let y = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * dlon.cos();

    normalize_degrees(x.atan2(y) / DEG)
}

/// Map a bearing in degrees to one of the 16 compass labels.
///
/// Sector index = round(bearing / 22.5) mod 16, so 359.9 wraps back to "N".
pub fn compass_direction(bearing_deg: f64) -> &'static str {
    let sector = (normalize_degrees(bearing_deg) / 22.5).round() as usize % 16;
    COMPASS_POINTS[sector]
}

fn normalize_degrees(deg: f64) -> f64 {
    let mut d = deg % 360.0;
    if d < 0.0 {
        d += 360.0;
    }
    d
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn p(lat: f64, lon: f64) -> GeoPoint {
        GeoPoint { lat, lon }
    }

    #[test]
    fn test_point_validation() {
        assert!(GeoPoint::new(59.33, 18.07).is_some());
        assert!(GeoPoint::new(90.0, 180.0).is_some());
        assert!(GeoPoint::new(-90.0, -180.0).is_some());
        assert!(GeoPoint::new(90.1, 0.0).is_none());
        assert!(GeoPoint::new(0.0, -180.5).is_none());
        assert!(GeoPoint::new(f64::NAN, 0.0).is_none());
        assert!(GeoPoint::new(0.0, f64::NAN).is_none());
    }

    #[test]
    fn test_distance_zero_at_coincident_points() {
        let d = distance_km(&p(35.0, 139.0), &p(35.0, 139.0));
        assert_abs_diff_eq!(d, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_distance_one_degree_of_longitude_at_equator() {
        // Reference value: ~111.2 km per degree along the equator.
        let d = distance_km(&p(0.0, 0.0), &p(0.0, 1.0));
        assert_abs_diff_eq!(d, 111.2, epsilon = 0.5);
    }

    #[test]
    fn test_distance_symmetric() {
        let a = p(37.7749, -122.4194);
        let b = p(34.0522, -118.2437);
        assert_abs_diff_eq!(distance_km(&a, &b), distance_km(&b, &a), epsilon = 1e-9);
    }

    #[test]
    fn test_distance_san_francisco_to_los_angeles() {
        let d = distance_km(&p(37.7749, -122.4194), &p(34.0522, -118.2437));
        assert_abs_diff_eq!(d, 559.1, epsilon = 3.0);
    }

    #[test]
    fn test_bearing_cardinal_directions() {
        let origin = p(0.0, 0.0);
        assert_abs_diff_eq!(initial_bearing_deg(&origin, &p(1.0, 0.0)), 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(initial_bearing_deg(&origin, &p(0.0, 1.0)), 90.0, epsilon = 1e-9);
        assert_abs_diff_eq!(initial_bearing_deg(&p(1.0, 0.0), &origin), 180.0, epsilon = 1e-9);
        assert_abs_diff_eq!(initial_bearing_deg(&p(0.0, 1.0), &origin), 270.0, epsilon = 1e-9);
    }

    #[test]
    fn test_bearing_at_singularity_is_north() {
        let a = p(12.34, 56.78);
        let bearing = initial_bearing_deg(&a, &a);
        assert_abs_diff_eq!(bearing, 0.0, epsilon = 1e-9);
        assert_eq!(compass_direction(bearing), "N");
    }

    #[test]
    fn test_compass_anchors() {
        assert_eq!(compass_direction(0.0), "N");
        assert_eq!(compass_direction(45.0), "NE");
        assert_eq!(compass_direction(90.0), "E");
        assert_eq!(compass_direction(180.0), "S");
        assert_eq!(compass_direction(270.0), "W");
        assert_eq!(compass_direction(359.9), "N");
    }

    #[test]
    fn test_compass_sector_boundaries() {
        // Sectors are 22.5 degrees wide, centered on each label.
        assert_eq!(compass_direction(11.2), "N");
        assert_eq!(compass_direction(11.3), "NNE");
        assert_eq!(compass_direction(348.7), "NNW");
        assert_eq!(compass_direction(348.8), "N");
    }

    #[test]
    fn test_compass_total_over_full_circle() {
        // Every bearing in [0, 360) maps to exactly one of the 16 labels,
        // and all 16 labels are reachable.
        let mut seen = std::collections::HashSet::new();
        let mut bearing = 0.0;
        while bearing < 360.0 {
            let label = compass_direction(bearing);
            assert!(COMPASS_POINTS.contains(&label));
            seen.insert(label);
            bearing += 0.1;
        }
        assert_eq!(seen.len(), 16);
    }

    #[test]
    fn test_compass_normalizes_out_of_range_bearings() {
        assert_eq!(compass_direction(360.0), "N");
        assert_eq!(compass_direction(450.0), "E");
        assert_eq!(compass_direction(-90.0), "W");
    }
}
