//! Core types for the fault-line proximity subsystem.

use crate::geo::GeoPoint;
use serde::Serialize;
use std::fmt;

/// A candidate fault feature from the provider, reduced to a single
/// representative vertex. Transient; constructed per request and discarded.
#[derive(Debug, Clone)]
pub struct FaultFeature {
    pub name: Option<String>,
    pub slip_type: Option<String>,
    pub point: GeoPoint,
}

/// A provider batch: the parseable features plus a count of the ones
/// that were skipped for missing or unusable geometry.
#[derive(Debug, Default)]
pub struct FetchedFeatures {
    pub features: Vec<FaultFeature>,
    pub skipped: usize,
}

/// Representative coordinates of a ranked fault, in the wire shape.
#[derive(Debug, Clone, Serialize)]
pub struct ResultCoordinates {
    pub lat: f64,
    pub lng: f64,
}

/// A ranked fault line, nearest-first in the result sequence.
#[derive(Debug, Clone, Serialize)]
pub struct FaultLineResult {
    pub name: String,
    /// Kilometers from the query point, rounded to one decimal place.
    pub distance: f64,
    /// One of the 16 compass labels (N, NNE, ..., NNW).
    pub direction: String,
    #[serde(rename = "type")]
    pub fault_type: String,
    pub coordinates: ResultCoordinates,
}

/// The outcome of one resolution, with observability metadata that does
/// not travel on the wire.
#[derive(Debug)]
pub struct ResolveOutcome {
    /// At most five results, sorted ascending by distance.
    pub results: Vec<FaultLineResult>,
    /// The radius actually searched (the widened one if the fallback fired).
    pub radius_km: f64,
    /// Whether the single widening retry was taken.
    pub widened: bool,
    /// Features dropped for missing or unusable geometry.
    pub skipped: usize,
}

/// A validated proximity query: the single input-validation point shared
/// by the CLI and the HTTP handler. The resolver itself does not
/// re-validate.
#[derive(Debug, Clone, Copy)]
pub struct FaultQuery {
    pub point: GeoPoint,
    pub radius_km: f64,
}

impl FaultQuery {
    pub fn new(lat: f64, lng: f64, radius_km: f64) -> Result<Self, FaultError> {
        let point =
            GeoPoint::new(lat, lng).ok_or(FaultError::InvalidCoordinates { lat, lng })?;
        if !(radius_km > 0.0) {
            return Err(FaultError::InvalidRadius(radius_km));
        }
        Ok(Self { point, radius_km })
    }
}

/// Fault lookup errors. An empty result set is not an error.
#[derive(Debug)]
pub enum FaultError {
    InvalidCoordinates { lat: f64, lng: f64 },
    InvalidRadius(f64),
    Network(String),
    ProviderStatus(u16),
    InvalidResponse(String),
}

impl fmt::Display for FaultError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCoordinates { lat, lng } => write!(
                f,
                "Invalid coordinates {}, {}. Lat: -90..90, Lng: -180..180",
                lat, lng
            ),
            Self::InvalidRadius(r) => write!(f, "Search radius must be positive, got {}", r),
            Self::Network(msg) => write!(f, "Network error: {}", msg),
            Self::ProviderStatus(code) => write!(f, "Provider returned HTTP {}", code),
            Self::InvalidResponse(msg) => write!(f, "Invalid provider response: {}", msg),
        }
    }
}

impl std::error::Error for FaultError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_valid() {
        let q = FaultQuery::new(35.6762, 139.6503, 100.0).unwrap();
        assert!((q.point.lat - 35.6762).abs() < 1e-9);
        assert!((q.point.lon - 139.6503).abs() < 1e-9);
    }

    #[test]
    fn test_query_rejects_out_of_range_latitude() {
        assert!(matches!(
            FaultQuery::new(91.0, 0.0, 100.0),
            Err(FaultError::InvalidCoordinates { .. })
        ));
    }

    #[test]
    fn test_query_rejects_nan_coordinates() {
        assert!(FaultQuery::new(f64::NAN, 0.0, 100.0).is_err());
        assert!(FaultQuery::new(0.0, f64::NAN, 100.0).is_err());
    }

    #[test]
    fn test_query_rejects_non_positive_radius() {
        assert!(matches!(
            FaultQuery::new(0.0, 0.0, 0.0),
            Err(FaultError::InvalidRadius(_))
        ));
        assert!(matches!(
            FaultQuery::new(0.0, 0.0, -50.0),
            Err(FaultError::InvalidRadius(_))
        ));
        assert!(FaultQuery::new(0.0, 0.0, f64::NAN).is_err());
    }

    #[test]
    fn test_result_wire_shape() {
        let result = FaultLineResult {
            name: "San Andreas".into(),
            distance: 12.3,
            direction: "NW".into(),
            fault_type: "Dextral".into(),
            coordinates: ResultCoordinates { lat: 37.0, lng: -122.0 },
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["type"], "Dextral");
        assert_eq!(json["coordinates"]["lng"], -122.0);
        assert_eq!(json["distance"], 12.3);
    }
}
