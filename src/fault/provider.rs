//! Fault feature provider: the USGS event catalog, queried over HTTPS.
//!
//! The GeoJSON payload is treated as untrusted and partially optional.
//! Features missing a usable geometry are skipped and counted, never
//! aborting the batch.

use super::types::{FaultError, FaultFeature, FetchedFeatures};
use crate::geo::GeoPoint;
use serde::Deserialize;
use serde_json::Value;

/// The seam between the resolver and the network. One outbound request
/// per call; no internal retry.
pub trait FeatureSource {
    fn fetch(&self, query: &GeoPoint, radius_km: f64) -> Result<FetchedFeatures, FaultError>;
}

// ─── GeoJSON payload model ──────────────────────────────────────

#[derive(Deserialize)]
struct FeatureCollection {
    #[serde(default)]
    features: Vec<RawFeature>,
}

#[derive(Deserialize)]
struct RawFeature {
    // Option rather than default: providers send explicit nulls here.
    #[serde(default)]
    properties: Option<RawProperties>,
    #[serde(default)]
    geometry: Option<RawGeometry>,
}

#[derive(Deserialize, Default)]
struct RawProperties {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    slip_type: Option<String>,
}

#[derive(Deserialize)]
struct RawGeometry {
    #[serde(default)]
    coordinates: Value,
}

/// Find the first [lon, lat] vertex of a GeoJSON coordinate array.
///
/// Line and multi-line geometries are reduced to their first vertex by
/// descending nested arrays; this is a deliberate simplification, not a
/// closest-point computation.
fn first_vertex(coords: &Value) -> Option<GeoPoint> {
    let arr = coords.as_array()?;
    match (
        arr.first().and_then(Value::as_f64),
        arr.get(1).and_then(Value::as_f64),
    ) {
        (Some(lon), Some(lat)) => GeoPoint::new(lat, lon),
        _ => first_vertex(arr.first()?),
    }
}

fn collect_features(payload: FeatureCollection) -> FetchedFeatures {
    let mut features = Vec::with_capacity(payload.features.len());
    let mut skipped = 0;

    for raw in payload.features {
        let point = raw
            .geometry
            .as_ref()
            .and_then(|g| first_vertex(&g.coordinates));
        match point {
            Some(point) => {
                let properties = raw.properties.unwrap_or_default();
                features.push(FaultFeature {
                    name: properties.name,
                    slip_type: properties.slip_type,
                    point,
                });
            }
            None => skipped += 1,
        }
    }

    FetchedFeatures { features, skipped }
}

// ─── USGS provider ──────────────────────────────────────────────

const USGS_ENDPOINT: &str = "https://earthquake.usgs.gov/fdsnws/event/1/query";
const USER_AGENT: &str = "FaultlineRadar/0.3 (fault-proximity-engine)";

/// Queries the USGS FDSN event service for fault products near a point,
/// over the entire historical record.
pub struct UsgsFaultProvider;

impl FeatureSource for UsgsFaultProvider {
    fn fetch(&self, query: &GeoPoint, radius_km: f64) -> Result<FetchedFeatures, FaultError> {
        let url = format!(
            "{}?format=geojson&starttime=1900-01-01&latitude={}&longitude={}&maxradiuskm={}&producttype=finite-fault",
            USGS_ENDPOINT, query.lat, query.lon, radius_km,
        );

        let response = ureq::get(&url)
            .set("User-Agent", USER_AGENT)
            .call()
            .map_err(|e| match e {
                ureq::Error::Status(code, _) => FaultError::ProviderStatus(code),
                other => FaultError::Network(other.to_string()),
            })?;

        let payload: FeatureCollection = response
            .into_json()
            .map_err(|e| FaultError::InvalidResponse(e.to_string()))?;

        Ok(collect_features(payload))
    }
}
