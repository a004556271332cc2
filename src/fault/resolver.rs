//! Fault proximity resolver: fetch, transform, rank.
//!
//! `resolve` is a stateless request/transform/respond pipeline with one
//! outbound call and no internal retry. The single caller-side fallback,
//! widening an empty search to the maximum radius, lives in
//! `resolve_widened` so the CLI and the HTTP handler cannot diverge.

use super::provider::{FeatureSource, UsgsFaultProvider};
use super::types::{FaultError, FaultLineResult, ResolveOutcome, ResultCoordinates};
use crate::geo::{self, GeoPoint};

/// Contract default when the caller does not specify a radius.
pub const DEFAULT_RADIUS_KM: f64 = 100.0;

/// Upper bound for the widening fallback.
pub const MAX_RADIUS_KM: f64 = 500.0;

/// Results are truncated to the five nearest faults.
const RESULT_LIMIT: usize = 5;

/// The fault proximity resolver.
pub struct FaultProximityResolver {
    source: Box<dyn FeatureSource + Send + Sync>,
}

impl FaultProximityResolver {
    /// Create a resolver backed by the USGS catalog.
    pub fn new() -> Self {
        Self::with_source(Box::new(UsgsFaultProvider))
    }

    /// Create a resolver with a specific feature source (for testing).
    pub fn with_source(source: Box<dyn FeatureSource + Send + Sync>) -> Self {
        Self { source }
    }

    /// Resolve the faults nearest to `query` within `radius_km`.
    ///
    /// One fetch, then pure in-memory transformation: distance, bearing,
    /// compass direction, name/type defaults, ascending sort, top five.
    /// Provider failure fails the whole request; an empty result set does
    /// not. The caller is expected to have validated the query point.
    pub fn resolve(
        &self,
        query: &GeoPoint,
        radius_km: f64,
    ) -> Result<ResolveOutcome, FaultError> {
        let fetched = self.source.fetch(query, radius_km)?;

        let mut ranked: Vec<(f64, FaultLineResult)> = fetched
            .features
            .into_iter()
            .map(|feature| {
                let distance = geo::distance_km(query, &feature.point);
                let bearing = geo::initial_bearing_deg(query, &feature.point);
                let result = FaultLineResult {
                    name: feature.name.unwrap_or_else(|| "Unnamed Fault".into()),
                    distance: (distance * 10.0).round() / 10.0,
                    direction: geo::compass_direction(bearing).to_string(),
                    fault_type: feature.slip_type.unwrap_or_else(|| "Unknown".into()),
                    coordinates: ResultCoordinates {
                        lat: feature.point.lat,
                        lng: feature.point.lon,
                    },
                };
                (distance, result)
            })
            .collect();

        // Sort on the unrounded distance so ties introduced by rounding
        // cannot reorder results.
        ranked.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));
        ranked.truncate(RESULT_LIMIT);

        Ok(ResolveOutcome {
            results: ranked.into_iter().map(|(_, r)| r).collect(),
            radius_km,
            widened: false,
            skipped: fetched.skipped,
        })
    }

    /// Resolve with the caller-side widening fallback.
    ///
    /// If the first pass finds nothing and `radius_km` is below the maximum
    /// bound, retry exactly once at the maximum. Errors from either pass
    /// propagate; they are never masked as an empty result.
    pub fn resolve_widened(
        &self,
        query: &GeoPoint,
        radius_km: f64,
    ) -> Result<ResolveOutcome, FaultError> {
        let first = self.resolve(query, radius_km)?;
        if !first.results.is_empty() || radius_km >= MAX_RADIUS_KM {
            return Ok(first);
        }

        let mut widened = self.resolve(query, MAX_RADIUS_KM)?;
        widened.widened = true;
        Ok(widened)
    }
}
