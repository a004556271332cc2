//! Fault-line proximity subsystem.
//!
//! Fetches candidate fault features from the external geological catalog,
//! reduces each to a representative vertex, and ranks the results by
//! great-circle distance from the query point.

pub mod provider;
pub mod resolver;
pub mod types;

pub use provider::{FeatureSource, UsgsFaultProvider};
pub use resolver::{FaultProximityResolver, DEFAULT_RADIUS_KM, MAX_RADIUS_KM};
pub use types::{
    FaultError, FaultFeature, FaultLineResult, FaultQuery, FetchedFeatures, ResolveOutcome,
};
