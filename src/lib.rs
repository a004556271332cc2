//! Faultline Radar: fault-line proximity engine.
//!
//! Queries the USGS event catalog for fault products near a point, reduces
//! each feature to a representative vertex, and ranks the results by
//! great-circle distance with a 16-point compass direction. Usable as a
//! library, a one-shot CLI, and an HTTP API.

pub mod fault;
pub mod geo;
pub mod server;
