//! County Trends Library
//!
//! Derives per-county growth metrics from a daily case/death counts CSV and
//! annotates a county boundary feature collection with them for rendering.
//!
//! This library provides tools for:
//! - Parsing counts records into typed observations
//! - Expanding aggregated regions (New York City) into their counties
//! - Grouping observations by county in arrival order
//! - Deriving latest counts, rolling rate trends, compound growth and
//!   severity brackets
//! - Joining those metrics onto a GeoJSON feature collection

pub mod annotate;
pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod expander;
pub mod geojson;
pub mod metrics;
pub mod models;
pub mod processor;
pub mod records;
pub mod store;

// Re-export commonly used types
pub use annotate::{AnnotationStats, Annotator};
pub use config::TrendConfig;
pub use error::{Result, TrendsError};
pub use expander::RegionExpander;
pub use metrics::{MetricEngine, bracket, rate_sequence};
pub use models::{Observation, ProcessingStats, RatedObservation};
pub use processor::TrendProcessor;
pub use store::ObservationStore;
