//! Core data structures for county trend processing.
//!
//! Defines the observation record, the rate-annotated view used by the
//! trend renderer, and the statistics reported at the end of a run.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// One day of cumulative counts for a single county
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    pub date: NaiveDate,
    pub region_name: String,
    pub state: String,
    pub region_key: String,
    pub cases: u64,
    pub deaths: u64,
}

impl Observation {
    /// Build a copy of this observation attributed to another region
    pub fn for_region(&self, region_name: &str, region_key: &str) -> Self {
        Self {
            region_name: region_name.to_string(),
            region_key: region_key.to_string(),
            ..self.clone()
        }
    }
}

impl fmt::Display for Observation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.date, self.region_name, self.state, self.cases
        )
    }
}

/// An observation paired with its growth over the previous one
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatedObservation<'a> {
    pub observation: &'a Observation,
    /// `cases / previous.cases - 1`, infinite when the previous count is zero
    pub rate: f64,
}

/// Counters collected while loading the record stream
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LoadStats {
    pub rows_read: usize,
    pub rows_skipped: usize,
    pub rows_expanded: usize,
    pub observations_stored: usize,
    pub regions: usize,
}

/// Processing statistics
#[derive(Debug, Default)]
pub struct ProcessingStats {
    pub load: LoadStats,
    pub features_annotated: usize,
    pub features_matched: usize,
    pub regions_with_growth: usize,
    pub output_path: Option<PathBuf>,
    pub processing_time_ms: u128,
}
