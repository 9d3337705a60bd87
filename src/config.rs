//! Configuration management and validation.
//!
//! Provides the run configuration: input and output locations, metric
//! windows and loader policy. Defaults reproduce the fixed relative layout
//! the pipeline expects, so a run needs no configuration at all.

use crate::constants::{
    DEFAULT_GEOGRAPHY_PATH, DEFAULT_GROWTH_MIN_CASES, DEFAULT_GROWTH_WINDOW, DEFAULT_OUTPUT_PATH,
    DEFAULT_RECORDS_PATH, DEFAULT_REPORT_TOP, DEFAULT_TOP_K, DEFAULT_TREND_WINDOW,
};
use crate::error::{Result, TrendsError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Global configuration for a trend run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendConfig {
    /// Daily per-county counts CSV
    pub records_path: PathBuf,

    /// County feature collection to annotate
    pub geography_path: PathBuf,

    /// Where the annotated collection is written
    pub output_path: PathBuf,

    /// Regions ranked by `top`
    pub top_k: usize,

    /// Regions printed in the top-region report (0 disables it)
    pub report_top: usize,

    /// Trailing rate entries rendered into each trend string
    pub trend_window: usize,

    /// Periods spanned by the compound growth calculation
    pub growth_window: usize,

    /// Minimum latest case count for growth to be reported
    pub growth_min_cases: u64,

    /// Drop rows with a zero case count while loading
    pub skip_zero_cases: bool,

    /// Show a spinner while records load
    pub show_progress: bool,
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self {
            records_path: PathBuf::from(DEFAULT_RECORDS_PATH),
            geography_path: PathBuf::from(DEFAULT_GEOGRAPHY_PATH),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            top_k: DEFAULT_TOP_K,
            report_top: DEFAULT_REPORT_TOP,
            trend_window: DEFAULT_TREND_WINDOW,
            growth_window: DEFAULT_GROWTH_WINDOW,
            growth_min_cases: DEFAULT_GROWTH_MIN_CASES,
            skip_zero_cases: true,
            show_progress: true,
        }
    }
}

impl TrendConfig {
    /// Load configuration from a TOML file; missing keys take defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(TrendsError::InputNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content).map_err(|e| {
            TrendsError::configuration(format!("failed to parse {}: {}", path.display(), e))
        })?;

        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Check windows and paths before a run starts
    pub fn validate(&self) -> Result<()> {
        if self.trend_window == 0 {
            return Err(TrendsError::configuration("trend_window must be at least 1"));
        }
        if self.growth_window == 0 {
            return Err(TrendsError::configuration(
                "growth_window must be at least 1",
            ));
        }
        if self.output_path == self.geography_path {
            return Err(TrendsError::configuration(format!(
                "output path {} would overwrite the geographic input",
                self.output_path.display()
            )));
        }
        Ok(())
    }

    /// Set the counts CSV location
    pub fn with_records_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.records_path = path.into();
        self
    }

    /// Set the feature collection location
    pub fn with_geography_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.geography_path = path.into();
        self
    }

    /// Set the output location
    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = path.into();
        self
    }

    /// Set how many regions `top` returns
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Set how many regions the report prints
    pub fn with_report_top(mut self, report_top: usize) -> Self {
        self.report_top = report_top;
        self
    }

    /// Set the trend window
    pub fn with_trend_window(mut self, window: usize) -> Self {
        self.trend_window = window;
        self
    }

    /// Set the growth window
    pub fn with_growth_window(mut self, window: usize) -> Self {
        self.growth_window = window;
        self
    }

    /// Set the minimum latest case count for growth
    pub fn with_growth_min_cases(mut self, cases: u64) -> Self {
        self.growth_min_cases = cases;
        self
    }

    /// Keep rows with zero cases
    pub fn keeping_zero_cases(mut self) -> Self {
        self.skip_zero_cases = false;
        self
    }

    /// Disable the loading spinner
    pub fn without_progress(mut self) -> Self {
        self.show_progress = false;
        self
    }
}
