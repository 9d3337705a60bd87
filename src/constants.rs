//! Application constants for county trend processing
//!
//! Default file locations, metric windows and the fixed lookup tables used
//! by the expander and the bracket classification.

// =============================================================================
// File Locations
// =============================================================================

/// Daily per-county counts, one level above the working directory
pub const DEFAULT_RECORDS_PATH: &str = "../us-counties.csv";

/// County boundary feature collection (ISO-8859-1 encoded)
pub const DEFAULT_GEOGRAPHY_PATH: &str = "gz_2010_us_050_00_20m.json";

/// Annotated feature collection written for rendering
pub const DEFAULT_OUTPUT_PATH: &str = "county-cases.json";

// =============================================================================
// Record Layout
// =============================================================================

/// Number of positional fields in a counts record
pub const RECORD_FIELD_COUNT: usize = 6;

/// Width of a region key (county FIPS code)
pub const REGION_KEY_LEN: usize = 5;

/// Date format of the counts source
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// =============================================================================
// Metric Defaults
// =============================================================================

/// Regions returned by `top` when no count is given
pub const DEFAULT_TOP_K: usize = 10;

/// Regions printed in the top-region report
pub const DEFAULT_REPORT_TOP: usize = 5;

/// Trailing rate entries rendered into a trend string
pub const DEFAULT_TREND_WINDOW: usize = 10;

/// Periods spanned by the compound growth calculation
pub const DEFAULT_GROWTH_WINDOW: usize = 3;

/// Latest case count a region needs before growth is reported
pub const DEFAULT_GROWTH_MIN_CASES: u64 = 50;

/// Line-break marker that prefixes each trend fragment
pub const TREND_LINE_BREAK: &str = "<br>";

// =============================================================================
// Lookup Tables
// =============================================================================

/// Region name in the source that aggregates several counties
pub const NEW_YORK_CITY: &str = "New York City";

/// Boroughs making up New York City as (county name, region key)
pub const NEW_YORK_CITY_BOROUGHS: &[(&str, &str)] = &[
    ("Richmond", "36085"),
    ("Kings", "36047"),
    ("Queens", "36081"),
    ("Bronx", "36005"),
    ("New York", "36061"),
];

/// Inclusive case-count ranges for severity brackets, ascending
pub const CASE_BRACKETS: &[(u64, u64)] = &[
    (1, 9),
    (10, 99),
    (100, 999),
    (1000, 9999),
    (10000, 99999),
];

// =============================================================================
// Geographic Document Properties
// =============================================================================

pub mod properties {
    /// Identifier whose trailing characters are the region key
    pub const GEO_ID: &str = "GEO_ID";

    /// Latest case count
    pub const CASES: &str = "cases";

    /// Rendered trend string
    pub const TREND: &str = "trend";

    /// Trailing compound growth as a percentage
    pub const INCREASE: &str = "increase";
}
