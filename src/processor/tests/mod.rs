//! Integration tests for the processor module
//!
//! Tests the complete pipeline against small counts and county fixtures
//! written to temporary directories.

pub mod basic_processing;

use crate::config::TrendConfig;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

pub const HEADER: &str = "date,county,state,fips,cases,deaths";

/// Two counties plus one unmatched, as a county boundary document
pub const COUNTIES_JSON: &str = r#"{"type":"FeatureCollection","features":[
{"type":"Feature","properties":{"GEO_ID":"0500000US36061","STATE":"36","COUNTY":"061","NAME":"New York","LSAD":"County","CENSUSAREA":22.829},"geometry":null},
{"type":"Feature","properties":{"GEO_ID":"0500000US53061","STATE":"53","COUNTY":"061","NAME":"Snohomish","LSAD":"County","CENSUSAREA":2087.273},"geometry":null},
{"type":"Feature","properties":{"GEO_ID":"0500000US01001","STATE":"01","COUNTY":"001","NAME":"Autauga","LSAD":"County","CENSUSAREA":594.436},"geometry":null}
]}"#;

/// Write fixtures and return a configuration pointing at them
pub fn create_fixture(temp_dir: &TempDir, rows: &[&str]) -> TrendConfig {
    let records_path = temp_dir.path().join("us-counties.csv");
    let geography_path = temp_dir.path().join("counties.json");
    let output_path: PathBuf = temp_dir.path().join("out").join("county-cases.json");

    let mut csv = String::from(HEADER);
    for row in rows {
        csv.push('\n');
        csv.push_str(row);
    }
    csv.push('\n');

    fs::write(&records_path, csv).unwrap();
    fs::write(&geography_path, COUNTIES_JSON).unwrap();

    TrendConfig::default()
        .with_records_path(records_path)
        .with_geography_path(geography_path)
        .with_output_path(output_path)
        .with_report_top(0)
        .without_progress()
}
