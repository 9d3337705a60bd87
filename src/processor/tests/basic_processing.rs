//! Basic processing integration tests

use super::create_fixture;
use crate::processor::TrendProcessor;
use serde_json::{Value, json};
use std::fs;
use tempfile::TempDir;

fn read_output(path: &std::path::Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn test_two_day_region_end_to_end() {
    let temp_dir = TempDir::new().unwrap();
    let config = create_fixture(
        &temp_dir,
        &[
            "2020-03-01,New York,New York,36061,5,0",
            "2020-03-02,New York,New York,36061,15,1",
        ],
    );
    let output_path = config.output_path.clone();

    let processor = TrendProcessor::new(config).unwrap();
    let stats = processor.process().unwrap();

    assert_eq!(stats.load.rows_read, 2);
    assert_eq!(stats.load.regions, 1);
    assert_eq!(stats.features_annotated, 3);
    assert_eq!(stats.features_matched, 1);
    assert_eq!(stats.output_path.as_deref(), Some(output_path.as_path()));

    let output = read_output(&output_path);
    let props = &output["features"][0]["properties"];
    assert_eq!(props["cases"], json!(15));
    assert_eq!(
        props["trend"],
        json!("<br>2020-03-01 5 inf%<br>2020-03-02 15 200%")
    );
    // Two observations is too few for growth
    assert_eq!(props["increase"], json!(0));
    assert_eq!(props["NAME"], json!("New York"));

    let unmatched = &output["features"][2]["properties"];
    assert_eq!(unmatched["cases"], json!(0));
    assert_eq!(unmatched["trend"], json!(""));
}

#[test]
fn test_growth_written_as_percentage() {
    let temp_dir = TempDir::new().unwrap();
    let config = create_fixture(
        &temp_dir,
        &[
            "2020-03-20,Snohomish,Washington,53061,100,2",
            "2020-03-21,Snohomish,Washington,53061,100,2",
            "2020-03-22,Snohomish,Washington,53061,100,3",
            "2020-03-23,Snohomish,Washington,53061,800,4",
        ],
    );
    let output_path = config.output_path.clone();

    let stats = TrendProcessor::new(config).unwrap().process().unwrap();
    assert_eq!(stats.regions_with_growth, 1);

    let output = read_output(&output_path);
    let increase = output["features"][1]["properties"]["increase"]
        .as_f64()
        .unwrap();
    assert!((increase - 100.0).abs() < 1e-6);
}

#[test]
fn test_new_york_city_annotates_borough() {
    let temp_dir = TempDir::new().unwrap();
    let config = create_fixture(
        &temp_dir,
        &[
            "2020-03-01,New York City,New York,,1,0",
            "2020-03-02,New York City,New York,,11,0",
        ],
    );
    let output_path = config.output_path.clone();

    let stats = TrendProcessor::new(config).unwrap().process().unwrap();
    assert_eq!(stats.load.rows_expanded, 2);
    assert_eq!(stats.load.observations_stored, 10);
    assert_eq!(stats.load.regions, 5);

    let output = read_output(&output_path);
    assert_eq!(output["features"][0]["properties"]["cases"], json!(11));
}

#[test]
fn test_report_only_writes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let config = create_fixture(&temp_dir, &["2020-03-01,New York,New York,36061,5,0"]);
    let output_path = config.output_path.clone();

    let processor = TrendProcessor::new(config.with_report_top(5))
        .unwrap()
        .with_report_only(true);
    let stats = processor.process().unwrap();

    assert_eq!(stats.load.rows_read, 1);
    assert!(stats.output_path.is_none());
    assert!(!output_path.exists());
}

#[test]
fn test_rerun_is_byte_identical() {
    let temp_dir = TempDir::new().unwrap();
    let config = create_fixture(
        &temp_dir,
        &[
            "2020-03-01,Snohomish,Washington,53061,10,0",
            "2020-03-02,Snohomish,Washington,53061,20,0",
            "2020-03-03,Snohomish,Washington,53061,40,0",
            "2020-03-04,Snohomish,Washington,53061,80,0",
        ],
    );
    let output_path = config.output_path.clone();
    let processor = TrendProcessor::new(config).unwrap();

    processor.process().unwrap();
    let first = fs::read(&output_path).unwrap();
    processor.process().unwrap();
    let second = fs::read(&output_path).unwrap();

    assert_eq!(first, second);
}
