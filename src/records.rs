//! Counts record parsing.
//!
//! Converts positional CSV rows (date, county, state, fips, cases, deaths)
//! into typed [`Observation`]s. The header row never reaches this module;
//! readers are built with headers enabled.

use crate::constants::{DATE_FORMAT, RECORD_FIELD_COUNT};
use crate::error::{Result, TrendsError};
use crate::models::Observation;
use chrono::NaiveDate;
use csv::StringRecord;
use std::io::Read;

/// Parse a single counts row into an observation
pub fn parse_record(record: &StringRecord) -> Result<Observation> {
    let line = record.position().map(|p| p.line()).unwrap_or(0);

    if record.len() != RECORD_FIELD_COUNT {
        return Err(TrendsError::parse(
            line,
            format!(
                "expected {} fields, found {}",
                RECORD_FIELD_COUNT,
                record.len()
            ),
        ));
    }

    let date = parse_date(&record[0], line)?;
    let cases = parse_count(&record[4], "case", line)?;
    let deaths = parse_count(&record[5], "death", line)?;

    Ok(Observation {
        date,
        region_name: record[1].to_string(),
        state: record[2].to_string(),
        region_key: record[3].to_string(),
        cases,
        deaths,
    })
}

/// Build a CSV reader that consumes the header row itself
pub fn records_reader<R: Read>(source: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(source)
}

fn parse_date(value: &str, line: u64) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|e| TrendsError::parse(line, format!("invalid date '{}' ({})", value, e)))
}

fn parse_count(value: &str, field: &str, line: u64) -> Result<u64> {
    value
        .trim()
        .parse::<u64>()
        .map_err(|e| TrendsError::parse(line, format!("invalid {} count '{}' ({})", field, value, e)))
}
