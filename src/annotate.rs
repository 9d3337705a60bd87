//! Feature collection annotation.
//!
//! Joins per-region metrics onto a county feature collection. Each feature's
//! region key is the tail of its `GEO_ID`; features without a matching region
//! receive default values rather than an error.

use crate::constants::{REGION_KEY_LEN, properties};
use crate::error::{Result, TrendsError};
use crate::metrics::LatestByRegion;
use serde_json::{Map, Value};
use std::collections::HashMap;
use tracing::debug;

/// Counters from one annotation pass
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct AnnotationStats {
    pub features: usize,
    pub matched: usize,
}

/// Injects `cases`, `trend` and `increase` into feature properties
#[derive(Debug, Clone, Copy)]
pub struct Annotator<'a> {
    latest: &'a LatestByRegion<'a>,
    trend: &'a HashMap<&'a str, String>,
    growth: &'a HashMap<&'a str, f64>,
}

impl<'a> Annotator<'a> {
    pub fn new(
        latest: &'a LatestByRegion<'a>,
        trend: &'a HashMap<&'a str, String>,
        growth: &'a HashMap<&'a str, f64>,
    ) -> Self {
        Self {
            latest,
            trend,
            growth,
        }
    }

    /// Return an annotated copy of `document`; the input is left untouched
    pub fn annotate(&self, document: &Value) -> Result<(Value, AnnotationStats)> {
        let mut annotated = document.clone();
        let stats = self.annotate_in_place(&mut annotated)?;
        Ok((annotated, stats))
    }

    /// Annotate every feature of `document`.
    ///
    /// Feature order and all other properties are kept as they are.
    pub fn annotate_in_place(&self, document: &mut Value) -> Result<AnnotationStats> {
        let features = document
            .get_mut("features")
            .and_then(Value::as_array_mut)
            .ok_or_else(|| TrendsError::invalid_document("missing 'features' array"))?;

        let mut stats = AnnotationStats::default();
        for (index, feature) in features.iter_mut().enumerate() {
            let props = feature
                .get_mut("properties")
                .and_then(Value::as_object_mut)
                .ok_or_else(|| {
                    TrendsError::invalid_document(format!(
                        "feature {} has no 'properties' object",
                        index
                    ))
                })?;

            if self.annotate_properties(props, index)? {
                stats.matched += 1;
            }
            stats.features += 1;
        }

        debug!(
            "Annotated {} features, {} matched a region",
            stats.features, stats.matched
        );
        Ok(stats)
    }

    fn annotate_properties(&self, props: &mut Map<String, Value>, index: usize) -> Result<bool> {
        let geo_id = props
            .get(properties::GEO_ID)
            .and_then(Value::as_str)
            .ok_or_else(|| {
                TrendsError::invalid_document(format!(
                    "feature {} has no string '{}' property",
                    index,
                    properties::GEO_ID
                ))
            })?;
        let key = region_key_of(geo_id).to_string();

        let latest = self.latest.get(key.as_str());
        let cases = latest.map_or(0, |observation| observation.cases);

        let trend = self
            .trend
            .get(key.as_str())
            .cloned()
            .unwrap_or_default();

        // Zero growth and missing growth both render as 0
        let increase = match self.growth.get(key.as_str()) {
            Some(&growth) if growth != 0.0 => Value::from(growth * 100.0),
            _ => Value::from(0),
        };

        props.insert(properties::CASES.to_string(), Value::from(cases));
        props.insert(properties::TREND.to_string(), Value::from(trend));
        props.insert(properties::INCREASE.to_string(), increase);

        Ok(latest.is_some())
    }
}

/// Region key of a feature identifier: its last five characters
pub fn region_key_of(geo_id: &str) -> &str {
    let start = geo_id
        .char_indices()
        .rev()
        .nth(REGION_KEY_LEN - 1)
        .map_or(0, |(i, _)| i);
    &geo_id[start..]
}
