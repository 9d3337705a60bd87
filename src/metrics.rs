//! Per-region metrics derived from the observation store.
//!
//! Everything here is a pure function of an already loaded
//! [`ObservationStore`]. Results borrow region keys and observations from the
//! store, so the store must outlive them.

use crate::config::TrendConfig;
use crate::constants::{
    CASE_BRACKETS, DEFAULT_GROWTH_MIN_CASES, DEFAULT_GROWTH_WINDOW, DEFAULT_TREND_WINDOW,
    TREND_LINE_BREAK,
};
use crate::models::{Observation, RatedObservation};
use crate::store::ObservationStore;
use std::collections::{BTreeMap, HashMap};
use std::fmt::Write;
use tracing::{debug, warn};

/// Latest observation per region key
pub type LatestByRegion<'a> = HashMap<&'a str, &'a Observation>;

/// Metric calculations over a loaded store
#[derive(Debug, Clone, Copy)]
pub struct MetricEngine<'a> {
    store: &'a ObservationStore,
    trend_window: usize,
    growth_window: usize,
    growth_min_cases: u64,
}

impl<'a> MetricEngine<'a> {
    pub fn new(store: &'a ObservationStore) -> Self {
        Self {
            store,
            trend_window: DEFAULT_TREND_WINDOW,
            growth_window: DEFAULT_GROWTH_WINDOW,
            growth_min_cases: DEFAULT_GROWTH_MIN_CASES,
        }
    }

    /// Take window sizes and thresholds from configuration
    pub fn with_config(mut self, config: &TrendConfig) -> Self {
        self.trend_window = config.trend_window;
        self.growth_window = config.growth_window;
        self.growth_min_cases = config.growth_min_cases;
        self
    }

    pub fn store(&self) -> &'a ObservationStore {
        self.store
    }

    /// Last observation of each region in arrival order
    pub fn latest(&self) -> LatestByRegion<'a> {
        let mut latest = HashMap::with_capacity(self.store.region_count());
        for observation in self.store.all() {
            latest.insert(observation.region_key.as_str(), observation);
        }
        latest
    }

    /// The `k` regions with the highest latest case count, descending.
    ///
    /// Equal counts keep the order in which their regions first arrived.
    pub fn top(&self, k: usize) -> Vec<&'a str> {
        let mut ranked: Vec<(&'a str, u64)> = self
            .store
            .by_region()
            .filter_map(|(key, series)| series.last().map(|latest| (key, latest.cases)))
            .collect();

        // sort_by is stable
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.into_iter().take(k).map(|(key, _)| key).collect()
    }

    /// Rendered trailing trend for every region
    pub fn trend(&self) -> HashMap<&'a str, String> {
        self.store
            .by_region()
            .map(|(key, series)| {
                let rated = rate_sequence(series);
                let start = rated.len().saturating_sub(self.trend_window);
                (key, render_trend(&rated[start..]))
            })
            .collect()
    }

    /// Daily-equivalent compound growth over the trailing growth window.
    ///
    /// Regions with too few observations, too few latest cases, or a zero
    /// base count have no entry.
    pub fn last_3_days_growth(&self) -> HashMap<&'a str, f64> {
        let span = self.growth_window + 1;
        let mut growth = HashMap::new();

        for (key, series) in self.store.by_region() {
            if series.len() < span {
                continue;
            }
            let (Some(latest), Some(base)) = (series.last(), series.get(series.len() - span))
            else {
                continue;
            };
            if latest.cases < self.growth_min_cases {
                continue;
            }
            if base.cases == 0 {
                debug!("Skipping growth for {}: zero base count on {}", key, base.date);
                continue;
            }

            let ratio = latest.cases as f64 / base.cases as f64;
            growth.insert(key, ratio.powf(1.0 / self.growth_window as f64) - 1.0);
        }

        growth
    }

    /// Region keys grouped by the bracket of their latest case count.
    ///
    /// Every bracket has an entry, empty or not. Regions whose count falls
    /// outside the table are logged and left out.
    pub fn brackets(&self) -> BTreeMap<usize, Vec<&'a str>> {
        let mut result: BTreeMap<usize, Vec<&'a str>> =
            (0..CASE_BRACKETS.len()).map(|i| (i, Vec::new())).collect();

        for (key, series) in self.store.by_region() {
            let Some(latest) = series.last() else {
                continue;
            };
            match bracket(latest.cases) {
                Some(index) => result.entry(index).or_default().push(key),
                None => warn!(
                    "Bad bracket: region {} has {} cases outside the bracket table",
                    key, latest.cases
                ),
            }
        }

        result
    }

    /// Full rate sequences for the top `k` regions
    pub fn top_report(&self, k: usize) -> Vec<(&'a str, Vec<RatedObservation<'a>>)> {
        let store = self.store;
        self.top(k)
            .into_iter()
            .filter_map(|key| store.region(key).map(|series| (key, rate_sequence(series))))
            .collect()
    }
}

/// Pair each observation with its growth over the one before it.
///
/// The first observation, and any following a zero count, get an infinite
/// rate. Input order is kept.
pub fn rate_sequence(observations: &[Observation]) -> Vec<RatedObservation<'_>> {
    let mut previous = 0u64;
    observations
        .iter()
        .map(|observation| {
            let rate = if previous == 0 {
                f64::INFINITY
            } else {
                observation.cases as f64 / previous as f64 - 1.0
            };
            previous = observation.cases;
            RatedObservation { observation, rate }
        })
        .collect()
}

/// Render a rate as a whole-number percentage, at least two characters wide
pub fn format_rate(rate: f64) -> String {
    format!("{:2.0}%", rate * 100.0)
}

/// Render rated observations as `<br><date> <cases> <rate>%` fragments
pub fn render_trend(rated: &[RatedObservation<'_>]) -> String {
    let mut rendered = String::new();
    for entry in rated {
        // Writing to a String cannot fail
        let _ = write!(
            rendered,
            "{}{} {} {}",
            TREND_LINE_BREAK,
            entry.observation.date,
            entry.observation.cases,
            format_rate(entry.rate)
        );
    }
    rendered
}

/// Index of the first bracket whose inclusive range contains `cases`
pub fn bracket(cases: u64) -> Option<usize> {
    CASE_BRACKETS
        .iter()
        .position(|&(low, high)| low <= cases && cases <= high)
}
