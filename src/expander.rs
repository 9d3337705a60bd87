//! Region expansion for aggregated source regions.
//!
//! The counts source reports New York City as one region while the county
//! boundaries carry its five boroughs separately. Expansion turns each such
//! observation into one observation per borough so the per-county join finds
//! a match for every borough.

use crate::constants::{NEW_YORK_CITY, NEW_YORK_CITY_BOROUGHS};
use crate::models::Observation;
use tracing::debug;

/// Splits aggregated regions into their constituent regions
#[derive(Debug, Clone)]
pub struct RegionExpander {
    aggregate_name: &'static str,
    constituents: &'static [(&'static str, &'static str)],
}

impl Default for RegionExpander {
    fn default() -> Self {
        Self::new()
    }
}

impl RegionExpander {
    pub fn new() -> Self {
        Self {
            aggregate_name: NEW_YORK_CITY,
            constituents: NEW_YORK_CITY_BOROUGHS,
        }
    }

    /// Whether this observation belongs to the aggregated region
    pub fn is_aggregate(&self, observation: &Observation) -> bool {
        observation.region_name == self.aggregate_name
    }

    /// Expand one observation into the observations that enter the store.
    ///
    /// Constituents receive the aggregate's counts unchanged.
    pub fn expand(&self, observation: Observation) -> Expansion {
        if self.is_aggregate(&observation) {
            debug!(
                "Expanding {} on {} into {} regions",
                observation.region_name,
                observation.date,
                self.constituents.len()
            );
            Expansion::Split {
                source: observation,
                constituents: self.constituents.iter(),
            }
        } else {
            Expansion::Single(Some(observation))
        }
    }
}

/// Observations produced from a single source observation
#[derive(Debug)]
pub enum Expansion {
    Single(Option<Observation>),
    Split {
        source: Observation,
        constituents: std::slice::Iter<'static, (&'static str, &'static str)>,
    },
}

impl Iterator for Expansion {
    type Item = Observation;

    fn next(&mut self) -> Option<Observation> {
        match self {
            Expansion::Single(observation) => observation.take(),
            Expansion::Split {
                source,
                constituents,
            } => constituents
                .next()
                .map(|(name, key)| source.for_region(name, key)),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = match self {
            Expansion::Single(observation) => usize::from(observation.is_some()),
            Expansion::Split { constituents, .. } => constituents.len(),
        };
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Expansion {}
