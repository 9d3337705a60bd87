//! In-memory observation store.
//!
//! Observations are grouped by region key on insert. Each region keeps its
//! observations in arrival order, and regions keep the order in which their
//! key first arrived. Nothing is ever re-sorted by date.

use crate::models::Observation;
use std::collections::HashMap;

/// All observations of a run, grouped by region key
#[derive(Debug, Default, Clone)]
pub struct ObservationStore {
    /// Region keys in first-arrival order
    keys: Vec<String>,
    /// Position of each key in `keys` and `series`
    slots: HashMap<String, usize>,
    series: Vec<Vec<Observation>>,
    /// (slot, offset) of every observation in arrival order
    arrivals: Vec<(usize, usize)>,
}

impl ObservationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an observation to its region's sequence
    pub fn add(&mut self, observation: Observation) {
        let slot = match self.slots.get(&observation.region_key) {
            Some(&slot) => slot,
            None => {
                let slot = self.keys.len();
                self.keys.push(observation.region_key.clone());
                self.slots.insert(observation.region_key.clone(), slot);
                self.series.push(Vec::new());
                slot
            }
        };

        let offset = self.series[slot].len();
        self.series[slot].push(observation);
        self.arrivals.push((slot, offset));
    }

    /// Every stored observation in overall arrival order.
    ///
    /// Each call starts a fresh pass over the same sequence.
    pub fn all(&self) -> impl Iterator<Item = &Observation> + '_ {
        self.arrivals
            .iter()
            .map(move |&(slot, offset)| &self.series[slot][offset])
    }

    /// Regions and their ordered observations, in first-arrival order
    pub fn by_region(&self) -> impl Iterator<Item = (&str, &[Observation])> + '_ {
        self.keys
            .iter()
            .zip(self.series.iter())
            .map(|(key, series)| (key.as_str(), series.as_slice()))
    }

    /// Ordered observations for one region
    pub fn region(&self, region_key: &str) -> Option<&[Observation]> {
        self.slots
            .get(region_key)
            .map(|&slot| self.series[slot].as_slice())
    }

    /// Region keys in first-arrival order
    pub fn region_keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.keys.iter().map(String::as_str)
    }

    pub fn region_count(&self) -> usize {
        self.keys.len()
    }

    pub fn len(&self) -> usize {
        self.arrivals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arrivals.is_empty()
    }
}

impl FromIterator<Observation> for ObservationStore {
    fn from_iter<I: IntoIterator<Item = Observation>>(iter: I) -> Self {
        let mut store = Self::new();
        for observation in iter {
            store.add(observation);
        }
        store
    }
}
