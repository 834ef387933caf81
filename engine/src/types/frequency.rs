//! Opponent population frequencies per round

use std::collections::HashMap;
use std::sync::LazyLock;

use factory_sets::{parse_set_name, Round};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Weight used for any build missing from a frequency table
pub const DEFAULT_FREQUENCY_WEIGHT: f64 = 1.0;

static EMPTY_TABLE: LazyLock<FrequencyTable> = LazyLock::new(FrequencyTable::default);

/// One row of a frequency file
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FrequencyEntry {
    pub name: String,
    pub frequency: f64,
}

/// Build name to population weight for a single round
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrequencyTable {
    weights: HashMap<String, f64>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from frequency file rows.
    ///
    /// When a file lists ability variants next to their base entry, each
    /// variant receives an even share of the base weight instead of its own.
    pub fn from_entries(entries: &[FrequencyEntry]) -> Self {
        let mut weights: HashMap<String, f64> = entries
            .iter()
            .map(|e| (e.name.clone(), e.frequency))
            .collect();

        let base_weights: HashMap<&str, f64> = entries
            .iter()
            .filter(|e| parse_set_name(&e.name).ability.is_none())
            .map(|e| (e.name.as_str(), e.frequency))
            .collect();

        let mut variant_counts: HashMap<&str, usize> = HashMap::new();
        for entry in entries {
            let parsed = parse_set_name(&entry.name);
            if parsed.ability.is_some() {
                *variant_counts.entry(parsed.base_name).or_default() += 1;
            }
        }

        for entry in entries {
            let parsed = parse_set_name(&entry.name);
            if parsed.ability.is_none() {
                continue;
            }
            // A zero base weight leaves the variant's own row untouched
            let Some(&base) = base_weights.get(parsed.base_name).filter(|w| **w != 0.0) else {
                continue;
            };
            let count = variant_counts.get(parsed.base_name).copied().unwrap_or(1);
            weights.insert(entry.name.clone(), base / count as f64);
        }

        Self { weights }
    }

    pub fn insert(&mut self, name: impl Into<String>, weight: f64) {
        self.weights.insert(name.into(), weight);
    }

    /// Raw table entry, without the default
    pub fn get(&self, name: &str) -> Option<f64> {
        self.weights.get(name).copied()
    }

    /// Weight for `name`, or [`DEFAULT_FREQUENCY_WEIGHT`] if absent.
    ///
    /// Only a missing entry falls back. An explicit weight of 0 stays 0, so
    /// that opponent drops out of every weighted score.
    pub fn weight(&self, name: &str) -> f64 {
        self.get(name).unwrap_or(DEFAULT_FREQUENCY_WEIGHT)
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        Self {
            weights: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

/// Frequency tables for every loaded round, owned by the caller
#[derive(Debug, Clone, Default)]
pub struct FrequencyTables {
    rounds: HashMap<Round, FrequencyTable>,
}

impl FrequencyTables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, round: Round, table: FrequencyTable) {
        self.rounds.insert(round, table);
    }

    /// Table for a round; rounds that were never loaded weight everything equally
    pub fn for_round(&self, round: Round) -> &FrequencyTable {
        self.rounds.get(&round).unwrap_or(&EMPTY_TABLE)
    }

    pub fn contains(&self, round: Round) -> bool {
        self.rounds.contains_key(&round)
    }
}
