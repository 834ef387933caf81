use std::collections::HashMap;

use factory_sets::extract_base_name;

use crate::types::{FrequencyTable, Scores};

/// Frequency-weighted average of one set's matchup scores.
///
/// Opponents are grouped by [`extract_base_name`]. Each group's base weight
/// comes from `freq` (1.0 if missing) and is split evenly across the group's
/// members, so listing ability variants never inflates a build's share.
pub fn weighted_average(scores: &Scores, freq: &FrequencyTable) -> f64 {
    let mut group_sizes: HashMap<&str, usize> = HashMap::new();
    for name in scores.keys() {
        *group_sizes.entry(extract_base_name(name)).or_default() += 1;
    }

    let mut total_score = 0.0;
    let mut total_weight = 0.0;
    for (name, score) in scores {
        let base = extract_base_name(name);
        let n = group_sizes.get(base).copied().unwrap_or(1);
        let weight = freq.weight(base) / n as f64;
        total_score += score * weight;
        total_weight += weight;
    }

    if total_weight > 0.0 {
        total_score / total_weight
    } else {
        0.0
    }
}
