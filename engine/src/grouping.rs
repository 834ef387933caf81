//! Merging ability variants for display

use factory_sets::parse_set_name;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Two scores closer than this are treated as equal
pub const SCORE_TOLERANCE: f64 = 0.001;

/// One opponent and the expected result against it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matchup<'a> {
    pub name: &'a str,
    pub score: f64,
}

/// A matchup row after ability merging, e.g. `Gengar-2-Levitate/CursedBody`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct CombinedMatchup {
    pub display_name: String,
    pub score: f64,
}

/// Merge ability variants of the same build that score the same.
///
/// Each unvisited entry with an ability absorbs every later unvisited entry
/// with the same base name whose score is within [`SCORE_TOLERANCE`] of its
/// own. Comparisons are always against the absorbing entry, so the grouping
/// is not transitive: 0.5, 0.5008 and 0.5014 produce two rows. Entries
/// without an ability pass through unchanged.
pub fn combine_matchup_abilities(matchups: &[Matchup<'_>]) -> Vec<CombinedMatchup> {
    let mut used = vec![false; matchups.len()];
    let mut result = Vec::with_capacity(matchups.len());

    for (i, current) in matchups.iter().enumerate() {
        if used[i] {
            continue;
        }
        used[i] = true;

        let parsed = parse_set_name(current.name);
        let Some(ability) = parsed.ability else {
            result.push(CombinedMatchup {
                display_name: current.name.to_string(),
                score: current.score,
            });
            continue;
        };

        let mut abilities = vec![ability];
        for (j, other) in matchups.iter().enumerate().skip(i + 1) {
            if used[j] {
                continue;
            }
            let other_parsed = parse_set_name(other.name);
            if let Some(other_ability) = other_parsed.ability
                && other_parsed.base_name == parsed.base_name
                && (current.score - other.score).abs() < SCORE_TOLERANCE
            {
                abilities.push(other_ability);
                used[j] = true;
            }
        }

        let display_name = if abilities.len() > 1 {
            format!("{}-{}", parsed.base_name, abilities.join("/"))
        } else {
            current.name.to_string()
        };
        result.push(CombinedMatchup {
            display_name,
            score: current.score,
        });
    }

    result
}

/// A set and its weighted average, as listed in the overview
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SetAverage<'a> {
    pub name: &'a str,
    pub average: f64,
}

/// One row of an overview set list
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct OverviewSet {
    pub display_name: String,
    /// `"0.812"`, or `"0.812 (0.790)"` for a merged pair
    pub display_score: String,
    pub average: f64,
    pub base_name: String,
}

impl OverviewSet {
    fn single(set: &SetAverage<'_>, base_name: &str) -> Self {
        Self {
            display_name: set.name.to_string(),
            display_score: format!("{:.3}", set.average),
            average: set.average,
            base_name: base_name.to_string(),
        }
    }
}

/// Pair each ability variant with the next unused variant of the same build.
///
/// Unlike [`combine_matchup_abilities`] the scores need not match: the pair
/// shows both averages. Stops once `target` rows are produced.
pub fn combine_abilities_in_list(sets: &[SetAverage<'_>], target: usize) -> Vec<OverviewSet> {
    let mut used = vec![false; sets.len()];
    let mut result = Vec::with_capacity(target.min(sets.len()));

    for (i, current) in sets.iter().enumerate() {
        if result.len() >= target {
            break;
        }
        if used[i] {
            continue;
        }
        used[i] = true;

        let parsed = parse_set_name(current.name);
        let Some(ability) = parsed.ability else {
            result.push(OverviewSet::single(current, parsed.base_name));
            continue;
        };

        let pair = sets.iter().enumerate().skip(i + 1).find_map(|(j, other)| {
            if used[j] {
                return None;
            }
            let other_parsed = parse_set_name(other.name);
            match other_parsed.ability {
                Some(other_ability) if other_parsed.base_name == parsed.base_name => {
                    Some((j, other, other_ability))
                }
                _ => None,
            }
        });

        match pair {
            Some((j, other, other_ability)) => {
                used[j] = true;
                result.push(OverviewSet {
                    display_name: format!("{}-{}/{}", parsed.base_name, ability, other_ability),
                    display_score: format!("{:.3} ({:.3})", current.average, other.average),
                    average: current.average,
                    base_name: parsed.base_name.to_string(),
                });
            }
            None => result.push(OverviewSet::single(current, parsed.base_name)),
        }
    }

    result
}
