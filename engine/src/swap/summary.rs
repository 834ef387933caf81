use factory_sets::compact_set_names;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::grouping::SCORE_TOLERANCE;
use crate::types::SetTable;

use super::SwapOption;

/// Beneficial swaps of one of your sets for one opponent pokemon
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct SwapSummary {
    pub your_pokemon: String,
    pub opp_pokemon: String,
    /// Distinct opponent builds that improve the team, in first-seen order
    pub set_names: Vec<String>,
    /// `"Gengar (Any Set)"` or compacted build names
    pub display_text: String,
    pub improvement_text: String,
    pub best_score: f64,
    pub worst_score: f64,
}

impl SwapSummary {
    /// `"Swap Mew-1 for Gengar-1/2 (+0.004 to +0.012)"`
    pub fn line(&self) -> String {
        format!(
            "Swap {} for {} {}",
            self.your_pokemon, self.display_text, self.improvement_text
        )
    }
}

/// `"(+0.012)"`, or `"(+0.004 to +0.012)"` when the bounds differ
pub fn improvement_text(min: f64, max: f64) -> String {
    if (min - max).abs() < SCORE_TOLERANCE {
        format!("(+{:.3})", min)
    } else {
        format!("(+{:.3} to +{:.3})", min, max)
    }
}

struct Group<'a> {
    your_pokemon: &'a str,
    opp_pokemon: &'a str,
    set_names: Vec<&'a str>,
    min_improvement: f64,
    max_improvement: f64,
    best_score: f64,
    worst_score: f64,
}

/// Collapse the swap table into one line per (your set, opponent pokemon).
///
/// Only options that strictly improve on the baseline are kept. A group
/// whose builds cover every build of the opponent pokemon in `opponents` is
/// shown as "(Any Set)". Groups are ordered by their best score.
pub fn generate_swap_summary(options: &[SwapOption], opponents: &SetTable) -> Vec<SwapSummary> {
    let mut groups: Vec<Group<'_>> = Vec::new();

    for option in options {
        let (Some(your), Some(opp), Some(set_name), Some(improvement)) = (
            option.your_pokemon.as_deref(),
            option.opp_pokemon.as_deref(),
            option.opp_set_name.as_deref(),
            option.improvement,
        ) else {
            continue;
        };
        if !option.valid || improvement <= 0.0 {
            continue;
        }

        match groups
            .iter_mut()
            .find(|g| g.your_pokemon == your && g.opp_pokemon == opp)
        {
            Some(group) => {
                if !group.set_names.contains(&set_name) {
                    group.set_names.push(set_name);
                }
                group.min_improvement = group.min_improvement.min(improvement);
                group.max_improvement = group.max_improvement.max(improvement);
                group.best_score = group.best_score.max(option.score);
                group.worst_score = group.worst_score.min(option.score);
            }
            None => groups.push(Group {
                your_pokemon: your,
                opp_pokemon: opp,
                set_names: vec![set_name],
                min_improvement: improvement,
                max_improvement: improvement,
                best_score: option.score,
                worst_score: option.score,
            }),
        }
    }

    groups.sort_by(|a, b| b.best_score.total_cmp(&a.best_score));

    groups
        .into_iter()
        .map(|group| {
            let live_count = opponents.sets_for_pokemon(group.opp_pokemon).count();
            let display_text = if group.set_names.len() == live_count {
                format!("{} (Any Set)", group.opp_pokemon)
            } else {
                compact_set_names(&group.set_names)
            };

            SwapSummary {
                your_pokemon: group.your_pokemon.to_string(),
                opp_pokemon: group.opp_pokemon.to_string(),
                set_names: group.set_names.iter().map(|s| s.to_string()).collect(),
                display_text,
                improvement_text: improvement_text(group.min_improvement, group.max_improvement),
                best_score: group.best_score,
                worst_score: group.worst_score,
            }
        })
        .collect()
}
