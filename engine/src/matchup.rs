//! Matchup search: filter one set's matchups and bucket them by outcome

use factory_sets::{parse_set_name, pokemon_name};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::grouping::{combine_matchup_abilities, CombinedMatchup, Matchup};
use crate::scoring::weighted_average;
use crate::types::{FrequencyTable, PokemonInfo, PokemonReference, PokemonType, Scores, SetRecord};

/// Restricts which opponents a report covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchupFilter<'a> {
    #[default]
    All,
    /// Opponents of one pokemon (case-insensitive)
    Pokemon(&'a str),
    /// Opponents whose reference entry has this type
    Type(PokemonType),
}

impl MatchupFilter<'_> {
    pub fn is_active(&self) -> bool {
        !matches!(self, MatchupFilter::All)
    }

    fn accepts(&self, opponent: &str, reference: &PokemonReference) -> bool {
        match self {
            MatchupFilter::All => true,
            MatchupFilter::Pokemon(pokemon) => {
                let base = parse_set_name(opponent).base_name;
                pokemon_name(base).to_lowercase() == pokemon.to_lowercase()
            }
            MatchupFilter::Type(pokemon_type) => reference
                .find(parse_set_name(opponent).base_name)
                .is_some_and(|info| info.has_type(*pokemon_type)),
        }
    }
}

/// Matchups of `scores` accepted by `filter`, in table order.
///
/// Type filters need reference data; opponents missing from `reference`
/// never match one.
pub fn filter_matchups<'s>(
    scores: &'s Scores,
    filter: MatchupFilter<'_>,
    reference: &PokemonReference,
) -> Vec<Matchup<'s>> {
    scores
        .iter()
        .filter(|(name, _)| filter.accepts(name, reference))
        .map(|(name, score)| Matchup {
            name,
            score: *score,
        })
        .collect()
}

/// Outcome bucket of a single matchup score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum MatchupTier {
    VeryFavorable,
    Favorable,
    Neutral,
    Unfavorable,
    VeryUnfavorable,
}

impl MatchupTier {
    pub const ALL: [MatchupTier; 5] = [
        MatchupTier::VeryFavorable,
        MatchupTier::Favorable,
        MatchupTier::Neutral,
        MatchupTier::Unfavorable,
        MatchupTier::VeryUnfavorable,
    ];

    pub fn from_score(score: f64) -> Self {
        if score >= 0.8 {
            MatchupTier::VeryFavorable
        } else if score >= 0.6 {
            MatchupTier::Favorable
        } else if score >= 0.4 {
            MatchupTier::Neutral
        } else if score >= 0.2 {
            MatchupTier::Unfavorable
        } else {
            MatchupTier::VeryUnfavorable
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MatchupTier::VeryFavorable => "Very Favorable (≥ 0.8)",
            MatchupTier::Favorable => "Favorable (0.6 - 0.799)",
            MatchupTier::Neutral => "Neutral (0.4 - 0.599)",
            MatchupTier::Unfavorable => "Unfavorable (0.2 - 0.399)",
            MatchupTier::VeryUnfavorable => "Very Unfavorable (< 0.2)",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TierGroup {
    pub tier: MatchupTier,
    /// Sorted by score, best first
    pub matchups: Vec<CombinedMatchup>,
}

/// Everything shown when a set is looked up
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct MatchupReport {
    pub set_name: String,
    /// Reference row for the set's base name, if known
    pub info: Option<PokemonInfo>,
    pub average: f64,
    /// Average over the filtered matchups; only for an active, non-empty filter
    pub filtered_average: Option<f64>,
    /// Non-empty tiers, best tier first
    pub tiers: Vec<TierGroup>,
}

/// Build the matchup report of one set
pub fn matchup_report(
    set: &SetRecord,
    filter: MatchupFilter<'_>,
    freq: &FrequencyTable,
    reference: &PokemonReference,
) -> MatchupReport {
    let filtered = filter_matchups(&set.scores, filter, reference);

    let filtered_average = (filter.is_active() && !filtered.is_empty()).then(|| {
        let scores: Scores = filtered
            .iter()
            .map(|m| (m.name.to_string(), m.score))
            .collect();
        weighted_average(&scores, freq)
    });

    let mut tiers: Vec<TierGroup> = MatchupTier::ALL
        .into_iter()
        .map(|tier| TierGroup {
            tier,
            matchups: Vec::new(),
        })
        .collect();
    for combined in combine_matchup_abilities(&filtered) {
        let tier = MatchupTier::from_score(combined.score);
        tiers[tier as usize].matchups.push(combined);
    }
    for group in &mut tiers {
        group.matchups.sort_by(|a, b| b.score.total_cmp(&a.score));
    }
    tiers.retain(|group| !group.matchups.is_empty());

    MatchupReport {
        set_name: set.name.clone(),
        info: reference.find(parse_set_name(&set.name).base_name).cloned(),
        average: weighted_average(&set.scores, freq),
        filtered_average,
        tiers,
    }
}
