//! Precomputed overview of a matchup table: best and worst sets, best teams

use std::collections::HashMap;

use factory_sets::{extract_base_name, parse_set_name, pokemon_base, DataKey, Round};
use rayon::prelude::*;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::grouping::{combine_abilities_in_list, OverviewSet, SetAverage};
use crate::scoring::weighted_average;
use crate::types::{FrequencyTable, SetRecord, SetTable};

/// Sizes used when building an [`Overview`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverviewConfig {
    /// Rows in the top and bottom set lists
    pub list_len: usize,
    /// Sets read from each end of the ranking before merging variants
    pub list_buffer: usize,
    /// Best sets considered when enumerating teams
    pub top_sets_for_teams: usize,
    /// Teams kept after folding ability variants
    pub output_teams: usize,
}

impl Default for OverviewConfig {
    fn default() -> Self {
        Self {
            list_len: 20,
            list_buffer: 40,
            top_sets_for_teams: 100,
            output_teams: 20,
        }
    }
}

impl OverviewConfig {
    /// Round 5 tables are larger and use more sets for teams
    pub fn for_data_key(key: DataKey) -> Self {
        let mut config = Self::default();
        if key.frequency_round() == Round::Round5 {
            config.top_sets_for_teams = 200;
        }
        config
    }
}

/// One concrete team and its population score
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TeamVariant {
    pub members: Vec<String>,
    pub score: f64,
}

/// A team composition with every ability combination of it that was scored
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct OverviewTeam {
    /// Members of the best-scoring variant
    pub members: Vec<String>,
    pub score: f64,
    /// Every variant with the same base composition, best first
    pub all_variants: Vec<TeamVariant>,
}

#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Overview {
    pub top_sets: Vec<OverviewSet>,
    pub bottom_sets: Vec<OverviewSet>,
    pub top_teams: Vec<OverviewTeam>,
}

/// Every set of a table as an opponent, with base-name split weights
pub struct PopulationField<'a> {
    opponents: Vec<(&'a str, f64)>,
    total_weight: f64,
}

impl<'a> PopulationField<'a> {
    pub fn new(table: &'a SetTable, freq: &FrequencyTable) -> Self {
        let mut group_sizes: HashMap<&str, usize> = HashMap::new();
        for set in table.iter() {
            *group_sizes.entry(extract_base_name(&set.name)).or_default() += 1;
        }

        let opponents: Vec<(&str, f64)> = table
            .iter()
            .map(|set| {
                let base = extract_base_name(&set.name);
                let n = group_sizes.get(base).copied().unwrap_or(1);
                (set.name.as_str(), freq.weight(base) / n as f64)
            })
            .collect();
        let total_weight = opponents.iter().map(|(_, w)| w).sum();

        Self {
            opponents,
            total_weight,
        }
    }
}

/// Score a team against the whole table as the opponent population.
///
/// Unlike [`crate::team_score`], the opponents are every set in the table
/// and each is weighted by its base build's share.
pub fn population_team_score(team: &[&SetRecord], field: &PopulationField<'_>) -> f64 {
    if field.total_weight <= 0.0 {
        return 0.0;
    }

    let total: f64 = field
        .opponents
        .iter()
        .map(|(opponent, weight)| {
            let best = team
                .iter()
                .filter_map(|member| member.scores.get(*opponent))
                .fold(0.0_f64, |acc, s| acc.max(*s));
            best * weight
        })
        .sum();
    total / field.total_weight
}

struct ScoredTeam<'a> {
    members: [&'a SetRecord; 3],
    score: f64,
}

impl ScoredTeam<'_> {
    fn base_key(&self) -> [&str; 3] {
        let mut key = self.members.map(|m| parse_set_name(&m.name).base_name);
        key.sort_unstable();
        key
    }

    fn variant(&self) -> TeamVariant {
        TeamVariant {
            members: self.members.iter().map(|m| m.name.clone()).collect(),
            score: self.score,
        }
    }
}

/// Best teams from the top `config.top_sets_for_teams` sets.
///
/// Teams fielding the same pokemon twice are skipped. Teams that only differ
/// in ability variants are folded into the best-scoring one.
fn top_teams<'a>(
    ranked: &[(&'a SetRecord, f64)],
    field: &PopulationField<'_>,
    config: &OverviewConfig,
) -> Vec<OverviewTeam> {
    let pool: Vec<&SetRecord> = ranked
        .iter()
        .take(config.top_sets_for_teams)
        .map(|(set, _)| *set)
        .collect();
    let bases: Vec<&str> = pool.iter().map(|set| pokemon_base(&set.name)).collect();
    let n = pool.len();

    let (pool, bases) = (&pool, &bases);
    let mut teams: Vec<ScoredTeam<'_>> = (0..n)
        .into_par_iter()
        .flat_map_iter(move |i| {
            ((i + 1)..n).flat_map(move |j| {
                ((j + 1)..n).filter_map(move |k| {
                    if bases[i] == bases[j] || bases[i] == bases[k] || bases[j] == bases[k] {
                        return None;
                    }
                    let members = [pool[i], pool[j], pool[k]];
                    Some(ScoredTeam {
                        members,
                        score: population_team_score(&members, field),
                    })
                })
            })
        })
        .collect();

    teams.sort_by(|a, b| b.score.total_cmp(&a.score));
    debug!(pool = n, teams = teams.len(), "scored overview teams");

    let keys: Vec<[&str; 3]> = teams.iter().map(ScoredTeam::base_key).collect();
    let mut used = vec![false; teams.len()];
    let mut folded = Vec::with_capacity(config.output_teams);

    for i in 0..teams.len() {
        if folded.len() >= config.output_teams {
            break;
        }
        if used[i] {
            continue;
        }

        let mut all_variants = Vec::new();
        for j in i..teams.len() {
            if !used[j] && keys[j] == keys[i] {
                used[j] = true;
                all_variants.push(teams[j].variant());
            }
        }

        let best = teams[i].variant();
        folded.push(OverviewTeam {
            members: best.members,
            score: best.score,
            all_variants,
        });
    }

    folded
}

/// Build the overview of one table
pub fn build_overview(table: &SetTable, freq: &FrequencyTable, config: &OverviewConfig) -> Overview {
    let mut ranked: Vec<(&SetRecord, f64)> = table
        .iter()
        .map(|set| (set, weighted_average(&set.scores, freq)))
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

    let averages: Vec<SetAverage<'_>> = ranked
        .iter()
        .map(|(set, average)| SetAverage {
            name: &set.name,
            average: *average,
        })
        .collect();

    let buffer = config.list_buffer.min(averages.len());
    let top_sets = combine_abilities_in_list(&averages[..buffer], config.list_len);
    let bottom: Vec<SetAverage<'_>> = averages[averages.len() - buffer..]
        .iter()
        .rev()
        .copied()
        .collect();
    let bottom_sets = combine_abilities_in_list(&bottom, config.list_len);

    let field = PopulationField::new(table, freq);
    let top_teams = top_teams(&ranked, &field, config);

    debug!(
        sets = table.len(),
        top = top_sets.len(),
        bottom = bottom_sets.len(),
        teams = top_teams.len(),
        "built overview"
    );

    Overview {
        top_sets,
        bottom_sets,
        top_teams,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Scores;

    fn set(name: &str, entries: &[(&str, f64)]) -> SetRecord {
        SetRecord::new(name, entries.iter().map(|(k, v)| (k.to_string(), *v)).collect())
    }

    /// A table where every set scores `strength` against every other set
    fn flat_table(entries: &[(&str, f64)]) -> SetTable {
        let names: Vec<&str> = entries.iter().map(|(name, _)| *name).collect();
        entries
            .iter()
            .map(|(name, strength)| {
                let scores: Scores = names.iter().map(|o| (o.to_string(), *strength)).collect();
                SetRecord::new(*name, scores)
            })
            .collect()
    }

    #[test]
    fn test_config_for_data_key() {
        assert_eq!(OverviewConfig::for_data_key(DataKey::Round1).top_sets_for_teams, 100);
        assert_eq!(
            OverviewConfig::for_data_key(DataKey::Round5POpponents).top_sets_for_teams,
            200
        );
        assert_eq!(OverviewConfig::for_data_key(DataKey::Round5P21Iv).list_len, 20);
    }

    #[test]
    fn test_population_team_score_splits_variants() {
        let table = SetTable::new(vec![
            set("A-1", &[("Foo-1-X", 1.0), ("Foo-1-Y", 0.0), ("Bar-1", 0.5)]),
            set("Foo-1-X", &[]),
            set("Foo-1-Y", &[]),
            set("Bar-1", &[]),
        ]);
        let freq: FrequencyTable = [("Foo-1", 4.0), ("Bar-1", 2.0), ("A-1", 0.0)]
            .into_iter()
            .collect();
        let field = PopulationField::new(&table, &freq);

        // Foo-1-X and Foo-1-Y get 2 each, Bar-1 gets 2, A-1 gets 0
        let score = population_team_score(&[&table.sets()[0]], &field);
        assert!((score - (1.0 * 2.0 + 0.0 + 0.5 * 2.0) / 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_population_team_score_empty_table() {
        let table = SetTable::default();
        let field = PopulationField::new(&table, &FrequencyTable::new());
        let member = set("A-1", &[("B-1", 1.0)]);
        assert_eq!(population_team_score(&[&member], &field), 0.0);
    }

    #[test]
    fn test_overview_lists() {
        let table = flat_table(&[
            ("Low-1", 0.1),
            ("Gengar-2-Levitate", 0.9),
            ("Mid-1", 0.5),
            ("Gengar-2-CursedBody", 0.8),
            ("High-1", 0.7),
        ]);
        let config = OverviewConfig {
            list_len: 3,
            list_buffer: 4,
            ..OverviewConfig::default()
        };

        let overview = build_overview(&table, &FrequencyTable::new(), &config);

        let top: Vec<&str> = overview.top_sets.iter().map(|s| s.display_name.as_str()).collect();
        assert_eq!(top, vec!["Gengar-2-Levitate/CursedBody", "High-1", "Mid-1"]);
        assert_eq!(overview.top_sets[0].display_score, "0.900 (0.800)");

        let bottom: Vec<&str> =
            overview.bottom_sets.iter().map(|s| s.display_name.as_str()).collect();
        assert_eq!(bottom, vec!["Low-1", "Mid-1", "High-1"]);
    }

    #[test]
    fn test_overview_teams_skip_duplicate_pokemon_and_fold_variants() {
        let table = flat_table(&[
            ("Gengar-2-Levitate", 0.9),
            ("Gengar-2-CursedBody", 0.85),
            ("Gengar-1", 0.8),
            ("Latios-8", 0.6),
            ("Mew-1", 0.5),
        ]);

        let overview = build_overview(&table, &FrequencyTable::new(), &OverviewConfig::default());

        for team in &overview.top_teams {
            let mut bases: Vec<&str> = team.members.iter().map(|m| pokemon_base(m)).collect();
            bases.sort_unstable();
            bases.dedup();
            assert_eq!(bases.len(), 3);
        }

        // Gengar x3 choices with Latios and Mew: the two Gengar-2 variants fold together
        assert_eq!(overview.top_teams.len(), 2);
        let first = &overview.top_teams[0];
        assert_eq!(first.members, vec!["Gengar-2-Levitate", "Latios-8", "Mew-1"]);
        assert_eq!(first.all_variants.len(), 2);
        assert_eq!(
            first.all_variants[1].members,
            vec!["Gengar-2-CursedBody", "Latios-8", "Mew-1"]
        );
        assert_eq!(overview.top_teams[1].members, vec!["Gengar-1", "Latios-8", "Mew-1"]);
        assert_eq!(overview.top_teams[1].all_variants.len(), 1);
    }

    #[test]
    fn test_overview_teams_deterministic() {
        let entries: Vec<(String, f64)> = (1..=12)
            .map(|i| (format!("Mon{}-1", i), (i % 4) as f64 / 4.0))
            .collect();
        let borrowed: Vec<(&str, f64)> = entries.iter().map(|(n, s)| (n.as_str(), *s)).collect();
        let table = flat_table(&borrowed);
        let freq = FrequencyTable::new();
        let config = OverviewConfig::default();

        let first = build_overview(&table, &freq, &config);
        let second = build_overview(&table, &freq, &config);
        assert_eq!(first, second);
        assert_eq!(first.top_teams.len(), 20);
    }

    #[test]
    fn test_overview_empty_table() {
        let overview = build_overview(&SetTable::default(), &FrequencyTable::new(), &OverviewConfig::default());
        assert_eq!(overview, Overview::default());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_overview_serializes_camel_case() {
        let table = flat_table(&[("A-1", 0.5), ("B-1", 0.4), ("C-1", 0.3)]);
        let overview = build_overview(&table, &FrequencyTable::new(), &OverviewConfig::default());
        let json = serde_json::to_value(&overview).unwrap();

        assert!(json["topSets"].is_array());
        assert!(json["bottomSets"].is_array());
        assert_eq!(json["topTeams"][0]["allVariants"][0]["members"][0], "A-1");
    }
}
