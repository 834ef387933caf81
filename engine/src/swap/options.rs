use factory_sets::set_number;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::scoring::{team_score, TeamMember};
use crate::types::{FrequencyTable, SetTable};

/// Members on a swap team
pub const TEAM_SIZE: usize = 3;

pub const NO_SWAP_DESCRIPTION: &str = "No Swap (Keep current team)";
pub const TEAM_INCOMPLETE_DESCRIPTION: &str = "Please fill in all 3 slots of your team";

/// Which builds an opponent slot may be running
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SetSelection {
    /// Every build of the pokemon
    #[default]
    Any,
    /// Only builds with one of these set numbers
    Numbers(Vec<String>),
}

/// What is known about one opponent slot
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OpponentSlot {
    pub pokemon: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub sets: SetSelection,
    #[cfg_attr(feature = "serde", serde(default))]
    pub ignore: bool,
}

impl OpponentSlot {
    pub fn any(pokemon: impl Into<String>) -> Self {
        Self {
            pokemon: Some(pokemon.into()),
            sets: SetSelection::Any,
            ignore: false,
        }
    }

    pub fn numbers<I, S>(pokemon: impl Into<String>, numbers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            pokemon: Some(pokemon.into()),
            sets: SetSelection::Numbers(numbers.into_iter().map(Into::into).collect()),
            ignore: false,
        }
    }

    /// Pokemon to consider, or `None` if the slot is empty or ignored
    fn active_pokemon(&self) -> Option<&str> {
        if self.ignore {
            return None;
        }
        self.pokemon.as_deref().map(str::trim).filter(|p| !p.is_empty())
    }
}

/// Builds one opponent slot could be running, each already averaged
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OpponentCandidates<'a> {
    /// Pokemon name as entered for the slot; empty for skipped slots
    pub pokemon: String,
    pub builds: Vec<TeamMember<'a>>,
}

/// Expand each opponent slot into its possible builds from `table`.
///
/// Returns one entry per slot, in order. Ignored and empty slots expand to
/// no builds. Pokemon names compare case-insensitively.
pub fn build_opponent_possible_sets<'a>(
    slots: &[OpponentSlot],
    table: &'a SetTable,
    freq: &FrequencyTable,
) -> Vec<OpponentCandidates<'a>> {
    slots
        .iter()
        .map(|slot| {
            let Some(pokemon) = slot.active_pokemon() else {
                return OpponentCandidates::default();
            };

            let builds = match &slot.sets {
                SetSelection::Any => table
                    .sets_for_pokemon(pokemon)
                    .map(|set| TeamMember::new(set, freq))
                    .collect(),
                SetSelection::Numbers(numbers) => numbers
                    .iter()
                    .flat_map(|number| {
                        table
                            .sets_for_pokemon(pokemon)
                            .filter(move |set| set_number(&set.name).unwrap_or("") == number.as_str())
                    })
                    .map(|set| TeamMember::new(set, freq))
                    .collect(),
            };

            OpponentCandidates {
                pokemon: pokemon.to_string(),
                builds,
            }
        })
        .collect()
}

/// One row of the swap table
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct SwapOption {
    pub description: String,
    pub score: f64,
    pub valid: bool,
    /// Score minus the no-swap score; absent on the baseline and invalid rows
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none", default))]
    pub improvement: Option<f64>,
    pub your_pokemon: Option<String>,
    pub opp_pokemon: Option<String>,
    pub opp_set_name: Option<String>,
}

impl SwapOption {
    /// A structured "cannot evaluate" marker
    pub fn invalid(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            score: 0.0,
            valid: false,
            improvement: None,
            your_pokemon: None,
            opp_pokemon: None,
            opp_set_name: None,
        }
    }

    fn baseline(score: f64) -> Self {
        Self {
            description: NO_SWAP_DESCRIPTION.to_string(),
            score,
            valid: true,
            improvement: None,
            your_pokemon: None,
            opp_pokemon: None,
            opp_set_name: None,
        }
    }

    pub fn is_baseline(&self) -> bool {
        self.valid && self.your_pokemon.is_none() && self.improvement.is_none()
    }

    /// Signed improvement, e.g. `"(+0.012)"` or `"(-0.030)"`
    pub fn improvement_label(&self) -> Option<String> {
        self.improvement.map(|delta| {
            let sign = if delta >= 0.0 { "+" } else { "" };
            format!("({}{:.3})", sign, delta)
        })
    }
}

/// Score every single-member swap of `your_team` for a possible opponent build.
///
/// An empty slot yields one invalid option. Otherwise the
/// result holds the no-swap baseline plus one option per
/// (your slot, opponent slot, build), sorted by score descending.
pub fn evaluate_swaps<'a>(
    your_team: &[Option<TeamMember<'a>>; TEAM_SIZE],
    opponents: &[OpponentCandidates<'a>],
    freq: &FrequencyTable,
) -> Vec<SwapOption> {
    let team: Vec<TeamMember<'a>> = your_team.iter().flatten().copied().collect();
    if team.len() < TEAM_SIZE {
        return vec![SwapOption::invalid(TEAM_INCOMPLETE_DESCRIPTION)];
    }

    let baseline = team_score(&team, freq);
    let mut options = vec![SwapOption::baseline(baseline)];

    for (your_idx, current) in team.iter().enumerate() {
        for slot in opponents.iter().filter(|slot| !slot.builds.is_empty()) {
            for build in &slot.builds {
                let mut swapped = team.clone();
                swapped[your_idx] = *build;
                let score = team_score(&swapped, freq);

                options.push(SwapOption {
                    description: format!("Swap {} → {}", current.name, build.name),
                    score,
                    valid: true,
                    improvement: Some(score - baseline),
                    your_pokemon: Some(current.name.to_string()),
                    opp_pokemon: Some(slot.pokemon.clone()),
                    opp_set_name: Some(build.name.to_string()),
                });
            }
        }
    }

    options.sort_by(|a, b| b.score.total_cmp(&a.score));
    debug!(options = options.len(), baseline, "evaluated swaps");
    options
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::approx_eq;
    use crate::types::{Scores, SetRecord};

    fn set(name: &str, entries: &[(&str, f64)]) -> SetRecord {
        SetRecord::new(name, entries.iter().map(|(k, v)| (k.to_string(), *v)).collect())
    }

    fn opponent_table() -> SetTable {
        SetTable::new(vec![
            set("Gengar-1", &[("OppA", 0.9)]),
            set("Gengar-2-Levitate", &[("OppB", 0.8)]),
            set("Gengar-2-CursedBody", &[("OppB", 0.7)]),
            set("Gengar-3", &[("OppC", 0.2)]),
            set("Latios-8", &[("OppA", 0.4), ("OppB", 0.4)]),
        ])
    }

    fn your_sets() -> Vec<SetRecord> {
        vec![
            set("Mew-1", &[("OppA", 0.5), ("OppB", 0.5)]),
            set("Jirachi-2", &[("OppA", 0.3)]),
            set("Celebi-3", &[("OppC", 0.6)]),
        ]
    }

    #[test]
    fn test_build_opponent_possible_sets() {
        let table = opponent_table();
        let freq = FrequencyTable::new();
        let slots = [
            OpponentSlot::any("gengar"),
            OpponentSlot::numbers("Gengar", ["2"]),
            OpponentSlot {
                ignore: true,
                ..OpponentSlot::any("Latios")
            },
        ];

        let candidates = build_opponent_possible_sets(&slots, &table, &freq);
        assert_eq!(candidates.len(), 3);

        let any: Vec<&str> = candidates[0].builds.iter().map(|b| b.name).collect();
        assert_eq!(any, vec!["Gengar-1", "Gengar-2-Levitate", "Gengar-2-CursedBody", "Gengar-3"]);
        assert_eq!(candidates[0].pokemon, "gengar");

        let specific: Vec<&str> = candidates[1].builds.iter().map(|b| b.name).collect();
        assert_eq!(specific, vec!["Gengar-2-Levitate", "Gengar-2-CursedBody"]);
        assert!(approx_eq(candidates[1].builds[0].average, 0.8));

        assert!(candidates[2].builds.is_empty());
    }

    #[test]
    fn test_empty_slot_has_no_builds() {
        let table = opponent_table();
        let freq = FrequencyTable::new();
        let candidates = build_opponent_possible_sets(&[OpponentSlot::default()], &table, &freq);
        assert!(candidates[0].builds.is_empty());
    }

    #[test]
    fn test_evaluate_swaps_incomplete_team() {
        let sets = your_sets();
        let freq = FrequencyTable::new();
        let team = [
            Some(TeamMember::new(&sets[0], &freq)),
            None,
            Some(TeamMember::new(&sets[2], &freq)),
        ];

        let options = evaluate_swaps(&team, &[], &freq);
        assert_eq!(options, vec![SwapOption::invalid(TEAM_INCOMPLETE_DESCRIPTION)]);
        assert!(!options[0].valid);
    }

    #[test]
    fn test_evaluate_swaps_single_baseline() {
        let sets = your_sets();
        let table = opponent_table();
        let freq = FrequencyTable::new();
        let team = [&sets[0], &sets[1], &sets[2]].map(|s| Some(TeamMember::new(s, &freq)));
        let candidates = build_opponent_possible_sets(
            &[OpponentSlot::any("Gengar"), OpponentSlot::default(), OpponentSlot::any("Latios")],
            &table,
            &freq,
        );

        let options = evaluate_swaps(&team, &candidates, &freq);
        // 3 your slots x (4 Gengar + 1 Latios builds) + baseline
        assert_eq!(options.len(), 16);

        let baselines: Vec<&SwapOption> = options.iter().filter(|o| o.is_baseline()).collect();
        assert_eq!(baselines.len(), 1);
        assert_eq!(baselines[0].description, NO_SWAP_DESCRIPTION);

        let members: Vec<TeamMember> = team.iter().flatten().copied().collect();
        assert!(approx_eq(baselines[0].score, team_score(&members, &freq)));

        assert!(options.windows(2).all(|w| w[0].score >= w[1].score));
        for option in options.iter().filter(|o| !o.is_baseline()) {
            let delta = option.improvement.unwrap();
            assert!(approx_eq(delta, option.score - baselines[0].score));
        }
    }

    #[test]
    fn test_swap_option_fields() {
        let sets = your_sets();
        let table = opponent_table();
        let freq = FrequencyTable::new();
        let team = [&sets[0], &sets[1], &sets[2]].map(|s| Some(TeamMember::new(s, &freq)));
        let candidates =
            build_opponent_possible_sets(&[OpponentSlot::numbers("Gengar", ["1"])], &table, &freq);

        let options = evaluate_swaps(&team, &candidates, &freq);
        let swap = options
            .iter()
            .find(|o| o.your_pokemon.as_deref() == Some("Jirachi-2"))
            .unwrap();

        assert_eq!(swap.description, "Swap Jirachi-2 → Gengar-1");
        assert_eq!(swap.opp_pokemon.as_deref(), Some("Gengar"));
        assert_eq!(swap.opp_set_name.as_deref(), Some("Gengar-1"));
        // Baseline: OppA 0.5, OppB 0.5, OppC 0.6; swap lifts OppA to 0.9
        assert!(approx_eq(swap.improvement.unwrap(), 0.4 / 3.0));
        assert_eq!(swap.improvement_label().as_deref(), Some("(+0.133)"));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_baseline_serializes_without_improvement() {
        let empty = Scores::new();
        let sets = [
            SetRecord::new("A-1", empty.clone()),
            SetRecord::new("B-1", empty.clone()),
            SetRecord::new("C-1", empty),
        ];
        let freq = FrequencyTable::new();
        let team = [&sets[0], &sets[1], &sets[2]].map(|s| Some(TeamMember::new(s, &freq)));

        let options = evaluate_swaps(&team, &[], &freq);
        let json = serde_json::to_value(&options[0]).unwrap();
        assert!(json.get("improvement").is_none());
        assert_eq!(json["description"], NO_SWAP_DESCRIPTION);
        assert_eq!(json["valid"], true);
    }
}
