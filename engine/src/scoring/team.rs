use std::collections::BTreeSet;

use crate::types::{FrequencyTable, Scores, SetRecord};

use super::weighted_average;

/// A team slot: a borrowed set plus its precomputed weighted average
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TeamMember<'a> {
    pub name: &'a str,
    pub average: f64,
    pub scores: &'a Scores,
}

impl<'a> TeamMember<'a> {
    /// Borrow `set` and score it against `freq`
    pub fn new(set: &'a SetRecord, freq: &FrequencyTable) -> Self {
        Self {
            name: &set.name,
            average: weighted_average(&set.scores, freq),
            scores: &set.scores,
        }
    }

    pub fn with_average(set: &'a SetRecord, average: f64) -> Self {
        Self {
            name: &set.name,
            average,
            scores: &set.scores,
        }
    }
}

/// Score a team with the max-per-opponent rule.
///
/// For every opponent any member has a score against, the team is credited
/// with its best member's score (members without an entry are ignored, the
/// running max starts at 0). Opponents are weighted by their literal name.
pub fn team_score(team: &[TeamMember<'_>], freq: &FrequencyTable) -> f64 {
    let opponents: BTreeSet<&str> = team
        .iter()
        .flat_map(|m| m.scores.keys().map(String::as_str))
        .collect();

    let mut total_score = 0.0;
    let mut total_weight = 0.0;
    for opponent in opponents {
        let best = team
            .iter()
            .filter_map(|m| m.scores.get(opponent))
            .fold(0.0_f64, |acc, s| acc.max(*s));
        let weight = freq.weight(opponent);
        total_score += best * weight;
        total_weight += weight;
    }

    if total_weight > 0.0 {
        total_score / total_weight
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::approx_eq;

    fn set(name: &str, entries: &[(&str, f64)]) -> SetRecord {
        SetRecord::new(name, entries.iter().map(|(k, v)| (k.to_string(), *v)).collect())
    }

    #[test]
    fn test_team_score_takes_max_per_opponent() {
        let a = set("A-1", &[("OppA", 0.9), ("OppB", 0.1)]);
        let b = set("B-1", &[("OppA", 0.2), ("OppB", 0.6)]);
        let c = set("C-1", &[("OppC", 0.3)]);
        let freq = FrequencyTable::new();

        let team = [&a, &b, &c].map(|s| TeamMember::new(s, &freq));
        assert!(approx_eq(team_score(&team, &freq), (0.9 + 0.6 + 0.3) / 3.0));
    }

    #[test]
    fn test_team_score_weights_literal_names() {
        // The base weight of Foo-1 is not applied to Foo-1-X
        let a = set("A-1", &[("Foo-1-X", 1.0), ("Bar-1", 0.0)]);
        let freq: FrequencyTable = [("Foo-1", 9.0), ("Bar-1", 1.0)].into_iter().collect();

        let team = [TeamMember::new(&a, &freq)];
        assert!(approx_eq(team_score(&team, &freq), 0.5));
    }

    #[test]
    fn test_team_score_permutation_invariant() {
        let a = set("A-1", &[("OppA", 0.9), ("OppB", 0.1)]);
        let b = set("B-1", &[("OppB", 0.6), ("OppC", 0.4)]);
        let c = set("C-1", &[("OppC", 0.8), ("OppD", 0.25)]);
        let freq: FrequencyTable = [("OppA", 3.0), ("OppD", 0.5)].into_iter().collect();

        let [ma, mb, mc] = [&a, &b, &c].map(|s| TeamMember::new(s, &freq));
        let reference = team_score(&[ma, mb, mc], &freq);
        for team in [[ma, mc, mb], [mb, ma, mc], [mb, mc, ma], [mc, ma, mb], [mc, mb, ma]] {
            assert!(approx_eq(team_score(&team, &freq), reference));
        }
    }

    #[test]
    fn test_team_score_monotone_in_members() {
        let a = set("A-1", &[("OppA", 0.3), ("OppB", 0.2)]);
        let b = set("B-1", &[("OppA", 0.4)]);
        let freq = FrequencyTable::new();
        let ma = TeamMember::new(&a, &freq);
        let before = team_score(&[ma, TeamMember::new(&b, &freq)], &freq);

        // Raising one member's score can never lower the team score
        let better = set("B-1", &[("OppA", 0.95)]);
        let after = team_score(&[ma, TeamMember::new(&better, &freq)], &freq);
        assert!(after >= before);

        // Lowering a score below another member's max changes nothing
        let worse = set("B-1", &[("OppA", 0.1)]);
        let low = team_score(&[ma, TeamMember::new(&worse, &freq)], &freq);
        assert!(approx_eq(low, (0.3 + 0.2) / 2.0));
    }

    #[test]
    fn test_team_score_empty() {
        let freq = FrequencyTable::new();
        assert_eq!(team_score(&[], &freq), 0.0);

        let empty = set("A-1", &[]);
        assert_eq!(team_score(&[TeamMember::new(&empty, &freq)], &freq), 0.0);
    }
}
