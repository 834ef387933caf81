use tracing::debug;

use crate::types::FrequencyTable;

use super::{team_score, TeamMember};

/// Suffix appended to the lead member's name in team displays
pub const LEAD_SUFFIX: &str = " (Lead)";

/// A scored three-set team, lead first
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedTeam<'a> {
    /// Lead (highest individual average) followed by the other two members
    /// in their original relative order
    pub members: [TeamMember<'a>; 3],
    pub score: f64,
}

impl<'a> RankedTeam<'a> {
    pub fn lead(&self) -> &TeamMember<'a> {
        &self.members[0]
    }

    /// Member names with the lead labeled, e.g. `["A-1 (Lead)", "B-2", "C-3"]`
    pub fn labels(&self) -> [String; 3] {
        let [lead, second, third] = &self.members;
        [
            format!("{}{}", lead.name, LEAD_SUFFIX),
            second.name.to_string(),
            third.name.to_string(),
        ]
    }

    /// `"A-1 (Lead) + B-2 + C-3"`
    pub fn display_name(&self) -> String {
        self.labels().join(" + ")
    }
}

/// Order a team so the member with the highest average comes first.
///
/// Ties go to the earliest member; the others keep their relative order.
fn with_lead_first<'a>(team: [TeamMember<'a>; 3]) -> [TeamMember<'a>; 3] {
    let mut lead = 0;
    for (idx, member) in team.iter().enumerate().skip(1) {
        if member.average > team[lead].average {
            lead = idx;
        }
    }

    match lead {
        0 => team,
        1 => [team[1], team[0], team[2]],
        _ => [team[2], team[0], team[1]],
    }
}

/// Score every three-member subset of `candidates`, best first.
///
/// Returns C(n, 3) teams; fewer than 3 candidates yields an empty list.
/// Teams with equal scores keep their enumeration order.
pub fn best_teams<'a>(candidates: &[TeamMember<'a>], freq: &FrequencyTable) -> Vec<RankedTeam<'a>> {
    let n = candidates.len();
    if n < 3 {
        return Vec::new();
    }

    let mut teams = Vec::with_capacity(n * (n - 1) * (n - 2) / 6);
    for i in 0..n {
        for j in (i + 1)..n {
            for k in (j + 1)..n {
                let team = [candidates[i], candidates[j], candidates[k]];
                let score = team_score(&team, freq);
                teams.push(RankedTeam {
                    members: with_lead_first(team),
                    score,
                });
            }
        }
    }

    teams.sort_by(|a, b| b.score.total_cmp(&a.score));
    debug!(candidates = n, teams = teams.len(), "ranked team combinations");
    teams
}
