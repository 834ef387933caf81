//! Frequency-weighted scoring of single sets and three-set teams
//!
//! Everything here is pure: inputs are borrowed, nothing is mutated, and
//! degenerate inputs (no opponents, zero total weight) score 0.

mod combos;
mod team;
mod weighted;

pub use combos::{best_teams, RankedTeam, LEAD_SUFFIX};
pub use team::{team_score, TeamMember};
pub use weighted::weighted_average;

#[cfg(test)]
pub(crate) fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}
