//! Matchup scoring and roster optimization for Battle Factory.
//!
//! This crate turns matchup tables (expected results of each set against
//! each opponent set) and per-round opponent frequencies into rankings:
//! single-set averages, three-set teams, and single-slot swaps against a
//! partially known opponent team.
//!
//! # Overview
//!
//! `factory-engine` sits between `factory-sets` (naming grammar) and the
//! data layer:
//!
//! ```text
//! factory-sets (set names, rounds, data keys)
//!        │
//!        ▼
//! factory-engine (scoring + optimization) ← THIS CRATE
//!        │
//!        └─> factory-data (table loading, draft/swap sessions, overview files)
//! ```
//!
//! The engine performs no I/O. Every function borrows its inputs, never
//! mutates them, and resolves missing data to defaults: a missing frequency
//! weighs 1.0, a missing score contributes nothing, and an empty input
//! scores 0.
//!
//! # Main Types
//!
//! ## Records
//! - [`SetRecord`], [`SetTable`] - Named builds and their matchup scores
//! - [`FrequencyTable`], [`FrequencyTables`] - Opponent weights per round
//! - [`PokemonReference`] - Abilities, items, moves and types (presentation only)
//!
//! ## Scoring
//! - [`weighted_average`] - One set against the frequency-weighted field
//! - [`team_score`] - A team, taking each opponent's best member matchup
//! - [`best_teams`] - Every three-set team from a candidate pool, ranked
//!
//! ## Swaps
//! - [`build_opponent_possible_sets`] - Expand opponent slots into builds
//! - [`evaluate_swaps`] - Score every single-member swap against the baseline
//! - [`generate_swap_summary`] - Group beneficial swaps for display
//!
//! ## Display
//! - [`combine_matchup_abilities`] - Merge equal-scoring ability variants
//! - [`matchup_report`] - Filtered, tiered matchups of one set
//! - [`build_overview`] - Top and bottom sets plus best teams of a table
//!
//! # Example Usage
//!
//! ```ignore
//! use factory_engine::{best_teams, FrequencyTable, SetTable, TeamMember};
//!
//! let table: SetTable = serde_json::from_str(&json)?;
//! let freq = FrequencyTable::from_entries(&entries);
//!
//! let members: Vec<TeamMember> = table.iter().map(|s| TeamMember::new(s, &freq)).collect();
//! for team in best_teams(&members, &freq).iter().take(5) {
//!     println!("{} {:.3}", team.display_name(), team.score);
//! }
//! ```

pub mod grouping;
pub mod matchup;
pub mod overview;
pub mod scoring;
pub mod swap;
pub mod types;

// Re-export main types at crate root for convenience
pub use grouping::{
    combine_abilities_in_list, combine_matchup_abilities, CombinedMatchup, Matchup, OverviewSet,
    SetAverage, SCORE_TOLERANCE,
};
pub use matchup::{filter_matchups, matchup_report, MatchupFilter, MatchupReport, MatchupTier, TierGroup};
pub use overview::{
    build_overview, population_team_score, Overview, OverviewConfig, OverviewTeam,
    PopulationField, TeamVariant,
};
pub use scoring::{best_teams, team_score, weighted_average, RankedTeam, TeamMember, LEAD_SUFFIX};
pub use swap::{
    build_opponent_possible_sets, evaluate_swaps, generate_swap_summary, improvement_text,
    OpponentCandidates, OpponentSlot, SetSelection, SwapOption, SwapSummary, NO_SWAP_DESCRIPTION,
    TEAM_INCOMPLETE_DESCRIPTION, TEAM_SIZE,
};
pub use types::{
    FrequencyEntry, FrequencyTable, FrequencyTables, PokemonInfo, PokemonReference, PokemonType,
    Scores, SetRecord, SetTable, DEFAULT_FREQUENCY_WEIGHT,
};

// Re-export the naming grammar used throughout the API
pub use factory_sets::{parse_set_name, DataKey, Iv, ParsedSetName, Round, SlotMode};
