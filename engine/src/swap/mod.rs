//! Single-slot swap search against a partially known opponent team

mod options;
mod summary;

pub use options::{
    build_opponent_possible_sets, evaluate_swaps, OpponentCandidates, OpponentSlot, SetSelection,
    SwapOption, NO_SWAP_DESCRIPTION, TEAM_INCOMPLETE_DESCRIPTION, TEAM_SIZE,
};
pub use summary::{generate_swap_summary, improvement_text, SwapSummary};
