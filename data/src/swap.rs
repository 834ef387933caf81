//! Swap session: which single swap with an opponent improves your team most

use factory_engine::{
    build_opponent_possible_sets, evaluate_swaps, generate_swap_summary, OpponentSlot, SwapOption,
    SwapSummary, TeamMember, TEAM_SIZE,
};
use factory_sets::{Iv, Round, SlotMode};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::draft::{resolve_slot, DraftPick};
use crate::quick_team::resolve_quick_team;
use crate::store::DataStore;

/// Number of sets on your team
pub const TEAM_SLOTS: usize = TEAM_SIZE;

pub const OPPONENT_DATA_ERROR: &str = "Error loading opponent data";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapRequest {
    pub round: Round,
    pub your_team: Vec<Option<DraftPick>>,
    pub opponents: Vec<OpponentSlot>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwapReport {
    /// Every option, best score first
    pub options: Vec<SwapOption>,
    pub summary: Vec<SwapSummary>,
}

impl SwapReport {
    fn single(option: SwapOption) -> Self {
        Self {
            options: vec![option],
            summary: Vec::new(),
        }
    }

    pub fn baseline(&self) -> Option<&SwapOption> {
        self.options.iter().find(|o| o.is_baseline())
    }
}

/// Resolve your team and the opponent slots, then score every swap
pub async fn calculate_swaps(store: &DataStore, request: &SwapRequest) -> SwapReport {
    let round = request.round;

    let mut resolved = Vec::with_capacity(TEAM_SLOTS);
    for slot in 0..TEAM_SLOTS {
        let Some(pick) = request.your_team.get(slot).and_then(Option::as_ref) else {
            resolved.push(None);
            continue;
        };
        let iv = pick.effective_iv(round, slot, SlotMode::Swap);
        let found = match round.swap_your_data_key(slot, iv) {
            Some(key) => resolve_slot(store, key, &pick.name, round).await,
            None => {
                warn!(round = %round, slot, iv = %iv, "IV not offered for swap slot");
                None
            }
        };
        resolved.push(found);
    }

    let freqs = store.load_frequencies().await;
    let freq = freqs.for_round(round);
    let team: [Option<TeamMember<'_>>; TEAM_SLOTS] =
        std::array::from_fn(|slot| resolved[slot].as_ref().map(|r| r.member()));

    if team.iter().flatten().count() < TEAM_SLOTS {
        return SwapReport {
            options: evaluate_swaps(&team, &[], freq),
            summary: Vec::new(),
        };
    }

    let key = round.opponents_data_key();
    let opponents = match store.load_table(key).await {
        Ok(table) => table,
        Err(e) => {
            warn!(key = %key, error = %e, "could not load opponent table");
            return SwapReport::single(SwapOption::invalid(OPPONENT_DATA_ERROR));
        }
    };

    let candidates = build_opponent_possible_sets(&request.opponents, &opponents, freq);
    let options = evaluate_swaps(&team, &candidates, freq);
    let summary = generate_swap_summary(&options, &opponents);
    info!(
        round = %round,
        options = options.len(),
        beneficial = summary.len(),
        "calculated swaps"
    );

    SwapReport { options, summary }
}

/// Fill your swap slots from a pasted team string.
///
/// Each slot resolves against the table its own IV choice reads from.
pub async fn quick_swap_picks(
    store: &DataStore,
    round: Round,
    ivs: &[Option<Iv>],
    team_string: &str,
) -> Vec<Option<DraftPick>> {
    let mut picks = Vec::with_capacity(TEAM_SLOTS);

    for slot in 0..TEAM_SLOTS {
        let iv = ivs.get(slot).copied().flatten().unwrap_or_else(|| round.default_iv());
        let Some(key) = round.swap_your_data_key(slot, iv) else {
            picks.push(None);
            continue;
        };
        let table = match store.load_table(key).await {
            Ok(table) => table,
            Err(e) => {
                warn!(key = %key, error = %e, "could not load table for quick team");
                picks.push(None);
                continue;
            }
        };

        let pick = resolve_quick_team(team_string, &table, TEAM_SLOTS)
            .get(slot)
            .copied()
            .flatten()
            .map(|set| DraftPick {
                name: set.name.clone(),
                iv: Some(iv),
            });
        picks.push(pick);
    }

    picks
}
