//! Draft session: score up to six picks of a round and rank their teams

use std::sync::Arc;

use factory_engine::{best_teams, weighted_average, SetRecord, SetTable, TeamMember};
use factory_sets::{DataKey, Iv, Round, SlotMode};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::quick_team::resolve_quick_team;
use crate::store::DataStore;

/// Number of slots in a draft
pub const DRAFT_SLOTS: usize = 6;

/// A set chosen for a draft or swap slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftPick {
    pub name: String,
    /// IV of the pick; `None` uses the round's default
    #[serde(default)]
    pub iv: Option<Iv>,
}

impl DraftPick {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            iv: None,
        }
    }

    pub fn with_iv(name: impl Into<String>, iv: Iv) -> Self {
        Self {
            name: name.into(),
            iv: Some(iv),
        }
    }

    /// IV actually used for `slot`: a fixed IV wins over any choice
    pub(crate) fn effective_iv(&self, round: Round, slot: usize, mode: SlotMode) -> Iv {
        match round.iv_options(slot, mode) {
            [fixed] => *fixed,
            _ => self.iv.unwrap_or_else(|| round.default_iv()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftSlotResult {
    /// Set name, or `"Empty"` for a slot without a pick
    pub name: String,
    pub iv: Option<Iv>,
    pub data_key: Option<DataKey>,
    pub average: f64,
    /// True when the slot has no pick or the pick was not found
    pub empty: bool,
}

impl DraftSlotResult {
    fn unfilled() -> Self {
        Self {
            name: "Empty".to_string(),
            iv: None,
            data_key: None,
            average: 0.0,
            empty: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftTeam {
    /// Members in display order, lead first
    pub members: Vec<String>,
    pub lead: String,
    pub display_name: String,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftReport {
    pub round: Round,
    pub slots: Vec<DraftSlotResult>,
    /// Every team of three resolved picks, best first
    pub teams: Vec<DraftTeam>,
}

/// A slot resolved to a row of a shared table
pub(crate) struct ResolvedSet {
    pub table: Arc<SetTable>,
    pub index: usize,
    pub average: f64,
}

impl ResolvedSet {
    pub fn set(&self) -> &SetRecord {
        &self.table.sets()[self.index]
    }

    pub fn member(&self) -> TeamMember<'_> {
        TeamMember::with_average(self.set(), self.average)
    }
}

/// Look up `name` in the table for `key`; a failed load counts as not found
pub(crate) async fn resolve_slot(
    store: &DataStore,
    key: DataKey,
    name: &str,
    round: Round,
) -> Option<ResolvedSet> {
    let table = match store.load_table(key).await {
        Ok(table) => table,
        Err(e) => {
            warn!(key = %key, error = %e, "could not load table for slot");
            return None;
        }
    };

    let Some(index) = table.sets().iter().position(|s| s.name == name) else {
        debug!(key = %key, name, "set not found in table");
        return None;
    };

    let freq = store.load_frequencies().await;
    let average = weighted_average(&table.sets()[index].scores, freq.for_round(round));
    Some(ResolvedSet {
        table,
        index,
        average,
    })
}

/// Score each pick against its slot's table and rank every team of three
pub async fn calculate_draft(
    store: &DataStore,
    round: Round,
    picks: &[Option<DraftPick>],
) -> DraftReport {
    let mut slots = Vec::with_capacity(DRAFT_SLOTS);
    let mut resolved = Vec::new();

    for slot in 0..DRAFT_SLOTS {
        let Some(pick) = picks.get(slot).and_then(Option::as_ref) else {
            slots.push(DraftSlotResult::unfilled());
            continue;
        };

        let iv = pick.effective_iv(round, slot, SlotMode::Table);
        let key = round.draft_data_key(slot, iv);
        let found = match key {
            Some(key) => resolve_slot(store, key, &pick.name, round).await,
            None => {
                warn!(round = %round, slot, iv = %iv, "IV not offered for draft slot");
                None
            }
        };

        slots.push(DraftSlotResult {
            name: pick.name.clone(),
            iv: Some(iv),
            data_key: key,
            average: found.as_ref().map_or(0.0, |r| r.average),
            empty: found.is_none(),
        });
        resolved.extend(found);
    }

    let freq = store.load_frequencies().await;
    let members: Vec<TeamMember<'_>> = resolved.iter().map(ResolvedSet::member).collect();
    let teams = best_teams(&members, freq.for_round(round))
        .into_iter()
        .map(|team| DraftTeam {
            members: team.members.iter().map(|m| m.name.to_string()).collect(),
            lead: team.lead().name.to_string(),
            display_name: team.display_name(),
            score: team.score,
        })
        .collect();

    DraftReport {
        round,
        slots,
        teams,
    }
}

/// Fill draft picks from a pasted team string, resolved against the round's
/// default table
pub async fn quick_draft_picks(
    store: &DataStore,
    round: Round,
    team_string: &str,
) -> Vec<Option<DraftPick>> {
    let key = round.default_table_data_key();
    let table = match store.load_table(key).await {
        Ok(table) => table,
        Err(e) => {
            warn!(key = %key, error = %e, "could not load table for quick team");
            return Vec::new();
        }
    };

    resolve_quick_team(team_string, &table, DRAFT_SLOTS)
        .into_iter()
        .map(|set| set.map(|s| DraftPick::new(&s.name)))
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::store::fixtures::*;

    fn setup() -> (tempfile::TempDir, DataStore) {
        let dir = tempfile::tempdir().unwrap();
        write_table(
            dir.path(),
            DataKey::Round2Table,
            json!([
                {"name": "Gengar-1", "scores": {"OppA": 0.9, "OppB": 0.1}},
                {"name": "Latios-8", "scores": {"OppA": 0.2, "OppB": 0.8}},
                {"name": "Mew-1", "scores": {"OppC": 0.5}},
                {"name": "Snorlax-3", "scores": {"OppA": 0.3, "OppC": 0.6}}
            ]),
        );
        write_frequencies(
            dir.path(),
            Round::Round2,
            json!([{"name": "OppA", "frequency": 2.0}]),
        );
        let store = DataStore::new(config(dir.path()));
        (dir, store)
    }

    #[tokio::test]
    async fn test_calculate_draft() {
        let (_dir, store) = setup();
        let picks = vec![
            Some(DraftPick::new("Gengar-1")),
            None,
            Some(DraftPick::new("Latios-8")),
            Some(DraftPick::new("Missing-1")),
            Some(DraftPick::new("Mew-1")),
        ];

        let report = calculate_draft(&store, Round::Round2, &picks).await;
        assert_eq!(report.slots.len(), DRAFT_SLOTS);

        assert_eq!(report.slots[0].name, "Gengar-1");
        assert_eq!(report.slots[0].iv, Some(Iv::Six));
        assert_eq!(report.slots[0].data_key, Some(DataKey::Round2Table));
        // (0.9 * 2 + 0.1) / 3
        assert!((report.slots[0].average - 1.9 / 3.0).abs() < 1e-9);

        assert_eq!(report.slots[1].name, "Empty");
        assert!(report.slots[1].empty);
        assert!(report.slots[3].empty);
        assert_eq!(report.slots[3].average, 0.0);
        assert!(report.slots[5].empty);

        assert_eq!(report.teams.len(), 1);
        assert_eq!(report.teams[0].lead, "Gengar-1");
        assert_eq!(report.teams[0].display_name, "Gengar-1 (Lead) + Latios-8 + Mew-1");
    }

    #[tokio::test]
    async fn test_calculate_draft_ranks_all_combinations() {
        let (_dir, store) = setup();
        let picks: Vec<Option<DraftPick>> = ["Gengar-1", "Latios-8", "Mew-1", "Snorlax-3"]
            .into_iter()
            .map(|name| Some(DraftPick::new(name)))
            .collect();

        let report = calculate_draft(&store, Round::Round2, &picks).await;
        assert_eq!(report.teams.len(), 4);
        assert!(report.teams.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[tokio::test]
    async fn test_calculate_draft_missing_table() {
        let (_dir, store) = setup();
        let picks = vec![Some(DraftPick::new("Gengar-1"))];

        let report = calculate_draft(&store, Round::Round3, &picks).await;
        assert!(report.slots[0].empty);
        assert_eq!(report.slots[0].data_key, Some(DataKey::Round3Table));
        assert!(report.teams.is_empty());
    }

    #[tokio::test]
    async fn test_round4_lead_slot_reads_elevations() {
        let dir = tempfile::tempdir().unwrap();
        write_table(
            dir.path(),
            DataKey::Round4Elevations,
            json!([{"name": "Gengar-1", "scores": {"OppA": 0.7}}]),
        );
        let store = DataStore::new(config(dir.path()));

        let picks = vec![
            Some(DraftPick::with_iv("Gengar-1", Iv::Fifteen)),
            Some(DraftPick::with_iv("Gengar-1", Iv::Fifteen)),
        ];
        let report = calculate_draft(&store, Round::Round4, &picks).await;

        assert!(!report.slots[0].empty);
        assert_eq!(report.slots[0].data_key, Some(DataKey::Round4Elevations));
        // Other slots are fixed at 12 IV and read the regular table
        assert_eq!(report.slots[1].iv, Some(Iv::Twelve));
        assert_eq!(report.slots[1].data_key, Some(DataKey::Round4Table));
        assert!(report.slots[1].empty);
    }

    #[tokio::test]
    async fn test_quick_draft_picks() {
        let (_dir, store) = setup();
        let picks = quick_draft_picks(&store, Round::Round2, "Gengar1/Latios-8/Unknown-2").await;

        assert_eq!(
            picks,
            vec![Some(DraftPick::new("Gengar-1")), Some(DraftPick::new("Latios-8")), None]
        );
    }
}
