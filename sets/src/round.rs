//! Rounds, IV options and the data tables they select
//!
//! Every round has its own frequency table and one or more matchup tables.
//! Which table a slot reads from depends on the round, the slot index and
//! the IV chosen for that slot.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ParseError;

/// Competitive stage selecting the frequency table and matchup tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Round {
    Round1,
    Round2,
    Round3,
    Round4,
    /// Round 5 and every round after it
    Round5,
}

/// Individual value options offered by the rental tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Iv {
    #[serde(rename = "3")]
    Three,
    #[serde(rename = "6")]
    Six,
    #[serde(rename = "9")]
    Nine,
    #[serde(rename = "12")]
    Twelve,
    #[serde(rename = "15")]
    Fifteen,
    #[serde(rename = "21")]
    TwentyOne,
    #[serde(rename = "31")]
    ThirtyOne,
    /// Opponent-style sets with random IVs
    #[serde(rename = "random")]
    Random,
}

/// Which kind of slot an IV is chosen for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotMode {
    /// Drafting from the rental table
    Table,
    /// Your current team while considering a swap
    Swap,
}

/// Identifier of one matchup table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DataKey {
    #[serde(rename = "round1")]
    Round1,
    #[serde(rename = "round2table")]
    Round2Table,
    #[serde(rename = "round2opponents")]
    Round2Opponents,
    #[serde(rename = "round3table")]
    Round3Table,
    #[serde(rename = "round3opponents")]
    Round3Opponents,
    #[serde(rename = "round4table")]
    Round4Table,
    #[serde(rename = "round4elevations")]
    Round4Elevations,
    #[serde(rename = "round4opponents")]
    Round4Opponents,
    #[serde(rename = "round5p15iv")]
    Round5P15Iv,
    #[serde(rename = "round5p21iv")]
    Round5P21Iv,
    #[serde(rename = "round5p31iv")]
    Round5P31Iv,
    #[serde(rename = "round5popponents")]
    Round5POpponents,
}

impl Round {
    pub const ALL: [Round; 5] = [
        Round::Round1,
        Round::Round2,
        Round::Round3,
        Round::Round4,
        Round::Round5,
    ];

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "round1" => Some(Round::Round1),
            "round2" => Some(Round::Round2),
            "round3" => Some(Round::Round3),
            "round4" => Some(Round::Round4),
            "round5" => Some(Round::Round5),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Round::Round1 => "round1",
            Round::Round2 => "round2",
            Round::Round3 => "round3",
            Round::Round4 => "round4",
            Round::Round5 => "round5",
        }
    }

    /// Path of this round's frequency file, relative to the data root
    pub fn frequency_file(&self) -> &'static str {
        match self {
            Round::Round1 => "frequencies/round_1_frequencies.json",
            Round::Round2 => "frequencies/round_2_frequencies.json",
            Round::Round3 => "frequencies/round_3_frequencies.json",
            Round::Round4 => "frequencies/round_4_frequencies.json",
            Round::Round5 => "frequencies/round_5plus_frequencies.json",
        }
    }

    /// IV used when a slot has no explicit choice
    pub fn default_iv(&self) -> Iv {
        match self {
            Round::Round1 => Iv::Three,
            Round::Round2 => Iv::Six,
            Round::Round3 => Iv::Nine,
            Round::Round4 => Iv::Twelve,
            Round::Round5 => Iv::ThirtyOne,
        }
    }

    /// IVs a slot may pick from. A single option means the IV is fixed.
    ///
    /// Swap slots can additionally hold a 3 IV set taken from an opponent.
    pub fn iv_options(&self, slot: usize, mode: SlotMode) -> &'static [Iv] {
        use Iv::*;

        match (self, mode) {
            (Round::Round1, _) => &[Three],
            (Round::Round2, SlotMode::Table) => &[Six],
            (Round::Round2, SlotMode::Swap) => &[Three, Six],
            (Round::Round3, SlotMode::Table) => &[Nine],
            (Round::Round3, SlotMode::Swap) => &[Three, Nine],
            (Round::Round4, SlotMode::Table) if slot == 0 => &[Twelve, Fifteen],
            (Round::Round4, SlotMode::Swap) if slot == 0 => &[Three, Twelve, Fifteen],
            (Round::Round4, SlotMode::Table) => &[Twelve],
            (Round::Round4, SlotMode::Swap) => &[Three, Twelve],
            (Round::Round5, SlotMode::Table) => &[Fifteen, TwentyOne, ThirtyOne, Random],
            (Round::Round5, SlotMode::Swap) => &[Three, Fifteen, TwentyOne, ThirtyOne, Random],
        }
    }

    /// Table a drafted slot reads from, or `None` if the IV is not offered for it
    pub fn draft_data_key(&self, slot: usize, iv: Iv) -> Option<DataKey> {
        if !self.iv_options(slot, SlotMode::Table).contains(&iv) {
            return None;
        }

        let key = match self {
            Round::Round1 => DataKey::Round1,
            Round::Round2 => DataKey::Round2Table,
            Round::Round3 => DataKey::Round3Table,
            // Only the first slot can be the elevated 15 IV pick
            Round::Round4 if slot == 0 && iv == Iv::Fifteen => DataKey::Round4Elevations,
            Round::Round4 => DataKey::Round4Table,
            Round::Round5 => match iv {
                Iv::Fifteen => DataKey::Round5P15Iv,
                Iv::TwentyOne => DataKey::Round5P21Iv,
                Iv::ThirtyOne => DataKey::Round5P31Iv,
                _ => DataKey::Round5POpponents,
            },
        };
        Some(key)
    }

    /// Table holding the builds opponents may use this round
    pub fn opponents_data_key(&self) -> DataKey {
        match self {
            Round::Round1 => DataKey::Round1,
            Round::Round2 => DataKey::Round2Opponents,
            Round::Round3 => DataKey::Round3Opponents,
            Round::Round4 => DataKey::Round4Opponents,
            Round::Round5 => DataKey::Round5POpponents,
        }
    }

    /// Table used to resolve quick team strings in table mode
    pub fn default_table_data_key(&self) -> DataKey {
        match self {
            Round::Round1 => DataKey::Round1,
            Round::Round2 => DataKey::Round2Table,
            Round::Round3 => DataKey::Round3Table,
            Round::Round4 => DataKey::Round4Table,
            Round::Round5 => DataKey::Round5P31Iv,
        }
    }

    /// Table one of your swap slots reads from.
    ///
    /// A 3 IV set was taken from an opponent, so it lives in the opponents table.
    pub fn swap_your_data_key(&self, slot: usize, iv: Iv) -> Option<DataKey> {
        if !self.iv_options(slot, SlotMode::Swap).contains(&iv) {
            return None;
        }
        if iv == Iv::Three {
            return Some(self.opponents_data_key());
        }
        self.draft_data_key(slot, iv)
    }
}

impl Iv {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "3" => Some(Iv::Three),
            "6" => Some(Iv::Six),
            "9" => Some(Iv::Nine),
            "12" => Some(Iv::Twelve),
            "15" => Some(Iv::Fifteen),
            "21" => Some(Iv::TwentyOne),
            "31" => Some(Iv::ThirtyOne),
            "random" => Some(Iv::Random),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Iv::Three => "3",
            Iv::Six => "6",
            Iv::Nine => "9",
            Iv::Twelve => "12",
            Iv::Fifteen => "15",
            Iv::TwentyOne => "21",
            Iv::ThirtyOne => "31",
            Iv::Random => "random",
        }
    }
}

impl DataKey {
    pub const ALL: [DataKey; 12] = [
        DataKey::Round1,
        DataKey::Round2Table,
        DataKey::Round2Opponents,
        DataKey::Round3Table,
        DataKey::Round3Opponents,
        DataKey::Round4Table,
        DataKey::Round4Elevations,
        DataKey::Round4Opponents,
        DataKey::Round5P15Iv,
        DataKey::Round5P21Iv,
        DataKey::Round5P31Iv,
        DataKey::Round5POpponents,
    ];

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.as_str() == s)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DataKey::Round1 => "round1",
            DataKey::Round2Table => "round2table",
            DataKey::Round2Opponents => "round2opponents",
            DataKey::Round3Table => "round3table",
            DataKey::Round3Opponents => "round3opponents",
            DataKey::Round4Table => "round4table",
            DataKey::Round4Elevations => "round4elevations",
            DataKey::Round4Opponents => "round4opponents",
            DataKey::Round5P15Iv => "round5p15iv",
            DataKey::Round5P21Iv => "round5p21iv",
            DataKey::Round5P31Iv => "round5p31iv",
            DataKey::Round5POpponents => "round5popponents",
        }
    }

    /// Path of the matchup table, relative to the data root
    pub fn file_path(&self) -> &'static str {
        match self {
            DataKey::Round1 => "matchupscores/set1matchups.json",
            DataKey::Round2Table => "matchupscores/set2matchupstable.json",
            DataKey::Round2Opponents => "matchupscores/set2matchupsopponents.json",
            DataKey::Round3Table => "matchupscores/set3matchupstable.json",
            DataKey::Round3Opponents => "matchupscores/set3matchupsopponents.json",
            DataKey::Round4Table => "matchupscores/set4matchupstable.json",
            DataKey::Round4Elevations => "matchupscores/set4matchupselevation.json",
            DataKey::Round4Opponents => "matchupscores/set4matchupsopponents.json",
            DataKey::Round5P15Iv => "matchupscores/round5pmatchupstable15IV.json",
            DataKey::Round5P21Iv => "matchupscores/round5pmatchupstable21IV.json",
            DataKey::Round5P31Iv => "matchupscores/round5pmatchupstable31IV.json",
            DataKey::Round5POpponents => "matchupscores/round5pmatchupsopponents.json",
        }
    }

    /// Round whose frequency table weights this table's matchups
    pub fn frequency_round(&self) -> Round {
        match self {
            DataKey::Round1 => Round::Round1,
            DataKey::Round2Table | DataKey::Round2Opponents => Round::Round2,
            DataKey::Round3Table | DataKey::Round3Opponents => Round::Round3,
            DataKey::Round4Table | DataKey::Round4Elevations | DataKey::Round4Opponents => {
                Round::Round4
            }
            DataKey::Round5P15Iv
            | DataKey::Round5P21Iv
            | DataKey::Round5P31Iv
            | DataKey::Round5POpponents => Round::Round5,
        }
    }
}

impl FromStr for Round {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Round::parse(s).ok_or_else(|| ParseError::UnknownRound(s.to_string()))
    }
}

impl FromStr for Iv {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Iv::parse(s).ok_or_else(|| ParseError::UnknownIv(s.to_string()))
    }
}

impl FromStr for DataKey {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DataKey::parse(s).ok_or_else(|| ParseError::UnknownDataKey(s.to_string()))
    }
}

impl fmt::Display for Round {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Iv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for DataKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
