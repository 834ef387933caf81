use thiserror::Error;

pub mod name;
pub mod round;

pub use name::{
    compact_set_names, extract_base_name, parse_set_name, parse_team_string, pokemon_base,
    pokemon_name, set_number, ParsedSetName, SetId,
};
pub use round::{DataKey, Iv, Round, SlotMode};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid set identifier: {0}")]
    InvalidFormat(String),

    #[error("Unknown round: {0}")]
    UnknownRound(String),

    #[error("Unknown IV option: {0}")]
    UnknownIv(String),

    #[error("Unknown data key: {0}")]
    UnknownDataKey(String),

    #[error("Empty input")]
    EmptyInput,
}
