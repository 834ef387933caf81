//! Records the engine reads: set tables, frequency tables and reference data

mod frequency;
mod pokemon_type;
mod reference;
mod set;

pub use frequency::{FrequencyEntry, FrequencyTable, FrequencyTables, DEFAULT_FREQUENCY_WEIGHT};
pub use pokemon_type::PokemonType;
pub use reference::{PokemonInfo, PokemonReference};
pub use set::{Scores, SetRecord, SetTable};
