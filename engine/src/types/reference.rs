//! Pokemon reference data (ability, item, moves and types of each base set)

use std::collections::BTreeSet;

use factory_sets::pokemon_name;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::pokemon_type::PokemonType;

/// One row of the pokemon reference table, keyed by base set name
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PokemonInfo {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub abilities: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub item: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub move1: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub move2: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub move3: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub move4: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub type1: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub type2: Option<String>,
}

impl PokemonInfo {
    pub fn moves(&self) -> [&str; 4] {
        [&self.move1, &self.move2, &self.move3, &self.move4]
    }

    /// Parsed types; unknown type names are skipped
    pub fn types(&self) -> Vec<PokemonType> {
        [&self.type1, &self.type2]
            .into_iter()
            .flatten()
            .filter_map(|t| PokemonType::parse(t))
            .collect()
    }

    pub fn has_type(&self, pokemon_type: PokemonType) -> bool {
        self.types().contains(&pokemon_type)
    }
}

/// The full reference table
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct PokemonReference {
    entries: Vec<PokemonInfo>,
}

impl PokemonReference {
    pub fn new(entries: Vec<PokemonInfo>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[PokemonInfo] {
        &self.entries
    }

    /// Look up a base set name such as `Gengar-2`
    pub fn find(&self, base_name: &str) -> Option<&PokemonInfo> {
        self.entries.iter().find(|e| e.name == base_name)
    }

    /// Distinct pokemon names starting with `query` (case-insensitive), sorted
    pub fn search_pokemon_names(&self, query: &str) -> Vec<&str> {
        let query = query.to_lowercase();
        self.entries
            .iter()
            .map(|e| pokemon_name(&e.name))
            .filter(|name| name.to_lowercase().starts_with(&query))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}
