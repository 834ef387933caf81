//! Set records and the tables that hold them

use factory_sets::{pokemon_name, SetId};
use indexmap::IndexMap;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Expected result against each opponent set, keyed by opponent set name.
///
/// Keeps the order the table lists opponents in, which decides how
/// ability variants merge for display.
pub type Scores = IndexMap<String, f64>;

/// One named build and its matchup scores
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SetRecord {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub scores: Scores,
}

impl SetRecord {
    pub fn new(name: impl Into<String>, scores: Scores) -> Self {
        Self {
            name: name.into(),
            scores,
        }
    }
}

/// An ordered matchup table as loaded from disk
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct SetTable {
    sets: Vec<SetRecord>,
}

impl SetTable {
    pub fn new(sets: Vec<SetRecord>) -> Self {
        Self { sets }
    }

    pub fn sets(&self) -> &[SetRecord] {
        &self.sets
    }

    pub fn iter(&self) -> impl Iterator<Item = &SetRecord> {
        self.sets.iter()
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// Find a set by exact name
    pub fn find(&self, name: &str) -> Option<&SetRecord> {
        self.sets.iter().find(|s| s.name == name)
    }

    /// Every set of one pokemon (case-insensitive on the pokemon name)
    pub fn sets_for_pokemon<'a>(&'a self, pokemon: &str) -> impl Iterator<Item = &'a SetRecord> {
        let pokemon = pokemon.to_lowercase();
        self.sets
            .iter()
            .filter(move |s| pokemon_name(&s.name).to_lowercase() == pokemon)
    }

    /// Resolve a typed set id, falling back to its first ability variant
    pub fn resolve(&self, id: &SetId) -> Option<&SetRecord> {
        let name = id.to_string();
        self.find(&name).or_else(|| {
            let prefix = format!("{}-", name);
            self.sets.iter().find(|s| s.name.starts_with(&prefix))
        })
    }

    /// Sets whose name starts with `query`, ignoring case
    pub fn search(&self, query: &str) -> Vec<&SetRecord> {
        let query = query.to_lowercase();
        self.sets
            .iter()
            .filter(|s| s.name.to_lowercase().starts_with(&query))
            .collect()
    }
}

impl FromIterator<SetRecord> for SetTable {
    fn from_iter<I: IntoIterator<Item = SetRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> SetTable {
        ["Gengar-1", "Gengar-2-Levitate", "Gengar-2-CursedBody", "Latios-8"]
            .into_iter()
            .map(|name| SetRecord::new(name, Scores::new()))
            .collect()
    }

    #[test]
    fn test_sets_for_pokemon_ignores_case() {
        let table = table();
        let names: Vec<&str> = table
            .sets_for_pokemon("gengar")
            .map(|s| s.name.as_str())
            .collect();

        assert_eq!(names, vec!["Gengar-1", "Gengar-2-Levitate", "Gengar-2-CursedBody"]);
    }

    #[test]
    fn test_resolve_prefers_exact_then_variant() {
        let table = table();

        let exact = SetId::parse("Gengar1").unwrap();
        assert_eq!(table.resolve(&exact).map(|s| s.name.as_str()), Some("Gengar-1"));

        let variant = SetId::parse("Gengar-2").unwrap();
        assert_eq!(
            table.resolve(&variant).map(|s| s.name.as_str()),
            Some("Gengar-2-Levitate")
        );

        let missing = SetId::parse("Gengar-9").unwrap();
        assert!(table.resolve(&missing).is_none());
    }

    #[test]
    fn test_search_prefix() {
        let table = table();
        assert_eq!(table.search("lat").len(), 1);
        assert_eq!(table.search("GENGAR-2").len(), 2);
        assert!(table.search("x").is_empty());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_table() {
        let json = r#"[{"name": "Gengar-1", "scores": {"Latios-8": 0.25}}, {"name": "Latios-8"}]"#;
        let table: SetTable = serde_json::from_str(json).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.sets()[0].scores.get("Latios-8"), Some(&0.25));
        assert!(table.sets()[1].scores.is_empty());
    }
}
