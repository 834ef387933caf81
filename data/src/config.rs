use std::path::PathBuf;

use factory_sets::{DataKey, Round};

/// Environment variable overriding [`StoreConfig::root`]
pub const DATA_DIR_ENV: &str = "FACTORY_DATA_DIR";

/// Where the data files live
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Directory every other path is relative to
    pub root: PathBuf,
    pub pokemon_file: PathBuf,
    pub overview_file: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            pokemon_file: PathBuf::from("pokemondata.json"),
            overview_file: PathBuf::from("overview_data.json"),
        }
    }
}

impl StoreConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    /// Defaults, with the root taken from `FACTORY_DATA_DIR` when set
    pub fn from_env() -> Self {
        match std::env::var(DATA_DIR_ENV) {
            Ok(root) if !root.trim().is_empty() => Self::new(root),
            _ => Self::default(),
        }
    }

    pub fn table_path(&self, key: DataKey) -> PathBuf {
        self.root.join(key.file_path())
    }

    pub fn frequency_path(&self, round: Round) -> PathBuf {
        self.root.join(round.frequency_file())
    }

    pub fn pokemon_path(&self) -> PathBuf {
        self.root.join(&self.pokemon_file)
    }

    pub fn overview_path(&self) -> PathBuf {
        self.root.join(&self.overview_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_are_relative_to_root() {
        let config = StoreConfig::new("/data/factory");

        assert_eq!(
            config.table_path(DataKey::Round4Elevations),
            PathBuf::from("/data/factory/matchupscores/set4matchupselevation.json")
        );
        assert_eq!(
            config.frequency_path(Round::Round5),
            PathBuf::from("/data/factory/frequencies/round_5plus_frequencies.json")
        );
        assert_eq!(config.pokemon_path(), PathBuf::from("/data/factory/pokemondata.json"));
        assert_eq!(config.overview_path(), PathBuf::from("/data/factory/overview_data.json"));
    }

    #[test]
    fn test_default_root() {
        assert_eq!(StoreConfig::default().root, PathBuf::from("."));
    }
}
