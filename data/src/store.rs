use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use factory_engine::{FrequencyEntry, FrequencyTable, FrequencyTables, PokemonReference, SetTable};
use factory_sets::{DataKey, Round};
use serde::de::DeserializeOwned;
use tokio::sync::{OnceCell, RwLock};
use tracing::{debug, info, warn};

use crate::config::StoreConfig;
use crate::error::DataError;

/// Caller-owned cache of everything read from the data directory.
///
/// Tables are parsed once per [`DataKey`] and shared through `Arc`, so
/// sessions can hold on to them while others load.
pub struct DataStore {
    config: StoreConfig,
    tables: RwLock<HashMap<DataKey, Arc<SetTable>>>,
    frequencies: OnceCell<Arc<FrequencyTables>>,
}

impl DataStore {
    pub fn new(config: StoreConfig) -> Self {
        Self {
            config,
            tables: RwLock::new(HashMap::new()),
            frequencies: OnceCell::new(),
        }
    }

    pub fn from_env() -> Self {
        Self::new(StoreConfig::from_env())
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Load a matchup table, reading it from disk on first use
    pub async fn load_table(&self, key: DataKey) -> Result<Arc<SetTable>, DataError> {
        if let Some(table) = self.tables.read().await.get(&key) {
            debug!(key = %key, "table cache hit");
            return Ok(Arc::clone(table));
        }

        let path = self.config.table_path(key);
        let table: SetTable = read_json(&path).await?;
        info!(key = %key, sets = table.len(), path = %path.display(), "loaded matchup table");

        let mut tables = self.tables.write().await;
        let table = tables.entry(key).or_insert_with(|| Arc::new(table));
        Ok(Arc::clone(table))
    }

    /// Frequency tables of every round, loaded once.
    ///
    /// A round whose file is missing or malformed gets an empty table, which
    /// weighs every opponent equally.
    pub async fn load_frequencies(&self) -> Arc<FrequencyTables> {
        let tables = self
            .frequencies
            .get_or_init(|| async {
                let mut tables = FrequencyTables::new();
                for round in Round::ALL {
                    tables.insert(round, self.load_frequency_table(round).await);
                }
                Arc::new(tables)
            })
            .await;
        Arc::clone(tables)
    }

    async fn load_frequency_table(&self, round: Round) -> FrequencyTable {
        let path = self.config.frequency_path(round);
        match read_json::<Vec<FrequencyEntry>>(&path).await {
            Ok(entries) => {
                info!(round = %round, entries = entries.len(), "loaded frequency table");
                FrequencyTable::from_entries(&entries)
            }
            Err(e) => {
                warn!(round = %round, error = %e, "frequency table unavailable, weighting evenly");
                FrequencyTable::new()
            }
        }
    }

    /// Load the pokemon reference table (not cached)
    pub async fn load_pokemon_reference(&self) -> Result<PokemonReference, DataError> {
        let path = self.config.pokemon_path();
        let reference: PokemonReference = read_json(&path).await?;
        info!(entries = reference.entries().len(), "loaded pokemon reference");
        Ok(reference)
    }
}

pub(crate) async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, DataError> {
    let bytes = tokio::fs::read(path).await.map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_slice(&bytes).map_err(|source| DataError::Json {
        path: path.to_path_buf(),
        source,
    })
}


#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::fixtures::*;
    use super::*;

    #[tokio::test]
    async fn test_load_table_caches() {
        let dir = tempfile::tempdir().unwrap();
        write_table(
            dir.path(),
            DataKey::Round1,
            json!([{"name": "Gengar-1", "scores": {"Latios-8": 0.4}}]),
        );
        let store = DataStore::new(config(dir.path()));

        let first = store.load_table(DataKey::Round1).await.unwrap();
        assert_eq!(first.len(), 1);
        assert_eq!(first.sets()[0].scores["Latios-8"], 0.4);

        // Served from cache even after the file is gone
        std::fs::remove_file(dir.path().join(DataKey::Round1.file_path())).unwrap();
        let second = store.load_table(DataKey::Round1).await.unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[tokio::test]
    async fn test_load_table_errors() {
        let dir = tempfile::tempdir().unwrap();
        let store = DataStore::new(config(dir.path()));

        let missing = store.load_table(DataKey::Round2Table).await.unwrap_err();
        assert!(matches!(missing, DataError::Io { .. }));
        assert!(missing.path().ends_with(DataKey::Round2Table.file_path()));

        write(dir.path(), DataKey::Round3Table.file_path(), &json!({"not": "a list"}));
        let malformed = store.load_table(DataKey::Round3Table).await.unwrap_err();
        assert!(matches!(malformed, DataError::Json { .. }));
    }

    #[tokio::test]
    async fn test_load_frequencies_falls_back_per_round() {
        let dir = tempfile::tempdir().unwrap();
        write_frequencies(
            dir.path(),
            Round::Round2,
            json!([
                {"name": "Gengar-2", "frequency": 4.0},
                {"name": "Gengar-2-Levitate", "frequency": 1.0},
                {"name": "Gengar-2-CursedBody", "frequency": 1.0}
            ]),
        );
        write(dir.path(), Round::Round3.frequency_file(), &json!("garbage"));
        let store = DataStore::new(config(dir.path()));

        let tables = store.load_frequencies().await;
        assert!(tables.contains(Round::Round2));
        assert_eq!(tables.for_round(Round::Round2).weight("Gengar-2-Levitate"), 2.0);
        assert!(tables.for_round(Round::Round3).is_empty());
        assert!(tables.for_round(Round::Round1).is_empty());

        let again = store.load_frequencies().await;
        assert!(Arc::ptr_eq(&tables, &again));
    }

    #[tokio::test]
    async fn test_load_pokemon_reference() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "pokemondata.json",
            &json!([{
                "name": "Gengar-1",
                "abilities": "Levitate",
                "item": "Leftovers",
                "move1": "Shadow Ball",
                "move2": "Thunderbolt",
                "move3": "Ice Punch",
                "move4": "Destiny Bond",
                "type1": "Ghost",
                "type2": "Poison"
            }]),
        );
        let store = DataStore::new(config(dir.path()));

        let reference = store.load_pokemon_reference().await.unwrap();
        let gengar = reference.find("Gengar-1").unwrap();
        assert_eq!(gengar.item, "Leftovers");
        assert_eq!(gengar.moves()[3], "Destiny Bond");
    }
}
