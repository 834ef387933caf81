//! Overview file generation

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use factory_engine::{build_overview, Overview, OverviewConfig};
use factory_sets::DataKey;
use tracing::{info, warn};

use crate::error::DataError;
use crate::store::{read_json, DataStore};

/// Overviews keyed by table
pub type OverviewMap = BTreeMap<DataKey, Overview>;

/// Build the overview of one table
pub async fn build_one(store: &DataStore, key: DataKey) -> Result<Overview> {
    let table = store
        .load_table(key)
        .await
        .with_context(|| format!("Failed to load table {}", key))?;
    let freqs = store.load_frequencies().await;
    let config = OverviewConfig::for_data_key(key);

    tokio::task::spawn_blocking(move || {
        build_overview(&table, freqs.for_round(key.frequency_round()), &config)
    })
    .await
    .with_context(|| format!("Overview task for {} failed", key))
}

/// Build the overview of every table; tables that fail are logged and skipped
pub async fn build_all(store: &DataStore) -> OverviewMap {
    let mut overviews = OverviewMap::new();

    for key in DataKey::ALL {
        match build_one(store, key).await {
            Ok(overview) => {
                info!(
                    key = %key,
                    top_sets = overview.top_sets.len(),
                    top_teams = overview.top_teams.len(),
                    "built overview"
                );
                overviews.insert(key, overview);
            }
            Err(e) => warn!(key = %key, error = %e, "skipping overview"),
        }
    }

    overviews
}

/// Build every overview and write them as one JSON object to `path`
pub async fn write_overview(store: &DataStore, path: &Path) -> Result<OverviewMap> {
    let overviews = build_all(store).await;
    let json = serde_json::to_vec_pretty(&overviews).context("Failed to serialize overview")?;

    tokio::fs::write(path, json)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;
    info!(path = %path.display(), tables = overviews.len(), "wrote overview file");

    Ok(overviews)
}

/// Read a previously written overview file
pub async fn load_overview(store: &DataStore) -> Result<OverviewMap, DataError> {
    read_json(&store.config().overview_path()).await
}
