//! Overview Generator
//!
//! Builds the overview of every matchup table under the data directory
//! (`FACTORY_DATA_DIR`, default `.`) and writes it to `overview_data.json`,
//! or to the path given as the first argument.

use anyhow::Result;
use factory_data::{DataStore, write_overview};
use std::path::PathBuf;

#[tokio::main]
async fn main() -> Result<()> {
    let store = DataStore::from_env();
    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| store.config().overview_path());

    let overviews = write_overview(&store, &path).await?;

    for (key, overview) in &overviews {
        println!("{}:", key);
        if let Some(best) = overview.top_sets.first() {
            println!("  best set:  {} {}", best.display_name, best.display_score);
        }
        if let Some(team) = overview.top_teams.first() {
            println!(
                "  best team: {} ({:.3}, {} variants)",
                team.members.join(" + "),
                team.score,
                team.all_variants.len()
            );
        }
    }
    println!("Wrote {}", path.display());

    Ok(())
}
