//! Draft Calculator
//!
//! Usage: `cargo run --example draft -- round5 "Gengar2/Latios8/Mew1/Snorlax3"`
//!
//! Resolves the pasted team against the round's default table, prints each
//! slot's weighted average and the five best teams.

use anyhow::{Context, Result, bail};
use factory_data::{DataStore, calculate_draft, quick_draft_picks};
use factory_sets::Round;

#[tokio::main]
async fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let (Some(round), Some(team)) = (args.next(), args.next()) else {
        bail!("usage: draft <round1..round5> <team string>");
    };
    let round: Round = round.parse().context("Invalid round")?;

    let store = DataStore::from_env();
    let picks = quick_draft_picks(&store, round, &team).await;
    if picks.iter().all(Option::is_none) {
        bail!("No set in {:?} was found in the {} table", team, round);
    }

    let report = calculate_draft(&store, round, &picks).await;

    for (idx, slot) in report.slots.iter().enumerate() {
        if slot.empty {
            println!("{}. {} (not found)", idx + 1, slot.name);
        } else {
            println!("{}. {} {:.3}", idx + 1, slot.name, slot.average);
        }
    }

    println!();
    for (idx, team) in report.teams.iter().take(5).enumerate() {
        println!("{}. {} {:.3}", idx + 1, team.display_name, team.score);
    }

    Ok(())
}
