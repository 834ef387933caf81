//! Swap Advisor
//!
//! Usage: `cargo run --example swap -- round5 "Gengar2/Latios8/Mew1" Snorlax Tyranitar`
//!
//! Your team comes from the pasted string (default IVs); every further
//! argument is an opponent pokemon that may be running any of its sets.

use anyhow::{Context, Result, bail};
use factory_data::{DataStore, SwapRequest, calculate_swaps, quick_swap_picks};
use factory_engine::OpponentSlot;
use factory_sets::Round;

#[tokio::main]
async fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let (Some(round), Some(team)) = (args.next(), args.next()) else {
        bail!("usage: swap <round1..round5> <your team> [opponent pokemon...]");
    };
    let round: Round = round.parse().context("Invalid round")?;
    let opponents: Vec<OpponentSlot> = args.take(3).map(OpponentSlot::any).collect();

    let store = DataStore::from_env();
    let your_team = quick_swap_picks(&store, round, &[], &team).await;
    let report = calculate_swaps(
        &store,
        &SwapRequest {
            round,
            your_team,
            opponents,
        },
    )
    .await;

    if report.summary.is_empty() {
        println!("No swap improves on the current team.");
    }
    for (idx, item) in report.summary.iter().enumerate() {
        println!("{}. {}", idx + 1, item.line());
    }

    println!();
    for option in report.options.iter().take(10) {
        match option.improvement_label() {
            Some(label) => println!("{:.3}  {} {}", option.score, option.description, label),
            None => println!("{:.3}  {}", option.score, option.description),
        }
    }

    Ok(())
}
