//! Data layer for the Battle Factory engine.
//!
//! Loads matchup tables, frequency tables and reference data from a data
//! directory, caches them for the lifetime of a [`DataStore`], and runs the
//! draft and swap sessions on top of `factory-engine`.
//!
//! ```ignore
//! use factory_data::{calculate_draft, DataStore, DraftPick};
//! use factory_sets::Round;
//!
//! let store = DataStore::from_env();
//! let picks = vec![Some(DraftPick::new("Gengar-1")), Some(DraftPick::new("Latios-8"))];
//! let report = calculate_draft(&store, Round::Round5, &picks).await;
//! ```

mod config;
pub mod draft;
mod error;
pub mod overview;
mod quick_team;
mod store;
pub mod swap;

pub use config::{StoreConfig, DATA_DIR_ENV};
pub use draft::{calculate_draft, quick_draft_picks, DraftPick, DraftReport, DraftSlotResult, DraftTeam, DRAFT_SLOTS};
pub use error::DataError;
pub use overview::{build_all, build_one, load_overview, write_overview, OverviewMap};
pub use quick_team::resolve_quick_team;
pub use store::DataStore;
pub use swap::{calculate_swaps, quick_swap_picks, SwapReport, SwapRequest, OPPONENT_DATA_ERROR, TEAM_SLOTS};
