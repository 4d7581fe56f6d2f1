//! Ping-pong ranking
//!
//! Statistics for a small, fixed group of players who record their games in a shared sheet.
//!
//! - `row_parser`: rebuilds matches from sheet rows (lenient live sync, strict bulk import)
//! - `date_filter`: narrows a match list to a date window
//! - `ranking`: Elo replay, leaderboard and titles
//! - `head_to_head`: opponent/score suggestions and rivalry lines for the entry wizard
//!
//! Nothing in here touches the network or the disk; callers hand in text and get data back.

pub mod data_loader;
pub mod date_filter;
pub mod error;
pub mod head_to_head;
pub mod ranking;
pub mod ranking_context;
pub mod report;
pub mod row_parser;
pub mod util;
pub mod wizard;

pub use data_loader::{MatchRecord, Roster};
pub use error::ImportError;
pub use ranking::{compute_leaderboard, compute_leaderboard_with, LeaderboardResult, LeaderboardTitles, PlayerStats};
pub use ranking_context::RankingContext;
