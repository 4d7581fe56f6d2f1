//! Command line front end. Reads a sheet export or the device's stored matches and prints the
//! board or a rivalry summary.
//!
//! Usage: pingpong leaderboard --csv matches.csv --from 2024-06-01 --to 2024-06-30

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use log::info;

use pingpong_ranking::data_loader::{decode_local_matches, decode_sheet_values, read_csv_rows, write_csv_export};
use pingpong_ranking::date_filter::filter_matches;
use pingpong_ranking::head_to_head::{rivalry_report, suggest_opponent};
use pingpong_ranking::row_parser::{LenientRowParser, StrictSheetParser, TabularMatchParser};
use pingpong_ranking::{compute_leaderboard_with, MatchRecord, RankingContext, Roster};

#[derive(Parser)]
#[command(name = "pingpong")]
#[command(about = "House ping-pong leaderboard")]
struct Cli {
    /// Players in sheet column order
    #[arg(long, global = true, env = "PINGPONG_ROSTER", default_value = "Dad,Luc,Alex,Mom")]
    roster: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the leaderboard, optionally for a date window
    Leaderboard {
        #[command(flatten)]
        source: SourceArgs,

        /// First day to include (YYYY-MM-DD)
        #[arg(long)]
        from: Option<NaiveDate>,

        /// Last day to include (YYYY-MM-DD)
        #[arg(long)]
        to: Option<NaiveDate>,

        /// Print JSON instead of the text board
        #[arg(long)]
        json: bool,
    },

    /// Suggestions and trash talk for two players
    Rivalry {
        #[command(flatten)]
        source: SourceArgs,

        #[arg(short, long)]
        winner: String,

        /// Defaults to whoever the winner played last
        #[arg(short, long)]
        opponent: Option<String>,
    },

    /// Write matches back out in the sheet's column layout
    Export {
        #[command(flatten)]
        source: SourceArgs,

        /// Output CSV file, stdout if omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct SourceArgs {
    /// CSV export of the sheet (lenient: bad rows are skipped)
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Raw spreadsheet values response (strict: any bad row aborts)
    #[arg(long)]
    sheet_json: Option<PathBuf>,

    /// Matches saved on the device, newest first
    #[arg(long)]
    local_json: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let roster = Roster::from_list(&cli.roster);
    if roster.is_empty() {
        anyhow::bail!("Roster is empty, pass --roster or set PINGPONG_ROSTER");
    }
    let ranking_context = RankingContext::default();

    match cli.command {
        Commands::Leaderboard { source, from, to, json } => {
            let history = load_history(&source, &roster)?;
            let mut in_range = filter_matches(&history, from, to);
            info!("{} of {} matches in range", in_range.len(), history.len());

            // Oldest first for the Elo replay
            in_range.reverse();
            let result = compute_leaderboard_with(&in_range, &ranking_context);

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!("{}", range_summary(in_range.len(), history.len()));
                println!();
                println!("{}", result.printable);
            }
        }

        Commands::Rivalry { source, winner, opponent } => {
            check_player(&roster, &winner)?;
            if let Some(opponent) = &opponent {
                check_player(&roster, opponent)?;
            }

            let history = load_history(&source, &roster)?;

            let Some(opponent) = opponent.or_else(|| suggest_opponent(&history, &winner)) else {
                println!("{winner} has no recorded matches yet.");
                return Ok(());
            };

            println!("{winner} vs {opponent}");
            for line in rivalry_report(&history, &winner, &opponent) {
                println!("  {line}");
            }
        }

        Commands::Export { source, output } => {
            let history = load_history(&source, &roster)?;
            let text = write_csv_export(&history, &roster)?;

            match output {
                Some(path) => {
                    fs::write(&path, text).with_context(|| format!("Failed to write {}", path.display()))?;
                    info!("Wrote {} matches to {}", history.len(), path.display());
                }
                None => print!("{text}"),
            }
        }
    }

    Ok(())
}

// Full match history, newest first, from whichever source was given
fn load_history(source: &SourceArgs, roster: &Roster) -> Result<Vec<MatchRecord>> {
    if let Some(path) = &source.csv {
        let rows = read_csv_rows(&read_input(path)?)?;
        return Ok(LenientRowParser::new(roster.clone()).parse(&rows)?);
    }

    if let Some(path) = &source.sheet_json {
        let rows = decode_sheet_values(&read_input(path)?)?;
        let mut matches = StrictSheetParser
            .parse(&rows)
            .with_context(|| format!("Rejected {}", path.display()))?;
        matches.reverse();
        return Ok(matches);
    }

    if let Some(path) = &source.local_json {
        return Ok(decode_local_matches(&read_input(path)?)?);
    }

    anyhow::bail!("No match source given")
}

fn range_summary(in_range: usize, total: usize) -> String {
    format!("Matches in range: {in_range} of {total}")
}

fn check_player(roster: &Roster, name: &str) -> Result<()> {
    if !roster.contains(name) {
        anyhow::bail!("{name} is not on the roster ({})", roster.names().join(", "));
    }
    Ok(())
}

fn read_input(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to open {}", path.display()))
}
