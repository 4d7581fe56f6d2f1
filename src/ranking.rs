use std::cmp::Ordering;
use std::collections::HashMap;

use log::debug;
use serde::*;

use crate::data_loader::{decode_sheet_values, MatchRecord};
use crate::error::ImportError;
use crate::ranking_context::RankingContext;
use crate::report::build_printable;
use crate::row_parser::parse_sheet_strict;
use crate::util::round_to_one_decimal;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStats {
    pub name: String,
    pub wins: u32,
    pub losses: u32,
    pub games: u32,
    pub win_pct: f64,
    pub elo: i64,
}

impl PlayerStats {
    pub fn is_statistically_relevant(&self, ranking_context: &RankingContext) -> bool {
        self.games >= ranking_context.min_games_for_relevance
    }
}

// Each title is its own superlative over the same players, so with ties two titles can name
// different people even when they look at the same column.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardTitles {
    pub elo_champion: Option<String>,
    pub win_pct_champion: Option<String>,
    pub most_wins: Option<String>,
    pub most_games: Option<String>,
    pub statistically_relevant: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LeaderboardResult {
    pub players: Vec<PlayerStats>,
    pub titles: LeaderboardTitles,
    pub printable: String,
}

// Running totals while we replay the match list. Elo stays unrounded until the very end.
#[derive(Debug)]
struct Tally {
    name: String,
    wins: u32,
    losses: u32,
    games: u32,
    elo: f64,
}

pub fn compute_leaderboard(matches: &[MatchRecord]) -> LeaderboardResult {
    compute_leaderboard_with(matches, &RankingContext::default())
}

// Replays `matches` in the order given, so feed them oldest first. Nothing is cached between
// calls; the same input always gives the same output.
pub fn compute_leaderboard_with(matches: &[MatchRecord], ranking_context: &RankingContext) -> LeaderboardResult {
    let tallies = elo_adjustments(matches, ranking_context);

    let mut players: Vec<PlayerStats> = tallies
        .into_iter()
        .map(|t| PlayerStats {
            win_pct: if t.games > 0 { round_to_one_decimal(t.wins as f64 / t.games as f64 * 100.0) } else { 0.0 },
            elo: t.elo.round() as i64,
            name: t.name,
            wins: t.wins,
            losses: t.losses,
            games: t.games,
        })
        .collect();

    players.sort_by(rank_order);

    let titles = LeaderboardTitles {
        elo_champion: players.first().map(|p| p.name.clone()),
        win_pct_champion: leader_by(&players, |a, b| a.win_pct.total_cmp(&b.win_pct)),
        most_wins: leader_by(&players, |a, b| a.wins.cmp(&b.wins)),
        most_games: leader_by(&players, |a, b| a.games.cmp(&b.games)),
        statistically_relevant: players
            .iter()
            .filter(|p| p.is_statistically_relevant(ranking_context))
            .map(|p| p.name.clone())
            .collect(),
    };

    let printable = build_printable(&players, &titles, ranking_context);

    LeaderboardResult { players, titles, printable }
}

// The remote bulk path: a raw values response goes through the strict parser and straight into
// the rating. Any malformed row fails the whole thing.
pub fn leaderboard_from_sheet_json(json: &str, ranking_context: &RankingContext) -> Result<LeaderboardResult, ImportError> {
    let rows = decode_sheet_values(json)?;
    let matches = parse_sheet_strict(&rows)?;
    Ok(compute_leaderboard_with(&matches, ranking_context))
}

// Highest Elo first, then win %, then games played
pub fn rank_order(a: &PlayerStats, b: &PlayerStats) -> Ordering {
    b.elo.cmp(&a.elo)
        .then_with(|| b.win_pct.total_cmp(&a.win_pct))
        .then_with(|| b.games.cmp(&a.games))
}

fn elo_adjustments(matches: &[MatchRecord], ranking_context: &RankingContext) -> Vec<Tally> {
    let mut tallies: Vec<Tally> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for m in matches {
        let a = insert_player(&mut tallies, &mut index, &m.player_a, ranking_context);
        let b = insert_player(&mut tallies, &mut index, &m.player_b, ranking_context);

        tallies[a].games += 1;
        tallies[b].games += 1;

        let (winner, loser) = if m.side_a_won() { (a, b) } else { (b, a) };

        tallies[winner].wins += 1;
        tallies[loser].losses += 1;

        let expected_winner = ranking_context.expected_score(tallies[winner].elo, tallies[loser].elo);
        let expected_loser = ranking_context.expected_score(tallies[loser].elo, tallies[winner].elo);

        tallies[winner].elo += ranking_context.elo_k * (1.0 - expected_winner);
        tallies[loser].elo += ranking_context.elo_k * (0.0 - expected_loser);
    }

    debug!("Replayed {} matches for {} players", matches.len(), tallies.len());
    tallies
}

// Index of `name` in the tally list, adding a fresh entry on first sight
fn insert_player(tallies: &mut Vec<Tally>, index: &mut HashMap<String, usize>, name: &str, ranking_context: &RankingContext) -> usize {
    if let Some(&idx) = index.get(name) {
        return idx;
    }

    tallies.push(Tally {
        name: name.to_owned(),
        wins: 0,
        losses: 0,
        games: 0,
        elo: ranking_context.starting_elo,
    });
    index.insert(name.to_owned(), tallies.len() - 1);

    tallies.len() - 1
}

// Name of whoever comes out on top under `cmp`. Ties go to the better-ranked player since the
// sort is stable over the ranked list.
fn leader_by<F>(players: &[PlayerStats], cmp: F) -> Option<String> where
    F: Fn(&PlayerStats, &PlayerStats) -> Ordering {
    let mut sorted: Vec<&PlayerStats> = players.iter().collect();
    sorted.sort_by(|a, b| cmp(b, a));
    sorted.first().map(|p| p.name.clone())
}
