use std::fs;
use std::path::PathBuf;

use chrono::NaiveDate;
use pingpong_ranking::date_filter::filter_matches;
use pingpong_ranking::head_to_head::bragging_lines;
use pingpong_ranking::ranking::leaderboard_from_sheet_json;
use pingpong_ranking::{compute_leaderboard, MatchRecord, RankingContext};

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

fn season() -> Vec<MatchRecord> {
    let players = ["Dad", "Luc", "Alex", "Mom"];
    let mut matches = Vec::new();
    for i in 0..40u32 {
        let a = players[(i % 4) as usize];
        let b = players[((i * 3 + 1) % 4) as usize];
        if a == b { continue; }
        matches.push(MatchRecord::new(a, 21, b, (i * 7) % 23));
    }
    matches
}

#[test]
fn wins_and_losses_both_equal_match_count() {
    let matches = season();
    let result = compute_leaderboard(&matches);

    let wins: u32 = result.players.iter().map(|p| p.wins).sum();
    let losses: u32 = result.players.iter().map(|p| p.losses).sum();
    assert_eq!(wins as usize, matches.len());
    assert_eq!(losses as usize, matches.len());

    for p in &result.players {
        assert_eq!(p.games, p.wins + p.losses);
    }
}

#[test]
fn compute_is_deterministic() {
    let matches = season();
    let first = compute_leaderboard(&matches);
    let second = compute_leaderboard(&matches);

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).expect("serialize"),
        serde_json::to_string(&second).expect("serialize")
    );
}

#[test]
fn every_named_player_gets_one_row() {
    let matches = vec![
        MatchRecord::new("Dad", 21, "Luc", 3),
        MatchRecord::new("Luc", 21, "Dad", 3),
        MatchRecord::new("Alex", 21, "Mom", 3),
    ];
    let result = compute_leaderboard(&matches);

    let mut names: Vec<&str> = result.players.iter().map(|p| p.name.as_str()).collect();
    names.sort();
    assert_eq!(names, vec!["Alex", "Dad", "Luc", "Mom"]);
}

#[test]
fn ranking_is_sorted_by_elo_then_win_pct_then_games() {
    let result = compute_leaderboard(&season());
    for pair in result.players.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        assert!(
            a.elo > b.elo
                || (a.elo == b.elo && a.win_pct > b.win_pct)
                || (a.elo == b.elo && a.win_pct == b.win_pct && a.games >= b.games)
        );
    }
}

#[test]
fn date_window_then_rank() {
    let matches = vec![
        MatchRecord::new("Dad", 21, "Mom", 10).dated("2024-01-05 10:00"),
        MatchRecord::new("Luc", 21, "Alex", 15).dated("2024-06-10 18:30"),
    ];
    let june = filter_matches(
        &matches,
        NaiveDate::from_ymd_opt(2024, 6, 1),
        NaiveDate::from_ymd_opt(2024, 6, 30),
    );
    assert_eq!(june.len(), 1);

    let result = compute_leaderboard(&june);
    assert_eq!(result.players.len(), 2);
    assert_eq!(result.titles.elo_champion.as_deref(), Some("Luc"));
}

#[test]
fn remote_sheet_to_board() {
    let result = leaderboard_from_sheet_json(&read_fixture("sheet_values.json"), &RankingContext::default())
        .expect("fixture is well formed");

    assert_eq!(result.players.len(), 4);
    assert_eq!(result.titles.elo_champion.as_deref(), Some("Luc"));
    assert!(result.printable.starts_with("HOUSE PING-PONG LEADERBOARD\n"));
    assert!(result.printable.ends_with("Disclaimer: Elo does not care about excuses, warm-ups, or vibes."));
}

#[test]
fn remote_sheet_with_bad_row_fails() {
    let err = leaderboard_from_sheet_json(&read_fixture("sheet_values_bad_row.json"), &RankingContext::default())
        .expect_err("row 3 is malformed");
    assert!(err.to_string().contains("row 3"));
}

#[test]
fn bragging_after_a_split_series() {
    let history = vec![
        MatchRecord::new("Dad", 21, "Luc", 19),
        MatchRecord::new("Luc", 21, "Dad", 11),
        MatchRecord::new("Dad", 21, "Luc", 17),
    ];

    let lines = bragging_lines(&history, "Dad", "Luc");
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "Dad leads 2-1 vs Luc.");

    let fresh = bragging_lines(&[], "Alex", "Mom");
    assert_eq!(fresh.len(), 2);
    assert!(fresh[0].contains("1-0"));
}
