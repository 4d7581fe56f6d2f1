// Rivalry helpers for the match entry flow. All of these expect history newest first and only
// ever look at what's there: no history means no suggestion, never an error.

use crate::data_loader::MatchRecord;
use crate::util::to_fixed_one;

// How many of the latest meetings count as "recent form"
const RECENT_MEETINGS: usize = 3;

// Whoever `player` faced most recently, if they've played at all
pub fn suggest_opponent(matches: &[MatchRecord], player: &str) -> Option<String> {
    matches
        .iter()
        .find(|m| m.is_in_game(player))
        .and_then(|m| m.other_player(player))
        .map(str::to_owned)
}

// What `opponent` scored the last time these two met, whoever won that one. None means
// "keep whatever default you had".
pub fn suggest_loser_score(matches: &[MatchRecord], winner: &str, opponent: &str) -> Option<u32> {
    last_head_to_head(matches, winner, opponent).and_then(|m| m.score_of(opponent))
}

pub fn last_head_to_head<'a>(matches: &'a [MatchRecord], first: &str, second: &str) -> Option<&'a MatchRecord> {
    matches.iter().find(|m| m.is_in_game(first) && m.is_in_game(second))
}

// Trash talk for the result screen. The caller puts the match that was just entered at the
// front of `matches`, so in practice the record always includes it.
pub fn bragging_lines(matches: &[MatchRecord], winner: &str, opponent: &str) -> Vec<String> {
    let head_to_head: Vec<&MatchRecord> = matches.iter().filter(|m| m.is_between(winner, opponent)).collect();

    if head_to_head.is_empty() {
        return vec![
            format!("{winner} is 1-0 against {opponent} so far."),
            "Set the tone early and keep the streak alive.".to_owned(),
        ];
    }

    let mut winner_wins = 0;
    let mut opponent_wins = 0;
    let mut total_margin: i64 = 0;

    for m in &head_to_head {
        let (ours, theirs) = scores_for(m, winner, opponent);
        if ours > theirs {
            winner_wins += 1;
        } else {
            opponent_wins += 1;
        }
        total_margin += ours as i64 - theirs as i64;
    }

    let recent = &head_to_head[..head_to_head.len().min(RECENT_MEETINGS)];
    let recent_wins = recent
        .iter()
        .filter(|m| {
            let (ours, theirs) = scores_for(m, winner, opponent);
            ours > theirs
        })
        .count();

    let average_margin = to_fixed_one((total_margin as f64 / head_to_head.len() as f64).abs());

    vec![
        format!("{winner} leads {winner_wins}-{opponent_wins} vs {opponent}."),
        format!("Won {recent_wins} of the last {} meetings.", recent.len()),
        format!("Average margin in this rivalry: {average_margin} points."),
    ]
}

// What to say about a pairing before anything new is entered: only games already on record.
// The 1-0 encouragement in `bragging_lines` assumes a just-entered win, so it doesn't belong here.
pub fn rivalry_report(matches: &[MatchRecord], winner: &str, opponent: &str) -> Vec<String> {
    let Some(score) = suggest_loser_score(matches, winner, opponent) else {
        return vec!["First meeting.".to_owned()];
    };

    let mut lines = vec![format!("Last time {opponent} scored {score}.")];
    lines.extend(bragging_lines(matches, winner, opponent));
    lines
}

// (winner's score, opponent's score) for a game between the two
fn scores_for(m: &MatchRecord, winner: &str, opponent: &str) -> (u32, u32) {
    let ours = if m.player_a == winner { m.score_a } else { m.score_b };
    let theirs = if m.player_a == opponent { m.score_a } else { m.score_b };
    (ours, theirs)
}
