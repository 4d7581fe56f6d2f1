use crate::ranking::{LeaderboardTitles, PlayerStats};
use crate::ranking_context::RankingContext;

// Plain-text board for pasting into a group chat. Other tools read this verbatim, keep the layout stable.
pub fn build_printable(players: &[PlayerStats], titles: &LeaderboardTitles, ranking_context: &RankingContext) -> String {
    let header = "HOUSE PING-PONG LEADERBOARD\nRank | Player | Wins | Games | Win % | Elo";

    let rows = players
        .iter()
        .enumerate()
        .map(|(i, p)| format!("{} | {} | {} | {} | {}% | {}", i + 1, p.name, p.wins, p.games, p.win_pct, p.elo))
        .collect::<Vec<_>>()
        .join("\n");

    let relevant = if titles.statistically_relevant.is_empty() {
        "None".to_owned()
    } else {
        titles.statistically_relevant.join(", ")
    };

    let titles_block = format!(
        "\nTitles:\n\
         Elo Champion: {}\n\
         Win % Champion: {}\n\
         Most Wins: {}\n\
         Most Games Played: {}\n\
         Statistically relevant (≥{} games): {}\n\
         \n\
         Disclaimer: Elo does not care about excuses, warm-ups, or vibes.",
        title_or_none(&titles.elo_champion),
        title_or_none(&titles.win_pct_champion),
        title_or_none(&titles.most_wins),
        title_or_none(&titles.most_games),
        ranking_context.min_games_for_relevance,
        relevant,
    );

    format!("{header}\n{rows}\n{titles_block}")
}

fn title_or_none(title: &Option<String>) -> &str {
    title.as_deref().unwrap_or("None")
}
