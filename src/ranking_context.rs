// Knobs for the rating model. Everything is recomputed from the full match list on every run,
// so changing these never needs a migration.
#[derive(Debug, Clone)]
pub struct RankingContext {
    pub elo_k: f64,
    pub elo_delta: f64,
    pub starting_elo: f64,

    pub min_games_for_relevance: u32,
}

impl Default for RankingContext {
    fn default() -> Self {
        Self {
            elo_k: 32.0,
            elo_delta: 400.0,
            starting_elo: 1500.0,

            min_games_for_relevance: 10,
        }
    }
}

impl RankingContext {
    // Chance that a player rated `elo` beats one rated `opponent_elo`
    pub fn expected_score(&self, elo: f64, opponent_elo: f64) -> f64 {
        1.0 / (1.0 + f64::powf(10.0, (opponent_elo - elo) / self.elo_delta))
    }
}
