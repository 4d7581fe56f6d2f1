// The "who won?" entry flow: pick the winner, pick who they beat, set the score, show the result.
// Opponent and loser score are pre-filled from history as soon as there is something to go on.

use rand::seq::IndexedRandom;
use rand::Rng;

use crate::data_loader::{MatchRecord, Roster};
use crate::head_to_head::{bragging_lines, suggest_loser_score, suggest_opponent};

pub const DEFAULT_WINNER_SCORE: u32 = 21;
pub const DEFAULT_LOSER_SCORE: u32 = 15;

pub const CELEBRATIONS: [&str; 5] = [
    "https://media.giphy.com/media/26tOZ42Mg6pbTUPHW/giphy.gif",
    "https://media.giphy.com/media/111ebonMs90YLu/giphy.gif",
    "https://media.giphy.com/media/3o7abB06u9bNzA8lu8/giphy.gif",
    "https://media.giphy.com/media/l0HlB1OePqB2be2yQ/giphy.gif",
    "https://media.giphy.com/media/26ufdipQqU2lhNA4g/giphy.gif",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    SelectWinner,
    SelectOpponent,
    SetScore,
    Result,
}

#[derive(Debug, Clone)]
pub struct MatchWizard {
    pub roster: Roster,
    // Small screens skip the opponent step when history already suggests one
    pub compact: bool,

    pub step: WizardStep,
    pub winner: String,
    pub opponent: String,
    pub winner_score: u32,
    pub loser_score: u32,

    pub celebration: Option<&'static str>,
    pub bragging_lines: Vec<String>,
}

impl MatchWizard {
    pub fn new(roster: Roster, compact: bool) -> Self {
        Self {
            roster,
            compact,

            step: WizardStep::SelectWinner,
            winner: String::new(),
            opponent: String::new(),
            winner_score: DEFAULT_WINNER_SCORE,
            loser_score: DEFAULT_LOSER_SCORE,

            celebration: None,
            bragging_lines: Vec::new(),
        }
    }

    pub fn winner_options(&self) -> Vec<&str> {
        self.roster.names().iter().map(String::as_str).collect()
    }

    pub fn opponent_options(&self) -> Vec<&str> {
        self.roster.names().iter().map(String::as_str).filter(|n| *n != self.winner).collect()
    }

    // `history` is newest first
    pub fn pick_winner(&mut self, player: &str, history: &[MatchRecord]) {
        self.winner = player.to_owned();
        self.opponent = suggest_opponent(history, player).unwrap_or_default();
        if !self.opponent.is_empty() {
            self.prefill_loser_score(history);
        }

        self.step = if self.compact { WizardStep::SetScore } else { WizardStep::SelectOpponent };
    }

    pub fn pick_opponent(&mut self, player: &str, history: &[MatchRecord]) {
        self.opponent = player.to_owned();
        self.prefill_loser_score(history);
        self.step = WizardStep::SetScore;
    }

    pub fn set_winner_score(&mut self, score: u32) {
        self.winner_score = score;
    }

    pub fn set_loser_score(&mut self, score: u32) {
        self.loser_score = score;
    }

    // Finishes the flow. Returns the new match for the caller to store, or None if the winner or
    // opponent is still missing. `played_at` is whatever timestamp text the caller stores.
    pub fn submit<R: Rng + ?Sized>(&mut self, played_at: &str, history: &[MatchRecord], rng: &mut R) -> Option<MatchRecord> {
        if self.winner.is_empty() || self.opponent.is_empty() {
            return None;
        }

        let current = MatchRecord::new(&self.winner, self.winner_score, &self.opponent, self.loser_score).dated(played_at);

        let mut with_current = Vec::with_capacity(history.len() + 1);
        with_current.push(current.clone());
        with_current.extend_from_slice(history);

        self.bragging_lines = bragging_lines(&with_current, &self.winner, &self.opponent);
        self.celebration = CELEBRATIONS.choose(rng).copied();
        self.step = WizardStep::Result;

        Some(current)
    }

    pub fn restart(&mut self) {
        *self = Self::new(self.roster.clone(), self.compact);
    }

    fn prefill_loser_score(&mut self, history: &[MatchRecord]) {
        if self.winner.is_empty() || self.opponent.is_empty() { return; }

        if let Some(score) = suggest_loser_score(history, &self.winner, &self.opponent) {
            self.loser_score = score;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn wizard(compact: bool) -> MatchWizard {
        MatchWizard::new(Roster::new(&["Dad", "Luc", "Alex", "Mom"]), compact)
    }

    fn history() -> Vec<MatchRecord> {
        vec![
            MatchRecord::new("Luc", 21, "Dad", 18).dated("2024-05-12 19:00"),
            MatchRecord::new("Mom", 21, "Alex", 4).dated("2024-05-11 19:00"),
        ]
    }

    #[test]
    fn picking_a_winner_prefills_from_history() {
        let mut w = wizard(false);
        w.pick_winner("Dad", &history());

        assert_eq!(w.step, WizardStep::SelectOpponent);
        assert_eq!(w.opponent, "Luc");
        assert_eq!(w.loser_score, 21);
        assert_eq!(w.opponent_options(), vec!["Luc", "Alex", "Mom"]);
    }

    #[test]
    fn compact_mode_skips_to_score() {
        let mut w = wizard(true);
        w.pick_winner("Alex", &history());
        assert_eq!(w.step, WizardStep::SetScore);
        assert_eq!(w.opponent, "Mom");
        assert_eq!(w.loser_score, 21);
    }

    #[test]
    fn unknown_pairing_keeps_default_score() {
        let mut w = wizard(false);
        w.pick_winner("Dad", &[]);
        assert_eq!(w.opponent, "");
        w.pick_opponent("Alex", &history());
        assert_eq!(w.step, WizardStep::SetScore);
        assert_eq!(w.loser_score, DEFAULT_LOSER_SCORE);
    }

    #[test]
    fn submit_requires_both_players() {
        let mut w = wizard(false);
        let mut rng = StdRng::seed_from_u64(7);
        assert!(w.submit("now", &[], &mut rng).is_none());
        assert_eq!(w.step, WizardStep::SelectWinner);
    }

    #[test]
    fn submit_counts_the_new_match() {
        let mut w = wizard(false);
        let mut rng = StdRng::seed_from_u64(7);

        w.pick_winner("Dad", &history());
        w.set_winner_score(11);
        w.set_loser_score(6);
        let m = w.submit("2024-05-13 20:00", &history(), &mut rng).expect("both players chosen");

        assert_eq!(m, MatchRecord::new("Dad", 11, "Luc", 6).dated("2024-05-13 20:00"));
        assert_eq!(w.step, WizardStep::Result);
        assert_eq!(w.bragging_lines[0], "Dad leads 1-1 vs Luc.");
        assert!(w.celebration.is_some_and(|c| CELEBRATIONS.contains(&c)));
    }

    #[test]
    fn restart_resets_everything_but_the_roster() {
        let mut w = wizard(true);
        let mut rng = StdRng::seed_from_u64(1);
        w.pick_winner("Dad", &history());
        w.submit("now", &history(), &mut rng);

        w.restart();
        assert_eq!(w.step, WizardStep::SelectWinner);
        assert_eq!(w.winner, "");
        assert_eq!(w.winner_score, DEFAULT_WINNER_SCORE);
        assert_eq!(w.loser_score, DEFAULT_LOSER_SCORE);
        assert!(w.celebration.is_none());
        assert!(w.bragging_lines.is_empty());
        assert!(w.compact);
        assert_eq!(w.winner_options().len(), 4);
    }
}
