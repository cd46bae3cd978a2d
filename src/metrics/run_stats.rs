use std::time::{Duration, Instant};

use crate::game::TickOutcome;

/// Figures for one sitting at the terminal, kept in memory only
///
/// Fed with the outcome of every `advance` so that it never disagrees with
/// the session about when a game ended or what it scored.
#[derive(Debug, Clone)]
pub struct RunStats {
    round_started: Instant,
    round_time: Duration,
    round_over: bool,
    games_played: u32,
    food_eaten: u32,
    last_score: Option<u32>,
}

impl RunStats {
    pub fn new(now: Instant) -> Self {
        Self {
            round_started: now,
            round_time: Duration::ZERO,
            round_over: false,
            games_played: 0,
            food_eaten: 0,
            last_score: None,
        }
    }

    /// Fold one tick outcome into the figures
    pub fn record(&mut self, outcome: &TickOutcome, now: Instant) {
        match outcome {
            TickOutcome::Idle | TickOutcome::Moved => {}
            TickOutcome::Ate => self.food_eaten += 1,
            TickOutcome::GameOver { final_score, .. } => {
                self.tick_clock(now);
                self.round_over = true;
                self.games_played += 1;
                self.last_score = Some(*final_score);
            }
        }
    }

    /// Bring the round clock up to `now`; frozen once the round is over
    pub fn tick_clock(&mut self, now: Instant) {
        if !self.round_over {
            self.round_time = now.saturating_duration_since(self.round_started);
        }
    }

    /// Restart the round clock for a new game; totals carry over
    pub fn new_round(&mut self, now: Instant) {
        self.round_started = now;
        self.round_time = Duration::ZERO;
        self.round_over = false;
    }

    pub fn games_played(&self) -> u32 {
        self.games_played
    }

    /// Food eaten across every game of the run
    pub fn food_eaten(&self) -> u32 {
        self.food_eaten
    }

    /// Final score of the most recent finished game
    pub fn last_score(&self) -> Option<u32> {
        self.last_score
    }

    pub fn round_time(&self) -> Duration {
        self.round_time
    }

    /// Round time as `MM:SS`; minutes keep counting past an hour
    pub fn round_clock(&self) -> String {
        let total_secs = self.round_time.as_secs();
        format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
    }
}
