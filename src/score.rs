//! Current score and persisted-best bookkeeping
//!
//! `current` is round-scoped; `best` only ever increases and is the single
//! value handed to the persistence collaborator.

use serde::{Deserialize, Serialize};

/// Score state for the running process
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBoard {
    /// Points scored this round
    pub current: u32,
    /// Best score ever seen; monotonically non-decreasing
    pub best: u32,
    /// Whether the last finished round set a new best
    pub is_new_best: bool,
}

impl ScoreBoard {
    /// Start with a previously persisted best
    pub fn with_best(best: u32) -> Self {
        Self {
            current: 0,
            best,
            is_new_best: false,
        }
    }

    /// Called at every `Ready` entry
    pub fn on_round_start(&mut self) {
        self.current = 0;
        self.is_new_best = false;
    }

    /// One consumed score region. Returns the running total.
    pub fn on_score(&mut self) -> u32 {
        self.current += 1;
        self.current
    }

    /// True exactly when the latest point moved past the stored best.
    /// A zero best never triggers the live cue.
    pub fn just_surpassed_best(&self) -> bool {
        self.best > 0 && self.current == self.best + 1
    }

    /// Round-end commit. Returns true when `best` improved and wants a
    /// persistence write.
    pub fn on_round_end(&mut self) -> bool {
        if self.current > self.best {
            self.best = self.current;
            self.is_new_best = true;
        } else {
            self.is_new_best = false;
        }
        self.is_new_best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_start_resets_current_only() {
        let mut board = ScoreBoard::with_best(12);
        board.current = 5;
        board.is_new_best = true;
        board.on_round_start();
        assert_eq!(board.current, 0);
        assert_eq!(board.best, 12);
        assert!(!board.is_new_best);
    }

    #[test]
    fn test_best_is_monotonic_across_rounds() {
        let mut board = ScoreBoard::with_best(3);
        for round_score in [5u32, 2, 7, 0, 7] {
            board.on_round_start();
            for _ in 0..round_score {
                board.on_score();
            }
            let best_before = board.best;
            board.on_round_end();
            assert!(board.best >= best_before);
        }
        assert_eq!(board.best, 7);
    }

    #[test]
    fn test_is_new_best_iff_current_beats_prior_best() {
        let mut board = ScoreBoard::with_best(4);
        board.on_round_start();
        for _ in 0..4 {
            board.on_score();
        }
        assert!(!board.on_round_end(), "a tie is not a new best");
        assert!(!board.is_new_best);

        // Scenario: current 4, best 4, score the 5th point
        board.on_round_start();
        for _ in 0..4 {
            board.on_score();
        }
        assert!(!board.just_surpassed_best());
        board.on_score();
        assert_eq!(board.current, 5);
        assert!(board.just_surpassed_best());
        assert!(board.on_round_end());
        assert!(board.is_new_best);
        assert_eq!(board.best, 5);
    }

    #[test]
    fn test_no_live_cue_with_zero_best() {
        let mut board = ScoreBoard::default();
        board.on_score();
        assert!(!board.just_surpassed_best());
    }
}
