//! Pipe spawn cadence and randomized gap placement
//!
//! The spawner fires on a fixed interval while the round is live. Each spawn
//! draws the gap's vertical placement from the seeded RNG, guarded against
//! degenerate geometry: a spawn that cannot fit simply skips and the next
//! interval retries.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::{GameState, PipePair, ScoreRegion};
use crate::consts::*;

/// Repeating accumulator timer owned by the state machine.
///
/// Cancellation is synchronous: once `cancel` runs, no further fire can be
/// observed, so no stale spawn lands after the generator should be dormant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnTimer {
    interval: f32,
    elapsed: f32,
    running: bool,
}

impl SpawnTimer {
    pub fn new(interval: f32) -> Self {
        Self {
            interval,
            elapsed: 0.0,
            running: false,
        }
    }

    /// Restart the cadence from zero
    pub fn start(&mut self) {
        self.elapsed = 0.0;
        self.running = true;
    }

    pub fn cancel(&mut self) {
        self.running = false;
        self.elapsed = 0.0;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Advance by `dt` seconds; returns how many intervals elapsed
    pub fn advance(&mut self, dt: f32) -> u32 {
        if !self.running {
            return 0;
        }
        self.elapsed += dt;
        let mut fires = 0;
        while self.elapsed >= self.interval {
            self.elapsed -= self.interval;
            fires += 1;
        }
        fires
    }
}

/// Legal range for the gap's lower opening, or `None` when the world is too
/// short to fit padding, minimum pipe bodies, and the gap itself.
pub fn gap_bounds(world_height: f32, ground_height: f32) -> Option<(f32, f32)> {
    let min_gap_bottom = ground_height + PIPE_VERTICAL_PADDING + MIN_PIPE_BODY;
    let max_gap_bottom = world_height - PIPE_VERTICAL_PADDING - MIN_PIPE_BODY - PIPE_GAP;
    if max_gap_bottom <= min_gap_bottom {
        return None;
    }
    Some((min_gap_bottom, max_gap_bottom))
}

/// Spawn one pipe pair plus its score sensor at the right edge.
///
/// Returns false when this attempt was skipped (insufficient vertical room or
/// degenerate segment heights). Skips never end the round; the timer retries.
pub fn spawn_pipe_pair(state: &mut GameState) -> bool {
    let Some((min_gap_bottom, max_gap_bottom)) = gap_bounds(WORLD_HEIGHT, GROUND_HEIGHT) else {
        log::warn!("no vertical room for a pipe gap, skipping spawn");
        return false;
    };

    let gap_bottom = state.rng.random_range(min_gap_bottom..=max_gap_bottom);
    let gap_top = gap_bottom + PIPE_GAP;

    let bottom_height = gap_bottom - GROUND_HEIGHT;
    let top_height = WORLD_HEIGHT - gap_top;
    if bottom_height <= 0.0 || top_height <= 0.0 {
        log::warn!("degenerate pipe heights ({bottom_height}, {top_height}), skipping spawn");
        return false;
    }

    let x = WORLD_WIDTH + PIPE_WIDTH / 2.0;
    let pipe_id = state.next_entity_id();
    let region_id = state.next_entity_id();

    state.pipes.push(PipePair {
        id: pipe_id,
        x,
        gap_bottom,
        gap_top,
        passed: false,
    });
    state.score_regions.push(ScoreRegion {
        id: region_id,
        pipe_id,
        x,
        center_y: (gap_bottom + gap_top) / 2.0,
    });

    log::debug!("spawned pipe {pipe_id} with gap [{gap_bottom}, {gap_top}]");
    true
}
