//! Game state and core simulation types
//!
//! All state that must be persisted for snapshots/determinism lives here.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::spawn::SpawnTimer;
use crate::consts::*;
use crate::score::ScoreBoard;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Character selection screen
    Selecting,
    /// Bird placed at spawn pose, waiting for the first tap
    Ready,
    /// Active gameplay
    Playing,
    /// Round over, waiting for a tap back to selection
    Ended,
}

/// Events emitted by the simulation for the renderer/audio/persistence shell
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// A character preview was tapped (index into [`CHARACTER_OPTIONS`])
    CharacterChosen(usize),
    /// The bird received a flap impulse
    Flapped,
    /// A score region was consumed; `total` is the running score
    Scored { total: u32 },
    /// The running score just exceeded the stored best (live cue, not the commit)
    BestSurpassed { score: u32 },
    /// The round ended; `new_best` means `best` was updated and wants persisting
    RoundEnded { score: u32, best: u32, new_best: bool },
}

/// The controlled body: fixed x, vertical flight only
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bird {
    pub pos: Vec2,
    /// Vertical velocity (points/s, positive = up)
    pub vel_y: f32,
    /// Derived visual rotation in radians
    pub rotation: f32,
    /// While false the bird is frozen (pre-flight and post-round)
    pub gravity_enabled: bool,
    /// Index into [`CHARACTER_OPTIONS`]
    pub character: usize,
}

impl Bird {
    /// Create a bird at the spawn pose, gravity off
    pub fn new(character: usize) -> Self {
        Self {
            pos: Vec2::new(BIRD_START_X, BIRD_START_Y),
            vel_y: 0.0,
            rotation: 0.0,
            gravity_enabled: false,
            character,
        }
    }

    /// Reset-then-impulse: zero the velocity, then add one impulse.
    /// Rapid taps can never stack beyond a single impulse of upward speed.
    pub fn flap(&mut self) {
        self.vel_y = 0.0;
        self.vel_y += FLAP_IMPULSE;
    }

    /// Semi-implicit Euler step under constant gravity; frozen while disabled
    pub fn integrate(&mut self, dt: f32) {
        if !self.gravity_enabled {
            return;
        }
        self.vel_y += GRAVITY * dt;
        self.pos.y += self.vel_y * dt;
    }

    /// Recompute the derived rotation from velocity
    pub fn update_rotation(&mut self) {
        self.rotation = (self.vel_y * ROTATION_FACTOR).clamp(ROTATION_MIN, ROTATION_MAX);
    }

    /// Freeze in place (end of round)
    pub fn freeze(&mut self) {
        self.gravity_enabled = false;
        self.vel_y = 0.0;
    }
}

/// A pipe pair: two vertical segments leaving a fixed-height gap
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipePair {
    pub id: u32,
    /// Center x of both segments
    pub x: f32,
    /// Y of the gap's lower opening (top edge of the bottom segment)
    pub gap_bottom: f32,
    /// Y of the gap's upper opening; always `gap_bottom + PIPE_GAP`
    pub gap_top: f32,
    /// Set once the bird has cleared this pair
    pub passed: bool,
}

impl PipePair {
    /// Bottom segment: from the ground up to the gap
    pub fn bottom_rect(&self) -> Rect {
        Rect::new(
            Vec2::new(self.x - PIPE_WIDTH / 2.0, GROUND_HEIGHT),
            Vec2::new(self.x + PIPE_WIDTH / 2.0, self.gap_bottom),
        )
    }

    /// Top segment: from the gap up to the top of the world
    pub fn top_rect(&self) -> Rect {
        Rect::new(
            Vec2::new(self.x - PIPE_WIDTH / 2.0, self.gap_top),
            Vec2::new(self.x + PIPE_WIDTH / 2.0, WORLD_HEIGHT),
        )
    }

    /// Fully past the left edge (total travel = world width + pipe width)
    pub fn off_screen(&self) -> bool {
        self.x < -PIPE_WIDTH / 2.0
    }
}

/// Invisible one-shot sensor spanning a pipe pair's gap
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreRegion {
    pub id: u32,
    /// The pair this region belongs to
    pub pipe_id: u32,
    pub x: f32,
    /// Centered between the gap openings
    pub center_y: f32,
}

impl ScoreRegion {
    /// Sensor geometry: 1 point wide, gap tall
    pub fn rect(&self) -> Rect {
        Rect::from_center_size(Vec2::new(self.x, self.center_y), Vec2::new(1.0, PIPE_GAP))
    }

    pub fn off_screen(&self) -> bool {
        self.x < -PIPE_WIDTH / 2.0
    }
}

/// Ground tiling: fixed-width segments cycling end-to-end.
///
/// A segment that has scrolled a full width left snaps back by its own width,
/// reattaching at the right. Infinite scroll from finite geometry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ground {
    /// Left edge x of each segment
    pub offsets: [f32; GROUND_SEGMENTS],
    pub segment_width: f32,
}

impl Default for Ground {
    fn default() -> Self {
        let mut ground = Self {
            offsets: [0.0; GROUND_SEGMENTS],
            segment_width: WORLD_WIDTH,
        };
        ground.reset();
        ground
    }
}

impl Ground {
    /// Side-by-side starting layout
    pub fn reset(&mut self) {
        for (i, offset) in self.offsets.iter_mut().enumerate() {
            *offset = i as f32 * self.segment_width;
        }
    }

    /// Scroll left by `dx` points, snapping wrapped segments back
    pub fn advance(&mut self, dx: f32) {
        for offset in &mut self.offsets {
            *offset -= dx;
            if *offset <= -self.segment_width {
                *offset += self.segment_width * GROUND_SEGMENTS as f32;
            }
        }
    }

    /// Y of the ground surface
    pub fn top(&self) -> f32 {
        GROUND_HEIGHT
    }
}

/// A selectable character: display asset plus selection cue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharacterOption {
    pub index: usize,
    pub texture: &'static str,
    pub audio: &'static str,
    /// Solid color substituted when the texture is missing
    pub fallback_color: [u8; 3],
}

/// The three playable characters
pub const CHARACTER_OPTIONS: [CharacterOption; 3] = [
    CharacterOption {
        index: 0,
        texture: "flappybird",
        audio: "flappybird.mp3",
        fallback_color: [255, 165, 0],
    },
    CharacterOption {
        index: 1,
        texture: "flappybird2",
        audio: "flappybird2.mp3",
        fallback_color: [255, 0, 0],
    },
    CharacterOption {
        index: 2,
        texture: "flappybird3",
        audio: "flappybird3.mp3",
        fallback_color: [0, 0, 255],
    },
];

/// Character selection state: just a validated index
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Selection {
    pub chosen: usize,
}

impl Selection {
    /// Returns false (and leaves the choice unchanged) for an out-of-range index
    pub fn select(&mut self, index: usize) -> bool {
        if index >= CHARACTER_OPTIONS.len() {
            return false;
        }
        self.chosen = index;
        true
    }

    pub fn option(&self) -> &'static CharacterOption {
        &CHARACTER_OPTIONS[self.chosen]
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Seeded RNG feeding the pipe-gap draws
    pub rng: Pcg32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Current phase
    pub phase: GamePhase,
    /// Present from `Ready` entry until the next `Selecting` entry
    pub bird: Option<Bird>,
    /// Active pipe pairs (sorted by id for determinism)
    pub pipes: Vec<PipePair>,
    /// Active score sensors
    pub score_regions: Vec<ScoreRegion>,
    /// Scrolling ground tiles
    pub ground: Ground,
    /// Current/best score bookkeeping
    pub score: ScoreBoard,
    /// Character selection state
    pub selection: Selection,
    /// Pipe spawn cadence
    pub spawner: SpawnTimer,
    /// Events for the shell to drain each frame
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new game state at the selection screen
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            time_ticks: 0,
            phase: GamePhase::Selecting,
            bird: None,
            pipes: Vec::new(),
            score_regions: Vec::new(),
            ground: Ground::default(),
            score: ScoreBoard::default(),
            selection: Selection::default(),
            spawner: SpawnTimer::new(PIPE_SPAWN_INTERVAL),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Drop all round-scoped entities (pipes and sensors)
    pub fn clear_round_entities(&mut self) {
        self.pipes.clear();
        self.score_regions.clear();
    }

    /// Ensure entities are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.pipes.sort_by_key(|p| p.id);
        self.score_regions.sort_by_key(|r| r.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_starts_selecting() {
        let state = GameState::new(7);
        assert_eq!(state.phase, GamePhase::Selecting);
        assert!(state.bird.is_none());
        assert!(state.pipes.is_empty());
        assert_eq!(state.score.current, 0);
    }

    #[test]
    fn test_selection_rejects_out_of_range() {
        let mut selection = Selection::default();
        assert!(selection.select(2));
        assert_eq!(selection.chosen, 2);
        assert!(!selection.select(CHARACTER_OPTIONS.len()));
        assert_eq!(selection.chosen, 2);
    }

    #[test]
    fn test_ground_recycles_segments() {
        let mut ground = Ground::default();
        assert_eq!(ground.offsets[0], 0.0);
        assert_eq!(ground.offsets[1], WORLD_WIDTH);

        // Scroll one full segment width: segment 0 wraps to the right side
        ground.advance(WORLD_WIDTH);
        assert_eq!(ground.offsets[0], WORLD_WIDTH);
        assert_eq!(ground.offsets[1], 0.0);
    }

    #[test]
    fn test_pipe_gap_geometry() {
        let pipe = PipePair {
            id: 1,
            x: 200.0,
            gap_bottom: 200.0,
            gap_top: 200.0 + PIPE_GAP,
            passed: false,
        };
        let bottom = pipe.bottom_rect();
        let top = pipe.top_rect();
        assert_eq!(bottom.max.y, 200.0);
        assert_eq!(bottom.min.y, GROUND_HEIGHT);
        assert_eq!(top.min.y, 200.0 + PIPE_GAP);
        assert_eq!(top.max.y, WORLD_HEIGHT);
    }

    #[test]
    fn test_flap_resets_then_impulses() {
        let mut bird = Bird::new(0);
        bird.vel_y = -300.0;
        bird.flap();
        assert_eq!(bird.vel_y, FLAP_IMPULSE);
        // A second immediate flap never exceeds one impulse
        bird.flap();
        assert_eq!(bird.vel_y, FLAP_IMPULSE);
    }

    #[test]
    fn test_bird_frozen_without_gravity() {
        let mut bird = Bird::new(0);
        let y = bird.pos.y;
        bird.integrate(1.0);
        assert_eq!(bird.pos.y, y);
        assert_eq!(bird.vel_y, 0.0);
    }
}
