//! Flapdash - a Flappy Bird style side-scroller
//!
//! Core modules:
//! - `sim`: Deterministic simulation (flight model, pipe spawning, collisions, phases)
//! - `score`: Current/best score tracking
//! - `persistence`: Best-score storage behind a get/set integer contract
//! - `audio`: Fire-and-forget sound effect boundary
//! - `assets`: Texture lookup with solid-color fallbacks
//! - `view`: Per-frame scene snapshot consumed by a renderer
//! - `game`: Fixed-timestep shell wiring the sim to its collaborators

pub mod assets;
pub mod audio;
pub mod game;
pub mod persistence;
pub mod score;
pub mod sim;
pub mod view;

pub use game::Game;
pub use score::ScoreBoard;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// World dimensions in points, y-up with the ground at the bottom
    pub const WORLD_WIDTH: f32 = 360.0;
    pub const WORLD_HEIGHT: f32 = 640.0;
    /// Ground band occupies y in [0, GROUND_HEIGHT]
    pub const GROUND_HEIGHT: f32 = 80.0;

    /// Gravity acceleration (negative = downward, points/s^2)
    pub const GRAVITY: f32 = -7.0;
    /// Upward velocity injected by one flap (points/s)
    pub const FLAP_IMPULSE: f32 = 25.0;

    /// Scroll speed factor; actual speed is SCROLL_FACTOR * 60 points/s
    pub const SCROLL_FACTOR: f32 = 2.5;
    /// The single scroll speed shared by ground tiling and pipe translation
    pub const SCROLL_SPEED: f32 = SCROLL_FACTOR * 60.0;

    /// Vertical opening between a pipe pair's segments
    pub const PIPE_GAP: f32 = 180.0;
    pub const PIPE_WIDTH: f32 = 52.0;
    /// Padding kept clear above the ground and below the ceiling
    pub const PIPE_VERTICAL_PADDING: f32 = 15.0;
    /// Minimum visible pipe body on either side of the gap
    pub const MIN_PIPE_BODY: f32 = 50.0;
    /// Wall-clock seconds between pipe spawns
    pub const PIPE_SPAWN_INTERVAL: f32 = 1.5;

    /// Bird sprite dimensions (before the 0.8 gameplay scale)
    pub const BIRD_SPRITE_WIDTH: f32 = 34.0;
    pub const BIRD_SPRITE_HEIGHT: f32 = 24.0;
    pub const BIRD_SCALE: f32 = 0.8;
    pub const BIRD_WIDTH: f32 = BIRD_SPRITE_WIDTH * BIRD_SCALE;
    pub const BIRD_HEIGHT: f32 = BIRD_SPRITE_HEIGHT * BIRD_SCALE;
    /// Collision circle is slightly smaller than the sprite
    pub const BIRD_RADIUS: f32 = BIRD_HEIGHT / 2.3;
    /// Spawn pose (x stays fixed for the whole round)
    pub const BIRD_START_X: f32 = WORLD_WIDTH / 2.0 - 100.0;
    pub const BIRD_START_Y: f32 = WORLD_HEIGHT / 2.0 + 50.0;

    /// Derived rotation: clamp(vel_y * FACTOR, MIN, MAX) radians
    pub const ROTATION_FACTOR: f32 = 0.002;
    pub const ROTATION_MIN: f32 = -0.8;
    pub const ROTATION_MAX: f32 = 0.5;

    /// Number of ground segments cycling end-to-end
    pub const GROUND_SEGMENTS: usize = 2;
}
