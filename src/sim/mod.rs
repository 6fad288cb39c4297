//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod collision;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Category, Contact, Rect, gather_contacts, resolve_contacts};
pub use spawn::{SpawnTimer, gap_bounds, spawn_pipe_pair};
pub use state::{
    Bird, CHARACTER_OPTIONS, CharacterOption, GameEvent, GamePhase, GameState, Ground, PipePair,
    ScoreRegion, Selection,
};
pub use tick::{TickInput, tick};
