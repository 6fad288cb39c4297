//! Contact detection and classification
//!
//! The bird is a circle; pipes, ground, and score sensors are axis-aligned
//! rectangles. Contacts are unordered pairs canonicalized by ascending
//! category tag so classification never depends on detection order.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{GameEvent, GamePhase, GameState};
use super::tick::end_round;
use crate::consts::*;

/// Physics category tags. The bit values double as the canonical ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Bird = 0b1,
    Ground = 0b10,
    Pipe = 0b100,
    ScoreRegion = 0b1000,
}

/// An unordered contact between two tagged entities
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contact {
    /// Lower category tag
    pub first: (Category, u32),
    /// Higher category tag
    pub second: (Category, u32),
}

impl Contact {
    /// Build a contact with the pair ordered by ascending category
    pub fn new(a: (Category, u32), b: (Category, u32)) -> Self {
        if a.0 <= b.0 {
            Self { first: a, second: b }
        } else {
            Self { first: b, second: a }
        }
    }
}

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn from_center_size(center: Vec2, size: Vec2) -> Self {
        Self {
            min: center - size / 2.0,
            max: center + size / 2.0,
        }
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Circle/rect overlap via the closest point on the rect
    pub fn overlaps_circle(&self, center: Vec2, radius: f32) -> bool {
        let closest = center.clamp(self.min, self.max);
        (center - closest).length_squared() <= radius * radius
    }
}

/// Detect all contacts involving the bird this tick.
///
/// The ground uses entity id 0; everything else carries its spawn id.
pub fn gather_contacts(state: &GameState) -> Vec<Contact> {
    let mut contacts = Vec::new();
    let Some(bird) = &state.bird else {
        return contacts;
    };
    let bird_ref = (Category::Bird, 0);

    let ground_rect = Rect::new(
        Vec2::new(-WORLD_WIDTH, 0.0),
        Vec2::new(WORLD_WIDTH * 2.0, GROUND_HEIGHT),
    );
    if ground_rect.overlaps_circle(bird.pos, BIRD_RADIUS) {
        contacts.push(Contact::new(bird_ref, (Category::Ground, 0)));
    }

    for pipe in &state.pipes {
        if pipe.bottom_rect().overlaps_circle(bird.pos, BIRD_RADIUS)
            || pipe.top_rect().overlaps_circle(bird.pos, BIRD_RADIUS)
        {
            contacts.push(Contact::new(bird_ref, (Category::Pipe, pipe.id)));
        }
    }

    for region in &state.score_regions {
        if region.rect().overlaps_circle(bird.pos, BIRD_RADIUS) {
            contacts.push(Contact::new(bird_ref, (Category::ScoreRegion, region.id)));
        }
    }

    contacts
}

/// Classify and apply a batch of contacts.
///
/// Terminal contacts are ignored once the phase is already `Ended`, so two
/// terminal contacts in the same tick end the round exactly once.
pub fn resolve_contacts(state: &mut GameState, contacts: &[Contact]) {
    for contact in contacts {
        match (contact.first.0, contact.second.0) {
            (Category::Bird, Category::Ground) | (Category::Bird, Category::Pipe) => {
                if state.phase != GamePhase::Ended {
                    end_round(state);
                }
            }
            (Category::Bird, Category::ScoreRegion) => {
                score_region_hit(state, contact.second.1);
            }
            _ => {}
        }
    }
}

/// Consume a score region: one-shot, exactly one point each
fn score_region_hit(state: &mut GameState, region_id: u32) {
    if state.phase == GamePhase::Ended {
        return;
    }
    let Some(idx) = state.score_regions.iter().position(|r| r.id == region_id) else {
        // Already consumed
        return;
    };
    let region = state.score_regions.remove(idx);
    if let Some(pipe) = state.pipes.iter_mut().find(|p| p.id == region.pipe_id) {
        pipe.passed = true;
    }

    let total = state.score.on_score();
    state.events.push(GameEvent::Scored { total });
    if state.score.just_surpassed_best() {
        state.events.push(GameEvent::BestSurpassed { score: total });
    }
    log::debug!("score {total}");
}

/// Off-world fallback: a bird fully below the ground surface by more than its
/// own height ends the round even if the rect overlap missed (tunneling).
pub fn check_off_world(state: &mut GameState) {
    let Some(bird) = &state.bird else { return };
    if state.phase == GamePhase::Ended {
        return;
    }
    if bird.pos.y < GROUND_HEIGHT - BIRD_HEIGHT {
        log::debug!("bird off-world at y={}", bird.pos.y);
        end_round(state);
    }
}
