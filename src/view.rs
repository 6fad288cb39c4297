//! Per-frame scene snapshot for the renderer collaborator
//!
//! The renderer consumes plain geometry and text; nothing in here mutates
//! game state. Label text follows the phase, so the renderer needs no game
//! logic of its own.

use glam::Vec2;

use crate::assets::{self, Paint, Sprite, TextureCatalog};
use crate::consts::*;
use crate::sim::{CHARACTER_OPTIONS, GamePhase, GameState, Rect};

/// Bird pose plus its sprite
#[derive(Debug, Clone)]
pub struct BirdView {
    pub pos: Vec2,
    pub rotation: f32,
    pub sprite: Sprite,
}

/// Both segments of one pipe pair
#[derive(Debug, Clone)]
pub struct PipeView {
    pub bottom: Rect,
    pub top: Rect,
    pub bottom_sprite: Sprite,
    pub top_sprite: Sprite,
}

/// Ground tiling: one sprite drawn at each segment offset
#[derive(Debug, Clone)]
pub struct GroundView {
    pub offsets: Vec<f32>,
    pub sprite: Sprite,
}

/// Floating character preview on the selection screen
#[derive(Debug, Clone)]
pub struct CharacterPreview {
    pub index: usize,
    pub pos: Vec2,
    pub sprite: Sprite,
    pub selected: bool,
}

/// Where a label belongs on screen; layout is the renderer's job
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelKind {
    Score,
    Best,
    Prompt,
    GameOver,
    FinalScore,
    NewBest,
    SelectionHint,
    StartButton,
}

#[derive(Debug, Clone)]
pub struct Label {
    pub kind: LabelKind,
    pub text: String,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone)]
pub struct SceneFrame {
    pub clear_color: [u8; 3],
    pub bird: Option<BirdView>,
    pub pipes: Vec<PipeView>,
    pub ground: GroundView,
    pub previews: Vec<CharacterPreview>,
    pub labels: Vec<Label>,
}

/// Preview sprites sit at a fixed height with the texture's aspect ratio
const PREVIEW_HEIGHT: f32 = 50.0;
const PREVIEW_SPACING: f32 = 120.0;

/// Build the frame snapshot for the current state
pub fn compose(state: &GameState, catalog: &dyn TextureCatalog) -> SceneFrame {
    SceneFrame {
        clear_color: assets::SKY_COLOR,
        bird: state.bird.as_ref().map(|bird| BirdView {
            pos: bird.pos,
            rotation: bird.rotation,
            sprite: assets::bird_sprite(catalog, bird.character),
        }),
        pipes: state
            .pipes
            .iter()
            .map(|pipe| {
                let bottom = pipe.bottom_rect();
                let top = pipe.top_rect();
                PipeView {
                    bottom_sprite: assets::pipe_sprite(
                        catalog,
                        false,
                        Vec2::new(bottom.width(), bottom.height()),
                    ),
                    top_sprite: assets::pipe_sprite(
                        catalog,
                        true,
                        Vec2::new(top.width(), top.height()),
                    ),
                    bottom,
                    top,
                }
            })
            .collect(),
        ground: GroundView {
            offsets: state.ground.offsets.to_vec(),
            sprite: assets::ground_sprite(catalog),
        },
        previews: previews(state, catalog),
        labels: labels(state),
    }
}

fn previews(state: &GameState, catalog: &dyn TextureCatalog) -> Vec<CharacterPreview> {
    if state.phase != GamePhase::Selecting {
        return Vec::new();
    }
    let start_x = WORLD_WIDTH / 2.0 - PREVIEW_SPACING;
    CHARACTER_OPTIONS
        .iter()
        .map(|option| {
            let sprite = match catalog.load(option.texture) {
                Some(info) => {
                    let aspect = info.size.x / info.size.y;
                    Sprite {
                        paint: Paint::Texture(option.texture),
                        size: Vec2::new(PREVIEW_HEIGHT * aspect, PREVIEW_HEIGHT),
                    }
                }
                None => Sprite {
                    paint: Paint::Solid(option.fallback_color),
                    size: Vec2::new(BIRD_SPRITE_WIDTH * 1.2, BIRD_SPRITE_HEIGHT * 1.2),
                },
            };
            CharacterPreview {
                index: option.index,
                pos: Vec2::new(
                    start_x + PREVIEW_SPACING * option.index as f32,
                    WORLD_HEIGHT / 2.0,
                ),
                sprite,
                selected: option.index == state.selection.chosen,
            }
        })
        .collect()
}

fn labels(state: &GameState) -> Vec<Label> {
    let mut labels = Vec::new();
    let score = &state.score;
    match state.phase {
        GamePhase::Selecting => {
            labels.push(Label {
                kind: LabelKind::SelectionHint,
                text: "Tap on a character to select".into(),
            });
            labels.push(Label {
                kind: LabelKind::StartButton,
                text: "TAP TO START GAME".into(),
            });
        }
        GamePhase::Ready => {
            labels.push(Label {
                kind: LabelKind::Score,
                text: score.current.to_string(),
            });
            labels.push(Label {
                kind: LabelKind::Best,
                text: format!("Best: {}", score.best),
            });
            labels.push(Label {
                kind: LabelKind::Prompt,
                text: "Tap to Start".into(),
            });
        }
        GamePhase::Playing => {
            labels.push(Label {
                kind: LabelKind::Score,
                text: score.current.to_string(),
            });
        }
        GamePhase::Ended => {
            labels.push(Label {
                kind: LabelKind::GameOver,
                text: "Game Over".into(),
            });
            labels.push(Label {
                kind: LabelKind::FinalScore,
                text: format!("Score: {}", score.current),
            });
            labels.push(Label {
                kind: LabelKind::Best,
                text: format!("Best: {}", score.best),
            });
            if score.is_new_best {
                labels.push(Label {
                    kind: LabelKind::NewBest,
                    text: "NEW HIGH SCORE!".into(),
                });
            }
            labels.push(Label {
                kind: LabelKind::Prompt,
                text: "Tap to Restart".into(),
            });
        }
    }
    labels
}
