//! Texture lookup with documented fallbacks
//!
//! Asset decoding lives outside the core. A catalog either knows a texture's
//! dimensions or reports it missing; consumers substitute a solid-color
//! placeholder and keep running. A missing asset is never an error here.

use glam::Vec2;

use crate::consts::*;
use crate::sim::CHARACTER_OPTIONS;

/// Texture names the game asks for
pub mod names {
    pub const BACKGROUND: &str = "background-day";
    pub const GROUND: &str = "ground_pixelated";
    pub const PIPE: &str = "pipe";
    pub const PIPE_INVERTED: &str = "pipeinverted";
    /// Label font; renderers fall back to [`FONT_FALLBACK`] when absent
    pub const FONT_MAIN: &str = "04b_19";
    pub const FONT_FALLBACK: &str = "HelveticaNeue-Bold";
}

/// What a catalog knows about a loaded texture
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextureInfo {
    pub size: Vec2,
}

/// Asset collaborator: `load` reports a texture or its absence
pub trait TextureCatalog {
    fn load(&self, name: &str) -> Option<TextureInfo>;
}

/// A catalog with no assets at all; every sprite falls back
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTextures;

impl TextureCatalog for NoTextures {
    fn load(&self, _name: &str) -> Option<TextureInfo> {
        None
    }
}

/// How to draw a sprite
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Paint {
    /// Use the named texture
    Texture(&'static str),
    /// Solid RGB placeholder (texture was missing)
    Solid([u8; 3]),
}

/// Renderable sprite: paint plus world-space size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    pub paint: Paint,
    pub size: Vec2,
}

/// Sky clear color behind everything
pub const SKY_COLOR: [u8; 3] = [135, 206, 235];
/// Ground placeholder: a brown band
pub const GROUND_FALLBACK_COLOR: [u8; 3] = [222, 184, 135];
/// Pipe placeholder
pub const PIPE_FALLBACK_COLOR: [u8; 3] = [0, 128, 0];

/// Bird sprite for a character, at gameplay scale
pub fn bird_sprite(catalog: &dyn TextureCatalog, character: usize) -> Sprite {
    let option = &CHARACTER_OPTIONS[character % CHARACTER_OPTIONS.len()];
    match catalog.load(option.texture) {
        Some(info) => Sprite {
            paint: Paint::Texture(option.texture),
            size: info.size * BIRD_SCALE,
        },
        None => Sprite {
            paint: Paint::Solid(option.fallback_color),
            size: Vec2::new(BIRD_WIDTH, BIRD_HEIGHT),
        },
    }
}

/// One ground segment, scaled to span the world width
pub fn ground_sprite(catalog: &dyn TextureCatalog) -> Sprite {
    match catalog.load(names::GROUND) {
        Some(info) => {
            // Preserve the texture's aspect ratio across the world width
            let aspect = info.size.y / info.size.x;
            Sprite {
                paint: Paint::Texture(names::GROUND),
                size: Vec2::new(WORLD_WIDTH, WORLD_WIDTH * aspect),
            }
        }
        None => Sprite {
            paint: Paint::Solid(GROUND_FALLBACK_COLOR),
            size: Vec2::new(WORLD_WIDTH, GROUND_HEIGHT),
        },
    }
}

/// Pipe segment sprite; `inverted` picks the top-pipe art
pub fn pipe_sprite(catalog: &dyn TextureCatalog, inverted: bool, size: Vec2) -> Sprite {
    let name = if inverted { names::PIPE_INVERTED } else { names::PIPE };
    match catalog.load(name) {
        Some(_) => Sprite {
            paint: Paint::Texture(name),
            size,
        },
        None => Sprite {
            paint: Paint::Solid(PIPE_FALLBACK_COLOR),
            size,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedCatalog;

    impl TextureCatalog for FixedCatalog {
        fn load(&self, name: &str) -> Option<TextureInfo> {
            (name == "flappybird").then_some(TextureInfo {
                size: Vec2::new(34.0, 24.0),
            })
        }
    }

    #[test]
    fn test_bird_sprite_uses_texture_when_present() {
        let sprite = bird_sprite(&FixedCatalog, 0);
        assert_eq!(sprite.paint, Paint::Texture("flappybird"));
        assert_eq!(sprite.size, Vec2::new(34.0 * BIRD_SCALE, 24.0 * BIRD_SCALE));
    }

    #[test]
    fn test_missing_texture_falls_back_to_character_color() {
        let sprite = bird_sprite(&FixedCatalog, 1);
        assert_eq!(sprite.paint, Paint::Solid([255, 0, 0]));
        assert_eq!(sprite.size, Vec2::new(BIRD_WIDTH, BIRD_HEIGHT));
    }

    #[test]
    fn test_ground_fallback_is_brown_band() {
        let sprite = ground_sprite(&NoTextures);
        assert_eq!(sprite.paint, Paint::Solid(GROUND_FALLBACK_COLOR));
        assert_eq!(sprite.size.y, GROUND_HEIGHT);
    }
}
