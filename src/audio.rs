//! Sound effect boundary
//!
//! The core only names the cue; playback belongs to an external collaborator.
//! Everything is fire-and-forget and failure is non-fatal, so the trait has
//! no error channel.

use crate::sim::CHARACTER_OPTIONS;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Selection cue for a character (index into [`CHARACTER_OPTIONS`])
    CharacterSelect(usize),
    /// Live "just beat the best score" cue
    HighScore,
}

impl SoundEffect {
    /// Audio asset name for this cue, if the index is valid
    pub fn asset_name(&self) -> Option<&'static str> {
        match self {
            SoundEffect::CharacterSelect(index) => {
                CHARACTER_OPTIONS.get(*index).map(|opt| opt.audio)
            }
            SoundEffect::HighScore => Some("highscore.mp3"),
        }
    }
}

/// Playback collaborator
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect);
}

/// Discards every cue (headless runs, tests)
#[derive(Debug, Clone, Copy, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, _effect: SoundEffect) {}
}

/// Logs cues instead of playing them (the demo binary)
#[derive(Debug, Clone, Copy, Default)]
pub struct LogAudio;

impl AudioSink for LogAudio {
    fn play(&mut self, effect: SoundEffect) {
        match effect.asset_name() {
            Some(name) => log::info!("audio: {name}"),
            None => log::warn!("audio cue for unknown asset: {effect:?}"),
        }
    }
}
