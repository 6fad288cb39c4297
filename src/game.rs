//! Game shell: fixed-timestep driver plus collaborator wiring
//!
//! The simulation stays pure; this is the one place its events meet the
//! persistence store and the audio sink. The renderer gets a [`SceneFrame`]
//! snapshot per frame and feeds input back through the methods below.

use crate::assets::TextureCatalog;
use crate::audio::{AudioSink, SoundEffect};
use crate::consts::*;
use crate::persistence::{HIGH_SCORE_KEY, ScoreStore};
use crate::score::ScoreBoard;
use crate::sim::{GameEvent, GameState, TickInput, tick};
use crate::view::{self, SceneFrame};

/// A running game session
pub struct Game {
    pub state: GameState,
    store: Box<dyn ScoreStore>,
    audio: Box<dyn AudioSink>,
    accumulator: f32,
    input: TickInput,
}

impl Game {
    /// Start a session at the selection screen, loading the persisted best
    pub fn new(seed: u64, store: Box<dyn ScoreStore>, audio: Box<dyn AudioSink>) -> Self {
        let best = store.get_integer(HIGH_SCORE_KEY);
        log::info!("loaded best score {best}");
        let mut state = GameState::new(seed);
        state.score = ScoreBoard::with_best(best);
        Self {
            state,
            store,
            audio,
            accumulator: 0.0,
            input: TickInput::default(),
        }
    }

    /// The single discrete activate trigger, latched for the next step
    pub fn tap(&mut self) {
        self.input.flap = true;
    }

    /// Tap on a character preview
    pub fn choose_character(&mut self, index: usize) {
        self.input.select = Some(index);
    }

    /// Confirm the character selection
    pub fn confirm_selection(&mut self) {
        self.input.confirm = true;
    }

    /// Advance by a frame's worth of real time, running fixed steps.
    ///
    /// One-shot inputs are consumed by the first step. Returns the drained
    /// events so callers can drive presentation effects from them.
    pub fn update(&mut self, frame_dt: f32) -> Vec<GameEvent> {
        // Clamp huge frame gaps (tab switch, debugger) instead of spiraling
        self.accumulator += frame_dt.min(0.1);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let input = std::mem::take(&mut self.input);
            tick(&mut self.state, &input, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;
        }

        let events: Vec<GameEvent> = self.state.events.drain(..).collect();
        for event in &events {
            self.dispatch(event);
        }
        events
    }

    fn dispatch(&mut self, event: &GameEvent) {
        match event {
            GameEvent::CharacterChosen(index) => {
                self.audio.play(SoundEffect::CharacterSelect(*index));
            }
            GameEvent::BestSurpassed { .. } => {
                self.audio.play(SoundEffect::HighScore);
            }
            GameEvent::RoundEnded {
                best,
                new_best: true,
                ..
            } => {
                self.store.set_integer(HIGH_SCORE_KEY, *best);
            }
            _ => {}
        }
    }

    /// Snapshot for the renderer
    pub fn frame(&self, catalog: &dyn TextureCatalog) -> SceneFrame {
        view::compose(&self.state, catalog)
    }
}
