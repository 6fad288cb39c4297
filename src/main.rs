//! Flapdash headless demo
//!
//! Runs the full game loop with an autopilot standing in for the player and a
//! JSON file standing in for the platform's key-value store. Useful as a soak
//! run and as a worked example of driving the sim.

use flapdash::assets::NoTextures;
use flapdash::audio::LogAudio;
use flapdash::consts::*;
use flapdash::persistence::JsonFileStore;
use flapdash::sim::{GameEvent, GamePhase};
use flapdash::Game;

/// Rounds to play before exiting
const DEMO_ROUNDS: u32 = 3;
/// Safety cap on total sim steps
const MAX_STEPS: u64 = 60 * 60 * 10;

fn main() {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0)
        });
    log::info!("demo seed {seed}");

    let store = JsonFileStore::open("flapdash_scores.json");
    let mut game = Game::new(seed, Box::new(store), Box::new(LogAudio));

    let mut rounds_done = 0u32;
    let mut steps = 0u64;

    while rounds_done < DEMO_ROUNDS && steps < MAX_STEPS {
        autopilot(&mut game, seed);

        for event in game.update(SIM_DT) {
            if let GameEvent::RoundEnded {
                score,
                best,
                new_best,
            } = event
            {
                rounds_done += 1;
                println!(
                    "round {rounds_done}: score {score}, best {best}{}",
                    if new_best { " *new best*" } else { "" }
                );
            }
        }
        steps += 1;
    }

    let frame = game.frame(&NoTextures);
    for label in &frame.labels {
        log::debug!("label {:?}: {}", label.kind, label.text);
    }
    println!("demo finished after {steps} steps, best {}", game.state.score.best);
}

/// Stand-in player: picks a character from the seed and flaps toward the
/// nearest upcoming gap center.
fn autopilot(game: &mut Game, seed: u64) {
    match game.state.phase {
        GamePhase::Selecting => {
            game.choose_character((seed % 3) as usize);
            game.confirm_selection();
        }
        GamePhase::Ready | GamePhase::Ended => {
            game.tap();
        }
        GamePhase::Playing => {
            let Some(bird) = &game.state.bird else { return };
            let target = game
                .state
                .pipes
                .iter()
                .filter(|p| p.x + PIPE_WIDTH / 2.0 > bird.pos.x)
                .min_by(|a, b| a.x.total_cmp(&b.x))
                .map(|p| (p.gap_bottom + p.gap_top) / 2.0)
                .unwrap_or(BIRD_START_Y);
            if bird.pos.y < target - 10.0 {
                game.tap();
            }
        }
    }
}
