//! Spike Glide headless driver
//!
//! Plays one autopilot run at a fixed frame rate and prints the outcome.
//!
//! Usage: `spike-glide [mode] [seed] [max_seconds]`

use spike_glide::Progress;
use spike_glide::consts::FRAME_MS;
use spike_glide::sim::{DifficultyProfile, RunEvent, TickInput, Viewport, start_run, tick};

const VIEWPORT_WIDTH: f32 = 480.0;
const VIEWPORT_HEIGHT: f32 = 640.0;
const DEFAULT_SEED: u64 = 12345;
const DEFAULT_MAX_SECONDS: f32 = 120.0;

fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let profile = args
        .next()
        .map(|id| DifficultyProfile::by_id_or_default(&id))
        .unwrap_or_default();
    let seed = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_SEED);
    let max_seconds = args
        .next()
        .and_then(|s| s.parse::<f32>().ok())
        .filter(|s| s.is_finite() && *s > 0.0)
        .unwrap_or(DEFAULT_MAX_SECONDS);

    log::info!("Spike Glide (headless) starting...");

    let viewport = Viewport::new(VIEWPORT_WIDTH, VIEWPORT_HEIGHT);
    let mut state = start_run(profile, viewport, seed);
    let input = TickInput::autopilot();
    let max_ticks = (max_seconds * 1000.0 / FRAME_MS).ceil() as u64;

    let mut spawned = 0u32;
    while state.ticks() < max_ticks {
        let result = tick(&mut state, &input, FRAME_MS);
        spawned += result
            .events
            .iter()
            .filter(|e| matches!(e, RunEvent::Spawned { .. }))
            .count() as u32;
        if result.terminated {
            break;
        }
    }

    let mut progress = Progress::new();
    let reward = progress.record_run(state.score());

    println!("Mode:      {}", profile.name);
    println!("Seed:      {}", seed);
    println!("Survived:  {:.1}s ({} ticks)", state.sim_time(), state.ticks());
    println!("Obstacles: {} spawned, {} cleared", spawned, state.score());
    match state.crash() {
        Some(collision) => println!("Ended by:  {:?}", collision),
        None => println!("Ended by:  time limit"),
    }
    println!("Diamonds:  {} ({})", reward.diamonds_earned, reward.charm);

    match progress.to_json() {
        Ok(json) => println!("Progress:  {}", json),
        Err(e) => log::error!("Failed to serialize progress: {}", e),
    }
}
