//! Komar Swarm entry point
//!
//! Runs the simulation headless with a scripted autopilot and a recording
//! renderer, then logs a summary of the run.
//!
//! Usage: `komar-swarm [--tuning PATH] [--frames N] [--seed S]`

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::Parser;

use komar_swarm::platform::{InputSource, Key, ScriptedInput};
use komar_swarm::renderer::{RecordingRenderer, RenderSink, draw_frame};
use komar_swarm::sim::{CollisionEvent, FrameInput, GameState, tick};
use komar_swarm::{Tuning, TuningError};

const FRAME_DT: f32 = 1.0 / 60.0;
const DEFAULT_FRAMES: u64 = 60 * 60;

/// Autopilot timing (frames)
const STRAFE_PERIOD: u64 = 90;
const WEAPON_PERIOD: u64 = 600;
const SHAPE_PERIOD: u64 = 1500;

#[derive(Parser, Debug)]
#[command(name = "komar-swarm")]
#[command(about = "Headless Komar Swarm run driven by a scripted autopilot")]
struct Args {
    /// JSON tuning file (defaults to the stock balance)
    #[arg(long)]
    tuning: Option<PathBuf>,
    /// Frames to simulate at 60 Hz
    #[arg(long, default_value_t = DEFAULT_FRAMES)]
    frames: u64,
    /// RNG seed (defaults to the wall clock)
    #[arg(long)]
    seed: Option<u64>,
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

/// Drive the scripted keys for `frame` given the current state
fn autopilot(input: &mut ScriptedInput, state: &GameState, frame: u64) {
    input.hold(Key::Fire);

    if (frame / STRAFE_PERIOD) % 2 == 0 {
        input.release(Key::Right);
        input.hold(Key::Left);
    } else {
        input.release(Key::Left);
        input.hold(Key::Right);
    }

    if frame > 0 && frame % WEAPON_PERIOD == 0 {
        input.press(Key::CycleWeapon);
    }
    if frame > 0 && frame % SHAPE_PERIOD == 0 {
        let key = match (frame / SHAPE_PERIOD) % 3 {
            0 => Key::ShapeKomar,
            1 => Key::ShapeKomarDebil,
            _ => Key::ShapeRandom,
        };
        input.press(key);
    }
    if !state.ship.is_alive() {
        input.press(Key::Restart);
    }
}

fn main() -> Result<(), TuningError> {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();
    log::info!("Komar Swarm (headless) starting...");

    let args = Args::parse();
    let tuning = match &args.tuning {
        Some(path) => Tuning::load(path)?,
        None => Tuning::default(),
    };
    let frames = args.frames;
    let seed = args.seed.unwrap_or_else(clock_seed);

    let mut renderer =
        RecordingRenderer::new(glam::Vec2::new(tuning.screen_width, tuning.screen_height));
    let mut state = GameState::new(tuning, renderer.screen_size(), seed)?;
    let mut input = ScriptedInput::new(FRAME_DT);

    let mut kills = 0u64;
    let mut splits = 0u64;
    let mut deaths = 0u64;
    let mut peak_hazards = 0usize;

    for frame in 0..frames {
        autopilot(&mut input, &state, frame);
        let frame_input = FrameInput::poll(&input);
        input.end_frame();

        for event in tick(&mut state, &frame_input, input.frame_delta()) {
            match event {
                CollisionEvent::HazardDestroyed { split, .. } => {
                    kills += 1;
                    splits += u64::from(split);
                }
                CollisionEvent::ShipHit { killed: true, .. } => deaths += 1,
                CollisionEvent::ShipHit { .. } => {}
            }
        }
        peak_hazards = peak_hazards.max(state.hazards.len());

        renderer.begin_frame();
        draw_frame(&state, &mut renderer);
        log::trace!(
            "Frame {}: {} polygons, {} sprites",
            state.frame,
            renderer.polygons(),
            renderer.sprites()
        );
    }

    log::info!(
        "Run finished: seed={} frames={} kills={} splits={} deaths={} peak_hazards={} hp={}",
        seed,
        renderer.frames,
        kills,
        splits,
        deaths,
        peak_hazards,
        state.ship.hp
    );
    Ok(())
}
