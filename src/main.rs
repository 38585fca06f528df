//! Gate Runner entry point
//!
//! Headless native runner: drives the engine with a scripted steering signal
//! and logs the event stream. Rendering front-ends embed the library instead.
//!
//! Usage: `gate-runner [settings.json] [seed] [ticks]`

#[cfg(not(target_arch = "wasm32"))]
use gate_runner::consts::SIM_DT;
#[cfg(not(target_arch = "wasm32"))]
use gate_runner::sim::{FrameRenderer, FrameSnapshot, GameEngine, GameEvent, TickInput};
#[cfg(not(target_arch = "wasm32"))]
use gate_runner::Settings;

/// Ticks before the simulated model loads complete
#[cfg(not(target_arch = "wasm32"))]
const PLAYER_LOAD_TICKS: u64 = 30;
#[cfg(not(target_arch = "wasm32"))]
const BOSS_LOAD_TICKS: u64 = 45;

/// Logs a JSON frame every `every` frames
#[cfg(not(target_arch = "wasm32"))]
struct LogRenderer {
    frames: u64,
    every: u64,
}

#[cfg(not(target_arch = "wasm32"))]
impl FrameRenderer for LogRenderer {
    fn render(&mut self, frame: &FrameSnapshot) {
        self.frames += 1;
        if self.frames % self.every != 0 {
            return;
        }
        match serde_json::to_string(frame) {
            Ok(json) => log::debug!("frame {}: {}", self.frames, json),
            Err(e) => log::warn!("Could not serialize frame: {}", e),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Gate Runner (headless) starting...");

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => match Settings::load_from_file(&path) {
            Ok(settings) => settings,
            Err(e) => {
                log::error!("Invalid settings {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => Settings::default(),
    };
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(12345);
    let ticks: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(60_000);

    let mut engine = match GameEngine::new(settings, seed) {
        Ok(engine) => engine,
        Err(e) => {
            log::error!("Invalid settings: {}", e);
            std::process::exit(1);
        }
    };
    let mut renderer = LogRenderer {
        frames: 0,
        every: 600,
    };

    for frame in 0..ticks {
        // Model loading completes asynchronously; the engine idles until then
        if frame == PLAYER_LOAD_TICKS {
            engine.attach_player();
        }
        if frame == BOSS_LOAD_TICKS {
            engine.attach_boss();
        }

        // Weave across the lane
        let t = frame as f32 * SIM_DT;
        let signal = 0.5 + 0.45 * (t * 0.7).sin();
        engine.tick(&TickInput::steer(signal), SIM_DT);

        for event in engine.drain_events() {
            match event {
                GameEvent::RoundEnded {
                    round,
                    won,
                    final_score,
                    next,
                } => println!(
                    "round {:>3} {} score {:>4} -> threshold {}, lane {}",
                    round,
                    if won { "WON " } else { "lost" },
                    final_score,
                    next.win_threshold,
                    next.lane_length
                ),
                GameEvent::LevelChanged { level } => println!("level {}", level),
                other => log::trace!("{:?}", other),
            }
        }
        engine.present(&mut renderer);
    }

    let scores = engine.high_scores();
    println!(
        "\n{} rounds played, level {}, best round {:?}, wins in top {}: {}",
        engine.round() - 1,
        engine.progression().level,
        scores.top_score(),
        scores.entries.len(),
        scores.wins()
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Browser front-ends drive `GameEngine` directly
}
