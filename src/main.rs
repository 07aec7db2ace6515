//! Maze Dodge entry point
//!
//! Headless runner: drives the simulation with a scripted key sequence,
//! logs gameplay events and prints the final frame as JSON. Pass a tuning
//! file path as the only argument to override the default balance.

use maze_dodge::sim::{GameSession, TickInput, tick};
use maze_dodge::{Frame, Key, KeyState, Tuning};

/// Ticks to simulate (one minute at 60 fps)
const RUN_TICKS: u32 = 60 * 60;

/// Scripted key presses: (tick, key, held)
const SCRIPT: &[(u32, Key, bool)] = &[
    (310, Key::Right, true),
    (340, Key::Right, false),
    (340, Key::Down, true),
    (380, Key::Down, false),
    (600, Key::Pause, true),
    (601, Key::Pause, false),
    (700, Key::Pause, true),
    (701, Key::Pause, false),
];

fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let tuning = match std::env::args().nth(1) {
        Some(path) => match Tuning::load(&path) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::error!("{}", e);
                std::process::exit(1);
            }
        },
        None => Tuning::default(),
    };

    log::info!("Maze Dodge starting...");
    let mut session = GameSession::new(tuning);
    let mut keys = KeyState::new();

    for t in 0..RUN_TICKS {
        for &(_, key, held) in SCRIPT.iter().filter(|(at, _, _)| *at == t) {
            if held {
                keys.press(key);
            } else {
                keys.release(key);
            }
        }

        let input = TickInput::sample(&keys);
        tick(&mut session, &input);
        keys.end_frame();

        for event in &session.events {
            log::info!("[tick {}] {:?}", session.time_ticks, event);
        }
    }

    let frame = Frame::capture(&session);
    match serde_json::to_string_pretty(&frame) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to encode frame: {}", e),
    }
}
