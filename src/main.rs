//! Circular Notes entry point
//!
//! The browser build is driven from JavaScript through `circular_notes::web`.
//! Natively this runs the toy headless: every body is dragged into the
//! boundary and released, then the loop runs at a simulated 60 Hz while tones
//! are logged.
//!
//! Usage: `circular-notes [settings.json] [frames]`

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use anyhow::Context;
    use circular_notes::Settings;
    use circular_notes::audio::LogSink;
    use circular_notes::sim::{PointerEvent, SimState, TickInput, tick};

    const FRAME_SECS: f64 = 1.0 / 60.0;
    const DEFAULT_FRAMES: u64 = 60 * 60;

    env_logger::init();
    log::info!("Circular Notes (native) starting...");

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => Settings::load_file(&path)
            .with_context(|| format!("could not load settings from {path}"))?,
        None => Settings::default(),
    };
    let frames = match args.next() {
        Some(n) => n
            .parse::<u64>()
            .with_context(|| format!("frame count {n:?} is not a number"))?,
        None => DEFAULT_FRAMES,
    };

    let mut state = SimState::new(&settings);
    let sink = LogSink::new();

    // Drop each body a little apart so they don't share a path
    let drops: Vec<_> = state
        .bodies
        .iter()
        .enumerate()
        .map(|(i, body)| {
            let offset = glam::Vec2::new((i as f32 - 1.0) * 60.0, 0.0);
            (body.pos, state.boundary.center + offset)
        })
        .collect();

    let mut clock = 0u64;
    for (grab, drop) in drops {
        let input = TickInput {
            pointer: vec![
                PointerEvent::Down(grab),
                PointerEvent::Move(drop),
                PointerEvent::Up(drop),
            ],
            ..Default::default()
        };
        tick(&mut state, &input, clock as f64 * FRAME_SECS, &sink);
        clock += 1;
    }

    let idle = TickInput::default();
    for _ in 0..frames {
        let now = clock as f64 * FRAME_SECS;
        clock += 1;
        tick(&mut state, &idle, now, &sink);
        state.prune_trails(now);
    }

    println!(
        "{} frames, {} bodies, boundary {}: {} tones played",
        frames,
        state.bodies.len(),
        state.knobs.shape.as_str(),
        sink.played()
    );
    for (i, body) in state.bodies.iter().enumerate() {
        println!(
            "  body {i}: pos ({:.1}, {:.1}) speed {:.2} trail {}",
            body.pos.x,
            body.pos.y,
            body.vel.length(),
            body.trail.len()
        );
    }

    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is web::wasm_main, this is just to satisfy the compiler
}
