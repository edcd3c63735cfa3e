//! Skateboarder headless driver
//!
//! Runs the simulation at a fixed 60 Hz clock with a simple autopilot that
//! taps when a gap is coming up.
//!
//! Usage: `skateboarder [tuning.json] [frames]`

use skateboarder::sim::{GameEvent, InputEvent, Session};
use skateboarder::{Scene, Snapshot, Tuning};

const DEFAULT_FRAMES: u64 = 60 * 60;
const FRAME_TIME: f64 = 1.0 / 60.0;
/// How many frames ahead the autopilot looks for gaps
const LOOKAHEAD_FRAMES: f32 = 4.0;

fn main() {
    env_logger::init();
    log::info!("Skateboarder (native) starting...");

    let mut args = std::env::args().skip(1);
    let tuning = match args.next() {
        Some(path) => match Tuning::load(&path) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::error!("{}", e);
                std::process::exit(1);
            }
        },
        None => Tuning::default(),
    };
    let frames = match parse_frames(args.next().as_deref()) {
        Ok(frames) => frames,
        Err(e) => {
            log::error!("Invalid frame count: {}", e);
            std::process::exit(1);
        }
    };

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);

    let mut session = match Session::with_simple_physics(Scene::default(), tuning, seed) {
        Ok(session) => session,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };
    let mut best_run = 0u64;
    let mut jumps = 0u32;

    for i in 0..frames {
        if gap_ahead(&session) {
            session.handle_input(InputEvent::Tap);
        }

        let frame_before = session.frame;
        session.advance(i as f64 * FRAME_TIME);

        for event in session.drain_events() {
            match event {
                GameEvent::Jumped => jumps += 1,
                GameEvent::RunEnded(reason) => {
                    best_run = best_run.max(frame_before + 1);
                    println!("Run ended: {:?} after {} frames", reason, frame_before + 1);
                }
                _ => {}
            }
        }
    }
    best_run = best_run.max(session.frame);

    println!(
        "Simulated {} frames: {} runs ended, {} jumps, longest run {} frames",
        frames, session.runs_ended, jumps, best_run
    );

    match Snapshot::capture(&session).to_json() {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to serialize snapshot: {}", e),
    }
}

/// Frame count argument, defaulting when absent
fn parse_frames(arg: Option<&str>) -> Result<u64, std::num::ParseIntError> {
    arg.map_or(Ok(DEFAULT_FRAMES), str::parse)
}

/// True if there is no brick under the skater's leading edge a few frames out
fn gap_ahead(session: &Session) -> bool {
    if !session.skater.grounded {
        return false;
    }
    let terrain = &session.terrain;
    let half_width = terrain.segment_size.x / 2.0;
    let probe_x = session.skater.pos.x
        + session.skater.size.x / 2.0
        + session.scroll_speed * LOOKAHEAD_FRAMES;

    !terrain.segments.is_empty()
        && !terrain
            .segments
            .iter()
            .any(|s| (s.position.x - probe_x).abs() <= half_width + 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_frames() {
        assert_eq!(parse_frames(None), Ok(DEFAULT_FRAMES));
        assert_eq!(parse_frames(Some("120")), Ok(120));
        assert!(parse_frames(Some("lots")).is_err());
        assert!(parse_frames(Some("-5")).is_err());
    }
}
