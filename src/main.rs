//! Bug Tap headless runner
//!
//! Plays one seeded round with a scripted tapper and prints the result.
//! Usage: `bug-tap [seed] [settings-json]`

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use bug_tap::audio::AudioCues;
use bug_tap::consts::SIM_DT;
use bug_tap::rate::{FALLBACK_RATE, parse_rate};
use bug_tap::{GameEngine, HighScores, Session, SimEvent, SimulationSettings};

const SCREEN_WIDTH: i32 = 1080;
const SCREEN_HEIGHT: i32 = 1920;
/// Frames between scripted taps (roughly a tap every third of a second)
const TAP_EVERY: u64 = 20;

fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(12345);
    let settings_json = args.next();
    let settings = SimulationSettings::load_or_default(settings_json.as_deref());

    log::info!("Bug Tap (headless) seed={} settings={:?}", seed, settings);

    let mut engine = GameEngine::new(seed);
    engine.set_screen_size(SCREEN_WIDTH, SCREEN_HEIGHT);
    let rate = parse_rate("5 873,20").unwrap_or(FALLBACK_RATE);
    engine.update_external_rate(rate);

    let mut session = Session::new(engine);
    session.start(settings);

    // Separate stream for the fake player so its choices don't perturb the sim
    let mut player = Pcg32::seed_from_u64(seed ^ 0x5eed);
    let mut audio = AudioCues::new();
    let mut frame: u64 = 0;
    let mut hits = 0u32;
    let mut misses = 0u32;
    let mut cues = 0usize;

    while !session.advance(SIM_DT) {
        frame += 1;
        let now_ms = frame as f64 * SIM_DT as f64 * 1000.0;

        let events = session.engine_mut().drain_events();
        for event in &events {
            if let SimEvent::TiltBonusChanged { active } = event {
                log::info!("Tilt bonus {}", if *active { "on" } else { "off" });
            }
        }
        cues += audio.cues(&events, now_ms).len();

        if session.engine().is_tilt_bonus_active() {
            let tilt_x = player.random_range(-1.0..1.0);
            let tilt_y = player.random_range(-1.0..1.0);
            session.engine_mut().update_tilt(tilt_x, tilt_y);
        }

        if frame % TAP_EVERY == 0 {
            // Aim at a live bug most of the time, otherwise tap somewhere random
            let target = session
                .engine()
                .entities()
                .iter()
                .find(|e| e.pos.x >= 0.0 && e.pos.y >= 0.0)
                .map(|e| e.center());
            let (x, y) = match target {
                Some(center) if player.random_bool(0.8) => (center.x, center.y),
                _ => (
                    player.random_range(0.0..SCREEN_WIDTH as f32),
                    player.random_range(0.0..SCREEN_HEIGHT as f32),
                ),
            };
            let (outcome, _) = session.tap(x, y);
            if outcome.is_hit() {
                hits += 1;
            } else {
                misses += 1;
            }
        }
    }

    let mut board = HighScores::new();
    let rank = board.add(session.record("headless", frame as f64));

    println!("Round over after {} frames", frame);
    println!("  score:       {}", session.score());
    println!("  hits/misses: {}/{}", hits, misses);
    println!("  sound cues:  {}", cues);
    match rank {
        Some(rank) => println!("  leaderboard: #{}", rank),
        None => println!("  leaderboard: did not place"),
    }
}
