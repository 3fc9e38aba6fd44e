//! Joy Blooms headless entry point
//!
//! Plays one short scripted round against the real score file so the
//! session engine can be exercised without a window. Rendering hosts embed
//! [`SessionController`] directly.

use joy_blooms::audio::AudioCues;
use joy_blooms::persistence::FileStorage;
use joy_blooms::platform::ManualTime;
use joy_blooms::sim::{SessionPhase, UiCommand};
use joy_blooms::{ScoreStore, SessionController, Settings};

const FRAME_DT: f32 = 1.0 / 60.0;
/// Frames between scripted clicks
const CLICK_EVERY: u32 = 24;

fn main() {
    env_logger::init();
    log::info!("Joy Blooms (headless) starting...");

    let dir = std::env::temp_dir().join("joy-blooms");
    let settings = Settings {
        round_duration_secs: 15.0,
        ..Settings::load(&FileStorage::new(dir.join("settings.json")))
    };

    let scores = ScoreStore::load(FileStorage::new(dir.join("scores.json")));
    let time = ManualTime::new(0.0);
    let seed = std::process::id() as u64;
    let mut session = SessionController::with_time_source(settings.clone(), scores, seed, time.clone());
    let mut audio = AudioCues::new(&settings);

    session.command(UiCommand::StartRound);
    let mut frame = 0u32;
    while session.phase() != SessionPhase::GameOver {
        time.advance(FRAME_DT as f64);
        session.tick(FRAME_DT);
        frame += 1;

        // Aim for the newest live flower, like a player chasing fresh spawns
        if frame.is_multiple_of(CLICK_EVERY) {
            let target = session.flowers().iter().rev().find(|f| f.is_alive()).map(|f| f.pos);
            if let Some(pos) = target {
                session.handle_pointer_down(pos);
            }
        }

        // Take a break halfway through
        if frame == 300 {
            session.handle_pause_toggle();
            time.advance(2.0);
            session.handle_pause_toggle();
        }

        for cue in audio.cues(&session.drain_events()) {
            log::debug!("cue {:?} at gain {:.2}", cue.effect, cue.gain);
        }
    }

    log::info!(
        "Final score {} (best {}), {} rounds on record",
        session.score(),
        session.high_score(),
        session.recent_scores().len()
    );
    println!("Final Score: {}", session.score());
}
