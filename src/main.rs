//! Headless demo driver: populates a meadow, runs a fixed number of
//! frames against a synthetic audio feed, and logs engine stats.
//! Pass a preset path as the first argument to load [`Options`] from it.

use std::path::Path;
use std::time::Duration;

use glade::decor::{Decor, DecorId, DecorKind};
use glade::emitter::ParticleKind;
use glade::engine::GladeEngine;
use glade::frame::{AudioLevels, FrameState};
use glade::options::Options;
use glade::reactive::{Instrument, NoteEvent};
use glade::util::frame_timing::FrameTiming;
use glam::Vec3;
use rand::Rng;

const DEMO_FRAMES: u32 = 900;
const FIELD_EXTENT: f32 = 30.0;

fn main() {
    env_logger::init();

    let options = match std::env::args().nth(1) {
        Some(path) => match Options::load(Path::new(&path)) {
            Ok(options) => {
                log::info!("loaded preset {path}");
                options
            }
            Err(e) => {
                log::error!("failed to load preset {path}: {e}");
                std::process::exit(1);
            }
        },
        None => Options::default(),
    };

    let mut engine = GladeEngine::new(options);
    let mut berries = populate(&mut engine);
    run(&mut engine, &mut berries);

    let stats = engine.stats();
    log::info!(
        "demo done: {:.1}s simulated, {} decorations, {} transients in flight",
        engine.clock(),
        stats.decors,
        stats.transients
    );
}

/// Scatter an initial meadow and return the berry ids for later churn.
fn populate(engine: &mut GladeEngine) -> Vec<DecorId> {
    let mut rng = rand::rng();

    for _ in 0..600 {
        let kind = DecorKind::Grass {
            height: rng.random_range(0.25..0.7),
        };
        let _ = engine.place(
            Decor::new(kind).grown(),
            scatter(&mut rng, FIELD_EXTENT),
        );
    }

    for _ in 0..320 {
        let kind = DecorKind::Flower {
            height: rng.random_range(0.5..1.3),
            color: petal_color(&mut rng),
        };
        let _ = engine.place(
            Decor::new(kind).grown(),
            scatter(&mut rng, FIELD_EXTENT),
        );
    }

    let mut berries = Vec::new();
    for _ in 0..96 {
        berries.push(place_berry(engine, &mut rng));
    }

    // Lantern ring around the clearing.
    for i in 0..16 {
        let angle = i as f32 / 16.0 * std::f32::consts::TAU;
        let kind = DecorKind::Lantern {
            height: 2.2,
            color: Vec3::new(1.0, 0.72, 0.35),
            swing_phase: rng.random_range(0.0..std::f32::consts::TAU),
        };
        let pos = Vec3::new(angle.cos() * 12.0, 0.0, angle.sin() * 12.0);
        let _ = engine.place(Decor::new(kind).grown(), pos);
    }

    for _ in 0..10 {
        let kind = DecorKind::CloudPuff {
            radius: rng.random_range(2.0..5.0),
        };
        let pos = Vec3::new(
            rng.random_range(-FIELD_EXTENT..FIELD_EXTENT),
            rng.random_range(10.0..16.0),
            rng.random_range(-FIELD_EXTENT..FIELD_EXTENT),
        );
        let _ = engine.place(Decor::new(kind).grown(), pos);
    }

    log::info!("meadow populated: {} decorations", engine.decor_count());
    berries
}

fn run(engine: &mut GladeEngine, berries: &mut Vec<DecorId>) {
    let mut timing = FrameTiming::new(60);
    let mut rng = rand::rng();

    for frame in 0..DEMO_FRAMES {
        while !timing.should_step() {
            std::thread::sleep(Duration::from_micros(250));
        }
        let dt = timing.end_frame();
        let t = engine.clock();

        beat_track(engine, frame);

        // Pick one berry every few seconds and plant a fresh one, so the
        // free list and the pop-in curve both get exercised.
        if frame % 240 == 120 {
            if let Some(id) = berries.pop() {
                if engine.detach(id) {
                    log::debug!("picked berry {id}");
                }
            }
            berries.push(place_berry(engine, &mut rng));
        }

        if frame % 180 == 60 {
            let at = scatter(&mut rng, 10.0) + Vec3::Y * 0.2;
            let n = engine.burst(at, ParticleKind::Jump);
            log::debug!("jump burst: {n} transients");
        }
        if frame % 180 == 90 {
            let n = engine.burst(scatter(&mut rng, 10.0), ParticleKind::Land);
            log::debug!("land burst: {n} transients");
        }

        engine.update(dt, &frame_state(t));

        if frame % 120 == 0 {
            log_stats(engine, timing.fps());
        }
    }
}

/// Synthetic stand-in for the music-analysis feed: four band envelopes
/// oscillating at unrelated rates.
fn frame_state(t: f32) -> FrameState {
    let bass = 0.5 + 0.5 * (t * 3.7).sin();
    let mids = 0.4 + 0.3 * (t * 2.1 + 1.3).sin();
    let highs = 0.3 + 0.3 * (t * 8.3).sin();
    FrameState {
        time: t,
        audio: AudioLevels {
            bass,
            mids: mids.max(0.0),
            highs: highs.max(0.0),
            pulse: bass * bass,
        },
        weather_intensity: (0.5 + 0.5 * (t * 0.11).sin()).powi(2),
        wind: Vec3::new((t * 0.23).sin() * 1.4, 0.0, (t * 0.31).cos() * 0.9),
        player_position: Vec3::ZERO,
    }
}

/// A fake beat grid (roughly 125 BPM at 60 fps) driving kind reactions.
fn beat_track(engine: &mut GladeEngine, frame: u32) {
    if frame % 29 == 0 {
        engine.ingest_note(NoteEvent {
            instrument: Instrument::Kick,
            intensity: 1.0,
        });
    }
    if frame % 58 == 14 {
        engine.ingest_note(NoteEvent {
            instrument: Instrument::Snare,
            intensity: 0.8,
        });
    }
    if frame % 47 == 5 {
        engine.ingest_note(NoteEvent {
            instrument: Instrument::Melody,
            intensity: 0.6,
        });
    }
    if frame % 116 == 87 {
        engine.ingest_note(NoteEvent {
            instrument: Instrument::Cymbal,
            intensity: 0.9,
        });
    }
}

fn place_berry(engine: &mut GladeEngine, rng: &mut impl Rng) -> DecorId {
    let kind = DecorKind::Berry {
        size: rng.random_range(0.08..0.2),
        color: Vec3::new(0.9, rng.random_range(0.1..0.4), 0.25),
    };
    engine.place(Decor::new(kind), scatter(rng, FIELD_EXTENT * 0.6))
}

fn scatter(rng: &mut impl Rng, extent: f32) -> Vec3 {
    Vec3::new(
        rng.random_range(-extent..extent),
        0.0,
        rng.random_range(-extent..extent),
    )
}

fn petal_color(rng: &mut impl Rng) -> Vec3 {
    const PETALS: [[f32; 3]; 4] = [
        [0.95, 0.55, 0.78],
        [0.88, 0.82, 0.34],
        [0.62, 0.55, 0.96],
        [0.96, 0.46, 0.38],
    ];
    Vec3::from(PETALS[rng.random_range(0..PETALS.len())])
}

fn log_stats(engine: &GladeEngine, fps: f32) {
    let stats = engine.stats();
    let batches: Vec<String> = stats
        .batches
        .iter()
        .map(|b| format!("{} {}/{}", b.label, b.active, b.capacity))
        .collect();
    log::info!(
        "t={:.1}s fps={:.0} | {} | {} transients",
        engine.clock(),
        fps,
        batches.join(", "),
        stats.transients
    );
}
