//! Frame pacing and FPS smoothing for the demo loop.

use web_time::{Duration, Instant};

/// Weight of the newest frame in the smoothed FPS average.
const FPS_SMOOTHING: f32 = 0.05;

/// Paces the demo loop to a target rate and tracks a smoothed FPS.
///
/// The engine itself is tick-agnostic (it clamps whatever `dt` it is
/// handed); this helper keeps the headless demo from spinning and gives
/// the stats line a stable rate readout.
pub struct FrameTiming {
    /// Minimum wall time between steps; `ZERO` runs uncapped.
    min_step: Duration,
    last_step: Instant,
    fps_avg: f32,
}

impl FrameTiming {
    /// Pace to `target_fps` steps per second (0 = uncapped).
    #[must_use]
    pub fn new(target_fps: u32) -> Self {
        let min_step = if target_fps == 0 {
            Duration::ZERO
        } else {
            Duration::from_secs_f64(1.0 / f64::from(target_fps))
        };
        Self {
            min_step,
            last_step: Instant::now(),
            // Seed the average at the target so the first stats lines
            // read sanely instead of ramping up from zero.
            fps_avg: if target_fps == 0 {
                60.0
            } else {
                target_fps as f32
            },
        }
    }

    /// Whether enough wall time has passed for the next step.
    #[must_use]
    pub fn should_step(&self) -> bool {
        self.last_step.elapsed() >= self.min_step
    }

    /// Close the frame. Returns the seconds elapsed since the previous
    /// step (the simulation `dt`) and folds it into the FPS average.
    pub fn end_frame(&mut self) -> f32 {
        let now = Instant::now();
        let dt = now.duration_since(self.last_step).as_secs_f32();
        self.last_step = now;
        if dt > 0.0 {
            self.fps_avg += (1.0 / dt - self.fps_avg) * FPS_SMOOTHING;
        }
        dt
    }

    /// Smoothed steps per second over recent frames.
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.fps_avg
    }
}
