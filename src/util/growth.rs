//! Pop-in growth curve for newly registered decorations.
//!
//! The engine stamps `spawn_time` once at registration and never touches
//! it again; the render stage derives the 0→1 scale ramp from
//! `now - spawn_time`. Keeping the curve here (instead of per-frame CPU
//! writes) takes pop-in animation off the update path entirely.

/// Spawn-time sentinel meaning "already fully grown". Any age computed
/// against it lands far past [`GROWTH_DURATION`], so the curve returns
/// 1.0 on the first frame.
pub const GROWN: f32 = -1.0e6;

/// Seconds from registration to full size.
pub const GROWTH_DURATION: f32 = 1.2;

/// Back-ease overshoot strength.
const OVERSHOOT: f32 = 1.701_58;

/// Evaluate the growth scale for an instance of the given age (seconds
/// since `spawn_time`).
///
/// Ease-out-back: fast early growth, a brief overshoot past full size,
/// then settle. Exactly 0.0 at age 0 and exactly 1.0 from
/// [`GROWTH_DURATION`] onward, so settled instances are bitwise stable.
#[inline]
#[must_use]
pub fn growth_curve(age: f32) -> f32 {
    if age <= 0.0 {
        return 0.0;
    }
    if age >= GROWTH_DURATION {
        return 1.0;
    }
    let t = age / GROWTH_DURATION;
    let c3 = OVERSHOOT + 1.0;
    let u = t - 1.0;
    1.0 + c3 * u * u * u + OVERSHOOT * u * u
}

/// Growth scale for an instance stamped at `spawn_time`, evaluated at
/// world clock `now`. The [`GROWN`] sentinel yields 1.0 immediately.
#[inline]
#[must_use]
pub fn growth_at(now: f32, spawn_time: f32) -> f32 {
    growth_curve(now - spawn_time)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_growth_endpoints() {
        assert_eq!(growth_curve(0.0), 0.0);
        assert_eq!(growth_curve(GROWTH_DURATION), 1.0);
        assert_eq!(growth_curve(GROWTH_DURATION * 10.0), 1.0);
    }

    #[test]
    fn test_negative_age_stays_zero() {
        assert_eq!(growth_curve(-5.0), 0.0);
    }

    #[test]
    fn test_overshoot_past_full_size() {
        // Back-ease peaks above 1.0 partway through the ramp.
        let peak = (1..12)
            .map(|i| growth_curve(GROWTH_DURATION * i as f32 / 12.0))
            .fold(0.0_f32, f32::max);
        assert!(peak > 1.0, "expected overshoot, peak was {peak}");
        assert!(peak < 1.2, "overshoot too strong: {peak}");
    }

    #[test]
    fn test_early_ramp_is_increasing() {
        let a = growth_curve(0.1 * GROWTH_DURATION);
        let b = growth_curve(0.3 * GROWTH_DURATION);
        let c = growth_curve(0.5 * GROWTH_DURATION);
        assert!(0.0 < a && a < b && b < c);
    }

    #[test]
    fn test_grown_sentinel_is_full_size_immediately() {
        assert_eq!(growth_at(0.0, GROWN), 1.0);
        assert_eq!(growth_at(1000.0, GROWN), 1.0);
    }
}
