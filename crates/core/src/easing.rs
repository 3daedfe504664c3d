//! Easing curves and looping helpers for the ambient hero animation.
//!
//! Every curve maps `0.0..=1.0` onto `0.0..=1.0`; inputs outside that range
//! are clamped.

use std::f64::consts::PI;
use std::time::Duration;

/// Quartic ease-out: f(t) = 1 - (1-t)⁴
#[inline]
pub fn power3_out(t: f64) -> f64 {
    let inv = 1.0 - t.clamp(0.0, 1.0);
    1.0 - inv * inv * inv * inv
}

/// Sinusoidal ease-in-out: f(t) = (1 - cos(πt)) / 2
#[inline]
pub fn sine_in_out(t: f64) -> f64 {
    (1.0 - (PI * t.clamp(0.0, 1.0)).cos()) / 2.0
}

/// Cubic ease-in-out.
#[inline]
pub fn cubic_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        let inv = -2.0 * t + 2.0;
        1.0 - inv * inv * inv / 2.0
    }
}

/// Linear progress of `elapsed` through `duration`, clamped.
#[inline]
pub fn progress(elapsed: Duration, duration: Duration) -> f64 {
    if duration.is_zero() {
        return 1.0;
    }
    (elapsed.as_secs_f64() / duration.as_secs_f64()).clamp(0.0, 1.0)
}

/// Triangle wave that goes 0 → 1 over `half_period`, then back to 0, forever.
#[inline]
pub fn yoyo(elapsed: Duration, half_period: Duration) -> f64 {
    if half_period.is_zero() {
        return 0.0;
    }
    let cycles = elapsed.as_secs_f64() / half_period.as_secs_f64();
    let phase = cycles % 2.0;
    if phase <= 1.0 { phase } else { 2.0 - phase }
}

/// Square wave: `true` for the first half of every `period`.
#[inline]
pub fn blink(elapsed: Duration, period: Duration) -> bool {
    if period.is_zero() {
        return true;
    }
    let phase = elapsed.as_secs_f64() % period.as_secs_f64();
    phase < period.as_secs_f64() / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn curves_hit_endpoints() {
        for f in [power3_out, sine_in_out, cubic_in_out] {
            assert!(f(0.0).abs() < 1e-9);
            assert!((f(1.0) - 1.0).abs() < 1e-9);
            assert!((f(-3.0)).abs() < 1e-9);
            assert!((f(7.0) - 1.0).abs() < 1e-9);
        }
        assert!((sine_in_out(0.5) - 0.5).abs() < 1e-9);
        assert!((cubic_in_out(0.5) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn power3_out_front_loads() {
        assert!(power3_out(0.25) > 0.6);
    }

    #[test]
    fn yoyo_bounces() {
        assert!(yoyo(ms(0), ms(1000)).abs() < 1e-9);
        assert!((yoyo(ms(500), ms(1000)) - 0.5).abs() < 1e-9);
        assert!((yoyo(ms(1000), ms(1000)) - 1.0).abs() < 1e-9);
        assert!((yoyo(ms(1500), ms(1000)) - 0.5).abs() < 1e-9);
        assert!(yoyo(ms(2000), ms(1000)).abs() < 1e-9);
        assert_eq!(yoyo(ms(2000), Duration::ZERO), 0.0);
    }

    #[test]
    fn blink_is_on_for_first_half() {
        let period = ms(1000);
        assert!(blink(ms(0), period));
        assert!(blink(ms(499), period));
        assert!(!blink(ms(500), period));
        assert!(!blink(ms(999), period));
        assert!(blink(ms(1000), period));
    }

    #[test]
    fn progress_handles_zero_duration() {
        assert_eq!(progress(ms(0), Duration::ZERO), 1.0);
        assert!((progress(ms(750), ms(1500)) - 0.5).abs() < 1e-9);
        assert_eq!(progress(ms(9000), ms(1500)), 1.0);
    }
}
