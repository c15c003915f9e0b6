//! Interpolation math shared by every animated behavior.
//!
//! - [`lerp_f32`] / [`lerp_v2`] – linear interpolation; `lerp_v2` backs
//!   [`Vector2::lerp`], the per-frame exponential smoothing step
//!   (`current = lerp(current, target, factor)`)
//! - [`wrap`] – modulo normalization into a half-open range
//! - [`ease`] – easing curves for time-based tweens
//! - [`round_half_up`] – browser-style rounding of pointer coordinates

use crate::components::tween::Easing;
use crate::components::vector2::Vector2;

/// Apply an easing function to a normalized time value.
///
/// The input `t` is clamped to [0.0, 1.0] and transformed according to the
/// easing curve.
pub fn ease(e: Easing, t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    match e {
        Easing::Linear => t,
        Easing::QuadIn => t * t,
        Easing::QuadOut => t * (2.0 - t),
        Easing::QuadInOut => {
            if t < 0.5 {
                2.0 * t * t
            } else {
                -1.0 + (4.0 - 2.0 * t) * t
            }
        }
        Easing::CubicIn => t * t * t,
        Easing::CubicOut => {
            let p = t - 1.0;
            p * p * p + 1.0
        }
        Easing::CubicInOut => {
            if t < 0.5 {
                4.0 * t * t * t
            } else {
                let p = 2.0 * t - 2.0;
                0.5 * p * p * p + 1.0
            }
        }
        Easing::ExpoOut => {
            if t >= 1.0 {
                1.0
            } else {
                1.0 - 2f32.powf(-10.0 * t)
            }
        }
    }
}

/// Linearly interpolate between two 2D vectors.
pub fn lerp_v2(a: Vector2, b: Vector2, t: f32) -> Vector2 {
    Vector2 {
        x: a.x + (b.x - a.x) * t,
        y: a.y + (b.y - a.y) * t,
    }
}

/// Linearly interpolate between two floats.
pub fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Normalize `value` into `[lo, hi)`.
///
/// Unlike `%`, negative inputs land in range. Returns `lo` for an empty or
/// inverted range.
pub fn wrap(lo: f32, hi: f32, value: f32) -> f32 {
    let range = hi - lo;
    if range <= 0.0 {
        return lo;
    }
    let mut wrapped = (value - lo) % range;
    if wrapped < 0.0 {
        wrapped += range;
    }
    // rounding can land exactly on `range` for tiny negative remainders
    if wrapped >= range { lo } else { lo + wrapped }
}

/// Round half toward positive infinity, like `Math.round` in browsers.
///
/// Compares the fractional part instead of adding 0.5, which would round
/// the largest float below 0.5 up to 1.
pub fn round_half_up(value: f32) -> f32 {
    let whole = value.floor();
    if value - whole >= 0.5 { whole + 1.0 } else { whole }
}
