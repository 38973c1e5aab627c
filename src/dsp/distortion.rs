//! Saturation and folding curves.
//!
//! Every feedback path in this crate ends in a saturator, so the curves here
//! decide whether a loop stays bounded.
//!
//! # Cubic Soft Clip
//!
//! The reference curve hard-limits to [-1, 1] and then bends the top:
//!
//!   f(x) = x - k·x³        for x in [-1, 1]
//!
//! With a small knee `k` (0.05 throughout the crate) the curve is almost
//! linear for quiet signals and flattens toward ±(1 - k) at full scale.
//! For `k` in [0, 1/3] the slope `1 - 3k·x²` never goes negative, so the curve
//! is monotonic, odd-symmetric and continuous, and its output can never
//! exceed `1 - k` in magnitude no matter what goes in.
//!
//!   k = 0.05   peak 0.95, gentle
//!   k = 1/3    peak 0.667, round, starts bending early
//!
//! # Rational Soft Clip
//!
//! A smooth curve with no hard limit at all:
//!
//!   g(x) = x / (1 + k·|x|)
//!
//! Its slope `1 / (1 + k·|x|)²` is always positive, so the curve is
//! monotonic and odd-symmetric everywhere. It approaches ±1/k as the
//! input grows but never reaches it. Use it where a signal should keep
//! getting louder (only ever more slowly) instead of flattening.
//!
//! # Sine Fold
//!
//! Folding maps the input through a periodic function. Pushing the input
//! harder wraps it around the period more times, adding bright partials:
//!
//!   fold(x, amount) = sin(2π · fmod(amount · x, 1))

use std::f32::consts::TAU;

/// Knee used by the voices and their feedback loops.
pub const SOFT_CLIP_KNEE: f32 = 0.05;

/// Cubic soft clip with knee `knee` (clamped to [0, 1/3]).
///
/// NaN input reads as silence.
///
/// # Example
/// ```
/// use pluck_dsp::dsp::distortion::{soft_clip, SOFT_CLIP_KNEE};
/// assert!((soft_clip(SOFT_CLIP_KNEE, 100.0) - 0.95).abs() < 1e-6);
/// assert!((soft_clip(SOFT_CLIP_KNEE, 0.0)).abs() < 1e-9);
/// ```
#[inline]
pub fn soft_clip(knee: f32, x: f32) -> f32 {
    let k = knee.clamp(0.0, 1.0 / 3.0);
    let x = if x.is_nan() { 0.0 } else { x.clamp(-1.0, 1.0) };
    x - k * (x * x * x)
}

/// Largest magnitude `soft_clip(knee, _)` can return.
#[inline]
pub fn soft_clip_ceiling(knee: f32) -> f32 {
    1.0 - knee.clamp(0.0, 1.0 / 3.0)
}

/// Rational soft clip `x / (1 + knee·|x|)`. A non-positive knee leaves the
/// signal untouched.
///
/// NaN input reads as silence.
///
/// # Example
/// ```
/// use pluck_dsp::dsp::distortion::rational_clip;
/// assert_eq!(rational_clip(0.5, 2.0), 1.0);
/// assert_eq!(rational_clip(0.5, -2.0), -1.0);
/// ```
#[inline]
pub fn rational_clip(knee: f32, x: f32) -> f32 {
    if x.is_nan() {
        return 0.0;
    }
    let k = knee.max(0.0);
    if x.is_infinite() && k > 0.0 {
        return x.signum() / k;
    }
    x / (1.0 + k * x.abs())
}

/// Value `rational_clip(knee, _)` tends to for large inputs. Infinite for
/// a non-positive knee.
#[inline]
pub fn rational_clip_ceiling(knee: f32) -> f32 {
    1.0 / knee.max(0.0)
}

/// Sine wavefolder. Output is always in [-1, 1].
#[inline]
pub fn sine_fold(x: f32, amount: f32) -> f32 {
    let folded = (amount * x) % 1.0;
    (TAU * folded).sin()
}
