//! Easing curves: normalized time in, progress out.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Timing curve for a tween. `eval` maps normalized time `k` in [0,1] to a
/// progress factor. The analytic curves evaluate raw formulas (the engine
/// snaps exact end values at expiry, so slight overshoot on the last
/// sampled frame is harmless); `CubicBezier` clamps its input.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Ease {
    Linear,
    /// Quadratic acceleration: `k²`.
    InQuad,
    /// Quadratic deceleration: `1 - (1-k)²`.
    OutQuad,
    /// Quadratic in/out, symmetric around `k = 0.5`.
    InOutQuad,
    /// Sine deceleration, the carousel's slide-and-settle curve.
    OutSine,
    /// Sine in/out, the double-tap zoom curve.
    InOutSine,
    /// CSS-style cubic bezier timing with control points (x1,y1), (x2,y2).
    CubicBezier { x1: f64, y1: f64, x2: f64, y2: f64 },
}

impl Default for Ease {
    fn default() -> Self {
        Ease::Linear
    }
}

impl Ease {
    pub fn eval(self, k: f64) -> f64 {
        match self {
            Ease::Linear => k,
            Ease::InQuad => k * k,
            Ease::OutQuad => 1.0 - (1.0 - k) * (1.0 - k),
            Ease::InOutQuad => {
                if k < 0.5 {
                    2.0 * k * k
                } else {
                    1.0 - 2.0 * (1.0 - k) * (1.0 - k)
                }
            }
            Ease::OutSine => (k * (PI / 2.0)).sin(),
            Ease::InOutSine => -0.5 * ((PI * k).cos() - 1.0),
            Ease::CubicBezier { x1, y1, x2, y2 } => bezier_ease(k, x1, y1, x2, y2),
        }
    }
}

#[inline]
fn cubic(p1: f64, p2: f64, t: f64) -> f64 {
    // Bezier with endpoints pinned at 0 and 1.
    let u = 1.0 - t;
    3.0 * u * u * t * p1 + 3.0 * u * t * t * p2 + t * t * t
}

/// Given control points (x1,y1,x2,y2) and input t in [0,1], compute the
/// eased y by inverting the x bezier via binary search.
fn bezier_ease(t: f64, x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    // Fast path: Bezier(0,0,1,1) is exactly linear
    if x1 == 0.0 && y1 == 0.0 && x2 == 1.0 && y2 == 1.0 {
        return t;
    }
    // Monotonic X in [0,1] assumed for x1/x2 in [0,1]
    let mut lo = 0.0f64;
    let mut hi = 1.0f64;
    let mut mid = t;
    for _ in 0..24 {
        let x = cubic(x1, x2, mid);
        if (x - t).abs() < 1e-6 {
            break;
        }
        if x < t {
            lo = mid;
        } else {
            hi = mid;
        }
        mid = 0.5 * (lo + hi);
    }
    cubic(y1, y2, mid)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64, eps: f64) {
        assert!((a - b).abs() <= eps, "left={a} right={b} eps={eps}");
    }

    #[test]
    fn endpoints() {
        for ease in [
            Ease::Linear,
            Ease::InQuad,
            Ease::OutQuad,
            Ease::InOutQuad,
            Ease::OutSine,
            Ease::InOutSine,
        ] {
            approx(ease.eval(0.0), 0.0, 1e-12);
            approx(ease.eval(1.0), 1.0, 1e-12);
        }
    }

    #[test]
    fn out_sine_matches_formula() {
        approx(Ease::OutSine.eval(0.5), (0.25f64 * PI).sin(), 1e-12);
        approx(Ease::InOutSine.eval(0.5), 0.5, 1e-12);
    }

    #[test]
    fn quad_halves_meet() {
        approx(Ease::InOutQuad.eval(0.5), 0.5, 1e-12);
        assert!(Ease::InQuad.eval(0.25) < 0.25);
        assert!(Ease::OutQuad.eval(0.25) > 0.25);
    }

    #[test]
    fn bezier_linear_fast_path() {
        let b = Ease::CubicBezier {
            x1: 0.0,
            y1: 0.0,
            x2: 1.0,
            y2: 1.0,
        };
        approx(b.eval(0.37), 0.37, 1e-12);
    }

    #[test]
    fn bezier_ease_in_out_is_monotonic() {
        let b = Ease::CubicBezier {
            x1: 0.42,
            y1: 0.0,
            x2: 0.58,
            y2: 1.0,
        };
        let mut prev = 0.0;
        for i in 0..=20 {
            let v = b.eval(i as f64 / 20.0);
            assert!(v >= prev - 1e-9);
            prev = v;
        }
        approx(b.eval(1.0), 1.0, 1e-6);
    }
}
