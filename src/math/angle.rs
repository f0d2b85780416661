//! Angle helpers shared by the handle model, the coordinate transform and the
//! curve sampler. All angles are radians unless a name says otherwise.

use std::f64::consts::{PI, TAU};

/// Normalizes `angle` into `(-π, π]`.
///
/// Non-finite input yields `0.0` so downstream geometry never sees `NaN`.
#[must_use]
pub fn normalize_angle(angle: f64) -> f64 {
    if !angle.is_finite() {
        return 0.0;
    }
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    // The open end of the range folds onto +π.
    if wrapped <= -PI {
        PI
    } else {
        wrapped
    }
}

/// Signed shortest turn from `from` to `to`, in `(-π, π]`.
#[must_use]
pub fn shortest_turn(from: f64, to: f64) -> f64 {
    normalize_angle(to - from)
}

/// Interpolates from `a` to `b` along the shortest turn.
///
/// `t = 0` yields `a`, `t = 1` yields `b` (both normalized).
#[must_use]
pub fn lerp_angle(a: f64, b: f64, t: f64) -> f64 {
    normalize_angle(a + shortest_turn(a, b) * t)
}

/// Returns `true` when `a` and `b` denote the same direction within `tolerance`.
#[must_use]
pub fn angles_equivalent(a: f64, b: f64, tolerance: f64) -> bool {
    shortest_turn(a, b).abs() <= tolerance
}

#[cfg(test)]
mod tests {
    use std::f64::consts::FRAC_PI_2;

    use approx::assert_relative_eq;

    use super::*;

    const TOL: f64 = 1e-12;

    #[test]
    fn normalize_keeps_range_half_open() {
        assert_relative_eq!(normalize_angle(-PI), PI, epsilon = TOL);
        assert_relative_eq!(normalize_angle(PI), PI, epsilon = TOL);
        assert_relative_eq!(normalize_angle(3.0 * PI), PI, epsilon = 1e-9);
        assert_relative_eq!(normalize_angle(TAU + 0.5), 0.5, epsilon = TOL);
    }

    #[test]
    fn normalize_non_finite_is_zero() {
        assert!(normalize_angle(f64::NAN).abs() < TOL);
        assert!(normalize_angle(f64::INFINITY).abs() < TOL);
    }

    #[test]
    fn shortest_turn_crosses_the_seam() {
        let turn = shortest_turn(PI - 0.1, -PI + 0.1);
        assert_relative_eq!(turn, 0.2, epsilon = 1e-9);
    }

    #[test]
    fn lerp_angle_takes_short_way_round() {
        let mid = lerp_angle(PI - 0.2, -PI + 0.2, 0.5);
        assert!(angles_equivalent(mid, PI, 1e-9), "mid={mid}");
        assert_relative_eq!(lerp_angle(0.0, FRAC_PI_2, 0.5), FRAC_PI_2 / 2.0, epsilon = TOL);
    }
}
