pub mod angle;
pub mod bezier_2d;
pub mod distance_2d;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// 2x2 matrix type, used for the axis-convention transforms.
pub type Matrix2 = nalgebra::Matrix2<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Returns the point at `radius` along direction `angle` from `origin`.
#[must_use]
pub fn polar_offset(origin: &Point2, radius: f64, angle: f64) -> Point2 {
    origin + Vector2::new(radius * angle.cos(), radius * angle.sin())
}

/// Returns the direction angle from `from` towards `to`, or `None` if the two
/// points coincide.
#[must_use]
pub fn angle_toward(from: &Point2, to: &Point2) -> Option<f64> {
    let d = to - from;
    if d.norm_squared() < TOLERANCE * TOLERANCE {
        return None;
    }
    Some(d.y.atan2(d.x))
}

#[cfg(test)]
mod tests {
    use std::f64::consts::FRAC_PI_4;

    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn polar_offset_along_diagonal() {
        let p = polar_offset(&Point2::new(1.0, 1.0), 2.0_f64.sqrt(), FRAC_PI_4);
        assert_relative_eq!(p.x, 2.0, epsilon = 1e-12);
        assert_relative_eq!(p.y, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn angle_toward_coincident_is_none() {
        let p = Point2::new(3.0, -1.0);
        assert!(angle_toward(&p, &p).is_none());
    }

    #[test]
    fn angle_toward_points_at_target() {
        let a = angle_toward(&Point2::new(5.0, 5.0), &Point2::new(0.0, 0.0));
        assert_relative_eq!(a.unwrap_or_default(), -3.0 * FRAC_PI_4, epsilon = 1e-12);
    }
}
