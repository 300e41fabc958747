//! Dead-reckoning pose integration for a differential-drive robot.

use core::f64::consts::PI;
use libm::{cos, sin};

use crate::{Formula, Pose};

/// `deg2rad(π)`: the numeric value of π read as degrees and converted to radians
/// (≈ 0.05483). The reference wheel displacement divides by twice this value.
pub const DEG2RAD_PI: f64 = PI * (PI / 180.0);

/// Linear distance travelled by one wheel for a rotation increment.
///
/// * [`Formula::Legacy`]: `(delta_phi / (2 * deg2rad(π))) * R`. The constant was
///   presumably meant to be `2π`; it is kept as is.
/// * [`Formula::Kinematic`]: `delta_phi * R`.
pub fn wheel_displacement(formula: Formula, delta_phi: f64, wheel_radius: f64) -> f64 {
    match formula {
        Formula::Legacy => (delta_phi / (2.0 * DEG2RAD_PI)) * wheel_radius,
        Formula::Kinematic => delta_phi * wheel_radius,
    }
}

/// Integrates the two wheel rotations into a new pose.
///
/// The centroid moves `(d_right + d_left) / 2` along the *previous* heading.
/// The heading change is `(d_right - d_left) / (2 * baseline)` with
/// [`Formula::Legacy`] and `(d_right - d_left) / baseline` with
/// [`Formula::Kinematic`], `baseline` being the full wheel-to-wheel distance.
///
/// The heading is never normalized. A zero baseline is not guarded: with unequal
/// wheel rotations the returned heading is infinite or NaN.
///
/// # Arguments
///
/// * `formula`: Which conversion formulas to apply.
/// * `wheel_radius`: Radius of both wheels.
/// * `baseline`: Distance between the two wheels' contact points.
/// * `prev`: The previous pose estimate.
/// * `delta_phi_left`: Left wheel rotation increment.
/// * `delta_phi_right`: Right wheel rotation increment.
pub fn estimate_pose(
    formula: Formula,
    wheel_radius: f64,
    baseline: f64,
    prev: Pose,
    delta_phi_left: f64,
    delta_phi_right: f64,
) -> Pose {
    let d_right = wheel_displacement(formula, delta_phi_right, wheel_radius);
    let d_left = wheel_displacement(formula, delta_phi_left, wheel_radius);

    let delta_a = (d_right + d_left) / 2.0;
    let delta_theta = match formula {
        Formula::Legacy => (d_right - d_left) / (2.0 * baseline),
        Formula::Kinematic => (d_right - d_left) / baseline,
    };

    Pose {
        x: prev.x + delta_a * cos(prev.theta),
        y: prev.y + delta_a * sin(prev.theta),
        theta: prev.theta + delta_theta,
    }
}

/// Computes the current pose using the reference dead-reckoning model.
///
/// Tuple form of [`estimate_pose`] with [`Formula::Legacy`]. Returns
/// `(x_curr, y_curr, theta_curr)`.
///
/// # Arguments
///
/// * `r`: Radius of the wheels (both wheels are assumed to be the same size).
/// * `baseline`: Distance from wheel to wheel.
/// * `x_prev`, `y_prev`, `theta_prev`: Previous pose estimate.
/// * `delta_phi_left`, `delta_phi_right`: Wheel rotation increments, as returned by
///   [`delta_phi`](crate::delta_phi).
pub fn pose_estimation(
    r: f64,
    baseline: f64,
    x_prev: f64,
    y_prev: f64,
    theta_prev: f64,
    delta_phi_left: f64,
    delta_phi_right: f64,
) -> (f64, f64, f64) {
    estimate_pose(
        Formula::Legacy,
        r,
        baseline,
        Pose::new(x_prev, y_prev, theta_prev),
        delta_phi_left,
        delta_phi_right,
    )
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use core::f64::consts::{FRAC_PI_2, FRAC_PI_4, TAU};

    const R: f64 = 0.02;
    const BASELINE: f64 = 0.1;

    #[test]
    fn test_deg2rad_pi_constant() {
        assert_relative_eq!(DEG2RAD_PI, 0.054_831_135_561_607_55, epsilon = 1e-15);
    }

    #[test]
    fn test_no_motion_reference_example() {
        assert_eq!(pose_estimation(R, BASELINE, 0.0, 0.0, 0.0, 0.0, 0.0), (0.0, 0.0, 0.0));
    }

    #[test]
    fn test_zero_deltas_are_idempotent() {
        let start = (1.5, -0.25, 7.0);
        let once = pose_estimation(R, BASELINE, start.0, start.1, start.2, 0.0, 0.0);
        let twice = pose_estimation(R, BASELINE, once.0, once.1, once.2, 0.0, 0.0);
        assert_eq!(once, start);
        assert_eq!(twice, once);
    }

    #[test]
    fn test_straight_line_keeps_heading() {
        for theta_prev in [0.0, FRAC_PI_4, FRAC_PI_2, 2.0, -3.0] {
            let (x, y, theta) = pose_estimation(R, BASELINE, 1.0, 2.0, theta_prev, 810.0, 810.0);
            assert_eq!(theta, theta_prev);

            let d = (810.0 / (2.0 * DEG2RAD_PI)) * R;
            assert_relative_eq!(x, 1.0 + d * theta_prev.cos(), epsilon = 1e-12);
            assert_relative_eq!(y, 2.0 + d * theta_prev.sin(), epsilon = 1e-12);
        }
    }

    #[test]
    fn test_legacy_displacement_scale() {
        // dphi = 810 from delta_phi(10, 4, 135) moves the robot ~147.7 units with R = 0.02.
        let (x, y, theta) = pose_estimation(R, BASELINE, 0.0, 0.0, 0.0, 810.0, 810.0);
        assert_relative_eq!(x, 810.0 / (2.0 * DEG2RAD_PI) * R, epsilon = 1e-12);
        assert_relative_eq!(x, 147.726_285_75, epsilon = 1e-6);
        assert_eq!(y, 0.0);
        assert_eq!(theta, 0.0);
    }

    #[test]
    fn test_rotation_in_place() {
        let (x, y, theta) = pose_estimation(R, BASELINE, 3.0, -4.0, 1.0, -2.5, 2.5);
        assert_eq!(x, 3.0);
        assert_eq!(y, -4.0);

        let d = (2.5 / (2.0 * DEG2RAD_PI)) * R;
        assert_relative_eq!(theta, 1.0 + (2.0 * d) / (2.0 * BASELINE), epsilon = 1e-12);
    }

    #[test]
    fn test_zero_baseline_is_not_guarded() {
        let (x, y, theta) = pose_estimation(R, 0.0, 0.0, 0.0, 0.0, 1.0, 2.0);
        assert!(!theta.is_finite());
        assert!(x.is_finite());
        assert!(y.is_finite());
    }

    #[test]
    fn test_heading_is_not_wrapped() {
        let mut pose = (0.0, 0.0, 0.0);
        for _ in 0..100 {
            pose = pose_estimation(R, BASELINE, pose.0, pose.1, pose.2, -1.0, 1.0);
        }
        assert!(pose.2 > TAU);
    }

    #[test]
    fn test_estimate_pose_matches_tuple_form() {
        let prev = Pose::new(0.3, 0.4, 0.5);
        let pose = estimate_pose(Formula::Legacy, R, BASELINE, prev, 12.0, 30.0);
        assert_eq!(pose_estimation(R, BASELINE, 0.3, 0.4, 0.5, 12.0, 30.0), pose.into());
    }

    #[test]
    fn test_kinematic_full_revolution_travels_circumference() {
        let pose = estimate_pose(Formula::Kinematic, R, BASELINE, Pose::default(), TAU, TAU);
        assert_relative_eq!(pose.x, TAU * R, epsilon = 1e-12);
        assert_eq!(pose.y, 0.0);
        assert_eq!(pose.theta, 0.0);
    }

    #[test]
    fn test_kinematic_pivot_turn() {
        // Wheels travel ±d, so the heading changes by 2d / baseline.
        let pose = estimate_pose(Formula::Kinematic, R, BASELINE, Pose::default(), -PI, PI);
        assert_eq!(pose.x, 0.0);
        assert_eq!(pose.y, 0.0);
        assert_relative_eq!(pose.theta, 2.0 * PI * R / BASELINE, epsilon = 1e-12);
    }

    #[test]
    fn test_wheel_displacement_formulas() {
        assert_relative_eq!(wheel_displacement(Formula::Kinematic, 2.0, 0.5), 1.0);
        assert_relative_eq!(
            wheel_displacement(Formula::Legacy, 2.0, 0.5),
            1.0 / (2.0 * DEG2RAD_PI),
            epsilon = 1e-12
        );
    }
}
