#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![doc = "A `no_std` library for differential-drive wheel odometry."]
#![doc = ""]
#![doc = "This crate converts encoder tick counts into wheel rotations and integrates"]
#![doc = "the two wheel rotations into a 2D robot pose using a dead-reckoning model."]
#![doc = ""]
#![doc = "The free functions [`delta_phi`] and [`pose_estimation`] reproduce the reference"]
#![doc = "formulas exactly, including two unit-conversion anomalies (see [`Formula`])."]
#![doc = "[`DifferentialDrive`] is an opt-in layer that validates robot geometry up front."]

use core::f64::consts::PI;
use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub mod drive;
pub mod encoder;
pub mod error;
pub mod odometry;

pub use drive::DifferentialDrive;
pub use encoder::{TickPair, delta_phi, wheel_rotation};
pub use error::KinematicsError;
pub use odometry::{estimate_pose, pose_estimation, wheel_displacement};

/// A 2‑D pose `(x, y, θ)` in consistent length units and radians (θ measured
/// counter‑clockwise from the x‑axis in the world frame).
///
/// The estimator never wraps `theta`; it grows without bound over many updates.
/// Use [`Pose::normalize_angle`] explicitly when a bounded heading is needed.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Pose {
    /// World‑frame x position.
    pub x: f64,
    /// World‑frame y position.
    pub y: f64,
    /// Heading (rad), unnormalized.
    pub theta: f64,
}

impl Pose {
    /// Construct a new pose.
    ///
    /// # Arguments
    ///
    /// * `x`: World-frame x position.
    /// * `y`: World-frame y position.
    /// * `theta`: Heading in radians.
    pub const fn new(x: f64, y: f64, theta: f64) -> Self {
        Pose { x, y, theta }
    }

    /// Returns `true` if every component is finite.
    ///
    /// A zero baseline makes the heading non-finite; this is how callers detect it.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.theta.is_finite()
    }

    /// Normalize an angle to be within `[-PI, PI)`.
    ///
    /// Angles at `PI` will be normalized to `-PI`. This is never applied by the
    /// estimator itself.
    ///
    /// # Arguments
    ///
    /// * `angle`: The angle in radians to normalize.
    ///
    /// # Returns
    ///
    /// The normalized angle in radians.
    pub fn normalize_angle(angle: f64) -> f64 {
        let a = angle % (2.0 * PI);
        if a >= PI {
            a - 2.0 * PI
        } else if a < -PI {
            a + 2.0 * PI
        } else {
            a
        }
    }

    /// Returns a copy of this pose with the heading normalized to `[-PI, PI)`.
    pub fn normalized(&self) -> Self {
        Pose {
            theta: Pose::normalize_angle(self.theta),
            ..*self
        }
    }
}

impl From<(f64, f64, f64)> for Pose {
    fn from((x, y, theta): (f64, f64, f64)) -> Self {
        Pose { x, y, theta }
    }
}

impl From<Pose> for (f64, f64, f64) {
    fn from(pose: Pose) -> Self {
        (pose.x, pose.y, pose.theta)
    }
}

impl fmt::Display for Pose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(x: {:.4}, y: {:.4}, θ: {:.4} rad)", self.x, self.y, self.theta)
    }
}

/// Which set of conversion formulas to use.
///
/// The reference formulas contain two apparent unit-conversion defects:
///
/// * tick conversion computes `delta_ticks * resolution` instead of
///   `delta_ticks / resolution * 2π`;
/// * wheel displacement divides by `2 * deg2rad(π)` (≈ 0.1097, π read as degrees)
///   before scaling by the wheel radius.
///
/// [`Formula::Legacy`] keeps both for parity with existing reference outputs and
/// is the default. [`Formula::Kinematic`] uses standard differential-drive
/// kinematics instead.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Formula {
    /// Reference formulas, anomalies included.
    #[default]
    Legacy,
    /// Standard differential-drive kinematics.
    Kinematic,
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Formula::Legacy => write!(f, "legacy"),
            Formula::Kinematic => write!(f, "kinematic"),
        }
    }
}
