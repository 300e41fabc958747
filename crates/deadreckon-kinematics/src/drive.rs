//! Validated differential-drive odometry helper.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::encoder::{TickPair, wheel_rotation};
use crate::odometry::estimate_pose;
use crate::{Formula, KinematicsError, Pose};

/// Differential‑drive odometry helper.
///
/// This struct encapsulates the physical parameters of a differential-drive robot
/// (wheel radius, baseline and encoder resolution) together with the formula set
/// to apply. Unlike the free functions, its parameters are checked once at
/// construction. The numbers it produces are identical to the free functions'.
/// Deserialization goes through the same checks.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "DriveParams"))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifferentialDrive {
    /// Wheel radius.
    wheel_radius: f64,
    /// Distance between the wheels' contact points.
    baseline: f64,
    /// Encoder ticks per wheel revolution.
    resolution: i64,
    /// Conversion formulas applied to ticks and wheel rotations.
    formula: Formula,
}

/// Unchecked field set that deserialization validates into a [`DifferentialDrive`].
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct DriveParams {
    wheel_radius: f64,
    baseline: f64,
    resolution: i64,
    #[serde(default)]
    formula: Formula,
}

#[cfg(feature = "serde")]
impl TryFrom<DriveParams> for DifferentialDrive {
    type Error = KinematicsError;

    fn try_from(params: DriveParams) -> Result<Self, Self::Error> {
        DifferentialDrive::new(params.wheel_radius, params.baseline, params.resolution, params.formula)
    }
}

impl DifferentialDrive {
    /// Construct a new differential‑drive odometry helper.
    ///
    /// # Arguments
    ///
    /// * `wheel_radius`: The radius of the robot's wheels.
    /// * `baseline`: The distance between the two drive wheels.
    /// * `resolution`: Encoder ticks per full wheel revolution.
    /// * `formula`: Which conversion formulas to use.
    ///
    /// # Errors
    ///
    /// Returns `Err(KinematicsError::InvalidWheelRadius)` if `wheel_radius` is not positive and finite.
    /// Returns `Err(KinematicsError::InvalidBaseline)` if `baseline` is not positive and finite.
    /// Returns `Err(KinematicsError::InvalidResolution)` if `resolution` is not positive.
    pub const fn new(
        wheel_radius: f64,
        baseline: f64,
        resolution: i64,
        formula: Formula,
    ) -> Result<Self, KinematicsError> {
        if !(wheel_radius > 0.0) || !wheel_radius.is_finite() {
            return Err(KinematicsError::InvalidWheelRadius(
                "must be positive and finite",
            ));
        }
        if !(baseline > 0.0) || !baseline.is_finite() {
            return Err(KinematicsError::InvalidBaseline(
                "must be positive and finite",
            ));
        }
        if resolution <= 0 {
            return Err(KinematicsError::InvalidResolution(
                "must be positive",
            ));
        }
        Ok(DifferentialDrive {
            wheel_radius,
            baseline,
            resolution,
            formula,
        })
    }

    /// Returns the wheel radius.
    pub fn wheel_radius(&self) -> f64 {
        self.wheel_radius
    }

    /// Returns the baseline.
    pub fn baseline(&self) -> f64 {
        self.baseline
    }

    /// Returns the encoder resolution in ticks per revolution.
    pub fn resolution(&self) -> i64 {
        self.resolution
    }

    /// Returns the formula set in use.
    pub fn formula(&self) -> Formula {
        self.formula
    }

    /// Converts one wheel's tick counts into `(dphi, delta_ticks)`.
    pub fn wheel_rotation(&self, ticks: TickPair) -> (f64, i64) {
        wheel_rotation(self.formula, ticks.ticks, ticks.prev_ticks, self.resolution)
    }

    /// Integrates the two wheel rotation increments into a new pose.
    ///
    /// # Arguments
    ///
    /// * `current_pose`: The robot's pose before the motion.
    /// * `delta_phi_left`: Left wheel rotation increment.
    /// * `delta_phi_right`: Right wheel rotation increment.
    pub fn update_pose(&self, current_pose: Pose, delta_phi_left: f64, delta_phi_right: f64) -> Pose {
        estimate_pose(
            self.formula,
            self.wheel_radius,
            self.baseline,
            current_pose,
            delta_phi_left,
            delta_phi_right,
        )
    }

    /// Convenience function to update pose directly from encoder readings.
    ///
    /// Converts each wheel with [`DifferentialDrive::wheel_rotation`] and then
    /// calls [`DifferentialDrive::update_pose`].
    pub fn update_pose_from_ticks(&self, current_pose: Pose, left: TickPair, right: TickPair) -> Pose {
        let (dphi_left, _) = self.wheel_rotation(left);
        let (dphi_right, _) = self.wheel_rotation(right);
        self.update_pose(current_pose, dphi_left, dphi_right)
    }
}

impl fmt::Display for DifferentialDrive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DifferentialDrive (r: {:.4}, baseline: {:.4}, {} ticks/rev, {})",
            self.wheel_radius, self.baseline, self.resolution, self.formula
        )
    }
}
