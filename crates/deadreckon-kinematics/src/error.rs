#![warn(missing_docs)]

//! Error types for the odometry library.
//!
//! The raw conversion functions never fail. These errors are only produced by
//! the validated [`DifferentialDrive`](crate::DifferentialDrive) constructor.

use core::fmt;

/// Errors that can occur when describing a robot for odometry.
#[derive(Debug, Clone, PartialEq)]
pub enum KinematicsError {
    /// Error for invalid wheel radius.
    /// This variant is returned when a wheel radius is provided that is not positive and finite.
    InvalidWheelRadius(&'static str),
    /// Error for invalid baseline.
    /// This variant is returned when the wheel-to-wheel distance is not positive and finite.
    InvalidBaseline(&'static str),
    /// Error for invalid encoder resolution.
    /// This variant is returned when the ticks per revolution count is not positive.
    InvalidResolution(&'static str),
}

impl fmt::Display for KinematicsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KinematicsError::InvalidWheelRadius(msg) => write!(f, "Invalid wheel radius: {}", msg),
            KinematicsError::InvalidBaseline(msg) => write!(f, "Invalid baseline: {}", msg),
            KinematicsError::InvalidResolution(msg) => write!(f, "Invalid encoder resolution: {}", msg),
        }
    }
}

impl core::error::Error for KinematicsError {}
