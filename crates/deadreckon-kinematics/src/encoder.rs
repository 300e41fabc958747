//! Encoder tick conversion.
//!
//! Turns a pair of cumulative tick counts into a wheel rotation increment.

use core::f64::consts::TAU;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::Formula;

/// The current and previous cumulative tick counts of one wheel encoder.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickPair {
    /// Current tick count.
    pub ticks: i64,
    /// Tick count at the previous update.
    pub prev_ticks: i64,
}

impl TickPair {
    /// Construct a tick pair.
    pub const fn new(ticks: i64, prev_ticks: i64) -> Self {
        TickPair { ticks, prev_ticks }
    }

    /// Ticks elapsed since the previous reading. Wraps on overflow.
    pub const fn delta(&self) -> i64 {
        self.ticks.wrapping_sub(self.prev_ticks)
    }
}

/// Converts encoder ticks into a wheel rotation increment using the reference formula.
///
/// Returns `(dphi, delta_ticks)`. Note the second element is the tick *delta*,
/// not the current count.
///
/// `dphi` is meant to be a rotation in radians, but the formula is
/// `delta_ticks * resolution` rather than `delta_ticks / resolution * 2π`. This
/// is almost certainly a bug; it is kept so results match existing reference
/// outputs. Use [`wheel_rotation`] with [`Formula::Kinematic`] for radians.
///
/// Nothing is validated. The product is taken in `f64`, so it never overflows.
///
/// # Arguments
///
/// * `ticks`: Current tick count from the encoder.
/// * `prev_ticks`: Previous tick count from the encoder.
/// * `resolution`: Ticks per full wheel revolution.
pub fn delta_phi(ticks: i64, prev_ticks: i64, resolution: i64) -> (f64, i64) {
    let delta_ticks = TickPair::new(ticks, prev_ticks).delta();
    let dphi = delta_ticks as f64 * resolution as f64;
    (dphi, delta_ticks)
}

/// Converts encoder ticks into a wheel rotation increment with the selected formula.
///
/// With [`Formula::Legacy`] this is exactly [`delta_phi`]. With
/// [`Formula::Kinematic`] the rotation is `delta_ticks / resolution * 2π`
/// radians; a zero resolution yields a non-finite value.
pub fn wheel_rotation(formula: Formula, ticks: i64, prev_ticks: i64, resolution: i64) -> (f64, i64) {
    match formula {
        Formula::Legacy => delta_phi(ticks, prev_ticks, resolution),
        Formula::Kinematic => {
            let delta_ticks = TickPair::new(ticks, prev_ticks).delta();
            let dphi = delta_ticks as f64 / resolution as f64 * TAU;
            (dphi, delta_ticks)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_delta_phi_reference_example() {
        let (dphi, delta) = delta_phi(10, 4, 135);
        assert_eq!(delta, 6);
        assert_eq!(dphi, 810.0);
    }

    #[test]
    fn test_delta_phi_is_exact_for_forward_motion() {
        for (t1, t2, resolution) in [(0, 0, 1), (0, 1, 135), (100, 250, 135), (-40, 7, 2048)] {
            let (dphi, delta) = delta_phi(t2, t1, resolution);
            assert_eq!(delta, t2 - t1);
            assert_eq!(dphi, ((t2 - t1) * resolution) as f64);
        }
    }

    #[test]
    fn test_delta_phi_translation_symmetry() {
        let base = delta_phi(57, 12, 135);
        for k in [-1_000_000, -3, 0, 1, 42, 1 << 40] {
            assert_eq!(delta_phi(57 + k, 12 + k, 135), base);
        }
    }

    #[test]
    fn test_delta_phi_backwards_motion() {
        // Counts going down give a negative delta; nothing is enforced.
        let (dphi, delta) = delta_phi(4, 10, 135);
        assert_eq!(delta, -6);
        assert_eq!(dphi, -810.0);
    }

    #[test]
    fn test_delta_phi_does_not_panic_at_extremes() {
        let (dphi, delta) = delta_phi(i64::MIN, 1, i64::MAX);
        assert_eq!(delta, i64::MAX); // wrapped
        assert!(dphi.is_finite());
    }

    #[test]
    fn test_wheel_rotation_legacy_matches_delta_phi() {
        assert_eq!(wheel_rotation(Formula::Legacy, 10, 4, 135), delta_phi(10, 4, 135));
    }

    #[test]
    fn test_wheel_rotation_kinematic_full_revolution() {
        let (dphi, delta) = wheel_rotation(Formula::Kinematic, 135, 0, 135);
        assert_eq!(delta, 135);
        assert_relative_eq!(dphi, TAU);

        let (half, _) = wheel_rotation(Formula::Kinematic, 10, 10 + 64, 128);
        assert_relative_eq!(half, -TAU / 2.0);
    }

    #[test]
    fn test_wheel_rotation_kinematic_zero_resolution() {
        let (dphi, delta) = wheel_rotation(Formula::Kinematic, 5, 0, 0);
        assert_eq!(delta, 5);
        assert!(!dphi.is_finite());
    }

    #[test]
    fn test_conversions_agree_with_tick_pair_delta() {
        for (ticks, prev) in [(10, 4), (4, 10), (i64::MIN, 1), (i64::MAX, -1)] {
            let delta = TickPair::new(ticks, prev).delta();
            assert_eq!(delta_phi(ticks, prev, 135).1, delta);
            assert_eq!(wheel_rotation(Formula::Kinematic, ticks, prev, 135).1, delta);
        }
    }

    #[test]
    fn test_tick_pair_delta() {
        assert_eq!(TickPair::new(10, 4).delta(), 6);
        assert_eq!(TickPair::new(i64::MIN, 1).delta(), i64::MAX);
    }
}
