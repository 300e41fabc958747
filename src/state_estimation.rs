use deadreckon_kinematics::{DifferentialDrive, Pose, TickPair};
use tracing::{debug, warn};

/// Tracks the robot pose across a stream of cumulative encoder readings.
///
/// Each step converts both wheels' tick deltas and integrates them into the
/// stored pose. This is the caller loop the kinematics crate leaves to its users.
#[derive(Debug, Clone)]
pub struct Odometer {
    drive: DifferentialDrive,
    prev_ticks: Option<(i64, i64)>,
    pose: Pose,
    steps: u64,
}

impl Odometer {
    /// With `prime_from_zero` the first reading counts as motion from `(0, 0)`;
    /// otherwise it only sets the baseline counts.
    pub fn new(drive: DifferentialDrive, initial_pose: Pose, prime_from_zero: bool) -> Self {
        Odometer {
            drive,
            prev_ticks: prime_from_zero.then_some((0, 0)),
            pose: initial_pose,
            steps: 0,
        }
    }

    pub fn pose(&self) -> Pose {
        self.pose
    }

    /// Number of readings that produced a pose update.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Feeds one reading. Returns `None` when it only set the baseline counts.
    pub fn step(&mut self, left: i64, right: i64) -> Option<Pose> {
        let Some((prev_left, prev_right)) = self.prev_ticks.replace((left, right)) else {
            debug!(left, right, "Encoder baselines set");
            return None;
        };

        let left = TickPair::new(left, prev_left);
        let right = TickPair::new(right, prev_right);
        let next = self.drive.update_pose_from_ticks(self.pose, left, right);

        if self.pose.is_finite() && !next.is_finite() {
            warn!(
                step = self.steps + 1,
                delta_left = left.delta(),
                delta_right = right.delta(),
                "Pose estimate became non-finite"
            );
        }

        self.pose = next;
        self.steps += 1;
        Some(next)
    }
}
