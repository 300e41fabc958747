use deadreckon_kinematics::*;

fn main() {
    let wheel_radius = 0.0318;
    let baseline = 0.1;
    let resolution = 135;

    // Cumulative (left, right) encoder counts: straight, then a left turn.
    let samples: [(i64, i64); 8] = [
        (0, 0),
        (12, 12),
        (24, 24),
        (36, 36),
        (42, 50),
        (48, 64),
        (54, 78),
        (66, 90),
    ];

    for formula in [Formula::Legacy, Formula::Kinematic] {
        let drive = match DifferentialDrive::new(wheel_radius, baseline, resolution, formula) {
            Ok(drive) => drive,
            Err(e) => {
                eprintln!("Failed to initialize odometry: {}", e);
                return;
            }
        };

        println!("Replaying {} samples with {}", samples.len(), drive);

        let mut pose = Pose::default();
        let mut prev = samples[0];
        for (i, &(left, right)) in samples.iter().enumerate().skip(1) {
            pose = drive.update_pose_from_ticks(
                pose,
                TickPair::new(left, prev.0),
                TickPair::new(right, prev.1),
            );
            prev = (left, right);
            println!("Step {:>2}: Pose: {}", i, pose);
        }

        println!("Final Pose: {} (normalized θ: {:.4})\n", pose, pose.normalized().theta);
    }
}
