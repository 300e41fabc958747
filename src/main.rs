mod settings;         // TOML + environment configuration
mod state_estimation; // the per-sample odometry loop
mod tick_log;         // encoder tick log parsing

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use deadreckon_kinematics::Formula;
use spin_sleep::SpinSleeper;
use tracing::{info, warn};
use tracing_subscriber::{self, EnvFilter};

use settings::Overrides;
use state_estimation::Odometer;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormulaArg {
    /// Reference formulas, kept for parity with existing outputs
    Legacy,
    /// Standard differential-drive kinematics
    Kinematic,
}

impl From<FormulaArg> for Formula {
    fn from(arg: FormulaArg) -> Self {
        match arg {
            FormulaArg::Legacy => Formula::Legacy,
            FormulaArg::Kinematic => Formula::Kinematic,
        }
    }
}

/// Replay a wheel-encoder tick log through dead-reckoning odometry.
#[derive(Parser, Debug)]
#[command(name = "deadreckon", version)]
struct Args {
    /// Tick log with one `left right` sample of cumulative counts per line
    tick_log: PathBuf,

    /// Configuration file (defaults to config/default.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Conversion formulas to apply
    #[arg(short, long, value_enum)]
    formula: Option<FormulaArg>,

    /// Replay pacing in samples per second (0 = unpaced)
    #[arg(long)]
    rate_hz: Option<f64>,

    /// Treat the first sample as motion from counts of zero
    #[arg(long)]
    prime_from_zero: bool,
}

impl Args {
    fn overrides(&self) -> Overrides {
        Overrides {
            formula: self.formula.map(Formula::from),
            rate_hz: self.rate_hz,
            prime_from_zero: self.prime_from_zero,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let args = Args::parse();
    let settings = settings::load_config(args.config.as_deref(), &args.overrides())
        .context("failed to load configuration")?;

    let drive = settings.robot.drive().context("invalid robot geometry")?;
    info!(%drive, "Odometry configured");

    let samples = tick_log::read_tick_log(&args.tick_log)?;
    info!(samples = samples.len(), path = %args.tick_log.display(), "Tick log loaded");
    if samples.is_empty() {
        warn!("Tick log has no samples; nothing to replay");
    }

    let pacer = if settings.replay.rate_hz > 0.0 {
        let period = Duration::try_from_secs_f64(1.0 / settings.replay.rate_hz)
            .with_context(|| format!("unusable replay rate {} Hz", settings.replay.rate_hz))?;
        Some((SpinSleeper::new(10_000), period))
    } else {
        None
    };

    let mut odometer = Odometer::new(drive, settings.replay.initial_pose, settings.replay.prime_from_zero);
    for sample in &samples {
        match odometer.step(sample.left, sample.right) {
            Some(pose) => info!(
                step = odometer.steps(),
                left = sample.left,
                right = sample.right,
                x = pose.x,
                y = pose.y,
                theta = pose.theta,
                "Pose updated"
            ),
            None => info!(left = sample.left, right = sample.right, "Baseline tick counts set"),
        }
        if let Some((sleeper, period)) = &pacer {
            sleeper.sleep(*period);
        }
    }

    let pose = odometer.pose();
    info!(
        steps = odometer.steps(),
        normalized_theta = pose.normalized().theta,
        "Replay complete. Final pose: {}",
        pose
    );
    Ok(())
}
