use std::path::Path;

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File, FileFormat};
use deadreckon_kinematics::{DifferentialDrive, Formula, KinematicsError, Pose};
use serde::Deserialize;
use tracing::{error, info};

pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";
const ENV_PREFIX: &str = "DEADRECKON";

/// Robot geometry and encoder setup.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RobotSettings {
    pub wheel_radius: f64,
    pub baseline: f64,
    pub resolution: i64,
    pub formula: Formula,
}

impl Default for RobotSettings {
    fn default() -> Self {
        RobotSettings {
            wheel_radius: 0.0318,
            baseline: 0.1,
            resolution: 135,
            formula: Formula::Legacy,
        }
    }
}

impl RobotSettings {
    pub fn drive(&self) -> Result<DifferentialDrive, KinematicsError> {
        DifferentialDrive::new(self.wheel_radius, self.baseline, self.resolution, self.formula)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct ReplaySettings {
    /// Samples per second, 0 for unpaced.
    pub rate_hz: f64,
    pub prime_from_zero: bool,
    pub initial_pose: Pose,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub robot: RobotSettings,
    pub replay: ReplaySettings,
}

/// Command-line values that take precedence over the file and environment.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub formula: Option<Formula>,
    pub rate_hz: Option<f64>,
    pub prime_from_zero: bool,
}

/// Loads settings from `path` (or [`DEFAULT_CONFIG_PATH`]), then `DEADRECKON_*`
/// environment variables, then `overrides`.
///
/// An explicitly given file must exist; the default one is optional.
pub fn load_config(path: Option<&Path>, overrides: &Overrides) -> Result<Settings, ConfigError> {
    let (file, required) = match path {
        Some(p) => (p.to_string_lossy().into_owned(), true),
        None => (DEFAULT_CONFIG_PATH.to_owned(), false),
    };
    info!("Attempting to load configuration from {}", file);

    let builder = Config::builder()
        .add_source(File::new(&file, FileFormat::Toml).required(required))
        .add_source(environment());

    match build(builder, overrides) {
        Ok(settings) => {
            info!("Successfully loaded configuration: {:?}", settings);
            Ok(settings)
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            Err(e)
        }
    }
}

/// `DEADRECKON_ROBOT__BASELINE=0.12` sets `robot.baseline`.
fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

fn build(builder: ConfigBuilder<DefaultState>, overrides: &Overrides) -> Result<Settings, ConfigError> {
    let mut builder = builder
        .set_override_option("robot.formula", overrides.formula.map(|f| f.to_string()))?
        .set_override_option("replay.rate_hz", overrides.rate_hz)?;
    if overrides.prime_from_zero {
        builder = builder.set_override("replay.prime_from_zero", true)?;
    }
    builder.build()?.try_deserialize()
}
