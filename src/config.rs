use crate::error::{GbError, GbResult};
use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use strum_macros::{Display, EnumString};

/// Shape of the damping term in the walk update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, EnumString, Display, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TeleportMode {
    /// `pi' = d + (1 - d) * pi·P`
    #[default]
    Scalar,
    /// `pi' = d / N + (1 - d) * pi·P`
    Uniform,
}

/// How a ball's radius is derived from its members' distances to the center.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, EnumString, Display, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum RadiusMode {
    #[default]
    Mean,
    Max,
}

#[derive(Args, Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DetectorConfig {
    #[command(flatten)]
    pub walk: WalkParams,
    #[command(flatten)]
    pub granulation: GranulationParams,
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WalkParams {
    #[arg(long, default_value_t = 0.35)]
    pub damping: f64,
    #[arg(long, default_value_t = 0.0001)]
    pub tolerance: f64,
    #[arg(long, default_value_t = 1000)]
    pub max_iterations: usize,
    #[arg(long, default_value_t = TeleportMode::Scalar)]
    pub teleport: TeleportMode,

    // Turns an exhausted iteration cap into a hard error
    #[arg(long, default_value_t = false)]
    pub strict_convergence: bool,
}

impl Default for WalkParams {
    fn default() -> Self {
        Self {
            damping: 0.35,
            tolerance: 0.0001,
            max_iterations: 1000,
            teleport: TeleportMode::Scalar,
            strict_convergence: false,
        }
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GranulationParams {
    /// Balls with fewer than twice this many samples are not split further
    #[arg(long, default_value_t = 8)]
    pub min_ball_size: usize,
    #[arg(long, default_value_t = RadiusMode::Mean)]
    pub radius: RadiusMode,
    #[arg(long, default_value_t = 42)]
    pub seed: u64,
    #[arg(long, default_value_t = 50)]
    pub kmeans_iterations: usize,
}

impl Default for GranulationParams {
    fn default() -> Self {
        Self {
            min_ball_size: 8,
            radius: RadiusMode::Mean,
            seed: 42,
            kmeans_iterations: 50,
        }
    }
}

impl WalkParams {
    pub fn validate(&self) -> GbResult<()> {
        if !(0.0..=1.0).contains(&self.damping) {
            return Err(GbError::Config(format!(
                "damping must lie in [0, 1], got {}",
                self.damping
            )));
        }
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(GbError::Config(format!(
                "tolerance must be positive, got {}",
                self.tolerance
            )));
        }
        if self.max_iterations == 0 {
            return Err(GbError::Config(
                "max_iterations must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl GranulationParams {
    pub fn validate(&self) -> GbResult<()> {
        if self.min_ball_size == 0 {
            return Err(GbError::Config(
                "min_ball_size must be at least 1".to_string(),
            ));
        }
        if self.kmeans_iterations == 0 {
            return Err(GbError::Config(
                "kmeans_iterations must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl DetectorConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> GbResult<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn validate(&self) -> GbResult<()> {
        self.walk.validate()?;
        self.granulation.validate()
    }

    /// Copies every flag the user typed explicitly over the file-loaded values.
    pub fn merge_from_cli(&mut self, cli: &DetectorConfig, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($group:ident . $field:ident) => {
                if matches.value_source(stringify!($field)) == Some(ValueSource::CommandLine) {
                    self.$group.$field = cli.$group.$field.clone();
                }
            };
        }

        update_if_present!(walk.damping);
        update_if_present!(walk.tolerance);
        update_if_present!(walk.max_iterations);
        update_if_present!(walk.teleport);
        update_if_present!(walk.strict_convergence);

        update_if_present!(granulation.min_ball_size);
        update_if_present!(granulation.radius);
        update_if_present!(granulation.seed);
        update_if_present!(granulation.kmeans_iterations);
    }
}
