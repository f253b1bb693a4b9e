use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::app::{LoopConfig, Vec3};
use crate::assets::PopulationRequest;

pub const CONFIG_ENV_VAR: &str = "ARBOR_CONFIG";

const DEFAULT_POPULATION_COUNT: u32 = 9;
const DEFAULT_POPULATION_SPACING: f32 = 2.0;
const DEFAULT_POPULATION_SCALE: f32 = 0.3;
const DEFAULT_RNG_SEED: u64 = 7;
const DEFAULT_TARGET_FPS: u32 = 60;
const DEFAULT_SESSION_SECONDS: f32 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ConfigVec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl ConfigVec3 {
    pub fn to_vec3(self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PopulationConfig {
    pub count: u32,
    pub spacing: f32,
    pub scale: f32,
    pub base: ConfigVec3,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            count: DEFAULT_POPULATION_COUNT,
            spacing: DEFAULT_POPULATION_SPACING,
            scale: DEFAULT_POPULATION_SCALE,
            base: ConfigVec3 {
                x: 0.0,
                y: -2.0,
                z: 0.0,
            },
        }
    }
}

impl PopulationConfig {
    pub fn to_request(&self) -> PopulationRequest {
        PopulationRequest {
            count: self.count as usize,
            base_position: self.base.to_vec3(),
            spacing: self.spacing,
            scale: self.scale,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub population: PopulationConfig,
    pub rng_seed: u64,
    pub target_fps: u32,
    pub session_seconds: f32,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            population: PopulationConfig::default(),
            rng_seed: DEFAULT_RNG_SEED,
            target_fps: DEFAULT_TARGET_FPS,
            session_seconds: DEFAULT_SESSION_SECONDS,
        }
    }
}

impl DemoConfig {
    pub fn loop_config(&self) -> LoopConfig {
        LoopConfig {
            frame_interval: Duration::from_secs_f64(1.0 / self.target_fps.max(1) as f64),
            session_duration: Duration::from_secs_f32(self.session_seconds.max(0.0)),
            ..LoopConfig::default()
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config json at {location}: {message}")]
    Parse { location: String, message: String },
    #[error("config validation failed at {path}: expected {expected}, got {actual}")]
    Validation {
        path: String,
        expected: String,
        actual: String,
    },
}

/// Loads the demo configuration; `None` yields the built-in defaults.
pub fn load_demo_config(path: Option<&Path>) -> Result<DemoConfig, ConfigError> {
    let config = match path {
        Some(path) => {
            let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;
            parse_demo_config_json(&raw)?
        }
        None => DemoConfig::default(),
    };
    validate_demo_config(&config)?;
    Ok(config)
}

/// Loads configuration from the file named by `ARBOR_CONFIG`, or the defaults
/// when the variable is unset.
pub fn load_demo_config_from_env() -> Result<DemoConfig, ConfigError> {
    match env::var(CONFIG_ENV_VAR) {
        Ok(value) => load_demo_config(Some(Path::new(&value))),
        Err(_) => load_demo_config(None),
    }
}

fn parse_demo_config_json(raw: &str) -> Result<DemoConfig, ConfigError> {
    let mut deserializer = serde_json::Deserializer::from_str(raw);
    match serde_path_to_error::deserialize::<_, DemoConfig>(&mut deserializer) {
        Ok(config) => Ok(config),
        Err(error) => {
            let location = error.path().to_string();
            let source = error.into_inner();
            let location = if location.is_empty() || location == "." {
                "<root>".to_string()
            } else {
                location
            };
            Err(ConfigError::Parse {
                location,
                message: source.to_string(),
            })
        }
    }
}

fn validation_expected_actual(
    path: &str,
    expected: impl std::fmt::Display,
    actual: impl std::fmt::Display,
) -> ConfigError {
    ConfigError::Validation {
        path: path.to_string(),
        expected: expected.to_string(),
        actual: actual.to_string(),
    }
}

fn validate_demo_config(config: &DemoConfig) -> Result<(), ConfigError> {
    let population = &config.population;
    if !population.spacing.is_finite() || population.spacing <= 0.0 {
        return Err(validation_expected_actual(
            "population.spacing",
            "finite number > 0",
            population.spacing,
        ));
    }
    if !population.scale.is_finite() || population.scale <= 0.0 {
        return Err(validation_expected_actual(
            "population.scale",
            "finite number > 0",
            population.scale,
        ));
    }
    if !population.base.to_vec3().is_finite() {
        return Err(validation_expected_actual(
            "population.base",
            "finite vector",
            format!(
                "({}, {}, {})",
                population.base.x, population.base.y, population.base.z
            ),
        ));
    }
    if config.target_fps == 0 {
        return Err(validation_expected_actual("target_fps", ">= 1", 0));
    }
    if !config.session_seconds.is_finite() || config.session_seconds < 0.0 {
        return Err(validation_expected_actual(
            "session_seconds",
            "finite number >= 0",
            config.session_seconds,
        ));
    }
    Ok(())
}
