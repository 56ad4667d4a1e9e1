//! Tracer settings read from a TOML file.
//!
//! Every key is optional:
//!
//! ```toml
//! max_bounces = 30
//! min_intensity = 0.01
//! far_distance = 500.0
//! emitter_offset = 0.001
//! parallel_eps = 1e-6
//! forward_eps = 1e-4
//! ```

use std::{fs, path::Path};

use optrace::{Float, Tolerances, TraceConfig};
use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("`{0}` must be positive")]
    NotPositive(&'static str),
}

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub max_bounces: usize,
    pub min_intensity: Float,
    pub far_distance: Float,
    pub emitter_offset: Float,
    pub parallel_eps: Float,
    pub forward_eps: Float,
}

impl Default for Config {
    fn default() -> Self {
        TraceConfig::default().into()
    }
}

impl From<TraceConfig> for Config {
    fn from(config: TraceConfig) -> Self {
        Self {
            max_bounces: config.max_bounces,
            min_intensity: config.min_intensity,
            far_distance: config.far_distance,
            emitter_offset: config.emitter_offset,
            parallel_eps: config.tolerances.parallel,
            forward_eps: config.tolerances.forward,
        }
    }
}

impl From<Config> for TraceConfig {
    fn from(config: Config) -> Self {
        Self {
            max_bounces: config.max_bounces,
            min_intensity: config.min_intensity,
            far_distance: config.far_distance,
            emitter_offset: config.emitter_offset,
            tolerances: Tolerances {
                parallel: config.parallel_eps,
                forward: config.forward_eps,
            },
        }
    }
}

impl Config {
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml(&fs::read_to_string(path)?)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("far_distance", self.far_distance),
            ("emitter_offset", self.emitter_offset),
            ("parallel_eps", self.parallel_eps),
            ("forward_eps", self.forward_eps),
        ];

        match positive.into_iter().find(|&(_, v)| !(v > 0.0)) {
            Some((key, _)) => Err(ConfigError::NotPositive(key)),
            None => Ok(()),
        }
    }
}
