//! Demo run configuration: defaults overridable through `PERCEPTRON_*`
//! environment variables.

use std::env;
use std::fmt::{self, Display};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Settings for one generate/load/train/render run of the demo.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DemoConfig {
    /// Number of samples to generate (half per cluster)
    pub num_samples: usize,
    pub learning_rate: f64,
    /// Epochs to run; training never stops early
    pub max_epochs: usize,
    /// Seed for the process RNG; `None` seeds from OS entropy
    pub seed: Option<u64>,
    pub dataset_path: PathBuf,
    /// Draw the boundary after every epoch
    pub render: bool,
    /// Pause between rendered frames
    pub frame_delay: Duration,
    pub canvas_width: u32,
    pub canvas_height: u32,
}

impl Default for DemoConfig {
    fn default() -> Self {
        DemoConfig {
            num_samples: 100,
            learning_rate: 0.05,
            max_epochs: 5000,
            seed: None,
            dataset_path: PathBuf::from("perceptron_dataset.csv"),
            render: false,
            frame_delay: Duration::from_millis(100),
            canvas_width: 60,
            canvas_height: 24,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Invalid { key: &'static str, value: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Invalid { key, value } => write!(f, "invalid value {value:?} for {key}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl DemoConfig {
    pub const NUM_SAMPLES: &'static str = "PERCEPTRON_SAMPLES";
    pub const LEARNING_RATE: &'static str = "PERCEPTRON_LEARNING_RATE";
    pub const MAX_EPOCHS: &'static str = "PERCEPTRON_EPOCHS";
    pub const SEED: &'static str = "PERCEPTRON_SEED";
    pub const DATASET_PATH: &'static str = "PERCEPTRON_DATASET";
    pub const RENDER: &'static str = "PERCEPTRON_RENDER";
    pub const FRAME_DELAY_MS: &'static str = "PERCEPTRON_FRAME_DELAY_MS";
    pub const CANVAS_WIDTH: &'static str = "PERCEPTRON_CANVAS_WIDTH";
    pub const CANVAS_HEIGHT: &'static str = "PERCEPTRON_CANVAS_HEIGHT";

    /// Reads overrides from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from `lookup`, falling back to [`Default`] for every
    /// key it returns `None` for.
    pub fn from_lookup<L>(lookup: L) -> Result<Self, ConfigError>
    where
        L: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let learning_rate = parse_or(&lookup, Self::LEARNING_RATE, defaults.learning_rate)?;
        if !learning_rate.is_finite() || learning_rate < 0.0 {
            return Err(invalid(Self::LEARNING_RATE, learning_rate.to_string()));
        }
        let canvas_width = parse_or(&lookup, Self::CANVAS_WIDTH, defaults.canvas_width)?;
        let canvas_height = parse_or(&lookup, Self::CANVAS_HEIGHT, defaults.canvas_height)?;
        if canvas_width == 0 {
            return Err(invalid(Self::CANVAS_WIDTH, "0".into()));
        }
        if canvas_height == 0 {
            return Err(invalid(Self::CANVAS_HEIGHT, "0".into()));
        }

        Ok(DemoConfig {
            num_samples: parse_or(&lookup, Self::NUM_SAMPLES, defaults.num_samples)?,
            learning_rate,
            max_epochs: parse_or(&lookup, Self::MAX_EPOCHS, defaults.max_epochs)?,
            seed: lookup(Self::SEED)
                .map(|v| v.trim().parse().map_err(|_| invalid(Self::SEED, v)))
                .transpose()?,
            dataset_path: lookup(Self::DATASET_PATH)
                .map(PathBuf::from)
                .unwrap_or(defaults.dataset_path),
            render: lookup(Self::RENDER)
                .map(|v| parse_flag(Self::RENDER, v))
                .transpose()?
                .unwrap_or(defaults.render),
            frame_delay: lookup(Self::FRAME_DELAY_MS)
                .map(|v| {
                    v.trim()
                        .parse()
                        .map(Duration::from_millis)
                        .map_err(|_| invalid(Self::FRAME_DELAY_MS, v))
                })
                .transpose()?
                .unwrap_or(defaults.frame_delay),
            canvas_width,
            canvas_height,
        })
    }
}

fn invalid(key: &'static str, value: String) -> ConfigError {
    ConfigError::Invalid { key, value }
}

fn parse_or<L, T>(lookup: &L, key: &'static str, default: T) -> Result<T, ConfigError>
where
    L: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(v) => v.trim().parse().map_err(|_| invalid(key, v)),
        None => Ok(default),
    }
}

fn parse_flag(key: &'static str, value: String) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(invalid(key, value)),
    }
}
