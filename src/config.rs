//! Threshold Configuration Module
//! Design limits supplied at startup, immutable for the rest of the run.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Missing threshold `{0}`: supply it in the config file or as a CLI flag")]
    Missing(&'static str),
    #[error("Threshold `{name}` must be a positive finite number, got {value}")]
    NotPositive { name: &'static str, value: f64 },
}

/// The three design limits every curve is compared against.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    /// Rated fan power (kW)
    pub rated_power: f64,
    /// Design air cooler duty (kcal/hr)
    pub design_duty: f64,
    /// Design UA (kcal/hr.m².°C)
    pub design_ua: f64,
}

impl Thresholds {
    /// Reject non-finite or non-positive limits before any chart work starts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("rated_power", self.rated_power),
            ("design_duty", self.design_duty),
            ("design_ua", self.design_ua),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::NotPositive { name, value });
            }
        }
        Ok(())
    }
}

/// Threshold values taken from the command line; each one overrides the
/// config-file value when present.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThresholdOverrides {
    pub rated_power: Option<f64>,
    pub design_duty: Option<f64>,
    pub design_ua: Option<f64>,
}

/// Partial config as it appears on disk; all fields optional so a file can
/// carry any subset and the CLI fills in the rest.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
struct ThresholdsFile {
    rated_power: Option<f64>,
    design_duty: Option<f64>,
    design_ua: Option<f64>,
}

/// Merge config file and CLI overrides into a validated threshold set.
pub fn resolve(
    config_path: Option<&Path>,
    overrides: ThresholdOverrides,
) -> Result<Thresholds, ConfigError> {
    let file = match config_path {
        Some(path) => serde_json::from_str::<ThresholdsFile>(&fs::read_to_string(path)?)?,
        None => ThresholdsFile::default(),
    };

    let pick = |cli: Option<f64>, file: Option<f64>, name: &'static str| {
        cli.or(file).ok_or(ConfigError::Missing(name))
    };

    let thresholds = Thresholds {
        rated_power: pick(overrides.rated_power, file.rated_power, "rated_power")?,
        design_duty: pick(overrides.design_duty, file.design_duty, "design_duty")?,
        design_ua: pick(overrides.design_ua, file.design_ua, "design_ua")?,
    };
    thresholds.validate()?;
    Ok(thresholds)
}
