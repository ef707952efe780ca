use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

use crate::depth_time::{Interpolation, TimeConversion, DEFAULT_DZ};
use crate::wavelet::{check_sampling, NYQUIST_FRACTION};

/// Complete modelling configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    pub dt: f64, // Time sampling interval (s)
    #[serde(default = "default_dz")]
    pub dz: f64, // Depth sampling interval (m)
    pub frequency: f64, // Ricker peak frequency (Hz)
    #[serde(default)]
    pub interpolation: Interpolation,
}

fn default_dz() -> f64 {
    DEFAULT_DZ
}

impl ModelConfig {
    pub fn new(dt: f64, frequency: f64) -> Self {
        Self {
            dt,
            dz: DEFAULT_DZ,
            frequency,
            interpolation: Interpolation::default(),
        }
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: ModelConfig =
            toml::from_str(content).map_err(|e| anyhow!("Failed to parse TOML config: {}", e))?;

        // Validate before returning
        config.validate()?;

        Ok(config)
    }

    /// Serialize back to TOML
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).map_err(|e| anyhow!("Failed to serialize config: {}", e))
    }

    /// Validate all configuration parameters
    pub fn validate(&self) -> Result<()> {
        if !(self.dt.is_finite() && self.dt > 0.0) {
            return Err(anyhow!("dt must be positive, got {}", self.dt));
        }
        if !(self.dz.is_finite() && self.dz > 0.0) {
            return Err(anyhow!("dz must be positive, got {}", self.dz));
        }
        if !(self.frequency.is_finite() && self.frequency > 0.0) {
            return Err(anyhow!("frequency must be positive, got {}", self.frequency));
        }
        check_sampling(self.frequency, self.dt).map_err(|e| {
            anyhow!(
                "frequency {} Hz too high for dt = {} s (must stay below {} of Nyquist): {}",
                self.frequency,
                self.dt,
                NYQUIST_FRACTION,
                e
            )
        })?;
        Ok(())
    }

    pub fn time_conversion(&self) -> TimeConversion {
        TimeConversion::new(self.dt, self.dz).with_interpolation(self.interpolation)
    }
}
