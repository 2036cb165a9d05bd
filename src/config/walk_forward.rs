use super::traits::ConfigSection;
use crate::error::EvoForecastError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalkForwardConfig {
    pub train_pct: f64,
    pub refit_every: usize,
    pub lookback: usize, // Window length for sequence models
    pub timeout_secs: Option<f64>,
}

impl Default for WalkForwardConfig {
    fn default() -> Self {
        Self {
            train_pct: 0.8,
            refit_every: 5,
            lookback: 12,
            timeout_secs: None,
        }
    }
}

impl WalkForwardConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs_f64)
    }
}

impl ConfigSection for WalkForwardConfig {
    fn section_name() -> &'static str {
        "walk_forward"
    }

    fn validate(&self) -> Result<(), EvoForecastError> {
        if self.train_pct <= 0.0 || self.train_pct >= 1.0 {
            return Err(EvoForecastError::Configuration(
                "Train fraction must be between 0 and 1".to_string()
            ));
        }
        if self.refit_every == 0 {
            return Err(EvoForecastError::Configuration(
                "Refit cadence must be at least 1".to_string()
            ));
        }
        if self.lookback == 0 {
            return Err(EvoForecastError::Configuration(
                "Lookback window must be at least 1".to_string()
            ));
        }
        if let Some(secs) = self.timeout_secs {
            if !secs.is_finite() || secs <= 0.0 {
                return Err(EvoForecastError::Configuration(format!(
                    "Timeout must be a positive number of seconds, got {}",
                    secs
                )));
            }
        }
        Ok(())
    }
}
