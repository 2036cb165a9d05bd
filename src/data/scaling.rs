use crate::error::{EvoForecastError, Result};

/// Invertible feature transform fitted on training data
pub trait ScaleTransform: Send + Sync {
    fn transform(&self, values: &[f64]) -> Vec<f64>;
    fn inverse_transform(&self, values: &[f64]) -> Vec<f64>;
}

/// Maps the fitted range onto [0, 1]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinMaxScaler {
    min: f64,
    range: f64,
}

impl MinMaxScaler {
    pub fn fit(values: &[f64]) -> Result<Self> {
        if values.is_empty() {
            return Err(EvoForecastError::Validation(
                "Cannot fit a scaler on an empty series".to_string(),
            ));
        }
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if !min.is_finite() || !max.is_finite() {
            return Err(EvoForecastError::Validation(
                "Cannot fit a scaler on non-finite values".to_string(),
            ));
        }

        Ok(Self {
            min,
            range: max - min,
        })
    }
}

impl ScaleTransform for MinMaxScaler {
    fn transform(&self, values: &[f64]) -> Vec<f64> {
        if self.range == 0.0 {
            return vec![0.0; values.len()];
        }
        values.iter().map(|v| (v - self.min) / self.range).collect()
    }

    fn inverse_transform(&self, values: &[f64]) -> Vec<f64> {
        values.iter().map(|v| v * self.range + self.min).collect()
    }
}
