use crate::error::{EvoForecastError, Result};
use serde::{Deserialize, Serialize};

/// Chronological train / held-out split of one series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesSplit {
    pub train: Vec<f64>,
    pub held_out: Vec<f64>,
}

impl SeriesSplit {
    pub fn horizon(&self) -> usize {
        self.held_out.len()
    }
}

pub struct SimpleSplitter {
    train_pct: f64,
}

impl SimpleSplitter {
    pub fn new(train_pct: f64) -> Self {
        Self { train_pct }
    }

    pub fn split(&self, series: &[f64]) -> Result<SeriesSplit> {
        if !(self.train_pct > 0.0 && self.train_pct < 1.0) {
            return Err(EvoForecastError::Validation(format!(
                "Train fraction must be between 0 and 1, got {}",
                self.train_pct
            )));
        }

        let total_rows = series.len();
        let train_rows = (total_rows as f64 * self.train_pct) as usize;

        if train_rows == 0 || train_rows >= total_rows {
            return Err(EvoForecastError::Validation(format!(
                "Invalid split: {} training rows out of {}",
                train_rows, total_rows
            )));
        }

        Ok(SeriesSplit {
            train: series[..train_rows].to_vec(),
            held_out: series[train_rows..].to_vec(),
        })
    }
}
