use super::scaling::ScaleTransform;
use crate::error::{EvoForecastError, Result};
use std::sync::Arc;

/// Scaled lookback windows for sequence-model families
///
/// Training windows come from the training series only. Test window `t`
/// ends just before held-out step `t` and is built from the tail of the
/// training series followed by held-out truth, so there is exactly one test
/// window per held-out step.
pub struct WindowedDataset {
    lookback: usize,
    train_x: Vec<Vec<f64>>,
    train_y: Vec<f64>,
    test_x: Vec<Vec<f64>>,
    held_out: Vec<f64>,
    train_len: usize,
    scaler: Arc<dyn ScaleTransform>,
}

impl WindowedDataset {
    pub fn build(
        train: &[f64],
        held_out: &[f64],
        lookback: usize,
        scaler: Arc<dyn ScaleTransform>,
    ) -> Result<Self> {
        if lookback == 0 {
            return Err(EvoForecastError::Configuration(
                "Lookback window must be at least 1".to_string(),
            ));
        }
        if train.len() <= lookback {
            return Err(EvoForecastError::Validation(format!(
                "Training series of {} points is too short for lookback {}",
                train.len(),
                lookback
            )));
        }

        let scaled_train = scaler.transform(train);
        let (train_x, train_y) = Self::windows(&scaled_train, lookback);

        let mut joined = scaled_train[train.len() - lookback..].to_vec();
        joined.extend(scaler.transform(held_out));
        let test_x = (0..held_out.len())
            .map(|t| joined[t..t + lookback].to_vec())
            .collect();

        Ok(Self {
            lookback,
            train_x,
            train_y,
            test_x,
            held_out: held_out.to_vec(),
            train_len: train.len(),
            scaler,
        })
    }

    fn windows(series: &[f64], lookback: usize) -> (Vec<Vec<f64>>, Vec<f64>) {
        (lookback..series.len())
            .map(|end| (series[end - lookback..end].to_vec(), series[end]))
            .unzip()
    }

    pub fn lookback(&self) -> usize {
        self.lookback
    }

    pub fn train_x(&self) -> &[Vec<f64>] {
        &self.train_x
    }

    pub fn train_y(&self) -> &[f64] {
        &self.train_y
    }

    pub fn test_x(&self) -> &[Vec<f64>] {
        &self.test_x
    }

    /// Held-out truth in original units
    pub fn held_out(&self) -> &[f64] {
        &self.held_out
    }

    pub fn horizon(&self) -> usize {
        self.held_out.len()
    }

    pub fn train_len(&self) -> usize {
        self.train_len
    }

    pub fn scaler(&self) -> &dyn ScaleTransform {
        self.scaler.as_ref()
    }
}
