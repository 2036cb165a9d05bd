use super::forecaster::{EvaluationFailure, Forecaster, WindowedForecaster};
use crate::data::WindowedDataset;
use crate::error::{EvoForecastError, Result};
use crate::types::{ForecastResult, ModelParams};

/// Rolling-origin evaluation with a bounded refit cadence
///
/// The forecaster is refit every `refit_every` steps on a history that grows
/// with the *true* held-out observations, never with its own forecasts.
#[derive(Debug, Clone, Copy)]
pub struct WalkForwardProtocol {
    refit_every: usize,
}

impl WalkForwardProtocol {
    pub fn new(refit_every: usize) -> Result<Self> {
        if refit_every == 0 {
            return Err(EvoForecastError::Configuration(
                "Refit cadence must be at least 1".to_string(),
            ));
        }
        Ok(Self { refit_every })
    }

    pub fn refit_every(&self) -> usize {
        self.refit_every
    }

    /// Number of fits a held-out window of length `horizon` costs
    pub fn fits_required(&self, horizon: usize) -> usize {
        horizon.div_ceil(self.refit_every)
    }

    pub fn run(
        &self,
        forecaster: &dyn Forecaster,
        params: &ModelParams,
        train: &[f64],
        held_out: &[f64],
    ) -> std::result::Result<ForecastResult, EvaluationFailure> {
        let mut history = Vec::with_capacity(train.len() + held_out.len());
        history.extend_from_slice(train);

        let mut predictions = Vec::with_capacity(held_out.len());
        let mut model = None;
        let mut steps_since_fit = 0;

        for (t, &actual) in held_out.iter().enumerate() {
            if t % self.refit_every == 0 {
                model = Some(forecaster.fit(params, &history)?);
                steps_since_fit = 0;
            }

            let fitted = model.as_ref().ok_or_else(|| {
                EvaluationFailure::Forecaster("no fitted model available".to_string())
            })?;

            // The fitted model has not seen the observations appended since
            // its fit, so forecast through to the current step
            let horizon = steps_since_fit + 1;
            let path = fitted.forecast(horizon)?;
            if path.len() != horizon {
                return Err(EvaluationFailure::ShapeMismatch {
                    expected: horizon,
                    actual: path.len(),
                });
            }

            let prediction = path[horizon - 1];
            if !prediction.is_finite() {
                return Err(EvaluationFailure::NonFinite(format!(
                    "forecast at step {} is {}",
                    t, prediction
                )));
            }

            predictions.push(prediction);
            history.push(actual);
            steps_since_fit += 1;
        }

        Ok(ForecastResult {
            predictions,
            actuals: held_out.to_vec(),
            history_len: history.len(),
        })
    }

    /// Batched path for windowed families: one fit, one prediction call,
    /// predictions mapped back to original units
    pub fn run_windowed(
        &self,
        forecaster: &dyn WindowedForecaster,
        params: &ModelParams,
        dataset: &WindowedDataset,
    ) -> std::result::Result<ForecastResult, EvaluationFailure> {
        let scaled = forecaster.fit_predict(params, dataset)?;
        if scaled.len() != dataset.horizon() {
            return Err(EvaluationFailure::ShapeMismatch {
                expected: dataset.horizon(),
                actual: scaled.len(),
            });
        }

        let predictions = dataset.scaler().inverse_transform(&scaled);

        Ok(ForecastResult {
            predictions,
            actuals: dataset.held_out().to_vec(),
            history_len: dataset.train_len() + dataset.horizon(),
        })
    }
}
