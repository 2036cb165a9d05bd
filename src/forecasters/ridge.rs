use super::linalg::{fit_linear, LinearModel};
use crate::engines::evaluation::{EvaluationFailure, FittedModel, Forecaster};
use crate::types::ModelParams;
use ndarray::{Array2, ArrayView1};

/// Ridge regression on the previous `lags` observations
#[derive(Debug, Clone)]
pub struct RidgeLagForecaster {
    pub lags: usize,
}

impl Default for RidgeLagForecaster {
    fn default() -> Self {
        Self { lags: 6 }
    }
}

impl Forecaster for RidgeLagForecaster {
    fn fit(
        &self,
        params: &ModelParams,
        history: &[f64],
    ) -> Result<Box<dyn FittedModel>, EvaluationFailure> {
        let alpha = match params {
            ModelParams::Ridge(p) => p.alpha,
            other => {
                return Err(EvaluationFailure::InvalidParameters(format!(
                    "ridge forecaster cannot fit {} parameters",
                    other.family()
                )))
            }
        };
        if !alpha.is_finite() || alpha < 0.0 {
            return Err(EvaluationFailure::InvalidParameters(format!(
                "alpha must be a finite non-negative number, got {}",
                alpha
            )));
        }
        if self.lags == 0 || history.len() < self.lags + 2 {
            return Err(EvaluationFailure::InvalidParameters(format!(
                "{} observations are too few for {} lags",
                history.len(),
                self.lags
            )));
        }

        // Row r holds history[r..r + lags] and predicts history[r + lags]
        let design = Array2::from_shape_fn((history.len() - self.lags, self.lags), |(r, j)| {
            history[r + j]
        });
        let targets = ArrayView1::from(&history[self.lags..]);

        let model = fit_linear(design.view(), targets, alpha)?;

        Ok(Box::new(FittedRidge {
            model,
            window: history[history.len() - self.lags..].to_vec(),
        }))
    }
}

#[derive(Debug, Clone)]
struct FittedRidge {
    model: LinearModel,
    window: Vec<f64>, // Oldest first, same layout as the training rows
}

impl FittedModel for FittedRidge {
    /// Multi-step forecasts feed predictions back as lags
    fn forecast(&self, horizon: usize) -> Result<Vec<f64>, EvaluationFailure> {
        let mut window = self.window.clone();
        let mut path = Vec::with_capacity(horizon);

        for _ in 0..horizon {
            let value = self.model.predict(&window);
            if !value.is_finite() {
                return Err(EvaluationFailure::NonFinite("ridge forecast".to_string()));
            }
            window.remove(0);
            window.push(value);
            path.push(value);
        }

        Ok(path)
    }
}
