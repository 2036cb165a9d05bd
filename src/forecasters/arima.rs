use super::linalg::{fit_linear, LinearModel};
use crate::engines::evaluation::{EvaluationFailure, FittedModel, Forecaster};
use crate::types::{ArimaOrder, ModelParams};
use ndarray::{Array2, ArrayView1};

/// ARIMA(p, d, q) estimated by two-stage least squares (Hannan-Rissanen)
///
/// Stage one fits a long AR model to the differenced series to estimate the
/// innovations; stage two regresses on `p` lags and `q` lagged innovations.
#[derive(Debug, Clone, Default)]
pub struct ArimaForecaster;

impl Forecaster for ArimaForecaster {
    fn fit(
        &self,
        params: &ModelParams,
        history: &[f64],
    ) -> Result<Box<dyn FittedModel>, EvaluationFailure> {
        let order = match params {
            ModelParams::Autoregressive(order) => *order,
            other => {
                return Err(EvaluationFailure::InvalidParameters(format!(
                    "ARIMA forecaster cannot fit {} parameters",
                    other.family()
                )))
            }
        };
        Ok(Box::new(FittedArima::fit(order, history)?))
    }
}

#[derive(Debug, Clone)]
struct FittedArima {
    model: LinearModel,
    p: usize,
    q: usize,
    recent: Vec<f64>,    // Last p differenced values, oldest first
    residuals: Vec<f64>, // Last q innovations, oldest first
    levels: Vec<f64>,    // Last value of each differencing level 0..d
}

impl FittedArima {
    fn fit(order: ArimaOrder, history: &[f64]) -> Result<Self, EvaluationFailure> {
        if order.p < 0 || order.d < 0 || order.q < 0 {
            return Err(EvaluationFailure::InvalidParameters(format!(
                "ARIMA orders must be non-negative, got ({}, {}, {})",
                order.p, order.d, order.q
            )));
        }
        let (p, d, q) = (order.p as usize, order.d as usize, order.q as usize);

        if history.len() <= d {
            return Err(EvaluationFailure::InvalidParameters(format!(
                "{} observations cannot be differenced {} times",
                history.len(),
                d
            )));
        }

        let mut series = history.to_vec();
        let mut levels = Vec::with_capacity(d);
        for _ in 0..d {
            levels.push(*series.last().unwrap_or(&0.0));
            series = series.windows(2).map(|w| w[1] - w[0]).collect();
        }

        let residuals_full = if q > 0 {
            Self::innovations(&series, (p + q).max(1) + 2)?
        } else {
            vec![0.0; series.len()]
        };

        // Rows start once every lag and innovation lag is defined
        let start = if q > 0 {
            ((p + q).max(1) + 2 + q).max(p)
        } else {
            p
        };
        let n_coef = p + q;
        if series.len() < start + n_coef + 2 {
            return Err(EvaluationFailure::InvalidParameters(format!(
                "{} differenced observations are too few for ARIMA({}, {}, {})",
                series.len(),
                p,
                d,
                q
            )));
        }

        // Columns: p lags of the series, then q lagged innovations
        let design = Array2::from_shape_fn((series.len() - start, n_coef), |(row, col)| {
            let t = start + row;
            if col < p {
                series[t - 1 - col]
            } else {
                residuals_full[t - 1 - (col - p)]
            }
        });
        let targets = ArrayView1::from(&series[start..]);

        let model = fit_linear(design.view(), targets, 0.0)?;

        let recent = series[series.len() - p..].to_vec();
        let residuals = residuals_full[residuals_full.len() - q..].to_vec();

        Ok(Self {
            model,
            p,
            q,
            recent,
            residuals,
            levels,
        })
    }

    /// Residuals of a long AR fit; zero where undefined
    fn innovations(series: &[f64], order: usize) -> Result<Vec<f64>, EvaluationFailure> {
        if series.len() < 2 * order + 2 {
            return Err(EvaluationFailure::InvalidParameters(format!(
                "{} observations are too few to estimate innovations",
                series.len()
            )));
        }

        let design = Array2::from_shape_fn((series.len() - order, order), |(row, col)| {
            series[order + row - 1 - col]
        });
        let targets = ArrayView1::from(&series[order..]);
        let long_ar = fit_linear(design.view(), targets, 0.0)?;

        let fitted = design.dot(&long_ar.coef) + long_ar.intercept;
        let mut residuals = vec![0.0; series.len()];
        for (offset, (target, fit)) in targets.iter().zip(&fitted).enumerate() {
            residuals[order + offset] = target - fit;
        }
        Ok(residuals)
    }
}

impl FittedModel for FittedArima {
    fn forecast(&self, horizon: usize) -> Result<Vec<f64>, EvaluationFailure> {
        let mut recent = self.recent.clone();
        let mut residuals = self.residuals.clone();
        let mut levels = self.levels.clone();
        let mut path = Vec::with_capacity(horizon);

        for _ in 0..horizon {
            let mut row: Vec<f64> = recent.iter().rev().copied().collect();
            row.extend(residuals.iter().rev());
            let mut value = self.model.predict(&row);

            if self.p > 0 {
                recent.remove(0);
                recent.push(value);
            }
            // Future innovations have zero expectation
            if self.q > 0 {
                residuals.remove(0);
                residuals.push(0.0);
            }

            // Integrate back through each differencing level
            for level in levels.iter_mut().rev() {
                value += *level;
                *level = value;
            }

            if !value.is_finite() {
                return Err(EvaluationFailure::NonFinite("ARIMA forecast".to_string()));
            }
            path.push(value);
        }

        Ok(path)
    }
}
