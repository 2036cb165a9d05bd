use crate::engines::evaluation::{EvaluationFailure, FittedModel, Forecaster};
use crate::types::{ModelParams, SmoothingParams};

/// Additive Holt-Winters with fixed smoothing constants
#[derive(Debug, Clone)]
pub struct HoltWintersForecaster {
    pub level_smoothing: f64,
    pub trend_smoothing: f64,
    pub seasonal_smoothing: f64,
}

impl Default for HoltWintersForecaster {
    fn default() -> Self {
        Self {
            level_smoothing: 0.3,
            trend_smoothing: 0.1,
            seasonal_smoothing: 0.1,
        }
    }
}

impl Forecaster for HoltWintersForecaster {
    fn fit(
        &self,
        params: &ModelParams,
        history: &[f64],
    ) -> Result<Box<dyn FittedModel>, EvaluationFailure> {
        let params = match params {
            ModelParams::ExponentialSmoothing(p) => *p,
            other => {
                return Err(EvaluationFailure::InvalidParameters(format!(
                    "Holt-Winters forecaster cannot fit {} parameters",
                    other.family()
                )))
            }
        };
        Ok(Box::new(self.smooth(params, history)?))
    }
}

impl HoltWintersForecaster {
    fn smooth(
        &self,
        params: SmoothingParams,
        history: &[f64],
    ) -> Result<FittedHoltWinters, EvaluationFailure> {
        let period = if params.seasonal {
            if params.seasonal_periods < 2 {
                return Err(EvaluationFailure::InvalidParameters(format!(
                    "seasonal period must be at least 2, got {}",
                    params.seasonal_periods
                )));
            }
            params.seasonal_periods
        } else {
            1
        };

        let required = if params.seasonal { 2 * period } else { 2 };
        if history.len() < required {
            return Err(EvaluationFailure::InvalidParameters(format!(
                "{} observations are too few, need {}",
                history.len(),
                required
            )));
        }

        let first_mean = history[..period].iter().sum::<f64>() / period as f64;
        let mut level = first_mean;
        let mut trend = match (params.trend, params.seasonal) {
            (false, _) => 0.0,
            (true, true) => {
                let second_mean =
                    history[period..2 * period].iter().sum::<f64>() / period as f64;
                (second_mean - first_mean) / period as f64
            }
            (true, false) => history[1] - history[0],
        };
        let mut seasonals: Vec<f64> = if params.seasonal {
            history[..period].iter().map(|x| x - first_mean).collect()
        } else {
            vec![0.0]
        };

        let (a, b, g) = (
            self.level_smoothing,
            self.trend_smoothing,
            self.seasonal_smoothing,
        );

        for (t, &x) in history.iter().enumerate().skip(period) {
            let slot = t % period;
            let season = seasonals[slot];
            let prev_level = level;

            level = a * (x - season) + (1.0 - a) * (prev_level + trend);
            if params.trend {
                trend = b * (level - prev_level) + (1.0 - b) * trend;
            }
            if params.seasonal {
                seasonals[slot] = g * (x - level) + (1.0 - g) * season;
            }
        }

        if !level.is_finite() || !trend.is_finite() {
            return Err(EvaluationFailure::NonConvergence(
                "smoothing state diverged".to_string(),
            ));
        }

        Ok(FittedHoltWinters {
            level,
            trend,
            seasonals,
            next_index: history.len(),
        })
    }
}

#[derive(Debug, Clone)]
struct FittedHoltWinters {
    level: f64,
    trend: f64,
    seasonals: Vec<f64>,
    next_index: usize,
}

impl FittedModel for FittedHoltWinters {
    fn forecast(&self, horizon: usize) -> Result<Vec<f64>, EvaluationFailure> {
        let period = self.seasonals.len();
        Ok((1..=horizon)
            .map(|k| {
                let slot = (self.next_index + k - 1) % period;
                self.level + k as f64 * self.trend + self.seasonals[slot]
            })
            .collect())
    }
}
