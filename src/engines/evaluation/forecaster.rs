use crate::data::WindowedDataset;
use crate::types::ModelParams;
use std::time::Duration;
use thiserror::Error;

/// Recoverable failure of a single candidate evaluation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvaluationFailure {
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    #[error("Did not converge: {0}")]
    NonConvergence(String),

    #[error("Shape mismatch: expected {expected}, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    #[error("Non-finite output: {0}")]
    NonFinite(String),

    #[error("Evaluation timed out after {0:?}")]
    Timeout(Duration),

    #[error("Forecaster error: {0}")]
    Forecaster(String),
}

/// Model fitted on a history snapshot
pub trait FittedModel: Send {
    /// Forecast the `horizon` steps following the fitted history
    fn forecast(&self, horizon: usize) -> Result<Vec<f64>, EvaluationFailure>;
}

/// Family trainer used by the rolling protocol
///
/// `fit` may be called many times per evaluation; each call must start from
/// scratch.
pub trait Forecaster: Send + Sync {
    fn fit(
        &self,
        params: &ModelParams,
        history: &[f64],
    ) -> Result<Box<dyn FittedModel>, EvaluationFailure>;
}

/// Family trainer consuming pre-scaled lookback windows
pub trait WindowedForecaster: Send + Sync {
    /// Fit on the training windows and return one scaled prediction per test
    /// window
    fn fit_predict(
        &self,
        params: &ModelParams,
        dataset: &WindowedDataset,
    ) -> Result<Vec<f64>, EvaluationFailure>;
}
