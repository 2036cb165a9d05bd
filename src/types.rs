use serde::{Deserialize, Serialize};
use std::fmt;

/// Model families competing in the search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelFamily {
    SequenceModel,        // Windowed recurrent/dense network
    Autoregressive,       // ARIMA(p, d, q)
    ExponentialSmoothing, // Holt-Winters
    Ridge,                // L2-regularized linear regression on lags
}

impl ModelFamily {
    pub const ALL: [ModelFamily; 4] = [
        ModelFamily::SequenceModel,
        ModelFamily::Autoregressive,
        ModelFamily::ExponentialSmoothing,
        ModelFamily::Ridge,
    ];

    /// Sequence models consume lookback windows and are evaluated in one batch
    pub fn is_windowed(&self) -> bool {
        matches!(self, ModelFamily::SequenceModel)
    }

    /// Gene names the family's parameter struct reads when decoding
    pub fn required_genes(&self) -> &'static [&'static str] {
        match self {
            ModelFamily::SequenceModel => &[
                "units",
                "dropout",
                "learning_rate",
                "batch_size",
                "epochs",
                "hidden_layers",
            ],
            ModelFamily::Autoregressive => &["p", "d", "q"],
            ModelFamily::ExponentialSmoothing => &["trend", "seasonal", "seasonal_periods"],
            ModelFamily::Ridge => &["alpha"],
        }
    }
}

impl fmt::Display for ModelFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ModelFamily::SequenceModel => "sequence_model",
            ModelFamily::Autoregressive => "autoregressive",
            ModelFamily::ExponentialSmoothing => "exponential_smoothing",
            ModelFamily::Ridge => "ridge",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SequenceParams {
    pub units: usize,
    pub dropout: f64,
    pub learning_rate: f64,
    pub batch_size: usize,
    pub epochs: usize,
    pub hidden_layers: usize,
}

/// Orders are signed so that infeasible configurations can be expressed and
/// rejected by the forecaster instead of at decode time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArimaOrder {
    pub p: i64,
    pub d: i64,
    pub q: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmoothingParams {
    pub trend: bool,
    pub seasonal: bool,
    pub seasonal_periods: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RidgeParams {
    pub alpha: f64,
}

/// Decoded hyperparameters, one variant per family
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "family", rename_all = "snake_case")]
pub enum ModelParams {
    Sequence(SequenceParams),
    Autoregressive(ArimaOrder),
    ExponentialSmoothing(SmoothingParams),
    Ridge(RidgeParams),
}

impl ModelParams {
    pub fn family(&self) -> ModelFamily {
        match self {
            ModelParams::Sequence(_) => ModelFamily::SequenceModel,
            ModelParams::Autoregressive(_) => ModelFamily::Autoregressive,
            ModelParams::ExponentialSmoothing(_) => ModelFamily::ExponentialSmoothing,
            ModelParams::Ridge(_) => ModelFamily::Ridge,
        }
    }
}

/// Held-out forecast of one configuration, original units
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastResult {
    pub predictions: Vec<f64>,
    pub actuals: Vec<f64>,
    pub history_len: usize,
}
