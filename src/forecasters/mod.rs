//! Lightweight reference forecasters, one per model family.
//!
//! They make the search runnable end to end; any `Forecaster` or
//! `WindowedForecaster` implementation can replace them.

pub mod linalg;
pub mod arima;
pub mod holt_winters;
pub mod ridge;
pub mod mlp;

pub use arima::ArimaForecaster;
pub use holt_winters::HoltWintersForecaster;
pub use ridge::RidgeLagForecaster;
pub use mlp::MlpForecaster;
