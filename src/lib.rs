//! Evolutionary hyperparameter search for time-series forecasters, scored by
//! walk-forward (rolling-origin) evaluation.

pub mod config;
pub mod data;
pub mod engines;
pub mod error;
pub mod forecasters;
pub mod types;

pub use error::{EvoForecastError, Result};
