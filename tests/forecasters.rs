use evoforecast::data::{MinMaxScaler, WindowedDataset};
use evoforecast::engines::evaluation::{EvaluationFailure, Forecaster, WindowedForecaster};
use evoforecast::forecasters::{
    ArimaForecaster, HoltWintersForecaster, MlpForecaster, RidgeLagForecaster,
};
use evoforecast::types::{
    ArimaOrder, ModelParams, RidgeParams, SequenceParams, SmoothingParams,
};
use std::sync::Arc;

fn assert_close(actual: &[f64], expected: &[f64], tol: f64) {
    assert_eq!(actual.len(), expected.len());
    for (a, e) in actual.iter().zip(expected) {
        assert!((a - e).abs() < tol, "{:?} != {:?}", actual, expected);
    }
}

fn arima(p: i64, d: i64, q: i64) -> ModelParams {
    ModelParams::Autoregressive(ArimaOrder { p, d, q })
}

fn smoothing(trend: bool, seasonal: bool, seasonal_periods: usize) -> ModelParams {
    ModelParams::ExponentialSmoothing(SmoothingParams {
        trend,
        seasonal,
        seasonal_periods,
    })
}

#[test]
fn test_random_walk_with_drift_extrapolates_slope() {
    let history: Vec<f64> = (0..30).map(|t| 2.0 + 3.0 * t as f64).collect();

    let model = ArimaForecaster.fit(&arima(0, 1, 0), &history).unwrap();
    let path = model.forecast(3).unwrap();

    assert_close(&path, &[92.0, 95.0, 98.0], 1e-9);
}

#[test]
fn test_second_difference_extrapolates_quadratic() {
    let history: Vec<f64> = (0..30).map(|t| (t * t) as f64).collect();

    let model = ArimaForecaster.fit(&arima(0, 2, 0), &history).unwrap();
    let path = model.forecast(2).unwrap();

    assert_close(&path, &[900.0, 961.0], 1e-6);
}

#[test]
fn test_ar_one_recovers_decay() {
    // x[t] = 0.5 x[t-1] + 1, fixed point at 2
    let mut history = vec![10.0];
    for _ in 0..60 {
        let last = history[history.len() - 1];
        history.push(0.5 * last + 1.0 + if history.len() % 2 == 0 { 1e-3 } else { -1e-3 });
    }

    let model = ArimaForecaster.fit(&arima(1, 0, 0), &history).unwrap();
    let path = model.forecast(5).unwrap();

    assert!(path.iter().all(|v| (v - 2.0).abs() < 0.05), "{:?}", path);
}

#[test]
fn test_arima_with_moving_average_terms() {
    let history: Vec<f64> = (0..80)
        .map(|t| 10.0 + (t as f64 * 0.4).sin() + ((t * 7919) % 13) as f64 * 0.05)
        .collect();

    let model = ArimaForecaster.fit(&arima(2, 0, 1), &history).unwrap();
    let path = model.forecast(4).unwrap();

    assert_eq!(path.len(), 4);
    assert!(path.iter().all(|v| v.is_finite() && (*v - 10.0).abs() < 5.0));
}

#[test]
fn test_arima_rejects_infeasible_orders() {
    let history: Vec<f64> = (0..40).map(|t| t as f64).collect();

    let negative = ArimaForecaster.fit(&arima(-1, 0, 0), &history).err();
    assert!(matches!(negative, Some(EvaluationFailure::InvalidParameters(_))));

    let short = ArimaForecaster.fit(&arima(5, 2, 5), &history[..10]).err();
    assert!(matches!(short, Some(EvaluationFailure::InvalidParameters(_))));

    let wrong_family = ArimaForecaster
        .fit(&ModelParams::Ridge(RidgeParams { alpha: 1.0 }), &history)
        .err();
    assert!(matches!(wrong_family, Some(EvaluationFailure::InvalidParameters(_))));
}

#[test]
fn test_holt_winters_level_only_on_constant_series() {
    let history = vec![4.0; 20];

    let model = HoltWintersForecaster::default()
        .fit(&smoothing(false, false, 12), &history)
        .unwrap();

    assert_close(&model.forecast(3).unwrap(), &[4.0, 4.0, 4.0], 1e-12);
}

#[test]
fn test_holt_winters_trend_follows_line() {
    let history: Vec<f64> = (0..20).map(|t| 1.0 + 2.0 * t as f64).collect();

    let model = HoltWintersForecaster::default()
        .fit(&smoothing(true, false, 12), &history)
        .unwrap();

    assert_close(&model.forecast(3).unwrap(), &[41.0, 43.0, 45.0], 1e-9);
}

#[test]
fn test_holt_winters_repeats_season() {
    let pattern = [1.0, 5.0, 3.0, 7.0];
    let history: Vec<f64> = (0..24).map(|t| pattern[t % 4]).collect();

    let model = HoltWintersForecaster::default()
        .fit(&smoothing(false, true, 4), &history)
        .unwrap();

    assert_close(&model.forecast(6).unwrap(), &[1.0, 5.0, 3.0, 7.0, 1.0, 5.0], 1e-9);
}

#[test]
fn test_holt_winters_needs_two_seasons() {
    let history = vec![1.0; 10];

    let result = HoltWintersForecaster::default().fit(&smoothing(false, true, 6), &history);
    assert!(matches!(result.err(), Some(EvaluationFailure::InvalidParameters(_))));
}

#[test]
fn test_ridge_tracks_trend() {
    let history: Vec<f64> = (0..50)
        .map(|t| 0.5 * t as f64 + ((t * 31) % 7) as f64 * 0.01)
        .collect();

    let model = RidgeLagForecaster::default()
        .fit(&ModelParams::Ridge(RidgeParams { alpha: 0.1 }), &history)
        .unwrap();
    let path = model.forecast(2).unwrap();

    assert_close(&path, &[25.0, 25.5], 0.2);
}

#[test]
fn test_ridge_rejects_negative_alpha_and_short_history() {
    let history: Vec<f64> = (0..50).map(|t| t as f64).collect();
    let forecaster = RidgeLagForecaster::default();

    let negative = forecaster.fit(&ModelParams::Ridge(RidgeParams { alpha: -1.0 }), &history);
    assert!(matches!(negative.err(), Some(EvaluationFailure::InvalidParameters(_))));

    let short = forecaster.fit(&ModelParams::Ridge(RidgeParams { alpha: 1.0 }), &history[..5]);
    assert!(matches!(short.err(), Some(EvaluationFailure::InvalidParameters(_))));
}

fn sequence(dropout: f64, epochs: usize) -> ModelParams {
    ModelParams::Sequence(SequenceParams {
        units: 16,
        dropout,
        learning_rate: 0.01,
        batch_size: 16,
        epochs,
        hidden_layers: 2,
    })
}

fn sine_dataset() -> WindowedDataset {
    let series: Vec<f64> = (0..80).map(|t| (t as f64 * 0.3).sin()).collect();
    let (train, held_out) = series.split_at(70);
    let scaler = MinMaxScaler::fit(train).unwrap();
    WindowedDataset::build(train, held_out, 8, Arc::new(scaler)).unwrap()
}

#[test]
fn test_mlp_is_deterministic_per_seed() {
    let dataset = sine_dataset();
    let forecaster = MlpForecaster::default();

    let first = forecaster.fit_predict(&sequence(0.1, 20), &dataset).unwrap();
    let second = forecaster.fit_predict(&sequence(0.1, 20), &dataset).unwrap();

    assert_eq!(first.len(), dataset.horizon());
    assert_eq!(first, second);
    assert!(first.iter().all(|v| v.is_finite()));
}

#[test]
fn test_mlp_rejects_invalid_parameters() {
    let dataset = sine_dataset();
    let forecaster = MlpForecaster::default();

    let full_dropout = forecaster.fit_predict(&sequence(1.0, 10), &dataset);
    assert!(matches!(full_dropout.err(), Some(EvaluationFailure::InvalidParameters(_))));

    let no_epochs = forecaster.fit_predict(&sequence(0.0, 0), &dataset);
    assert!(matches!(no_epochs.err(), Some(EvaluationFailure::InvalidParameters(_))));

    let ridge = ModelParams::Ridge(RidgeParams { alpha: 1.0 });
    let wrong_family = forecaster.fit_predict(&ridge, &dataset);
    assert!(matches!(wrong_family.err(), Some(EvaluationFailure::InvalidParameters(_))));
}
