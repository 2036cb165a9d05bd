use evoforecast::data::{MinMaxScaler, WindowedDataset};
use evoforecast::engines::evaluation::{
    EvaluationFailure, FittedModel, Forecaster, WalkForwardProtocol, WindowedForecaster,
};
use evoforecast::types::{ModelParams, RidgeParams, SequenceParams};
use std::sync::{Arc, Mutex};

/// Records every history it is fit on; forecasts repeat the last seen value
#[derive(Default)]
struct RecordingForecaster {
    fits: Mutex<Vec<Vec<f64>>>,
    horizons: Arc<Mutex<Vec<usize>>>,
}

struct LastValue {
    last: f64,
    horizons: Arc<Mutex<Vec<usize>>>,
}

impl FittedModel for LastValue {
    fn forecast(&self, horizon: usize) -> Result<Vec<f64>, EvaluationFailure> {
        self.horizons.lock().unwrap().push(horizon);
        Ok(vec![self.last; horizon])
    }
}

impl Forecaster for RecordingForecaster {
    fn fit(
        &self,
        _params: &ModelParams,
        history: &[f64],
    ) -> Result<Box<dyn FittedModel>, EvaluationFailure> {
        self.fits.lock().unwrap().push(history.to_vec());
        Ok(Box::new(LastValue {
            last: history[history.len() - 1],
            horizons: Arc::clone(&self.horizons),
        }))
    }
}

struct BrokenPathForecaster;

struct ShortPath;

impl FittedModel for ShortPath {
    fn forecast(&self, _horizon: usize) -> Result<Vec<f64>, EvaluationFailure> {
        Ok(vec![])
    }
}

impl Forecaster for BrokenPathForecaster {
    fn fit(
        &self,
        _params: &ModelParams,
        _history: &[f64],
    ) -> Result<Box<dyn FittedModel>, EvaluationFailure> {
        Ok(Box::new(ShortPath))
    }
}

fn ridge_params() -> ModelParams {
    ModelParams::Ridge(RidgeParams { alpha: 1.0 })
}

#[test]
fn test_refit_cadence_and_lengths() {
    let train: Vec<f64> = (0..20).map(|i| i as f64).collect();
    let held_out: Vec<f64> = (20..27).map(|i| i as f64).collect();

    for refit_every in 1..=8 {
        let forecaster = RecordingForecaster::default();
        let protocol = WalkForwardProtocol::new(refit_every).unwrap();

        let result = protocol
            .run(&forecaster, &ridge_params(), &train, &held_out)
            .unwrap();

        assert_eq!(result.predictions.len(), held_out.len());
        assert_eq!(result.actuals, held_out);
        assert_eq!(result.history_len, train.len() + held_out.len());

        let fits = forecaster.fits.lock().unwrap().len();
        let expected = (held_out.len() + refit_every - 1) / refit_every;
        assert_eq!(fits, expected, "refit_every = {}", refit_every);
        assert_eq!(protocol.fits_required(held_out.len()), expected);
    }
}

#[test]
fn test_history_grows_with_true_observations() {
    let train = vec![1.0, 2.0, 3.0];
    let held_out = vec![10.0, 20.0, 30.0, 40.0, 50.0];
    let forecaster = RecordingForecaster::default();
    let protocol = WalkForwardProtocol::new(2).unwrap();

    let result = protocol
        .run(&forecaster, &ridge_params(), &train, &held_out)
        .unwrap();

    let fits = forecaster.fits.lock().unwrap();
    assert_eq!(fits.len(), 3);
    assert_eq!(fits[0], vec![1.0, 2.0, 3.0]);
    assert_eq!(fits[1], vec![1.0, 2.0, 3.0, 10.0, 20.0]);
    assert_eq!(fits[2], vec![1.0, 2.0, 3.0, 10.0, 20.0, 30.0, 40.0]);

    // Each model forecasts from its fit origin, never from its own predictions
    assert_eq!(result.predictions, vec![3.0, 3.0, 20.0, 20.0, 40.0]);
}

#[test]
fn test_forecast_horizon_counts_steps_since_fit() {
    let train = vec![0.0; 5];
    let held_out = vec![1.0; 7];
    let forecaster = RecordingForecaster::default();
    let protocol = WalkForwardProtocol::new(3).unwrap();

    protocol
        .run(&forecaster, &ridge_params(), &train, &held_out)
        .unwrap();

    let horizons = forecaster.horizons.lock().unwrap();
    assert_eq!(*horizons, vec![1, 2, 3, 1, 2, 3, 1]);
}

#[test]
fn test_short_forecast_path_is_shape_mismatch() {
    let protocol = WalkForwardProtocol::new(1).unwrap();

    let err = protocol
        .run(&BrokenPathForecaster, &ridge_params(), &[1.0, 2.0], &[3.0])
        .unwrap_err();

    assert_eq!(
        err,
        EvaluationFailure::ShapeMismatch {
            expected: 1,
            actual: 0
        }
    );
}

#[test]
fn test_zero_refit_cadence_rejected() {
    assert!(WalkForwardProtocol::new(0).is_err());
}

/// Predicts the last scaled value of every test window
struct LastWindowValue;

impl WindowedForecaster for LastWindowValue {
    fn fit_predict(
        &self,
        _params: &ModelParams,
        dataset: &evoforecast::data::WindowedDataset,
    ) -> Result<Vec<f64>, EvaluationFailure> {
        Ok(dataset
            .test_x()
            .iter()
            .map(|window| window[window.len() - 1])
            .collect())
    }
}

struct WrongLength;

impl WindowedForecaster for WrongLength {
    fn fit_predict(
        &self,
        _params: &ModelParams,
        _dataset: &WindowedDataset,
    ) -> Result<Vec<f64>, EvaluationFailure> {
        Ok(vec![0.5])
    }
}

fn sequence_params() -> ModelParams {
    ModelParams::Sequence(SequenceParams {
        units: 16,
        dropout: 0.0,
        learning_rate: 0.01,
        batch_size: 16,
        epochs: 10,
        hidden_layers: 1,
    })
}

#[test]
fn test_windowed_predictions_are_inverse_scaled() {
    let train = vec![10.0, 20.0, 30.0, 40.0, 50.0];
    let held_out = vec![60.0, 70.0, 80.0];
    let scaler = MinMaxScaler::fit(&train).unwrap();
    let dataset = WindowedDataset::build(&train, &held_out, 2, Arc::new(scaler)).unwrap();
    let protocol = WalkForwardProtocol::new(5).unwrap();

    let result = protocol
        .run_windowed(&LastWindowValue, &sequence_params(), &dataset)
        .unwrap();

    // Naive forecast of the previous true value, back in original units
    let expected = [50.0, 60.0, 70.0];
    for (p, e) in result.predictions.iter().zip(expected) {
        assert!((p - e).abs() < 1e-9, "{} != {}", p, e);
    }
    assert_eq!(result.actuals, held_out);
    assert_eq!(result.history_len, 8);
}

#[test]
fn test_windowed_wrong_length_is_shape_mismatch() {
    let train = vec![1.0, 2.0, 3.0, 4.0];
    let held_out = vec![5.0, 6.0];
    let scaler = MinMaxScaler::fit(&train).unwrap();
    let dataset = WindowedDataset::build(&train, &held_out, 2, Arc::new(scaler)).unwrap();
    let protocol = WalkForwardProtocol::new(1).unwrap();

    let err = protocol
        .run_windowed(&WrongLength, &sequence_params(), &dataset)
        .unwrap_err();

    assert_eq!(
        err,
        EvaluationFailure::ShapeMismatch {
            expected: 2,
            actual: 1
        }
    );
}

#[test]
fn test_window_shapes() {
    let train: Vec<f64> = (0..10).map(|i| i as f64).collect();
    let held_out = vec![10.0, 11.0, 12.0];
    let scaler = MinMaxScaler::fit(&train).unwrap();
    let dataset = WindowedDataset::build(&train, &held_out, 4, Arc::new(scaler)).unwrap();

    assert_eq!(dataset.train_x().len(), 6);
    assert_eq!(dataset.train_y().len(), 6);
    assert_eq!(dataset.test_x().len(), 3);
    assert!(dataset.test_x().iter().all(|w| w.len() == 4));
    assert_eq!(dataset.horizon(), 3);

    let too_long = WindowedDataset::build(&train, &held_out, 10, Arc::new(scaler));
    assert!(too_long.is_err());
}
