// src/engines/metrics/accuracy.rs
use crate::engines::evaluation::EvaluationFailure;
use std::collections::HashMap;

pub struct AccuracyMetrics;

impl AccuracyMetrics {
    pub const NAMES: [&'static str; 4] = ["rmse", "mae", "mape", "max_error"];

    pub fn calculate(
        predictions: &[f64],
        actuals: &[f64],
    ) -> Result<HashMap<String, f64>, EvaluationFailure> {
        if predictions.len() != actuals.len() {
            return Err(EvaluationFailure::ShapeMismatch {
                expected: actuals.len(),
                actual: predictions.len(),
            });
        }
        if actuals.is_empty() {
            return Err(EvaluationFailure::ShapeMismatch {
                expected: 1,
                actual: 0,
            });
        }
        if predictions.iter().any(|p| !p.is_finite()) {
            return Err(EvaluationFailure::NonFinite(
                "prediction sequence contains NaN or infinity".to_string(),
            ));
        }

        let errors: Vec<f64> = predictions
            .iter()
            .zip(actuals)
            .map(|(p, a)| p - a)
            .collect();
        let n = errors.len() as f64;

        let mut metrics = HashMap::new();

        let mse = errors.iter().map(|e| e * e).sum::<f64>() / n;
        metrics.insert("rmse".to_string(), mse.sqrt());

        let mae = errors.iter().map(|e| e.abs()).sum::<f64>() / n;
        metrics.insert("mae".to_string(), mae);

        let max_error = errors.iter().map(|e| e.abs()).fold(0.0, f64::max);
        metrics.insert("max_error".to_string(), max_error);

        // Percentage error is undefined on zero actuals; skip those points
        let pct: Vec<f64> = errors
            .iter()
            .zip(actuals)
            .filter(|(_, a)| **a != 0.0)
            .map(|(e, a)| (e / a).abs())
            .collect();
        if !pct.is_empty() {
            let mape = pct.iter().sum::<f64>() / pct.len() as f64 * 100.0;
            metrics.insert("mape".to_string(), mape);
        }

        Ok(metrics)
    }
}
