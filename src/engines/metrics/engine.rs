// src/engines/metrics/engine.rs
use crate::engines::evaluation::EvaluationFailure;
use crate::engines::generation::fitness::{extract_objectives, FitnessVector, ObjectiveConfig};
use crate::engines::metrics::AccuracyMetrics;
use crate::error::{EvoForecastError, Result};
use crate::types::ForecastResult;
use std::collections::HashMap;

/// Turns a held-out forecast into metrics and an objective vector
pub struct MetricsEngine {
    objectives: Vec<ObjectiveConfig>,
}

impl MetricsEngine {
    pub fn new(objectives: Vec<ObjectiveConfig>) -> Result<Self> {
        if objectives.is_empty() {
            return Err(EvoForecastError::Configuration(
                "At least one objective is required".to_string(),
            ));
        }
        for objective in &objectives {
            if !AccuracyMetrics::NAMES.contains(&objective.metric_name.as_str()) {
                return Err(EvoForecastError::Configuration(format!(
                    "Unknown objective metric '{}', expected one of {:?}",
                    objective.metric_name,
                    AccuracyMetrics::NAMES
                )));
            }
        }
        Ok(Self { objectives })
    }

    pub fn objectives(&self) -> &[ObjectiveConfig] {
        &self.objectives
    }

    pub fn calculate_all(
        &self,
        result: &ForecastResult,
    ) -> std::result::Result<HashMap<String, f64>, EvaluationFailure> {
        let mut all_metrics = AccuracyMetrics::calculate(&result.predictions, &result.actuals)?;
        all_metrics.insert("horizon".to_string(), result.actuals.len() as f64);
        Ok(all_metrics)
    }

    pub fn fitness(
        &self,
        result: &ForecastResult,
    ) -> std::result::Result<FitnessVector, EvaluationFailure> {
        let metrics = self.calculate_all(result)?;
        Ok(extract_objectives(&metrics, &self.objectives))
    }
}
