use super::forecaster::{EvaluationFailure, Forecaster, WindowedForecaster};
use super::walk_forward::WalkForwardProtocol;
use super::FitnessFunction;
use crate::data::WindowedDataset;
use crate::engines::generation::{
    fitness::{directions_of, FitnessVector, ObjectiveConfig, OptimizationDirection},
    genome::Genome,
    schema::GenomeSchema,
};
use crate::engines::metrics::MetricsEngine;
use crate::error::{EvoForecastError, Result};
use crate::types::ForecastResult;
use std::sync::mpsc;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// How a family's forecasts are produced
#[derive(Clone)]
pub enum ForecasterBackend {
    Rolling {
        forecaster: Arc<dyn Forecaster>,
        train: Arc<Vec<f64>>,
        held_out: Arc<Vec<f64>>,
    },
    Windowed {
        forecaster: Arc<dyn WindowedForecaster>,
        dataset: Arc<WindowedDataset>,
    },
}

impl ForecasterBackend {
    pub fn rolling(forecaster: Arc<dyn Forecaster>, train: &[f64], held_out: &[f64]) -> Self {
        ForecasterBackend::Rolling {
            forecaster,
            train: Arc::new(train.to_vec()),
            held_out: Arc::new(held_out.to_vec()),
        }
    }

    pub fn windowed(forecaster: Arc<dyn WindowedForecaster>, dataset: WindowedDataset) -> Self {
        ForecasterBackend::Windowed {
            forecaster,
            dataset: Arc::new(dataset),
        }
    }

    fn is_windowed(&self) -> bool {
        matches!(self, ForecasterBackend::Windowed { .. })
    }
}

struct EvaluatorCore {
    schema: GenomeSchema,
    backend: ForecasterBackend,
    protocol: WalkForwardProtocol,
    metrics: MetricsEngine,
}

impl EvaluatorCore {
    fn forecast(&self, genome: &Genome) -> std::result::Result<ForecastResult, EvaluationFailure> {
        let params = self
            .schema
            .decode(genome)
            .map_err(|e| EvaluationFailure::InvalidParameters(e.to_string()))?;

        match &self.backend {
            ForecasterBackend::Rolling {
                forecaster,
                train,
                held_out,
            } => self
                .protocol
                .run(forecaster.as_ref(), &params, train, held_out),
            ForecasterBackend::Windowed {
                forecaster,
                dataset,
            } => self
                .protocol
                .run_windowed(forecaster.as_ref(), &params, dataset),
        }
    }

    fn score(&self, genome: &Genome) -> std::result::Result<FitnessVector, EvaluationFailure> {
        let result = self.forecast(genome)?;
        self.metrics.fitness(&result)
    }
}

/// Scores genomes of one family by walk-forward forecasting error
///
/// Every failure inside decode, fit, or forecast becomes the sentinel worst
/// fitness in `evaluate`; `try_evaluate` exposes the typed failure.
pub struct FitnessEvaluator {
    core: Arc<EvaluatorCore>,
    directions: Vec<OptimizationDirection>,
    timeout: Option<Duration>,
}

impl FitnessEvaluator {
    pub fn new(
        schema: GenomeSchema,
        backend: ForecasterBackend,
        protocol: WalkForwardProtocol,
        metrics: MetricsEngine,
    ) -> Result<Self> {
        if schema.family().is_windowed() != backend.is_windowed() {
            return Err(EvoForecastError::Configuration(format!(
                "{} needs a {} forecaster backend",
                schema.family(),
                if schema.family().is_windowed() { "windowed" } else { "rolling" }
            )));
        }

        let directions = directions_of(metrics.objectives());

        Ok(Self {
            core: Arc::new(EvaluatorCore {
                schema,
                backend,
                protocol,
                metrics,
            }),
            directions,
            timeout: None,
        })
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn schema(&self) -> &GenomeSchema {
        &self.core.schema
    }

    /// Held-out forecast of one genome, in original units
    pub fn forecast(
        &self,
        genome: &Genome,
    ) -> std::result::Result<ForecastResult, EvaluationFailure> {
        self.core.forecast(genome)
    }

    pub fn try_evaluate(
        &self,
        genome: &Genome,
    ) -> std::result::Result<FitnessVector, EvaluationFailure> {
        match self.timeout {
            None => self.core.score(genome),
            Some(limit) => {
                let core = Arc::clone(&self.core);
                let genome = genome.clone();
                let (tx, rx) = mpsc::channel();

                // The worker is left running if it overshoots the limit
                thread::spawn(move || {
                    let _ = tx.send(core.score(&genome));
                });

                match rx.recv_timeout(limit) {
                    Ok(result) => result,
                    Err(mpsc::RecvTimeoutError::Timeout) => Err(EvaluationFailure::Timeout(limit)),
                    Err(mpsc::RecvTimeoutError::Disconnected) => Err(
                        EvaluationFailure::Forecaster("evaluation worker panicked".to_string()),
                    ),
                }
            }
        }
    }
}

impl FitnessFunction for FitnessEvaluator {
    fn objectives(&self) -> &[ObjectiveConfig] {
        self.core.metrics.objectives()
    }

    fn evaluate(&self, genome: &Genome) -> FitnessVector {
        match self.try_evaluate(genome) {
            Ok(fitness) => fitness,
            Err(failure) => {
                log::debug!(
                    "{} candidate {:?} failed: {}",
                    self.core.schema.family(),
                    self.core.schema.describe(genome),
                    failure
                );
                FitnessVector::worst(&self.directions)
            }
        }
    }
}
