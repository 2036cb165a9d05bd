use super::report::{FamilyReport, SearchReport};
use crate::config::AppConfig;
use crate::data::{MinMaxScaler, SeriesSplit, WindowedDataset};
use crate::engines::evaluation::{
    FitnessEvaluator, Forecaster, ForecasterBackend, WalkForwardProtocol, WindowedForecaster,
};
use crate::engines::generation::{
    fitness::directions_of, EvolutionEngine, GenomeSchema, ProgressCallback,
};
use crate::engines::metrics::MetricsEngine;
use crate::error::{EvoForecastError, Result};
use crate::forecasters::{
    ArimaForecaster, HoltWintersForecaster, MlpForecaster, RidgeLagForecaster,
};
use crate::types::ModelFamily;
use std::collections::HashMap;
use std::sync::Arc;

/// Forecaster used for each family
#[derive(Clone)]
pub struct ForecasterSet {
    rolling: HashMap<ModelFamily, Arc<dyn Forecaster>>,
    windowed: HashMap<ModelFamily, Arc<dyn WindowedForecaster>>,
}

impl Default for ForecasterSet {
    fn default() -> Self {
        Self::empty()
            .with_rolling(ModelFamily::Autoregressive, Arc::new(ArimaForecaster))
            .with_rolling(
                ModelFamily::ExponentialSmoothing,
                Arc::new(HoltWintersForecaster::default()),
            )
            .with_rolling(ModelFamily::Ridge, Arc::new(RidgeLagForecaster::default()))
            .with_windowed(ModelFamily::SequenceModel, Arc::new(MlpForecaster::default()))
    }
}

impl ForecasterSet {
    pub fn empty() -> Self {
        Self {
            rolling: HashMap::new(),
            windowed: HashMap::new(),
        }
    }

    pub fn with_rolling(mut self, family: ModelFamily, forecaster: Arc<dyn Forecaster>) -> Self {
        self.windowed.remove(&family);
        self.rolling.insert(family, forecaster);
        self
    }

    pub fn with_windowed(
        mut self,
        family: ModelFamily,
        forecaster: Arc<dyn WindowedForecaster>,
    ) -> Self {
        self.rolling.remove(&family);
        self.windowed.insert(family, forecaster);
        self
    }

    fn backend(
        &self,
        family: ModelFamily,
        split: &SeriesSplit,
        lookback: usize,
    ) -> Result<ForecasterBackend> {
        if let Some(forecaster) = self.windowed.get(&family) {
            let scaler = MinMaxScaler::fit(&split.train)?;
            let dataset =
                WindowedDataset::build(&split.train, &split.held_out, lookback, Arc::new(scaler))?;
            return Ok(ForecasterBackend::windowed(Arc::clone(forecaster), dataset));
        }
        if let Some(forecaster) = self.rolling.get(&family) {
            return Ok(ForecasterBackend::rolling(
                Arc::clone(forecaster),
                &split.train,
                &split.held_out,
            ));
        }
        Err(EvoForecastError::Configuration(format!(
            "No forecaster registered for {}",
            family
        )))
    }
}

/// Runs one evolutionary search per configured family
pub struct SearchRunner {
    config: AppConfig,
    forecasters: ForecasterSet,
}

impl SearchRunner {
    pub fn new(config: AppConfig, forecasters: ForecasterSet) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            forecasters,
        })
    }

    pub fn run<C: ProgressCallback + Clone>(
        &self,
        split: &SeriesSplit,
        callback: C,
    ) -> Result<SearchReport> {
        if split.held_out.is_empty() {
            return Err(EvoForecastError::Validation(
                "Held-out series is empty".to_string(),
            ));
        }

        let mut families = Vec::with_capacity(self.config.search.families.len());
        for &family in &self.config.search.families {
            log::info!("Searching {} hyperparameters", family);
            let report = self.run_family(
                family,
                GenomeSchema::for_family(family),
                split,
                callback.clone(),
            )?;
            log::info!(
                "Best {} configuration: {:?} with fitness {:?}",
                family,
                report.best_params,
                report.fitness.values
            );
            families.push(report);
        }

        Ok(SearchReport {
            generated_at: chrono::Utc::now().to_rfc3339(),
            objectives: self.config.search.objectives.clone(),
            horizon: split.horizon(),
            held_out: split.held_out.clone(),
            families,
        })
    }

    /// Search a single family with an explicit schema
    pub fn run_family<C: ProgressCallback>(
        &self,
        family: ModelFamily,
        schema: GenomeSchema,
        split: &SeriesSplit,
        callback: C,
    ) -> Result<FamilyReport> {
        if schema.family() != family {
            return Err(EvoForecastError::Schema(format!(
                "Schema describes {} but {} was requested",
                schema.family(),
                family
            )));
        }

        let backend = self
            .forecasters
            .backend(family, split, self.config.walk_forward.lookback)?;
        let protocol = WalkForwardProtocol::new(self.config.walk_forward.refit_every)?;
        let metrics = MetricsEngine::new(self.config.search.objectives.clone())?;
        let evaluator = FitnessEvaluator::new(schema.clone(), backend, protocol, metrics)?
            .with_timeout(self.config.walk_forward.timeout());

        let mut engine =
            EvolutionEngine::new(self.config.evolution.clone(), schema.clone(), &evaluator)?;
        let outcome = engine.run(callback)?;

        let best = outcome.best().ok_or_else(|| {
            EvoForecastError::Validation(format!("{} search produced no individuals", family))
        })?;

        let directions = directions_of(&self.config.search.objectives);
        let feasible = !best.fitness.is_worst(&directions);
        if !feasible {
            log::warn!("Every {} configuration failed to evaluate", family);
        }

        let predictions = if feasible {
            match evaluator.forecast(&best.genome) {
                Ok(result) => Some(result.predictions),
                Err(failure) => {
                    log::warn!(
                        "Re-forecasting best {} configuration failed: {}",
                        family,
                        failure
                    );
                    None
                }
            }
        } else {
            None
        };

        Ok(FamilyReport {
            family,
            best_params: schema.decode(&best.genome)?,
            best_genes: schema
                .describe(&best.genome)
                .into_iter()
                .map(|(name, value)| (name.to_string(), value))
                .collect(),
            fitness: best.fitness.clone(),
            feasible,
            evaluations: outcome.evaluations,
            stats: outcome.stats,
            predictions,
        })
    }
}
