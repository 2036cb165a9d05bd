use crate::engines::generation::fitness::{ObjectiveConfig, OptimizationDirection};
use crate::engines::generation::population::Individual;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectiveStats {
    pub metric_name: String,
    #[serde(with = "super::float_serde::value")]
    pub mean: f64,
    #[serde(with = "super::float_serde::value")]
    pub min: f64,
    #[serde(with = "super::float_serde::value")]
    pub max: f64,
}

/// Population aggregate recorded once per generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationStats {
    pub generation: usize,
    pub evaluations: usize, // Individuals (re)evaluated this generation
    pub failures: usize,    // Individuals holding the sentinel fitness
    pub objectives: Vec<ObjectiveStats>,
}

impl GenerationStats {
    pub fn compute(
        generation: usize,
        evaluations: usize,
        population: &[Individual],
        objectives: &[ObjectiveConfig],
    ) -> Self {
        let directions: Vec<OptimizationDirection> =
            objectives.iter().map(|o| o.direction).collect();

        let fitnesses: Vec<&[f64]> = population
            .iter()
            .filter_map(|ind| ind.fitness.as_ref())
            .map(|f| f.values.as_slice())
            .collect();

        let failures = population
            .iter()
            .filter_map(|ind| ind.fitness.as_ref())
            .filter(|f| f.is_worst(&directions))
            .count();

        let objectives = objectives
            .iter()
            .enumerate()
            .map(|(i, objective)| {
                let values: Vec<f64> = fitnesses.iter().filter_map(|f| f.get(i).copied()).collect();
                summarize(&objective.metric_name, &values)
            })
            .collect();

        Self {
            generation,
            evaluations,
            failures,
            objectives,
        }
    }

    pub fn objective(&self, metric_name: &str) -> Option<&ObjectiveStats> {
        self.objectives.iter().find(|o| o.metric_name == metric_name)
    }
}

fn summarize(metric_name: &str, values: &[f64]) -> ObjectiveStats {
    if values.is_empty() {
        return ObjectiveStats {
            metric_name: metric_name.to_string(),
            mean: f64::NAN,
            min: f64::NAN,
            max: f64::NAN,
        };
    }

    // Sentinel infinities propagate into the mean
    let mean = values.iter().sum::<f64>() / values.len() as f64;

    ObjectiveStats {
        metric_name: metric_name.to_string(),
        mean,
        min: values.iter().copied().fold(f64::INFINITY, f64::min),
        max: values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
    }
}
