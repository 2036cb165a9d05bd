use super::traits::{check_probability, ConfigSection};
use crate::error::EvoForecastError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionConfig {
    pub population_size: usize,
    pub num_generations: usize,
    pub crossover_rate: f64,     // Per mating pair
    pub mutation_rate: f64,      // Per individual
    pub gene_mutation_rate: f64, // Per gene of a mutated individual
    pub mutation_sigma: f64,
    pub tournament_size: usize,
    pub hall_of_fame_size: usize,
    pub seed: Option<u64>,
    pub parallel_evaluation: bool,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: 20,
            num_generations: 10,
            crossover_rate: 0.5,
            mutation_rate: 0.2,
            gene_mutation_rate: 0.2,
            mutation_sigma: 1.0,
            tournament_size: 3,
            hall_of_fame_size: 1,
            seed: Some(42),
            parallel_evaluation: false,
        }
    }
}

impl ConfigSection for EvolutionConfig {
    fn section_name() -> &'static str {
        "evolution"
    }

    fn validate(&self) -> Result<(), EvoForecastError> {
        if self.population_size == 0 {
            return Err(EvoForecastError::Configuration(
                "Population size must be at least 1".to_string()
            ));
        }
        if self.tournament_size == 0 {
            return Err(EvoForecastError::Configuration(
                "Tournament size must be at least 1".to_string()
            ));
        }
        if self.hall_of_fame_size == 0 {
            return Err(EvoForecastError::Configuration(
                "Hall of fame size must be at least 1".to_string()
            ));
        }
        if !self.mutation_sigma.is_finite() || self.mutation_sigma <= 0.0 {
            return Err(EvoForecastError::Configuration(format!(
                "Mutation sigma must be positive, got {}",
                self.mutation_sigma
            )));
        }
        check_probability("Crossover rate", self.crossover_rate)?;
        check_probability("Mutation rate", self.mutation_rate)?;
        check_probability("Gene mutation rate", self.gene_mutation_rate)?;
        Ok(())
    }
}
