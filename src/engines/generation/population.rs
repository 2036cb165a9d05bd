use crate::engines::generation::fitness::FitnessVector;
use crate::engines::generation::genome::Genome;
use crate::engines::generation::schema::GenomeSchema;
use crate::error::{EvoForecastError, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A genome plus its cached fitness; `None` marks the fitness invalid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Individual {
    pub genome: Genome,
    pub fitness: Option<FitnessVector>,
}

impl Individual {
    pub fn new(genome: Genome) -> Self {
        Self {
            genome,
            fitness: None,
        }
    }

    pub fn with_fitness(genome: Genome, fitness: FitnessVector) -> Self {
        Self {
            genome,
            fitness: Some(fitness),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.fitness.is_some()
    }

    pub fn invalidate(&mut self) {
        self.fitness = None;
    }
}

/// Draw `size` independent genomes, every gene uniform over its domain
pub fn initialize_population<R: Rng>(
    schema: &GenomeSchema,
    size: usize,
    rng: &mut R,
) -> Result<Vec<Individual>> {
    if size == 0 {
        return Err(EvoForecastError::Configuration(
            "Population size must be at least 1".to_string(),
        ));
    }
    if schema.is_empty() {
        return Err(EvoForecastError::Schema(
            "Cannot build genomes from a zero-length schema".to_string(),
        ));
    }

    Ok((0..size)
        .map(|_| Individual::new(schema.random_genome(rng)))
        .collect())
}
