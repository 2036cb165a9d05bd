use crate::config::evolution::EvolutionConfig;
use crate::config::traits::ConfigSection;
use crate::engines::evaluation::FitnessFunction;
use crate::engines::generation::{
    fitness::{directions_of, FitnessVector, OptimizationDirection},
    hall_of_fame::{EliteIndividual, HallOfFame},
    operators::{crossover, mutate, tournament_selection},
    population::{initialize_population, Individual},
    schema::GenomeSchema,
    stats::GenerationStats,
};
use crate::error::{EvoForecastError, Result};
use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Result of a completed run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvolutionOutcome {
    pub hall_of_fame: Vec<EliteIndividual>,
    pub stats: Vec<GenerationStats>,
    pub evaluations: usize,
    pub final_population: Vec<Individual>,
}

impl EvolutionOutcome {
    pub fn best(&self) -> Option<&EliteIndividual> {
        self.hall_of_fame.first()
    }
}

pub trait ProgressCallback: Send {
    fn on_generation_start(&mut self, generation: usize);
    fn on_generation_complete(
        &mut self,
        generation: usize,
        best_fitness: Option<&FitnessVector>,
        hall_of_fame_size: usize,
    );
    fn on_individual_evaluated(&mut self, evaluated: usize, total: usize);
}

/// Generational GA over one genome schema
///
/// All randomness (initialization, selection, crossover, mutation) comes from
/// a single seeded `StdRng` drawn in a fixed order; fitness evaluation draws
/// nothing from it, so parallel evaluation does not change the outcome.
pub struct EvolutionEngine<F: FitnessFunction> {
    config: EvolutionConfig,
    schema: GenomeSchema,
    fitness_fn: F,
    directions: Vec<OptimizationDirection>,
    hall_of_fame: HallOfFame,
    stats: Vec<GenerationStats>,
    evaluations: usize,
    rng: StdRng,
}

impl<F: FitnessFunction> EvolutionEngine<F> {
    pub fn new(config: EvolutionConfig, schema: GenomeSchema, fitness_fn: F) -> Result<Self> {
        config.validate()?;

        if schema.is_empty() {
            return Err(EvoForecastError::Schema(
                "Cannot evolve a zero-length genome".to_string(),
            ));
        }
        if fitness_fn.objectives().is_empty() {
            return Err(EvoForecastError::Configuration(
                "At least one objective is required".to_string(),
            ));
        }

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let directions = directions_of(fitness_fn.objectives());
        let hall_of_fame = HallOfFame::new(config.hall_of_fame_size, directions.clone());

        Ok(Self {
            config,
            schema,
            fitness_fn,
            directions,
            hall_of_fame,
            stats: Vec::new(),
            evaluations: 0,
            rng,
        })
    }

    /// Run the evolution process
    pub fn run<C: ProgressCallback>(&mut self, mut callback: C) -> Result<EvolutionOutcome> {
        self.hall_of_fame = HallOfFame::new(self.config.hall_of_fame_size, self.directions.clone());
        self.stats.clear();
        self.evaluations = 0;

        callback.on_generation_start(0);
        let mut population =
            initialize_population(&self.schema, self.config.population_size, &mut self.rng)?;
        let evaluated = self.evaluate_invalid(&mut population, &mut callback);
        self.record(0, evaluated, &population, &mut callback);

        for generation in 1..=self.config.num_generations {
            callback.on_generation_start(generation);

            let mut offspring = self.reproduce(&population)?;
            let evaluated = self.evaluate_invalid(&mut offspring, &mut callback);
            self.record(generation, evaluated, &offspring, &mut callback);

            population = offspring;
        }

        Ok(EvolutionOutcome {
            hall_of_fame: self.hall_of_fame.get_all().to_vec(),
            stats: self.stats.clone(),
            evaluations: self.evaluations,
            final_population: population,
        })
    }

    /// Selection, then pairwise crossover, then per-individual mutation
    fn reproduce(&mut self, population: &[Individual]) -> Result<Vec<Individual>> {
        let mut offspring = tournament_selection(
            population,
            self.config.population_size,
            self.config.tournament_size,
            &self.directions,
            &mut self.rng,
        )?;

        for i in (1..offspring.len()).step_by(2) {
            if self.rng.gen::<f64>() < self.config.crossover_rate {
                let (child1, child2) =
                    crossover(&offspring[i - 1].genome, &offspring[i].genome, &mut self.rng);

                if child1 != offspring[i - 1].genome {
                    offspring[i - 1] = Individual::new(child1);
                }
                if child2 != offspring[i].genome {
                    offspring[i] = Individual::new(child2);
                }
            }
        }

        for individual in offspring.iter_mut() {
            if self.rng.gen::<f64>() < self.config.mutation_rate {
                let mut genome = individual.genome.clone();
                mutate(
                    &mut genome,
                    &self.schema,
                    self.config.mutation_sigma,
                    self.config.gene_mutation_rate,
                    &mut self.rng,
                )?;

                if genome != individual.genome {
                    *individual = Individual::new(genome);
                }
            }
        }

        Ok(offspring)
    }

    /// Evaluate individuals without valid fitness, preserving population order
    fn evaluate_invalid<C: ProgressCallback>(
        &mut self,
        population: &mut [Individual],
        callback: &mut C,
    ) -> usize {
        let pending: Vec<usize> = population
            .iter()
            .enumerate()
            .filter(|(_, ind)| !ind.is_valid())
            .map(|(i, _)| i)
            .collect();

        let fitness_fn = &self.fitness_fn;
        let results: Vec<FitnessVector> = if self.config.parallel_evaluation {
            pending
                .par_iter()
                .map(|&i| fitness_fn.evaluate(&population[i].genome))
                .collect()
        } else {
            pending
                .iter()
                .map(|&i| fitness_fn.evaluate(&population[i].genome))
                .collect()
        };

        let total = pending.len();
        let mut failures = 0;
        for (done, (index, fitness)) in pending.into_iter().zip(results).enumerate() {
            if fitness.is_worst(&self.directions) {
                failures += 1;
            }
            population[index].fitness = Some(fitness);
            callback.on_individual_evaluated(done + 1, total);
        }

        if total > 0 && failures == total {
            log::warn!("All {} evaluations in this generation failed", total);
        }

        self.evaluations += total;
        total
    }

    fn record<C: ProgressCallback>(
        &mut self,
        generation: usize,
        evaluated: usize,
        population: &[Individual],
        callback: &mut C,
    ) {
        let stats = GenerationStats::compute(
            generation,
            evaluated,
            population,
            self.fitness_fn.objectives(),
        );
        self.hall_of_fame.update(population, generation);

        log::debug!(
            "Generation {}: {} evaluated, {} failed",
            stats.generation,
            stats.evaluations,
            stats.failures
        );
        self.stats.push(stats);

        callback.on_generation_complete(
            generation,
            self.hall_of_fame.best().map(|e| &e.fitness),
            self.hall_of_fame.len(),
        );
    }

    pub fn get_hall_of_fame(&self) -> &HallOfFame {
        &self.hall_of_fame
    }

    pub fn schema(&self) -> &GenomeSchema {
        &self.schema
    }
}
