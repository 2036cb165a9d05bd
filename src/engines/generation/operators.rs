use crate::engines::generation::fitness::OptimizationDirection;
use crate::engines::generation::genome::Genome;
use crate::engines::generation::population::Individual;
use crate::engines::generation::schema::GenomeSchema;
use crate::error::{EvoForecastError, Result};
use rand::Rng;
use rand_distr::{Distribution, Normal};
use std::cmp::Ordering;

/// Tournament selection: fill a pool of `count` with the best of
/// `tournament_size` random candidates each time
///
/// Candidates are drawn with replacement. Ties keep the earlier draw;
/// individuals without fitness rank below every evaluated one.
pub fn tournament_selection<R: Rng>(
    population: &[Individual],
    count: usize,
    tournament_size: usize,
    directions: &[OptimizationDirection],
    rng: &mut R,
) -> Result<Vec<Individual>> {
    if population.is_empty() {
        return Err(EvoForecastError::Configuration(
            "Cannot select from an empty population".to_string(),
        ));
    }
    if tournament_size == 0 {
        return Err(EvoForecastError::Configuration(
            "Tournament size must be at least 1".to_string(),
        ));
    }

    let mut selected = Vec::with_capacity(count);
    for _ in 0..count {
        let mut best_idx = rng.gen_range(0..population.len());

        for _ in 1..tournament_size {
            let idx = rng.gen_range(0..population.len());
            if ranks_ahead(&population[idx], &population[best_idx], directions) {
                best_idx = idx;
            }
        }

        selected.push(population[best_idx].clone());
    }

    Ok(selected)
}

fn ranks_ahead(a: &Individual, b: &Individual, directions: &[OptimizationDirection]) -> bool {
    match (&a.fitness, &b.fitness) {
        (Some(fa), Some(fb)) => fa.compare(fb, directions) == Ordering::Greater,
        (Some(_), None) => true,
        _ => false,
    }
}

/// Two-point crossover: swap the segment between two distinct cut points
///
/// Genomes of length <= 1 have no two distinct cut points and pass through
/// unchanged.
pub fn crossover<R: Rng>(parent1: &Genome, parent2: &Genome, rng: &mut R) -> (Genome, Genome) {
    let len = parent1.len().min(parent2.len());
    if len <= 1 {
        return (parent1.clone(), parent2.clone());
    }

    let mut point1 = rng.gen_range(1..=len);
    let mut point2 = rng.gen_range(1..len);
    if point2 >= point1 {
        point2 += 1;
    } else {
        std::mem::swap(&mut point1, &mut point2);
    }

    let mut child1 = parent1.clone();
    let mut child2 = parent2.clone();

    child1[point1..point2].copy_from_slice(&parent2[point1..point2]);
    child2[point1..point2].copy_from_slice(&parent1[point1..point2]);

    (child1, child2)
}

/// Gaussian mutation: each gene with probability `gene_rate` gets N(0, sigma)
/// noise, then is clamped and cast back into its schema domain
pub fn mutate<R: Rng>(
    genome: &mut Genome,
    schema: &GenomeSchema,
    sigma: f64,
    gene_rate: f64,
    rng: &mut R,
) -> Result<()> {
    if genome.len() != schema.len() {
        return Err(EvoForecastError::Schema(format!(
            "Cannot mutate genome of length {} with a {}-gene schema",
            genome.len(),
            schema.len()
        )));
    }

    let noise = Normal::new(0.0, sigma).map_err(|e| {
        EvoForecastError::Configuration(format!("Invalid mutation sigma {}: {}", sigma, e))
    })?;

    for (index, gene) in genome.iter_mut().enumerate() {
        if rng.gen::<f64>() < gene_rate {
            *gene = schema.clamp_gene(index, *gene + noise.sample(rng));
        }
    }

    Ok(())
}
