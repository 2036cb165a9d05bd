use crate::engines::generation::fitness::{FitnessVector, OptimizationDirection};
use crate::engines::generation::genome::{genome_signature, Genome};
use crate::engines::generation::population::Individual;

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashSet;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EliteIndividual {
    pub genome: Genome,
    pub fitness: FitnessVector,
    pub generation: usize, // Generation the genome was first admitted
}

/// Best individuals seen over a whole run, deduplicated by genome and kept
/// sorted best-to-worst
pub struct HallOfFame {
    entries: Vec<EliteIndividual>,
    max_size: usize,
    seen_signatures: HashSet<Vec<u64>>,
    directions: Vec<OptimizationDirection>,
}

impl HallOfFame {
    pub fn new(max_size: usize, directions: Vec<OptimizationDirection>) -> Self {
        Self {
            entries: Vec::new(),
            max_size,
            seen_signatures: HashSet::new(),
            directions,
        }
    }

    /// Offer every evaluated individual of a population
    pub fn update(&mut self, population: &[Individual], generation: usize) -> usize {
        let mut admitted = 0;
        for ind in population {
            if let Some(fitness) = &ind.fitness {
                let elite = EliteIndividual {
                    genome: ind.genome.clone(),
                    fitness: fitness.clone(),
                    generation,
                };
                if self.try_add(elite) {
                    admitted += 1;
                }
            }
        }
        admitted
    }

    /// Attempt to add an individual to the Hall of Fame
    pub fn try_add(&mut self, elite: EliteIndividual) -> bool {
        if self.max_size == 0 {
            return false;
        }

        let signature = genome_signature(&elite.genome);

        // Deduplication check
        if self.seen_signatures.contains(&signature) {
            return false;
        }

        // Full: only admit when ahead of the current worst entry
        if self.entries.len() >= self.max_size {
            let admitted = self
                .entries
                .last()
                .map(|worst| elite.fitness.is_better_than(&worst.fitness, &self.directions))
                .unwrap_or(true);
            if !admitted {
                return false;
            }
        }

        self.seen_signatures.insert(signature);

        // Insert after every entry ranked at least as well, so earlier entries win ties
        let position = self
            .entries
            .iter()
            .position(|e| elite.fitness.compare(&e.fitness, &self.directions) == Ordering::Greater)
            .unwrap_or(self.entries.len());
        self.entries.insert(position, elite);

        // Trim to max size
        while self.entries.len() > self.max_size {
            if let Some(removed) = self.entries.pop() {
                self.seen_signatures.remove(&genome_signature(&removed.genome));
            }
        }

        true
    }

    pub fn best(&self) -> Option<&EliteIndividual> {
        self.entries.first()
    }

    /// Get all elite individuals
    pub fn get_all(&self) -> &[EliteIndividual] {
        &self.entries
    }

    /// Get top N individuals
    pub fn get_top_n(&self, n: usize) -> &[EliteIndividual] {
        &self.entries[..n.min(self.entries.len())]
    }

    pub fn capacity(&self) -> usize {
        self.max_size
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
