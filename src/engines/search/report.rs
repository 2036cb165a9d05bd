use crate::engines::generation::{
    fitness::{directions_of, FitnessVector, ObjectiveConfig},
    stats::GenerationStats,
};
use crate::error::Result;
use crate::types::{ModelFamily, ModelParams};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::path::Path;

/// Search outcome of one model family
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FamilyReport {
    pub family: ModelFamily,
    pub best_params: ModelParams,
    pub best_genes: Vec<(String, f64)>,
    pub fitness: FitnessVector,
    pub feasible: bool,
    pub evaluations: usize,
    pub stats: Vec<GenerationStats>,
    /// Held-out forecast of the best configuration, original units
    pub predictions: Option<Vec<f64>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchReport {
    pub generated_at: String,
    pub objectives: Vec<ObjectiveConfig>,
    pub horizon: usize,
    pub held_out: Vec<f64>,
    pub families: Vec<FamilyReport>,
}

impl SearchReport {
    /// Best family under the same ranking rule the search used
    pub fn best_family(&self) -> Option<&FamilyReport> {
        let directions = directions_of(&self.objectives);
        self.families
            .iter()
            .filter(|f| f.feasible)
            .max_by(|a, b| match a.fitness.compare(&b.fitness, &directions) {
                // Keep the earlier family on ties
                Ordering::Equal => Ordering::Greater,
                other => other,
            })
    }

    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
