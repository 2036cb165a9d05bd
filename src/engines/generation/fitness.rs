//! Multi-objective fitness vectors and the ranking rule shared by selection
//! and the hall of fame.
//!
//! Each objective value is multiplied by its weight (-1 minimize, +1 maximize)
//! and the weighted tuples are compared lexicographically: the first
//! objective dominates, later ones only break ties.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Defines whether a metric should be maximized or minimized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptimizationDirection {
    Maximize,
    Minimize,
}

impl OptimizationDirection {
    pub fn weight(&self) -> f64 {
        match self {
            OptimizationDirection::Maximize => 1.0,
            OptimizationDirection::Minimize => -1.0,
        }
    }

    /// Value no real outcome can rank below
    pub fn worst(&self) -> f64 {
        match self {
            OptimizationDirection::Maximize => f64::NEG_INFINITY,
            OptimizationDirection::Minimize => f64::INFINITY,
        }
    }
}

/// Configuration for a single objective
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectiveConfig {
    pub metric_name: String,
    pub direction: OptimizationDirection,
}

impl ObjectiveConfig {
    pub fn minimize(metric_name: &str) -> Self {
        Self {
            metric_name: metric_name.to_string(),
            direction: OptimizationDirection::Minimize,
        }
    }

    pub fn maximize(metric_name: &str) -> Self {
        Self {
            metric_name: metric_name.to_string(),
            direction: OptimizationDirection::Maximize,
        }
    }
}

/// Ordered objective values of one individual
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitnessVector {
    #[serde(with = "super::float_serde::values")]
    pub values: Vec<f64>,
}

impl FitnessVector {
    pub fn new(values: Vec<f64>) -> Self {
        Self { values }
    }

    /// Sentinel assigned to failed evaluations
    pub fn worst(directions: &[OptimizationDirection]) -> Self {
        Self {
            values: directions.iter().map(|d| d.worst()).collect(),
        }
    }

    pub fn is_worst(&self, directions: &[OptimizationDirection]) -> bool {
        self.values.len() == directions.len()
            && self
                .values
                .iter()
                .zip(directions)
                .all(|(v, d)| *v == d.worst())
    }

    /// Weighted values; larger is better in every position. NaN ranks last.
    pub fn weighted(&self, directions: &[OptimizationDirection]) -> Vec<f64> {
        self.values
            .iter()
            .zip(directions)
            .map(|(v, d)| {
                let w = v * d.weight();
                if w.is_nan() {
                    f64::NEG_INFINITY
                } else {
                    w
                }
            })
            .collect()
    }

    /// `Greater` means `self` ranks ahead of `other`
    pub fn compare(&self, other: &Self, directions: &[OptimizationDirection]) -> Ordering {
        let a = self.weighted(directions);
        let b = other.weighted(directions);
        for (x, y) in a.iter().zip(&b) {
            match x.total_cmp(y) {
                Ordering::Equal => continue,
                decided => return decided,
            }
        }
        Ordering::Equal
    }

    pub fn is_better_than(&self, other: &Self, directions: &[OptimizationDirection]) -> bool {
        self.compare(other, directions) == Ordering::Greater
    }
}

pub fn directions_of(objectives: &[ObjectiveConfig]) -> Vec<OptimizationDirection> {
    objectives.iter().map(|o| o.direction).collect()
}

/// Extract objective values from metrics HashMap
pub fn extract_objectives(
    metrics: &HashMap<String, f64>,
    objective_configs: &[ObjectiveConfig],
) -> FitnessVector {
    FitnessVector::new(
        objective_configs
            .iter()
            .map(|config| {
                metrics
                    .get(&config.metric_name)
                    .copied()
                    .unwrap_or_else(|| config.direction.worst())
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lexicographic_minimize() {
        let directions = vec![OptimizationDirection::Minimize, OptimizationDirection::Minimize];

        let a = FitnessVector::new(vec![1.0, 9.0]);
        let b = FitnessVector::new(vec![2.0, 0.0]);

        // First objective dominates regardless of the second
        assert!(a.is_better_than(&b, &directions));
        assert!(!b.is_better_than(&a, &directions));

        // Tie on the first objective is broken by the second
        let c = FitnessVector::new(vec![1.0, 3.0]);
        assert!(c.is_better_than(&a, &directions));
    }

    #[test]
    fn test_mixed_directions() {
        let directions = vec![OptimizationDirection::Maximize, OptimizationDirection::Minimize];

        let a = FitnessVector::new(vec![10.0, 5.0]);
        let b = FitnessVector::new(vec![10.0, 7.0]);
        let c = FitnessVector::new(vec![11.0, 100.0]);

        assert!(a.is_better_than(&b, &directions));
        assert!(c.is_better_than(&a, &directions));
    }

    #[test]
    fn test_sentinel_ranks_last() {
        let directions = vec![OptimizationDirection::Minimize, OptimizationDirection::Maximize];
        let worst = FitnessVector::worst(&directions);

        assert_eq!(worst.values, vec![f64::INFINITY, f64::NEG_INFINITY]);
        assert!(worst.is_worst(&directions));

        let real = FitnessVector::new(vec![1e12, -1e12]);
        assert!(real.is_better_than(&worst, &directions));
        assert_eq!(worst.compare(&worst, &directions), Ordering::Equal);
    }

    #[test]
    fn test_nan_ranks_below_everything() {
        let directions = vec![OptimizationDirection::Minimize];
        let nan = FitnessVector::new(vec![f64::NAN]);
        let worst = FitnessVector::worst(&directions);

        assert_eq!(nan.compare(&worst, &directions), Ordering::Equal);
        assert!(FitnessVector::new(vec![5.0]).is_better_than(&nan, &directions));
    }

    #[test]
    fn test_extract_objectives_missing_metric() {
        let mut metrics = HashMap::new();
        metrics.insert("rmse".to_string(), 2.5);

        let objectives = vec![ObjectiveConfig::minimize("rmse"), ObjectiveConfig::minimize("mape")];
        let fitness = extract_objectives(&metrics, &objectives);

        assert_eq!(fitness.values, vec![2.5, f64::INFINITY]);
    }
}
