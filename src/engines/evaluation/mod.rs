pub mod forecaster;
pub mod walk_forward;
pub mod evaluator;

pub use forecaster::{EvaluationFailure, FittedModel, Forecaster, WindowedForecaster};
pub use walk_forward::WalkForwardProtocol;
pub use evaluator::{FitnessEvaluator, ForecasterBackend};

use crate::engines::generation::{FitnessVector, Genome, ObjectiveConfig};

/// Maps a genome to its fitness vector; must never fail
pub trait FitnessFunction: Sync {
    fn objectives(&self) -> &[ObjectiveConfig];
    fn evaluate(&self, genome: &Genome) -> FitnessVector;
}

impl<T: FitnessFunction + ?Sized> FitnessFunction for &T {
    fn objectives(&self) -> &[ObjectiveConfig] {
        (**self).objectives()
    }

    fn evaluate(&self, genome: &Genome) -> FitnessVector {
        (**self).evaluate(genome)
    }
}
