pub mod genome;
pub mod schema;
pub mod fitness;
pub mod float_serde;
pub mod population;
pub mod operators;
pub mod hall_of_fame;
pub mod stats;
pub mod progress;
pub mod evolution_engine;

pub use genome::Genome;
pub use schema::{GeneKind, GeneSpec, GenomeSchema};
pub use fitness::{FitnessVector, ObjectiveConfig, OptimizationDirection};
pub use population::{initialize_population, Individual};
pub use hall_of_fame::{EliteIndividual, HallOfFame};
pub use stats::{GenerationStats, ObjectiveStats};
pub use evolution_engine::{EvolutionEngine, EvolutionOutcome, ProgressCallback};
pub use progress::{
    ChannelProgressCallback, ConsoleProgressCallback, ProgressMessage, SilentProgressCallback,
};
