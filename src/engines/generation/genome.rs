/// Genome representation for hyperparameter search
///
/// A genome is a fixed-length sequence of real-valued genes. Each position is
/// bound to a named gene of a `GenomeSchema`, which declares its domain
/// (continuous, integer, or a discrete choice set) and valid range:
/// - Integer genes always hold integral values
/// - Discrete genes always hold one of their declared choices
/// - Every gene lies inside its declared bounds
///
/// # Operators
///
/// - **Crossover**: swaps genome segments by plain slicing
/// - **Mutation**: perturbs a gene, then the schema clamps and casts it
///
/// # Conversion
///
/// Use `GenomeSchema::decode()` to convert Genome -> ModelParams
///
/// # Example
///
/// ```
/// let genome: evoforecast::engines::generation::Genome = vec![2.0, 1.0, 0.0];
/// // With the autoregressive schema this decodes to ARIMA(2, 1, 0)
/// ```
pub type Genome = Vec<f64>;

/// Bitwise signature of a genome, used for deduplication
pub fn genome_signature(genome: &Genome) -> Vec<u64> {
    genome.iter().map(|g| g.to_bits()).collect()
}
