use evoforecast::engines::generation::operators::{crossover, mutate, tournament_selection};
use evoforecast::engines::generation::{
    initialize_population, FitnessVector, GeneKind, GenomeSchema, Individual,
    OptimizationDirection,
};
use evoforecast::types::ModelFamily;
use evoforecast::EvoForecastError;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn scored(value: f64) -> Individual {
    Individual::with_fitness(vec![value], FitnessVector::new(vec![value]))
}

#[test]
fn test_crossover_single_gene_is_identity() {
    let mut rng = StdRng::seed_from_u64(1);
    let p1 = vec![0.25];
    let p2 = vec![0.75];

    for _ in 0..50 {
        let (c1, c2) = crossover(&p1, &p2, &mut rng);
        assert_eq!(c1, p1);
        assert_eq!(c2, p2);
    }
}

#[test]
fn test_crossover_swaps_one_contiguous_segment() {
    let mut rng = StdRng::seed_from_u64(2);
    let p1 = vec![0.0; 6];
    let p2 = vec![1.0; 6];

    for _ in 0..200 {
        let (c1, c2) = crossover(&p1, &p2, &mut rng);
        assert_eq!(c1.len(), 6);

        // Children are complementary at every position
        for (a, b) in c1.iter().zip(&c2) {
            assert_eq!(a + b, 1.0);
        }

        // Exactly one run of genes came from the other parent
        let swapped: Vec<usize> = (0..6).filter(|&i| c1[i] == 1.0).collect();
        assert!(!swapped.is_empty());
        assert!(swapped.windows(2).all(|w| w[1] == w[0] + 1));
        assert!(swapped[0] >= 1, "the first gene never moves");
    }
}

#[test]
fn test_mutation_stays_in_domain() {
    let mut rng = StdRng::seed_from_u64(3);

    for family in ModelFamily::ALL {
        let schema = GenomeSchema::for_family(family);
        let mut genome = schema.random_genome(&mut rng);

        for _ in 0..200 {
            // Large sigma forces frequent clamping
            mutate(&mut genome, &schema, 50.0, 1.0, &mut rng).unwrap();

            for (spec, value) in schema.genes().iter().zip(&genome) {
                assert!(*value >= spec.low && *value <= spec.high);
                match &spec.kind {
                    GeneKind::Integer => assert_eq!(value.fract(), 0.0),
                    GeneKind::Discrete(choices) => assert!(choices.contains(value)),
                    GeneKind::Continuous => {}
                }
            }
        }
    }
}

#[test]
fn test_mutation_with_zero_gene_rate_is_noop() {
    let mut rng = StdRng::seed_from_u64(4);
    let schema = GenomeSchema::for_family(ModelFamily::SequenceModel);
    let original = schema.random_genome(&mut rng);

    let mut genome = original.clone();
    mutate(&mut genome, &schema, 1.0, 0.0, &mut rng).unwrap();

    assert_eq!(genome, original);
}

#[test]
fn test_mutation_rejects_foreign_genome() {
    let mut rng = StdRng::seed_from_u64(5);
    let schema = GenomeSchema::for_family(ModelFamily::Autoregressive);
    let mut genome = vec![1.0];

    let result = mutate(&mut genome, &schema, 1.0, 1.0, &mut rng);
    assert!(matches!(result, Err(EvoForecastError::Schema(_))));
}

#[test]
fn test_tournament_returns_members_of_population() {
    let mut rng = StdRng::seed_from_u64(6);
    let population: Vec<Individual> = (0..7).map(|i| scored(i as f64)).collect();
    let directions = [OptimizationDirection::Minimize];

    for n in [1, 7, 20] {
        let selected = tournament_selection(&population, n, 3, &directions, &mut rng).unwrap();
        assert_eq!(selected.len(), n);
        for ind in &selected {
            assert!(population.contains(ind));
        }
    }
}

#[test]
fn test_tournament_size_one_is_uniform_draw() {
    let mut rng = StdRng::seed_from_u64(7);
    let population: Vec<Individual> = (0..4).map(|i| scored(i as f64)).collect();
    let directions = [OptimizationDirection::Minimize];

    let selected = tournament_selection(&population, 400, 1, &directions, &mut rng).unwrap();

    // The worst individual still gets picked without selection pressure
    assert!(selected.iter().any(|ind| ind.genome == vec![3.0]));
}

#[test]
fn test_large_tournament_favours_best() {
    let mut rng = StdRng::seed_from_u64(8);
    let population: Vec<Individual> = (0..5).map(|i| scored(i as f64)).collect();
    let directions = [OptimizationDirection::Minimize];

    let selected = tournament_selection(&population, 100, 50, &directions, &mut rng).unwrap();
    let best_count = selected.iter().filter(|ind| ind.genome == vec![0.0]).count();

    assert!(best_count > 90);
}

#[test]
fn test_tournament_prefers_evaluated_individuals() {
    let mut rng = StdRng::seed_from_u64(9);
    let population = vec![Individual::new(vec![9.0]), scored(5.0)];
    let directions = [OptimizationDirection::Minimize];

    let selected = tournament_selection(&population, 50, 30, &directions, &mut rng).unwrap();
    assert!(selected.iter().all(|ind| ind.is_valid()));
}

#[test]
fn test_tournament_rejects_bad_arguments() {
    let mut rng = StdRng::seed_from_u64(10);
    let directions = [OptimizationDirection::Minimize];
    let population = vec![scored(1.0)];

    let zero_k = tournament_selection(&population, 3, 0, &directions, &mut rng);
    assert!(matches!(zero_k, Err(EvoForecastError::Configuration(_))));

    let empty = tournament_selection(&[], 3, 2, &directions, &mut rng);
    assert!(matches!(empty, Err(EvoForecastError::Configuration(_))));
}

#[test]
fn test_initial_population_size_and_errors() {
    let mut rng = StdRng::seed_from_u64(11);
    let schema = GenomeSchema::for_family(ModelFamily::Ridge);

    let population = initialize_population(&schema, 12, &mut rng).unwrap();
    assert_eq!(population.len(), 12);
    assert!(population.iter().all(|ind| !ind.is_valid()));

    let empty = initialize_population(&schema, 0, &mut rng);
    assert!(matches!(empty, Err(EvoForecastError::Configuration(_))));
}
