use evoforecast::config::{AppConfig, ConfigManager, EvolutionConfig, WalkForwardConfig};
use evoforecast::engines::generation::{ObjectiveConfig, OptimizationDirection};
use evoforecast::types::ModelFamily;
use evoforecast::EvoForecastError;
use std::path::PathBuf;
use std::time::Duration;

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("evoforecast_{}_{}.toml", name, std::process::id()))
}

#[test]
fn test_defaults_are_valid() {
    let config = AppConfig::default();
    assert!(config.validate().is_ok());

    assert_eq!(config.evolution.population_size, 20);
    assert_eq!(config.evolution.num_generations, 10);
    assert_eq!(config.evolution.seed, Some(42));
    assert_eq!(config.walk_forward.refit_every, 5);
    assert_eq!(config.search.families, ModelFamily::ALL.to_vec());
    assert_eq!(config.search.objectives[0].metric_name, "rmse");
    assert_eq!(config.search.objectives[0].direction, OptimizationDirection::Minimize);
}

#[test]
fn test_update_rejects_invalid_values() {
    let manager = ConfigManager::new();

    let result = manager.update(|c| c.evolution.mutation_rate = -0.1);
    assert!(matches!(result, Err(EvoForecastError::Configuration(_))));
    // Stored config is untouched
    assert_eq!(manager.get().evolution.mutation_rate, 0.2);

    assert!(manager.update(|c| c.walk_forward.refit_every = 0).is_err());
    assert!(manager.update(|c| c.walk_forward.timeout_secs = Some(-1.0)).is_err());
    assert!(manager.update(|c| c.search.families.clear()).is_err());
    assert!(manager
        .update(|c| c.search.families = vec![ModelFamily::Ridge, ModelFamily::Ridge])
        .is_err());
    assert!(manager
        .update(|c| c.search.objectives = vec![ObjectiveConfig::minimize("sharpe")])
        .is_err());

    manager
        .update(|c| c.evolution.population_size = 50)
        .unwrap();
    assert_eq!(manager.get().evolution.population_size, 50);
}

#[test]
fn test_toml_round_trip() {
    let path = temp_path("round_trip");
    let manager = ConfigManager::new();
    manager
        .update(|c| {
            c.evolution.seed = Some(7);
            c.evolution.parallel_evaluation = true;
            c.walk_forward.timeout_secs = Some(2.5);
            c.search.families = vec![ModelFamily::Autoregressive, ModelFamily::Ridge];
            c.search.objectives = vec![
                ObjectiveConfig::minimize("rmse"),
                ObjectiveConfig::maximize("mape"),
            ];
            c.search.data_path = Some("series.csv".to_string());
        })
        .unwrap();

    manager.save_to_file(&path).unwrap();

    let loaded = ConfigManager::new();
    loaded.load_from_file(&path).unwrap();
    let _ = std::fs::remove_file(&path);

    assert_eq!(loaded.get(), manager.get());
    assert_eq!(
        loaded.get().walk_forward.timeout(),
        Some(Duration::from_secs_f64(2.5))
    );
}

#[test]
fn test_partial_file_falls_back_to_defaults() {
    let path = temp_path("partial");
    std::fs::write(
        &path,
        "[evolution]\npopulation_size = 8\n\n[search]\nfamilies = [\"ridge\"]\n",
    )
    .unwrap();

    let manager = ConfigManager::new();
    manager.load_from_file(&path).unwrap();
    let _ = std::fs::remove_file(&path);

    let config = manager.get();
    assert_eq!(config.evolution.population_size, 8);
    assert_eq!(config.evolution.tournament_size, EvolutionConfig::default().tournament_size);
    assert_eq!(config.walk_forward, WalkForwardConfig::default());
    assert_eq!(config.search.families, vec![ModelFamily::Ridge]);
}

#[test]
fn test_invalid_file_is_rejected() {
    let path = temp_path("invalid");
    std::fs::write(&path, "[evolution]\ncrossover_rate = 3.0\n").unwrap();

    let manager = ConfigManager::new();
    let result = manager.load_from_file(&path);
    let _ = std::fs::remove_file(&path);

    assert!(matches!(result, Err(EvoForecastError::Configuration(_))));
    assert_eq!(manager.get(), AppConfig::default());
}

#[test]
fn test_missing_file_is_configuration_error() {
    let manager = ConfigManager::new();
    let result = manager.load_from_file(temp_path("does_not_exist"));
    assert!(matches!(result, Err(EvoForecastError::Configuration(_))));
}

#[test]
fn test_environment_overrides_file() {
    let path = temp_path("layered");
    std::fs::write(
        &path,
        "[evolution]\npopulation_size = 8\nnum_generations = 3\n",
    )
    .unwrap();

    std::env::set_var("EVOFORECAST__EVOLUTION__NUM_GENERATIONS", "6");
    let manager = ConfigManager::new();
    let result = manager.load_layered(&path);
    std::env::remove_var("EVOFORECAST__EVOLUTION__NUM_GENERATIONS");
    let _ = std::fs::remove_file(&path);

    result.unwrap();
    let config = manager.get();
    assert_eq!(config.evolution.population_size, 8);
    assert_eq!(config.evolution.num_generations, 6);
}
