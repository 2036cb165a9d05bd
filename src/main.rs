use anyhow::{bail, Context};
use evoforecast::config::ConfigManager;
use evoforecast::data::{CsvConnector, SimpleSplitter};
use evoforecast::engines::generation::ConsoleProgressCallback;
use evoforecast::engines::search::{ForecasterSet, SearchRunner};
use std::env;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let Some(config_path) = args.get(1) else {
        bail!("usage: evoforecast <config.toml> [report.json]");
    };
    let report_path = args
        .get(2)
        .map(|s| s.as_str())
        .unwrap_or("search_report.json");

    let manager = ConfigManager::new();
    manager
        .load_layered(config_path)
        .with_context(|| format!("loading config from {}", config_path))?;
    let config = manager.get();

    let Some(data_path) = config.search.data_path.clone() else {
        bail!("search.data_path is not set in {}", config_path);
    };

    let series = CsvConnector::load_series(&data_path, &config.search.column, None)
        .with_context(|| format!("loading series from {}", data_path))?;
    let split = SimpleSplitter::new(config.walk_forward.train_pct)
        .split(&series.values)
        .context("splitting series")?;

    log::info!(
        "Training on {} points, evaluating on {} held-out points",
        split.train.len(),
        split.horizon()
    );

    let runner = SearchRunner::new(config, ForecasterSet::default())?;
    let report = runner.run(&split, ConsoleProgressCallback)?;

    for family in &report.families {
        log::info!(
            "{:<22} {:?} fitness {:?}",
            family.family.to_string(),
            family.best_genes,
            family.fitness.values
        );
    }
    if let Some(best) = report.best_family() {
        log::info!("Best family overall: {}", best.family);
    }

    report
        .save_json(report_path)
        .with_context(|| format!("writing report to {}", report_path))?;
    log::info!("Report written to {}", report_path);

    Ok(())
}
