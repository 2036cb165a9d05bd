use super::traits::ConfigSection;
use crate::engines::generation::fitness::ObjectiveConfig;
use crate::engines::metrics::AccuracyMetrics;
use crate::error::EvoForecastError;
use crate::types::ModelFamily;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub families: Vec<ModelFamily>,
    pub data_path: Option<String>,
    pub column: String,
    pub objectives: Vec<ObjectiveConfig>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            families: ModelFamily::ALL.to_vec(),
            data_path: None,
            column: "value".to_string(),
            objectives: vec![
                ObjectiveConfig::minimize("rmse"),
                ObjectiveConfig::minimize("mae"),
            ],
        }
    }
}

impl ConfigSection for SearchConfig {
    fn section_name() -> &'static str {
        "search"
    }

    fn validate(&self) -> Result<(), EvoForecastError> {
        if self.families.is_empty() {
            return Err(EvoForecastError::Configuration(
                "At least one model family is required".to_string()
            ));
        }
        let unique: HashSet<_> = self.families.iter().collect();
        if unique.len() != self.families.len() {
            return Err(EvoForecastError::Configuration(
                "Model families must not repeat".to_string()
            ));
        }
        if self.objectives.is_empty() {
            return Err(EvoForecastError::Configuration(
                "At least one objective is required".to_string()
            ));
        }
        for objective in &self.objectives {
            if !AccuracyMetrics::NAMES.contains(&objective.metric_name.as_str()) {
                return Err(EvoForecastError::Configuration(format!(
                    "Unknown objective metric '{}'",
                    objective.metric_name
                )));
            }
        }
        if self.column.is_empty() {
            return Err(EvoForecastError::Configuration(
                "Data column name must not be empty".to_string()
            ));
        }
        Ok(())
    }
}
