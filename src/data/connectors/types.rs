use serde::{Deserialize, Serialize};

/// Summary of a loaded univariate series
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesMetadata {
    pub file_path: String,
    pub column: String,
    pub num_rows: usize,
    pub value_range: (f64, f64), // (min, max)
    pub mean: f64,
}

/// Numeric series read from a data source
#[derive(Debug, Clone)]
pub struct LoadedSeries {
    pub values: Vec<f64>,
    pub metadata: SeriesMetadata,
}
