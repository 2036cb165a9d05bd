use crate::error::{EvoForecastError, Result};
use polars::prelude::*;
use std::path::Path;
use super::{
    types::{LoadedSeries, SeriesMetadata},
    validator::DataValidator,
};

pub struct CsvConnector;

impl CsvConnector {
    /// Load CSV file into DataFrame
    pub fn load<P: AsRef<Path>>(path: P) -> Result<DataFrame> {
        let df = CsvReadOptions::default()
            .with_has_header(true)
            .try_into_reader_with_file_path(Some(path.as_ref().to_path_buf()))?
            .finish()
            .map_err(|e| EvoForecastError::DataLoading(format!("Failed to read CSV: {}", e)))?;

        Ok(df)
    }

    /// Load one numeric column as an ordered series
    pub fn load_series<P: AsRef<Path>>(
        path: P,
        column: &str,
        min_rows: Option<usize>,
    ) -> Result<LoadedSeries> {
        let df = Self::load(&path)?;

        // At least two points are needed for any train/held-out split
        DataValidator::validate_minimum_rows(&df, min_rows.unwrap_or(2))?;

        let values = Self::series_from_frame(&df, column)?;
        let metadata = Self::create_metadata(&path, column, &values);

        log::info!(
            "Loaded {} values from column '{}' of {}",
            metadata.num_rows,
            column,
            metadata.file_path
        );

        Ok(LoadedSeries { values, metadata })
    }

    /// Extract a validated, null-free f64 column
    pub fn series_from_frame(df: &DataFrame, column: &str) -> Result<Vec<f64>> {
        DataValidator::validate_numeric_column(df, column)?;
        DataValidator::reject_nulls(df, column)?;

        let series = df.column(column)?.cast(&DataType::Float64)?;
        let values: Vec<f64> = series.f64()?.into_no_null_iter().collect();

        if let Some(pos) = values.iter().position(|v| !v.is_finite()) {
            return Err(EvoForecastError::DataLoading(format!(
                "Column '{}' has a non-finite value at row {}",
                column, pos
            )));
        }

        Ok(values)
    }

    pub fn create_metadata<P: AsRef<Path>>(
        path: P,
        column: &str,
        values: &[f64],
    ) -> SeriesMetadata {
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mean = if values.is_empty() {
            0.0
        } else {
            values.iter().sum::<f64>() / values.len() as f64
        };

        SeriesMetadata {
            file_path: path.as_ref().to_string_lossy().to_string(),
            column: column.to_string(),
            num_rows: values.len(),
            value_range: (min, max),
            mean,
        }
    }
}
