use crate::error::{EvoForecastError, Result};
use polars::prelude::*;

pub struct DataValidator;

impl DataValidator {
    /// Validate that the column exists and holds a numeric dtype
    pub fn validate_numeric_column(df: &DataFrame, column: &str) -> Result<()> {
        let columns = df.get_column_names();
        if !columns.iter().any(|col| col.as_str() == column) {
            return Err(EvoForecastError::DataLoading(format!(
                "Missing column '{}' (available: {:?})",
                column, columns
            )));
        }

        let series = df.column(column)?;
        if !matches!(
            series.dtype(),
            DataType::Float64
                | DataType::Float32
                | DataType::Int64
                | DataType::Int32
                | DataType::UInt64
                | DataType::UInt32
        ) {
            return Err(EvoForecastError::DataLoading(format!(
                "Column '{}' must be numeric, found {:?}",
                column,
                series.dtype()
            )));
        }

        Ok(())
    }

    /// Check for minimum required rows
    pub fn validate_minimum_rows(df: &DataFrame, min_rows: usize) -> Result<()> {
        if df.height() < min_rows {
            return Err(EvoForecastError::DataLoading(format!(
                "Insufficient data: {} rows, minimum {} required",
                df.height(),
                min_rows
            )));
        }
        Ok(())
    }

    /// Gaps would silently shift the time axis, so nulls are rejected
    pub fn reject_nulls(df: &DataFrame, column: &str) -> Result<()> {
        let null_count = df.column(column)?.null_count();
        if null_count > 0 {
            return Err(EvoForecastError::DataLoading(format!(
                "Column '{}' contains {} null values",
                column, null_count
            )));
        }
        Ok(())
    }
}
