//! Column type inspection and numeric extraction

use polars::prelude::*;

use crate::error::{Result, ValidationError};

/// Whether a dtype holds numbers (integers or floats)
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

/// Whether the named column exists in `df` with a numeric dtype
pub fn is_numeric_column(df: &DataFrame, name: &str) -> bool {
    df.column(name)
        .map(|col| is_numeric_dtype(col.dtype()))
        .unwrap_or(false)
}

/// Values of a column as `f64` with nulls and NaN removed.
///
/// Booleans become 0/1. Any non-null value that cannot be read as a number
/// is a computation error.
pub fn non_missing_values(column: &Column) -> Result<Vec<f64>> {
    let series = column
        .as_materialized_series()
        .strict_cast(&DataType::Float64)
        .map_err(|e| {
            ValidationError::computation(format!(
                "cannot read column '{}' ({}) as float: {}",
                column.name(),
                column.dtype(),
                e
            ))
        })?;
    let values = series
        .f64()
        .map_err(|e| ValidationError::computation(e.to_string()))?
        .into_iter()
        .flatten()
        .filter(|v| !v.is_nan())
        .collect();

    Ok(values)
}
