//! Column type classification and missing-value helpers.

use polars::prelude::*;
use serde::{Deserialize, Serialize};

// =============================================================================
// Column Kinds
// =============================================================================

/// Logical type of a column, derived from its polars dtype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    /// Signed or unsigned integers
    Integer,
    /// Floating point numbers
    Float,
    /// String, categorical or enum values
    Text,
    /// Boolean values
    Boolean,
    /// Date, datetime, time or duration
    Temporal,
    /// Nested, binary, null or unknown types
    Other,
}

impl ColumnKind {
    /// Integer and float columns take part in outlier detection.
    #[inline]
    pub fn is_numeric(self) -> bool {
        matches!(self, ColumnKind::Integer | ColumnKind::Float)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ColumnKind::Integer => "integer",
            ColumnKind::Float => "float",
            ColumnKind::Text => "text",
            ColumnKind::Boolean => "boolean",
            ColumnKind::Temporal => "temporal",
            ColumnKind::Other => "other",
        }
    }
}

impl std::fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Check if a DataType is an integer type.
#[inline]
pub fn is_integer_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::Int128
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
    )
}

/// Check if a DataType is a floating point type.
#[inline]
pub fn is_float_dtype(dtype: &DataType) -> bool {
    matches!(dtype, DataType::Float32 | DataType::Float64)
}

/// Check if a DataType is numeric (integer or float).
#[inline]
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    is_integer_dtype(dtype) || is_float_dtype(dtype)
}

/// Check if a DataType is a temporal type.
#[inline]
pub fn is_temporal_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Datetime(_, _) | DataType::Date | DataType::Time | DataType::Duration(_)
    )
}

/// Get the kind of a DataType.
pub fn column_kind(dtype: &DataType) -> ColumnKind {
    if is_integer_dtype(dtype) {
        ColumnKind::Integer
    } else if is_float_dtype(dtype) {
        ColumnKind::Float
    } else if is_temporal_dtype(dtype) {
        ColumnKind::Temporal
    } else if matches!(dtype, DataType::Boolean) {
        ColumnKind::Boolean
    } else if matches!(
        dtype,
        DataType::String | DataType::Categorical(..) | DataType::Enum(..)
    ) {
        ColumnKind::Text
    } else {
        ColumnKind::Other
    }
}

/// Label describing a column's dtype, as polars prints it (`i64`, `str`, ...).
pub fn dtype_label(dtype: &DataType) -> String {
    dtype.to_string()
}

// =============================================================================
// Missing Values
// =============================================================================

/// Count missing entries: nulls, plus NaN for float columns.
pub fn missing_count(series: &Series) -> PolarsResult<usize> {
    let nulls = series.null_count();
    if !is_float_dtype(series.dtype()) {
        return Ok(nulls);
    }

    let floats = series.cast(&DataType::Float64)?;
    let nans = floats
        .f64()?
        .into_iter()
        .filter(|v| v.is_some_and(f64::is_nan))
        .count();

    Ok(nulls + nans)
}

/// Count non-missing entries.
pub fn present_count(series: &Series) -> PolarsResult<usize> {
    Ok(series.len() - missing_count(series)?)
}

/// Non-missing values of a numeric Series as f64, in row order.
pub fn numeric_values(series: &Series) -> PolarsResult<Vec<f64>> {
    let floats = series.cast(&DataType::Float64)?;
    Ok(floats
        .f64()?
        .into_iter()
        .flatten()
        .filter(|v| !v.is_nan())
        .collect())
}

// =============================================================================
// Tests
// =============================================================================
