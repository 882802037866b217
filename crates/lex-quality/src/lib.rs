//! Data Quality Inspection Library
//!
//! Lightweight diagnostics for an in-memory Polars [`DataFrame`]: column data
//! types, missing-value counts, and outlier statistics computed with the
//! Interquartile Range (IQR) method.
//!
//! # Overview
//!
//! - **Data Types**: one dtype label per column
//! - **Missing Values**: null (and float `NaN`) counts per column
//! - **Outliers**: values below `Q1 - 1.5·IQR` or above `Q3 + 1.5·IQR`,
//!   counted per numeric column with ratios over the non-missing values
//! - **Reports**: everything above gathered into one JSON-serializable value
//!
//! The inspector borrows the table and never mutates it. Loading data is the
//! caller's job.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use lex_quality::TableInspector;
//! use polars::prelude::*;
//!
//! let df = df!(
//!     "price" => [1.0, 2.0, 3.0, 4.0, 5.0, 100.0],
//!     "city" => ["a", "b", "c", "d", "e", "f"],
//! )?;
//!
//! let inspector = TableInspector::new(&df);
//! println!("{}", inspector.get_data_types()?);
//! println!("{}", inspector.count_missing_data_issues()?);
//!
//! let counts = inspector.calculate_outlier_count("price")?;
//! assert_eq!((counts.lower, counts.upper), (0, 1));
//!
//! // Rows follow OutlierStatistic::ALL: data_points, outliers, ...
//! println!("{}", inspector.count_outliers()?);
//! ```
//!
//! # Configuration
//!
//! ```rust,ignore
//! use lex_quality::{InspectorConfig, TableInspector};
//!
//! let config = InspectorConfig::builder()
//!     .ratio_precision(4)
//!     .include_examples(5)
//!     .build()?;
//! let inspector = TableInspector::with_config(&df, config);
//! ```
//!
//! [`DataFrame`]: polars::prelude::DataFrame

pub mod config;
pub mod error;
pub mod inspector;
pub mod reporting;
pub mod stats;
pub mod utils;

// Re-exports for convenient access
pub use config::{ConfigValidationError, InspectorConfig, InspectorConfigBuilder};
pub use error::{QualityError, Result as QualityResult, ResultExt};
pub use inspector::{ColumnOutlierSummary, OutlierStatistic, TableInspector};
pub use reporting::{ColumnReport, InspectionReport, ReportTotals, ReportWriter};
pub use stats::{IQR_MULTIPLIER, OutlierBounds, OutlierCounts};
pub use utils::{ColumnKind, column_kind, dtype_label, is_numeric_dtype};
