use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::{Result, ResultExt};
use crate::inspector::{ColumnOutlierSummary, TableInspector};
use crate::utils::{ColumnKind, dtype_label, missing_count};

// ============================================================================
// Report Types
// ============================================================================

/// Full inspection of one table, suitable for JSON output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InspectionReport {
    /// Timestamp when the report was generated
    pub generated_at: String,
    /// Where the table came from (e.g. an input file path)
    pub source: Option<String>,
    /// Table shape (rows, columns)
    pub shape: (usize, usize),
    /// Decimal places used for ratios
    pub ratio_precision: u32,
    /// Per-column findings, in table column order
    pub columns: Vec<ColumnReport>,
    /// Aggregate figures across all columns
    pub totals: ReportTotals,
}

/// Findings for a single column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnReport {
    pub name: String,
    /// Polars dtype label (`i64`, `str`, ...)
    pub dtype: String,
    pub kind: ColumnKind,
    pub missing: usize,
    pub outliers: ColumnOutlierSummary,
}

/// Aggregate figures for the whole table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportTotals {
    pub missing: usize,
    pub outliers: usize,
    /// Columns with at least one missing entry
    pub columns_with_missing: Vec<String>,
    /// Numeric columns with at least one outlier
    pub columns_with_outliers: Vec<String>,
}

impl InspectionReport {
    /// Run every inspection over the inspector's table and collect the results.
    pub fn build(inspector: &TableInspector<'_>, source: Option<&str>) -> Result<Self> {
        let data = inspector.data();
        let summaries = inspector.column_summaries()?;

        let mut columns = Vec::with_capacity(summaries.len());
        let mut totals = ReportTotals::default();

        for (col, summary) in data.get_columns().iter().zip(summaries) {
            let missing = missing_count(col.as_materialized_series())
                .context(format!("Counting missing values in '{}'", col.name()))?;

            totals.missing += missing;
            totals.outliers += summary.outliers();
            if missing > 0 {
                totals.columns_with_missing.push(summary.name.clone());
            }
            if summary.outliers() > 0 {
                totals.columns_with_outliers.push(summary.name.clone());
            }

            columns.push(ColumnReport {
                name: summary.name.clone(),
                dtype: dtype_label(col.dtype()),
                kind: summary.kind,
                missing,
                outliers: summary,
            });
        }

        Ok(Self {
            generated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            source: source.map(String::from),
            shape: data.shape(),
            ratio_precision: inspector.config().ratio_precision,
            columns,
            totals,
        })
    }

    pub fn column(&self, name: &str) -> Option<&ColumnReport> {
        self.columns.iter().find(|c| c.name == name)
    }
}

// ============================================================================
// Report Writer
// ============================================================================

/// Writes inspection reports as pretty JSON files.
pub struct ReportWriter {
    output_dir: PathBuf,
}

impl ReportWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Write `<output_dir>/<base_name>_quality_report.json`, creating the
    /// directory if needed. Returns the written path.
    pub fn write(&self, report: &InspectionReport, base_name: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir)?;

        let report_path = self
            .output_dir
            .join(format!("{}_quality_report.json", base_name));
        let mut file = File::create(&report_path)?;
        file.write_all(serde_json::to_string_pretty(report)?.as_bytes())?;

        info!("Report saved: {}", report_path.display());
        Ok(report_path)
    }
}
