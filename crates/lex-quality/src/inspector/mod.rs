//! Read-only data quality queries over a borrowed polars DataFrame.
//!
//! [`TableInspector`] reports column dtypes, missing-value counts, and
//! outliers found with the 1.5 × IQR rule. Every query recomputes from the
//! current table contents; nothing is cached and the table is never mutated.

mod summary;

pub use summary::{ColumnOutlierSummary, OutlierStatistic};

use polars::prelude::*;
use std::fmt;
use tracing::{debug, trace};

use crate::config::InspectorConfig;
use crate::error::{QualityError, Result, ResultExt};
use crate::stats::{OutlierBounds, OutlierCounts};
use crate::utils::{
    ColumnKind, column_kind, dtype_label, missing_count, numeric_values, present_count,
};

/// Data quality inspector wrapping a single table by reference.
#[derive(Debug, Clone)]
pub struct TableInspector<'a> {
    data: &'a DataFrame,
    config: InspectorConfig,
}

impl<'a> TableInspector<'a> {
    /// Wrap a table with the default configuration.
    ///
    /// No validation is performed; empty tables are accepted.
    pub fn new(data: &'a DataFrame) -> Self {
        Self::with_config(data, InspectorConfig::default())
    }

    /// Wrap a table with a custom configuration.
    pub fn with_config(data: &'a DataFrame, config: InspectorConfig) -> Self {
        Self { data, config }
    }

    /// The wrapped table.
    pub fn data(&self) -> &'a DataFrame {
        self.data
    }

    pub fn config(&self) -> &InspectorConfig {
        &self.config
    }

    /// Single-row table mapping each column name to its dtype label.
    pub fn get_data_types(&self) -> Result<DataFrame> {
        trace!("Collecting data types for {} columns", self.data.width());

        let columns = self
            .data
            .get_columns()
            .iter()
            .map(|col| {
                let label = dtype_label(col.dtype());
                Series::new(col.name().clone(), [label.as_str()]).into_column()
            })
            .collect();

        Self::frame_from_columns(columns)
    }

    /// Single-row table mapping each column name to its missing-value count.
    pub fn count_missing_data_issues(&self) -> Result<DataFrame> {
        trace!("Counting missing values for {} columns", self.data.width());

        let columns = self
            .data
            .get_columns()
            .iter()
            .map(|col| {
                let missing = missing_count(col.as_materialized_series())? as u64;
                Ok(Series::new(col.name().clone(), [missing]).into_column())
            })
            .collect::<Result<Vec<_>>>()?;

        Self::frame_from_columns(columns)
    }

    /// Quartiles and IQR limits of a numeric column.
    ///
    /// Returns `Ok(None)` if the column has no non-missing values.
    ///
    /// # Errors
    ///
    /// [`QualityError::ColumnNotFound`] for an unknown column and
    /// [`QualityError::NonNumericColumn`] for a non-numeric one.
    pub fn outlier_bounds(&self, column: &str) -> Result<Option<OutlierBounds>> {
        let values = self.numeric_column_values(column)?;
        let bounds = OutlierBounds::from_values(&values);

        if let Some(b) = &bounds {
            debug!(
                "Column '{}': q1={}, q3={}, iqr={}, limits=[{}, {}]",
                column, b.q1, b.q3, b.iqr, b.lower_limit, b.upper_limit
            );
        } else {
            debug!("Column '{}' has no values to derive quartiles from", column);
        }

        Ok(bounds)
    }

    /// Count lower and upper IQR outliers in a numeric column.
    ///
    /// Missing values are excluded from both the quartiles and the counts.
    /// A column without values yields zero outliers.
    ///
    /// # Errors
    ///
    /// Same as [`TableInspector::outlier_bounds`].
    pub fn calculate_outlier_count(&self, column: &str) -> Result<OutlierCounts> {
        let values = self.numeric_column_values(column)?;
        let counts = OutlierBounds::from_values(&values)
            .map(|b| b.count(&values))
            .unwrap_or_default();

        debug!(
            "Column '{}': {} lower, {} upper outliers",
            column, counts.lower, counts.upper
        );
        Ok(counts)
    }

    /// Ordered `(name, kind)` for every column.
    pub fn column_kinds(&self) -> Vec<(String, ColumnKind)> {
        self.data
            .get_columns()
            .iter()
            .map(|col| (col.name().to_string(), column_kind(col.dtype())))
            .collect()
    }

    /// Outlier figures for every column, in table column order.
    pub fn column_summaries(&self) -> Result<Vec<ColumnOutlierSummary>> {
        self.data
            .get_columns()
            .iter()
            .map(|col| self.summarize_column(col))
            .collect()
    }

    /// Outlier statistics table: one row per [`OutlierStatistic`] (in
    /// [`OutlierStatistic::ALL`] order), one `Float64` column per table column.
    ///
    /// Non-numeric columns report only `data_points`; all other rows are 0.
    pub fn count_outliers(&self) -> Result<DataFrame> {
        let summaries = self.column_summaries()?;

        let total: usize = summaries.iter().map(ColumnOutlierSummary::outliers).sum();
        debug!("Found {} outliers across {} columns", total, summaries.len());

        let columns = summaries
            .iter()
            .map(|s| Series::new(s.name.as_str().into(), s.values()).into_column())
            .collect();

        Self::frame_from_columns(columns)
    }

    fn summarize_column(&self, col: &Column) -> Result<ColumnOutlierSummary> {
        let name = col.name().to_string();
        let kind = column_kind(col.dtype());
        let series = col.as_materialized_series();

        if !kind.is_numeric() {
            let data_points =
                present_count(series).context(format!("Counting values in '{}'", name))?;
            return Ok(ColumnOutlierSummary::non_numeric(name, kind, data_points));
        }

        let values = numeric_values(series).context(format!("Reading values of '{}'", name))?;
        Ok(ColumnOutlierSummary::numeric(
            name,
            kind,
            &values,
            self.config.ratio_precision,
            self.config.include_examples,
        ))
    }

    fn numeric_column_values(&self, column: &str) -> Result<Vec<f64>> {
        let col = self
            .data
            .column(column)
            .map_err(|_| QualityError::ColumnNotFound(column.to_string()))?;

        if !column_kind(col.dtype()).is_numeric() {
            return Err(QualityError::NonNumericColumn {
                column: column.to_string(),
                dtype: dtype_label(col.dtype()),
            });
        }

        Ok(numeric_values(col.as_materialized_series())?)
    }

    /// Assemble result columns; no columns yields an empty frame.
    fn frame_from_columns(columns: Vec<Column>) -> Result<DataFrame> {
        if columns.is_empty() {
            return Ok(DataFrame::empty());
        }
        Ok(DataFrame::new(columns)?)
    }
}

impl fmt::Display for TableInspector<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self
            .data
            .get_column_names()
            .into_iter()
            .map(|n| n.as_str())
            .collect();
        write!(f, "TableInspector(columns=[{}])", names.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn mixed_frame() -> DataFrame {
        df!(
            "id" => [1i64, 2, 3, 4, 5, 6],
            "price" => [1.0, 2.0, 3.0, 4.0, 5.0, 100.0],
            "city" => ["a", "b", "c", "d", "e", "f"],
            "flag" => [true, false, true, true, false, true],
        )
        .unwrap()
    }

    fn cell_f64(df: &DataFrame, column: &str, statistic: OutlierStatistic) -> f64 {
        df.column(column)
            .unwrap()
            .get(statistic.row_index())
            .unwrap()
            .try_extract::<f64>()
            .unwrap()
    }

    #[test]
    fn test_get_data_types() {
        let df = mixed_frame();
        let types = TableInspector::new(&df).get_data_types().unwrap();

        assert_eq!(types.height(), 1);
        assert_eq!(
            types.get_column_names_str(),
            vec!["id", "price", "city", "flag"]
        );
        let label = |name: &str| {
            types
                .column(name)
                .unwrap()
                .as_materialized_series()
                .str()
                .unwrap()
                .get(0)
                .unwrap()
                .to_string()
        };
        assert_eq!(label("id"), "i64");
        assert_eq!(label("price"), "f64");
        assert_eq!(label("city"), "str");
        assert_eq!(label("flag"), "bool");
    }

    #[test]
    fn test_count_missing_data_issues() {
        let df = df!(
            "a" => [Some(1.0), None, Some(f64::NAN)],
            "b" => [Some("x"), Some("y"), None],
            "c" => [1i32, 2, 3],
        )
        .unwrap();
        let missing = TableInspector::new(&df).count_missing_data_issues().unwrap();

        assert_eq!(missing.height(), 1);
        let count = |name: &str| {
            missing
                .column(name)
                .unwrap()
                .as_materialized_series()
                .u64()
                .unwrap()
                .get(0)
                .unwrap()
        };
        assert_eq!(count("a"), 2);
        assert_eq!(count("b"), 1);
        assert_eq!(count("c"), 0);
    }

    #[test]
    fn test_calculate_outlier_count_scenario() {
        let df = mixed_frame();
        let inspector = TableInspector::new(&df);

        let counts = inspector.calculate_outlier_count("price").unwrap();
        assert_eq!(counts, OutlierCounts { lower: 0, upper: 1 });

        let bounds = inspector.outlier_bounds("price").unwrap().unwrap();
        assert_eq!(bounds.q1, 2.25);
        assert_eq!(bounds.q3, 4.75);
        assert_eq!(bounds.lower_limit, -1.5);
        assert_eq!(bounds.upper_limit, 8.5);
    }

    #[test]
    fn test_calculate_outlier_count_zero_variance() {
        let df = df!("v" => [10i64, 10, 10, 10]).unwrap();
        let counts = TableInspector::new(&df).calculate_outlier_count("v").unwrap();
        assert_eq!(counts.total(), 0);
    }

    #[test]
    fn test_calculate_outlier_count_all_missing() {
        let df = df!("v" => [None::<f64>, None, None]).unwrap();
        let inspector = TableInspector::new(&df);
        assert_eq!(inspector.calculate_outlier_count("v").unwrap().total(), 0);
        assert!(inspector.outlier_bounds("v").unwrap().is_none());
    }

    #[test]
    fn test_calculate_outlier_count_unknown_column() {
        let df = mixed_frame();
        let err = TableInspector::new(&df)
            .calculate_outlier_count("missing")
            .unwrap_err();
        assert!(matches!(err, QualityError::ColumnNotFound(ref c) if c == "missing"));
    }

    #[test]
    fn test_calculate_outlier_count_non_numeric() {
        let df = mixed_frame();
        let inspector = TableInspector::new(&df);

        let err = inspector.calculate_outlier_count("city").unwrap_err();
        assert_eq!(err.error_code(), "NON_NUMERIC_COLUMN");
        let err = inspector.calculate_outlier_count("flag").unwrap_err();
        assert_eq!(err.error_code(), "NON_NUMERIC_COLUMN");
    }

    #[test]
    fn test_count_outliers_shape() {
        let df = mixed_frame();
        let table = TableInspector::new(&df).count_outliers().unwrap();

        assert_eq!(table.height(), OutlierStatistic::ALL.len());
        assert_eq!(
            table.get_column_names_str(),
            vec!["id", "price", "city", "flag"]
        );
        for col in table.get_columns() {
            assert_eq!(col.dtype(), &DataType::Float64);
        }
    }

    #[test]
    fn test_count_outliers_numeric_column() {
        let df = mixed_frame();
        let table = TableInspector::new(&df).count_outliers().unwrap();

        assert_eq!(cell_f64(&table, "price", OutlierStatistic::DataPoints), 6.0);
        assert_eq!(cell_f64(&table, "price", OutlierStatistic::Outliers), 1.0);
        assert_eq!(cell_f64(&table, "price", OutlierStatistic::UpperOutliers), 1.0);
        assert_eq!(cell_f64(&table, "price", OutlierStatistic::LowerOutliers), 0.0);
        assert_eq!(cell_f64(&table, "price", OutlierStatistic::RatioOutliers), 0.167);
        assert_eq!(
            cell_f64(&table, "price", OutlierStatistic::RatioUpperOutliers),
            0.167
        );
        assert_eq!(
            cell_f64(&table, "price", OutlierStatistic::RatioLowerOutliers),
            0.0
        );
        assert_eq!(cell_f64(&table, "id", OutlierStatistic::Outliers), 0.0);
    }

    #[test]
    fn test_count_outliers_non_numeric_columns_are_zero() {
        let df = df!(
            "city" => [Some("a"), None, Some("zzzzzzzz"), Some("b")],
            "flag" => [Some(true), Some(false), None, None],
        )
        .unwrap();
        let table = TableInspector::new(&df).count_outliers().unwrap();

        assert_eq!(cell_f64(&table, "city", OutlierStatistic::DataPoints), 3.0);
        assert_eq!(cell_f64(&table, "flag", OutlierStatistic::DataPoints), 2.0);
        for name in ["city", "flag"] {
            for statistic in &OutlierStatistic::ALL[1..] {
                assert_eq!(cell_f64(&table, name, *statistic), 0.0);
            }
        }
    }

    #[test]
    fn test_count_outliers_with_missing_values() {
        let df = df!("v" => [Some(1.0), None, Some(2.0), None, Some(3.0)]).unwrap();
        let table = TableInspector::new(&df).count_outliers().unwrap();

        assert_eq!(cell_f64(&table, "v", OutlierStatistic::DataPoints), 3.0);
        assert_eq!(cell_f64(&table, "v", OutlierStatistic::Outliers), 0.0);
        for statistic in &OutlierStatistic::ALL[4..] {
            assert_eq!(cell_f64(&table, "v", *statistic), 0.0);
        }
    }

    #[test]
    fn test_count_outliers_all_missing_numeric() {
        let df = df!("v" => [None::<f64>, None]).unwrap();
        let table = TableInspector::new(&df).count_outliers().unwrap();
        assert_eq!(
            TableInspector::new(&df).column_summaries().unwrap()[0].values(),
            vec![0.0; 7]
        );
        assert_eq!(cell_f64(&table, "v", OutlierStatistic::RatioOutliers), 0.0);
    }

    #[test]
    fn test_empty_table() {
        let df = DataFrame::empty();
        let inspector = TableInspector::new(&df);

        assert_eq!(inspector.get_data_types().unwrap().width(), 0);
        assert_eq!(inspector.count_missing_data_issues().unwrap().width(), 0);
        assert_eq!(inspector.count_outliers().unwrap().width(), 0);
        assert!(inspector.column_summaries().unwrap().is_empty());
    }

    #[test]
    fn test_zero_row_table() {
        let df = DataFrame::new(vec![
            Series::new_empty("x".into(), &DataType::Float64).into_column(),
            Series::new_empty("s".into(), &DataType::String).into_column(),
        ])
        .unwrap();
        let inspector = TableInspector::new(&df);

        assert_eq!(inspector.get_data_types().unwrap().height(), 1);
        let table = inspector.count_outliers().unwrap();
        for name in ["x", "s"] {
            for statistic in OutlierStatistic::ALL {
                assert_eq!(cell_f64(&table, name, statistic), 0.0);
            }
        }
    }

    #[test]
    fn test_ratio_precision_from_config() {
        let df = mixed_frame();
        let config = InspectorConfig::builder().ratio_precision(1).build().unwrap();
        let table = TableInspector::with_config(&df, config)
            .count_outliers()
            .unwrap();
        assert_eq!(cell_f64(&table, "price", OutlierStatistic::RatioOutliers), 0.2);
    }

    #[test]
    fn test_ratio_ties_round_to_even() {
        let mut values: Vec<f64> = (1..=15).map(f64::from).collect();
        values.push(1000.0);
        let df = df!("x" => values).unwrap();
        let table = TableInspector::new(&df).count_outliers().unwrap();

        assert_eq!(cell_f64(&table, "x", OutlierStatistic::DataPoints), 16.0);
        assert_eq!(cell_f64(&table, "x", OutlierStatistic::UpperOutliers), 1.0);
        // 1/16 = 0.0625 sits exactly between 0.062 and 0.063
        assert_eq!(cell_f64(&table, "x", OutlierStatistic::RatioOutliers), 0.062);
        assert_eq!(
            cell_f64(&table, "x", OutlierStatistic::RatioUpperOutliers),
            0.062
        );
    }

    #[test]
    fn test_single_and_aggregate_agree() {
        let df = df!(
            "a" => [-40i64, 1, 2, 3, 4, 5, 6, 90],
            "b" => [0.5, 0.6, 0.55, 0.52, 9.0, 0.58, 0.51, 0.57],
        )
        .unwrap();
        let inspector = TableInspector::new(&df);
        let table = inspector.count_outliers().unwrap();

        for name in ["a", "b"] {
            let counts = inspector.calculate_outlier_count(name).unwrap();
            assert_eq!(
                cell_f64(&table, name, OutlierStatistic::Outliers),
                counts.total() as f64
            );
            assert_eq!(
                cell_f64(&table, name, OutlierStatistic::LowerOutliers),
                counts.lower as f64
            );
        }
    }

    #[test]
    fn test_idempotent() {
        let df = mixed_frame();
        let inspector = TableInspector::new(&df);
        assert!(
            inspector
                .count_outliers()
                .unwrap()
                .equals(&inspector.count_outliers().unwrap())
        );
        assert!(
            inspector
                .get_data_types()
                .unwrap()
                .equals(&inspector.get_data_types().unwrap())
        );
    }

    #[test]
    fn test_column_kinds() {
        let df = mixed_frame();
        let kinds = TableInspector::new(&df).column_kinds();
        assert_eq!(
            kinds,
            vec![
                ("id".to_string(), ColumnKind::Integer),
                ("price".to_string(), ColumnKind::Float),
                ("city".to_string(), ColumnKind::Text),
                ("flag".to_string(), ColumnKind::Boolean),
            ]
        );
    }

    #[test]
    fn test_temporal_column_is_not_numeric() {
        let dates = Series::new("when".into(), [19000i32, 19001, 25000])
            .cast(&DataType::Date)
            .unwrap();
        let df = DataFrame::new(vec![dates.into_column()]).unwrap();
        let inspector = TableInspector::new(&df);

        assert_eq!(inspector.column_kinds()[0].1, ColumnKind::Temporal);
        assert!(inspector.calculate_outlier_count("when").is_err());
        let summary = &inspector.column_summaries().unwrap()[0];
        assert_eq!(summary.data_points, 3);
        assert_eq!(summary.outliers(), 0);
    }

    #[test]
    fn test_display() {
        let df = mixed_frame();
        assert_eq!(
            TableInspector::new(&df).to_string(),
            "TableInspector(columns=[id, price, city, flag])"
        );
        let empty = DataFrame::empty();
        assert_eq!(
            TableInspector::new(&empty).to_string(),
            "TableInspector(columns=[])"
        );
    }

    #[test]
    fn test_table_is_not_mutated() {
        let df = mixed_frame();
        let before = df.clone();
        let inspector = TableInspector::new(&df);
        inspector.get_data_types().unwrap();
        inspector.count_missing_data_issues().unwrap();
        inspector.count_outliers().unwrap();
        inspector.calculate_outlier_count("price").unwrap();
        assert!(df.equals_missing(&before));
    }
}
