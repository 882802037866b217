//! Per-column outlier summaries and the statistics rows they render into.

use serde::{Deserialize, Serialize};

use crate::stats::{OutlierBounds, OutlierCounts, round_to};
use crate::utils::ColumnKind;

/// One row of the transposed [`crate::TableInspector::count_outliers`] table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutlierStatistic {
    DataPoints = 0,
    Outliers = 1,
    UpperOutliers = 2,
    LowerOutliers = 3,
    RatioOutliers = 4,
    RatioUpperOutliers = 5,
    RatioLowerOutliers = 6,
}

impl OutlierStatistic {
    /// Row order of the outlier table.
    pub const ALL: [OutlierStatistic; 7] = [
        OutlierStatistic::DataPoints,
        OutlierStatistic::Outliers,
        OutlierStatistic::UpperOutliers,
        OutlierStatistic::LowerOutliers,
        OutlierStatistic::RatioOutliers,
        OutlierStatistic::RatioUpperOutliers,
        OutlierStatistic::RatioLowerOutliers,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            OutlierStatistic::DataPoints => "data_points",
            OutlierStatistic::Outliers => "outliers",
            OutlierStatistic::UpperOutliers => "upper_outliers",
            OutlierStatistic::LowerOutliers => "lower_outliers",
            OutlierStatistic::RatioOutliers => "ratio_outliers",
            OutlierStatistic::RatioUpperOutliers => "ratio_upper_outliers",
            OutlierStatistic::RatioLowerOutliers => "ratio_lower_outliers",
        }
    }

    /// Row position of this statistic in the outlier table.
    #[inline]
    pub fn row_index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for OutlierStatistic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outlier figures for a single column.
///
/// Non-numeric columns carry only `data_points`; every other figure is zero
/// and `bounds` is `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnOutlierSummary {
    pub name: String,
    pub kind: ColumnKind,
    pub data_points: usize,
    pub lower_outliers: usize,
    pub upper_outliers: usize,
    pub ratio_outliers: f64,
    pub ratio_upper_outliers: f64,
    pub ratio_lower_outliers: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bounds: Option<OutlierBounds>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<f64>,
}

impl ColumnOutlierSummary {
    /// Summary for a column that takes no part in outlier detection.
    pub(crate) fn non_numeric(name: String, kind: ColumnKind, data_points: usize) -> Self {
        Self {
            name,
            kind,
            data_points,
            lower_outliers: 0,
            upper_outliers: 0,
            ratio_outliers: 0.0,
            ratio_upper_outliers: 0.0,
            ratio_lower_outliers: 0.0,
            bounds: None,
            examples: Vec::new(),
        }
    }

    /// Summary for a numeric column from its non-missing values.
    pub(crate) fn numeric(
        name: String,
        kind: ColumnKind,
        values: &[f64],
        precision: u32,
        max_examples: usize,
    ) -> Self {
        let data_points = values.len();
        let bounds = OutlierBounds::from_values(values);
        let counts = bounds.map(|b| b.count(values)).unwrap_or_default();

        let examples = bounds
            .map(|b| {
                values
                    .iter()
                    .copied()
                    .filter(|v| b.is_outlier(*v))
                    .take(max_examples)
                    .collect()
            })
            .unwrap_or_default();

        let ratio = |count: usize| {
            if data_points > 0 {
                round_to(count as f64 / data_points as f64, precision)
            } else {
                0.0
            }
        };

        Self {
            name,
            kind,
            data_points,
            lower_outliers: counts.lower,
            upper_outliers: counts.upper,
            ratio_outliers: ratio(counts.total()),
            ratio_upper_outliers: ratio(counts.upper),
            ratio_lower_outliers: ratio(counts.lower),
            bounds,
            examples,
        }
    }

    pub fn outliers(&self) -> usize {
        self.lower_outliers + self.upper_outliers
    }

    pub fn counts(&self) -> OutlierCounts {
        OutlierCounts {
            lower: self.lower_outliers,
            upper: self.upper_outliers,
        }
    }

    /// Value of one statistic, as stored in the outlier table.
    pub fn value(&self, statistic: OutlierStatistic) -> f64 {
        match statistic {
            OutlierStatistic::DataPoints => self.data_points as f64,
            OutlierStatistic::Outliers => self.outliers() as f64,
            OutlierStatistic::UpperOutliers => self.upper_outliers as f64,
            OutlierStatistic::LowerOutliers => self.lower_outliers as f64,
            OutlierStatistic::RatioOutliers => self.ratio_outliers,
            OutlierStatistic::RatioUpperOutliers => self.ratio_upper_outliers,
            OutlierStatistic::RatioLowerOutliers => self.ratio_lower_outliers,
        }
    }

    /// All statistics in [`OutlierStatistic::ALL`] order.
    pub fn values(&self) -> Vec<f64> {
        OutlierStatistic::ALL.iter().map(|s| self.value(*s)).collect()
    }
}
