//! Quartiles and IQR outlier bounds.

use serde::{Deserialize, Serialize};

/// Multiplier applied to the IQR when deriving outlier limits.
pub const IQR_MULTIPLIER: f64 = 1.5;

/// Percentile of an ascending-sorted slice using linear interpolation.
///
/// `p` is a fraction in `0.0..=1.0`. The fractional rank is `(n - 1) * p`
/// and the result interpolates between the two bracketing values.
///
/// Returns `None` if `sorted` is empty or `p` is out of range.
pub fn percentile(sorted: &[f64], p: f64) -> Option<f64> {
    if sorted.is_empty() || !(0.0..=1.0).contains(&p) {
        return None;
    }

    let rank = p * (sorted.len() - 1) as f64;
    let lower_index = rank.floor() as usize;
    let upper_index = rank.ceil() as usize;

    if lower_index == upper_index {
        Some(sorted[lower_index])
    } else {
        let lower_value = sorted[lower_index];
        let upper_value = sorted[upper_index];
        let fraction = rank - lower_index as f64;
        Some(lower_value + fraction * (upper_value - lower_value))
    }
}

/// Round to a fixed number of decimal places, ties to even.
pub fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round_ties_even() / factor
}

/// Quartiles and IQR limits of a numeric column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutlierBounds {
    pub q1: f64,
    pub q3: f64,
    pub iqr: f64,
    pub lower_limit: f64,
    pub upper_limit: f64,
}

impl OutlierBounds {
    /// Compute bounds from values in any order. Returns `None` for no values.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        let q1 = percentile(&sorted, 0.25)?;
        let q3 = percentile(&sorted, 0.75)?;
        let iqr = q3 - q1;

        Some(Self {
            q1,
            q3,
            iqr,
            lower_limit: q1 - IQR_MULTIPLIER * iqr,
            upper_limit: q3 + IQR_MULTIPLIER * iqr,
        })
    }

    /// Strictly below the lower limit.
    #[inline]
    pub fn is_lower_outlier(&self, value: f64) -> bool {
        value < self.lower_limit
    }

    /// Strictly above the upper limit.
    #[inline]
    pub fn is_upper_outlier(&self, value: f64) -> bool {
        value > self.upper_limit
    }

    #[inline]
    pub fn is_outlier(&self, value: f64) -> bool {
        self.is_lower_outlier(value) || self.is_upper_outlier(value)
    }

    /// Count `(lower, upper)` outliers among `values`.
    pub fn count(&self, values: &[f64]) -> OutlierCounts {
        values.iter().fold(OutlierCounts::default(), |mut acc, &v| {
            if self.is_lower_outlier(v) {
                acc.lower += 1;
            } else if self.is_upper_outlier(v) {
                acc.upper += 1;
            }
            acc
        })
    }
}

/// Lower and upper outlier counts for one column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlierCounts {
    pub lower: usize,
    pub upper: usize,
}

impl OutlierCounts {
    pub fn total(&self) -> usize {
        self.lower + self.upper
    }
}

impl From<OutlierCounts> for (usize, usize) {
    fn from(counts: OutlierCounts) -> Self {
        (counts.lower, counts.upper)
    }
}
