//! Configuration for table inspection.
//!
//! The outlier rule itself is fixed (see [`crate::stats::IQR_MULTIPLIER`]);
//! configuration only controls how results are presented.

use serde::{Deserialize, Serialize};

/// Largest accepted value for [`InspectorConfig::ratio_precision`].
pub const MAX_RATIO_PRECISION: u32 = 10;

/// Largest accepted value for [`InspectorConfig::include_examples`].
pub const MAX_EXAMPLES: usize = 100;

/// Configuration for a [`crate::TableInspector`].
///
/// Use [`InspectorConfig::builder()`] to create a validated configuration.
///
/// # Example
///
/// ```rust,ignore
/// use lex_quality::InspectorConfig;
///
/// let config = InspectorConfig::builder()
///     .ratio_precision(4)
///     .include_examples(5)
///     .build()?;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InspectorConfig {
    /// Decimal places outlier ratios are rounded to.
    /// Default: 3
    pub ratio_precision: u32,

    /// Number of example outlier values recorded per numeric column.
    /// Default: 3
    pub include_examples: usize,
}

impl Default for InspectorConfig {
    fn default() -> Self {
        Self {
            ratio_precision: 3,
            include_examples: 3,
        }
    }
}

impl InspectorConfig {
    /// Create a new configuration builder.
    pub fn builder() -> InspectorConfigBuilder {
        InspectorConfigBuilder::default()
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.ratio_precision > MAX_RATIO_PRECISION {
            return Err(ConfigValidationError::InvalidPrecision(self.ratio_precision));
        }

        if self.include_examples > MAX_EXAMPLES {
            return Err(ConfigValidationError::TooManyExamples(self.include_examples));
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid ratio precision: {0} (must be at most {MAX_RATIO_PRECISION})")]
    InvalidPrecision(u32),

    #[error("Invalid example count: {0} (must be at most {MAX_EXAMPLES})")]
    TooManyExamples(usize),
}

/// Builder for [`InspectorConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct InspectorConfigBuilder {
    ratio_precision: Option<u32>,
    include_examples: Option<usize>,
}

impl InspectorConfigBuilder {
    /// Set the number of decimal places for outlier ratios.
    pub fn ratio_precision(mut self, places: u32) -> Self {
        self.ratio_precision = Some(places);
        self
    }

    /// Set how many example outlier values to keep per column.
    pub fn include_examples(mut self, count: usize) -> Self {
        self.include_examples = Some(count);
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `InspectorConfig` or an error if validation fails.
    pub fn build(self) -> Result<InspectorConfig, ConfigValidationError> {
        let defaults = InspectorConfig::default();
        let config = InspectorConfig {
            ratio_precision: self.ratio_precision.unwrap_or(defaults.ratio_precision),
            include_examples: self.include_examples.unwrap_or(defaults.include_examples),
        };

        config.validate()?;
        Ok(config)
    }
}
