//! Report generation module.
//!
//! [`InspectionReport`] gathers every inspection over a table into one
//! serializable value, used for:
//! - JSON output to stdout (`--json` CLI flag)
//! - JSON file output (`--emit-report` CLI flag)
//! - Programmatic access in library mode
//!
//! # Example
//!
//! ```rust,ignore
//! use lex_quality::{InspectionReport, ReportWriter, TableInspector};
//!
//! let inspector = TableInspector::new(&df);
//! let report = InspectionReport::build(&inspector, Some("data/train.csv"))?;
//!
//! println!("{}", serde_json::to_string_pretty(&report)?);
//!
//! let writer = ReportWriter::new("output");
//! writer.write(&report, "train")?;
//! ```

mod generator;

pub use generator::{ColumnReport, InspectionReport, ReportTotals, ReportWriter};
