//! CLI entry point for data quality inspection.

use anyhow::{Result, anyhow};
use clap::Parser;
use lex_quality::{
    InspectionReport, InspectorConfig, OutlierStatistic, ReportWriter, TableInspector,
};
use polars::io::csv::read::CsvReadOptions;
use polars::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(
    author = "Lex Machina Team",
    version,
    about = "Data quality inspection: dtypes, missing values and IQR outliers",
    long_about = "Inspects a CSV file and reports column data types, missing-value counts \
                  and outlier statistics (1.5 x IQR rule).\n\n\
                  EXAMPLES:\n  \
                  # Print all tables\n  \
                  lex-quality -i data.csv\n\n  \
                  # Bounds and counts for one column\n  \
                  lex-quality -i data.csv --column Fare\n\n  \
                  # Machine-readable report\n  \
                  lex-quality -i data.csv --json | jq .totals"
)]
struct Args {
    /// Path to the CSV file to inspect
    #[arg(short, long)]
    input: String,

    /// Output directory for the report written by --emit-report
    #[arg(short, long, default_value = "./outputs")]
    output: String,

    /// Only report IQR bounds and outlier counts for this numeric column
    #[arg(short, long)]
    column: Option<String>,

    /// Decimal places for outlier ratios
    #[arg(long, default_value = "3")]
    precision: u32,

    /// Example outlier values kept per column in the report
    #[arg(long, default_value = "3")]
    examples: usize,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Suppress progress output (only show errors and results)
    #[arg(short, long)]
    quiet: bool,

    /// Output the JSON report to stdout instead of tables
    ///
    /// Disables all logging; only the report is written.
    #[arg(long)]
    json: bool,

    /// Write a JSON report to the output directory
    ///
    /// The report will be saved as <input_name>_quality_report.json
    #[arg(short = 'r', long)]
    emit_report: bool,
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true, logging is disabled so stdout only holds JSON.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args.log_level, args.quiet, args.json);

    if !Path::new(&args.input).exists() {
        return Err(anyhow!("Input file not found: {}", args.input));
    }

    let config = InspectorConfig::builder()
        .ratio_precision(args.precision)
        .include_examples(args.examples)
        .build()?;

    info!("Loading dataset from: {}", args.input);
    let data = load_csv(&args.input)?;
    info!("Dataset loaded successfully: {:?}", data.shape());

    let inspector = TableInspector::with_config(&data, config);
    debug!("{}", inspector);

    if let Some(ref column) = args.column {
        return print_column_outliers(&inspector, column);
    }

    let report = InspectionReport::build(&inspector, Some(&args.input))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if args.emit_report {
        let writer = ReportWriter::new(&args.output);
        debug!("Writing report into {}", writer.output_dir().display());
        let report_path = writer.write(&report, &extract_file_stem(&args.input))?;
        info!("Report written to: {}", report_path.display());
    }

    print_tables(&inspector, &report)
}

/// Print the three inspection tables plus a short summary.
///
/// Uses `println!` for user-facing output; logging stays on stderr.
fn print_tables(inspector: &TableInspector<'_>, report: &InspectionReport) -> Result<()> {
    println!("\n{}", "=".repeat(80));
    println!("DATA QUALITY INSPECTION");
    println!("{}\n", "=".repeat(80));

    println!("Rows: {}  Columns: {}", report.shape.0, report.shape.1);
    println!();

    println!("DATA TYPES");
    println!("{}", inspector.get_data_types()?);
    println!();

    println!("MISSING VALUES");
    println!("{}", inspector.count_missing_data_issues()?);
    println!();

    println!("OUTLIERS (1.5 x IQR)");
    println!("{}", with_statistic_labels(inspector.count_outliers()?)?);
    println!();

    println!("SUMMARY");
    println!("{}", "-".repeat(40));
    println!("  Missing values: {}", report.totals.missing);
    if !report.totals.columns_with_missing.is_empty() {
        println!("    in: {}", report.totals.columns_with_missing.join(", "));
    }
    println!("  Outliers: {}", report.totals.outliers);
    for column in &report.columns {
        let counts = column.outliers.counts();
        if counts.total() > 0 {
            let examples: Vec<String> = column
                .outliers
                .examples
                .iter()
                .map(|v| format!("{:.2}", v))
                .collect();
            println!(
                "    {}: {} ({} lower, {} upper; e.g. {})",
                column.name,
                counts.total(),
                counts.lower,
                counts.upper,
                examples.join(", ")
            );
        }
    }
    println!("{}", "=".repeat(80));

    Ok(())
}

/// Print IQR bounds and lower/upper counts for a single column.
fn print_column_outliers(inspector: &TableInspector<'_>, column: &str) -> Result<()> {
    let counts = match inspector.calculate_outlier_count(column) {
        Ok(counts) => counts,
        Err(e) if e.is_column_error() => {
            let numeric: Vec<String> = inspector
                .column_kinds()
                .into_iter()
                .filter(|(_, kind)| kind.is_numeric())
                .map(|(name, _)| name)
                .collect();
            return Err(anyhow!("{} (numeric columns: {})", e, numeric.join(", ")));
        }
        Err(e) => return Err(e.into()),
    };

    println!("Column: {}", column);
    match inspector.outlier_bounds(column)? {
        Some(bounds) => {
            println!("  Q1: {}", bounds.q1);
            println!("  Q3: {}", bounds.q3);
            println!("  IQR: {}", bounds.iqr);
            println!("  Limits: [{}, {}]", bounds.lower_limit, bounds.upper_limit);
        }
        None => println!("  No values to compute quartiles from"),
    }
    println!("  Lower outliers: {}", counts.lower);
    println!("  Upper outliers: {}", counts.upper);

    Ok(())
}

/// Prepend a label column naming each statistic row.
fn with_statistic_labels(mut table: DataFrame) -> Result<DataFrame> {
    if table.width() == 0 {
        return Ok(table);
    }

    let mut label = String::from("statistic");
    while table.get_column_index(&label).is_some() {
        label.push('_');
    }

    let names: Vec<&str> = OutlierStatistic::ALL.iter().map(|s| s.as_str()).collect();
    table.insert_column(0, Series::new(label.into(), names))?;
    Ok(table)
}

/// Extract the file stem (name without extension) from a path.
fn extract_file_stem(path: &str) -> String {
    Path::new(path)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output")
        .to_string()
}

/// Load a CSV file, retrying without quote handling if the first read fails.
fn load_csv(path: &str) -> Result<DataFrame> {
    match CsvReadOptions::default()
        .with_infer_schema_length(Some(100))
        .with_has_header(true)
        .with_parse_options(CsvParseOptions::default().with_quote_char(Some(b'"')))
        .try_into_reader_with_file_path(Some(PathBuf::from(path)))?
        .finish()
    {
        Ok(df) => return Ok(df),
        Err(e) => {
            debug!("Standard loading failed: {}", e);
        }
    }

    CsvReadOptions::default()
        .with_infer_schema_length(Some(100))
        .with_has_header(true)
        .with_parse_options(CsvParseOptions::default().with_quote_char(None))
        .try_into_reader_with_file_path(Some(PathBuf::from(path)))?
        .finish()
        .map_err(|e| anyhow!("Failed to read {}: {}", path, e))
}
