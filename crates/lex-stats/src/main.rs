//! CLI entry point for the grouped statistics tool.

use anyhow::{Result, anyhow};
use clap::Parser;
use lex_stats::config::{
    DEFAULT_MAX_DETAILED_GROUPS, DEFAULT_NUMERIC_THRESHOLD, DEFAULT_SAMPLE_SIZE,
};
use lex_stats::reporting::{
    DEFAULT_MAX_COLUMNS_PER_GROUP, DEFAULT_MAX_GROUPS_DISPLAYED, DEFAULT_FLOAT_PRECISION,
};
use lex_stats::utils::truncate_str;
use lex_stats::{
    AnalysisConfig, AnalysisReport, ConsoleRenderer, JsonRenderer, RenderOptions,
    ReportGenerator, analyze_dataset, load_csv, render_report,
};
use std::io::Write;
use std::path::Path;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(
    author = "Lex Machina Team",
    version,
    about = "Grouped descriptive statistics for CSV datasets",
    long_about = "Computes per-column statistics for a CSV file, overall and per group.\n\n\
                  By default rows are grouped by page_id and by (page_id, ad_id);\n\
                  groupings whose columns are missing are skipped.\n\n\
                  EXAMPLES:\n  \
                  # Overall and default groupings\n  \
                  lex-stats -i ads.csv\n\n  \
                  # Custom grouping, more groups shown\n  \
                  lex-stats -i ads.csv --group-by region --max-groups 10\n\n  \
                  # Machine-readable output\n  \
                  lex-stats -i ads.csv --json | jq .groupings\n\n  \
                  # The displayed sections only, as JSON\n  \
                  lex-stats -i ads.csv --json-sections --max-groups 1"
)]
struct Args {
    /// Path to the CSV file to analyze
    #[arg(short, long)]
    input: String,

    /// Columns to group by, comma-separated; repeat for several groupings
    ///
    /// Replaces the default groupings (page_id, then page_id + ad_id)
    #[arg(short, long = "group-by", value_name = "COLUMNS")]
    group_by: Vec<String>,

    /// Only compute overall statistics
    #[arg(long, conflicts_with = "group_by")]
    no_groups: bool,

    /// Rows sampled for type classification
    #[arg(long, default_value_t = DEFAULT_SAMPLE_SIZE)]
    sample_size: usize,

    /// Share of numeric cells a column must exceed to be numeric (0.0 - 1.0)
    #[arg(long, default_value_t = DEFAULT_NUMERIC_THRESHOLD)]
    numeric_threshold: f64,

    /// Groups printed per grouping
    #[arg(long, default_value_t = DEFAULT_MAX_GROUPS_DISPLAYED)]
    max_groups: usize,

    /// Columns printed per group section
    #[arg(long, default_value_t = DEFAULT_MAX_COLUMNS_PER_GROUP)]
    max_columns: usize,

    /// Decimal places for floating-point statistics
    #[arg(long, default_value_t = DEFAULT_FLOAT_PRECISION)]
    precision: usize,

    /// Groups per grouping that get full statistics in the report
    #[arg(long, default_value_t = DEFAULT_MAX_DETAILED_GROUPS)]
    max_detailed_groups: usize,

    /// Output directory for the JSON report
    #[arg(short, long, default_value = "./outputs")]
    output: String,

    /// Output JSON to stdout instead of human-readable sections
    ///
    /// Disables all logs; only the final JSON report is written.
    #[arg(long)]
    json: bool,

    /// Output the rendered sections and notes as JSON instead of the full report
    ///
    /// Honors --max-groups and --max-columns like the console output.
    /// Disables all logs.
    #[arg(long, conflicts_with = "json")]
    json_sections: bool,

    /// Write the JSON report to the output directory
    ///
    /// The report will be saved as <input_name>_stats.json
    #[arg(short = 'r', long)]
    emit_report: bool,

    /// Compute on a single thread
    #[arg(long)]
    sequential: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Suppress progress output (only show warnings, errors and results)
    #[arg(short, long)]
    quiet: bool,
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true, logging is completely disabled to ensure
/// only JSON is written to stdout.
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
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args.log_level, args.quiet, args.json || args.json_sections);

    let config = build_config(&args)?;
    let options = RenderOptions {
        max_groups_displayed: args.max_groups,
        max_columns_per_group: args.max_columns,
        float_precision: args.precision,
    };

    if !Path::new(&args.input).exists() {
        error!("File '{}' not found", args.input);
        return Err(anyhow!("Input file not found: {}", args.input));
    }

    let dataset = load_csv(&args.input)?;
    let report = analyze_dataset(&dataset, &config, &args.input);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if args.json_sections {
        println!("{}", render_json_sections(&report, &options)?);
        return Ok(());
    }

    if args.emit_report {
        let generator = ReportGenerator::new(&args.output);
        let report_path = generator.write_report_to_file(&report, &extract_file_stem(&args.input))?;
        info!("Report written to: {}", report_path.display());
    }

    print_human_readable(&report, &options)
}

/// Translate CLI flags into a validated analysis configuration.
fn build_config(args: &Args) -> Result<AnalysisConfig> {
    let mut builder = AnalysisConfig::builder()
        .sample_size(args.sample_size)
        .numeric_threshold(args.numeric_threshold)
        .max_detailed_groups(args.max_detailed_groups)
        .parallel(!args.sequential);

    if args.no_groups {
        builder = builder.groupings(Vec::new());
    }
    for spec in &args.group_by {
        builder = builder.grouping(parse_group_by(spec));
    }

    Ok(builder.build()?)
}

/// "page_id, ad_id" -> ["page_id", "ad_id"]
fn parse_group_by(spec: &str) -> Vec<String> {
    spec.split(',').map(|key| key.trim().to_string()).collect()
}

/// Extract the file stem (name without extension) from a path.
fn extract_file_stem(path: &str) -> String {
    Path::new(path)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output")
        .to_string()
}

/// Render the report's sections through [`JsonRenderer`].
fn render_json_sections(report: &AnalysisReport, options: &RenderOptions) -> Result<String> {
    let mut renderer = JsonRenderer::new();
    render_report(&mut renderer, report, options)?;
    Ok(renderer.to_string_pretty()?)
}

/// Print the column overview followed by every rendered section.
///
/// Uses `println!`/stdout directly: this is the tool's result, not logging,
/// and must stay visible at any log level.
fn print_human_readable(report: &AnalysisReport, options: &RenderOptions) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    writeln!(out, "Analyzing dataset: {}", report.input_file)?;
    writeln!(
        out,
        "Loaded {} rows with {} columns ({} numeric, {} categorical)",
        report.row_count, report.column_count, report.numeric_columns, report.categorical_columns
    )?;
    writeln!(out)?;
    writeln!(out, "{:<30} {:<12} {:<10}", "Column", "Type", "Missing %")?;
    writeln!(out, "{}", "-".repeat(54))?;
    for (column, column_type) in &report.column_types {
        let missing = report
            .missing_values
            .iter()
            .find(|m| &m.column == column)
            .map(|m| m.missing_percentage)
            .unwrap_or(0.0);
        writeln!(
            out,
            "{:<30} {:<12} {:<10.1}",
            truncate_str(column, 29),
            column_type.as_str(),
            missing
        )?;
    }

    let mut console = ConsoleRenderer::new(out).with_float_precision(options.float_precision);
    render_report(&mut console, report, options)?;

    Ok(())
}
