//! Report generation and rendering.
//!
//! [`AnalysisReport`] is the single structure handed to every output path:
//! - JSON output to stdout (`--json` CLI flag)
//! - JSON file output (`--emit-report` CLI flag)
//! - Console sections through a [`ReportRenderer`]
//!
//! # Example
//!
//! ```rust,ignore
//! use lex_stats::reporting::{ConsoleRenderer, RenderOptions, ReportGenerator, render_report};
//!
//! let report = ReportGenerator::build_report("data/ads.csv", profile);
//!
//! let mut console = ConsoleRenderer::new(std::io::stdout().lock());
//! render_report(&mut console, &report, &RenderOptions::default())?;
//!
//! let generator = ReportGenerator::new("outputs");
//! generator.write_report_to_file(&report, "ads")?;
//! ```

mod console;
mod json;
mod renderer;
mod report;

pub use console::ConsoleRenderer;
pub use json::{JsonRenderer, JsonSection};
pub use renderer::{
    DEFAULT_FLOAT_PRECISION, DEFAULT_MAX_COLUMNS_PER_GROUP, DEFAULT_MAX_GROUPS_DISPLAYED,
    OVERALL_TITLE, RenderOptions, ReportRenderer, correlation_note, group_count_note, group_title,
    render_report,
};
pub use report::{AnalysisReport, MissingValueSummary, ReportGenerator};
