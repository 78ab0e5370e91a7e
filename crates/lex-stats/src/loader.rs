//! CSV loading into the row model used by the profiler.
//!
//! Every column is read as text: type decisions belong to the classifier, not
//! to the CSV reader, so `"007"` stays `"007"` and mixed columns load intact.

use crate::error::{Result, ResultExt, StatsError};
use crate::types::{Dataset, Row};
use polars::io::csv::read::CsvReadOptions;
use polars::prelude::*;
use std::io::Cursor;
use std::path::Path;
use tracing::{debug, info, warn};

/// Load a CSV file with a header row into a [`Dataset`].
///
/// Null cells become empty strings. Fails when the file cannot be read or
/// parsed, has no header columns, or has no data rows.
pub fn load_csv(path: impl AsRef<Path>) -> Result<Dataset> {
    let path = path.as_ref();
    info!("Loading dataset from: {}", path.display());

    if !path.is_file() {
        return Err(StatsError::CsvLoadFailed {
            path: path.to_path_buf(),
            reason: "file not found".to_string(),
        });
    }

    let df = read_with_fallbacks(path)?;
    let dataset = dataframe_to_dataset(&df, path)?;

    info!(
        "Loaded {} rows with {} columns",
        dataset.height(),
        dataset.width()
    );
    Ok(dataset)
}

/// Read the file as an all-string frame, retrying on pre-cleaned content.
fn read_with_fallbacks(path: &Path) -> Result<DataFrame> {
    // Strategy 1: standard read
    match string_read_options()
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()
    {
        Ok(df) => return Ok(df),
        Err(e) => {
            debug!("Standard loading failed: {}", e);
        }
    }

    // Strategy 2: pre-clean content
    let content = std::fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Err(StatsError::NoColumns(path.to_path_buf()));
    }

    warn!(
        "Retrying '{}' with cleaned quoting and blank lines removed",
        path.display()
    );
    string_read_options()
        .into_reader_with_file_handle(Cursor::new(clean_csv_content(&content)))
        .finish()
        .map_err(|e| StatsError::CsvLoadFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
}

fn string_read_options() -> CsvReadOptions {
    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
}

/// Collapse doubled quotes and drop blank lines.
fn clean_csv_content(content: &str) -> String {
    content
        .replace("\"\"\"", "\"")
        .replace("\"\"", "\"")
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Convert an all-string frame into rows keyed by header name.
fn dataframe_to_dataset(df: &DataFrame, path: &Path) -> Result<Dataset> {
    if df.width() == 0 {
        return Err(StatsError::NoColumns(path.to_path_buf()));
    }
    if df.height() == 0 {
        return Err(StatsError::EmptyDataset(path.to_path_buf()));
    }

    let columns: Vec<String> = df
        .get_column_names()
        .into_iter()
        .map(|name| name.to_string())
        .collect();

    let mut rows = vec![Row::new(); df.height()];
    for name in &columns {
        let series = df
            .column(name)
            .context(format!("Reading column '{}'", name))?
            .as_materialized_series();
        let values = series.str()?;
        for (row, value) in rows.iter_mut().zip(values.into_iter()) {
            row.insert(name.as_str(), value.unwrap_or(""));
        }
    }

    Ok(Dataset::new(columns, rows))
}
