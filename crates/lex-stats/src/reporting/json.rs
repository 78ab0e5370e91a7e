//! Structured rendering of statistics sections.

use super::renderer::ReportRenderer;
use crate::error::Result;
use crate::types::DatasetStatistics;
use serde::{Deserialize, Serialize};

/// One rendered section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonSection {
    pub title: String,
    pub statistics: DatasetStatistics,
    /// Columns left out by the column limit
    #[serde(default, skip_serializing_if = "is_zero")]
    pub omitted_columns: usize,
}

fn is_zero(n: &usize) -> bool {
    *n == 0
}

/// Collects sections and notes into an ordered document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JsonRenderer {
    pub sections: Vec<JsonSection>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
}

impl JsonRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn to_value(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }

    pub fn to_string_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl ReportRenderer for JsonRenderer {
    fn render_section(
        &mut self,
        title: &str,
        stats: &DatasetStatistics,
        column_limit: Option<usize>,
    ) -> Result<()> {
        let limit = column_limit.unwrap_or(stats.len());
        let statistics: DatasetStatistics = stats
            .iter()
            .take(limit)
            .map(|(column, record)| (column.clone(), record.clone()))
            .collect();

        self.sections.push(JsonSection {
            title: title.to_string(),
            omitted_columns: stats.len() - statistics.len(),
            statistics,
        });
        Ok(())
    }

    fn render_note(&mut self, note: &str) -> Result<()> {
        self.notes.push(note.to_string());
        Ok(())
    }
}
