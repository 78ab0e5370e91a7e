//! Shared cell-level helpers used by the classifier and the statistics code.

// =============================================================================
// Cell Utilities
// =============================================================================

/// Check whether a raw cell holds a value (non-empty after trimming).
#[inline]
pub fn is_present(cell: &str) -> bool {
    !cell.trim().is_empty()
}

/// Parse a raw cell as a real number.
///
/// The cell is trimmed first; no thousands separators, currency symbols or
/// percent signs are stripped. Empty cells never parse, and neither do
/// `NaN` or infinite spellings.
///
/// # Example
///
/// ```rust,ignore
/// use lex_stats::utils::parse_numeric_cell;
///
/// assert_eq!(parse_numeric_cell(" 4.5 "), Some(4.5));
/// assert_eq!(parse_numeric_cell("1e3"), Some(1000.0));
/// assert_eq!(parse_numeric_cell("$12"), None);
/// ```
pub fn parse_numeric_cell(cell: &str) -> Option<f64> {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Check if a raw cell can be parsed as a real number.
#[inline]
pub fn is_numeric_cell(cell: &str) -> bool {
    parse_numeric_cell(cell).is_some()
}

/// Truncate a string to `max_chars` characters, ending with an ellipsis when cut.
pub fn truncate_str(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let kept: String = s.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{}...", kept)
}
