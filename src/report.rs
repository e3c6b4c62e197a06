//! Banner around a report when printing picture strings found in files.

use crate::lint::Report;
use crate::diagram::columns;

/// Tag shown for markers that carry none.
pub const UNNAMED: &str = "unnamed";

/// Header line, the four report lines and a trailing blank line.
///
/// ```text
/// --- Pic: "Example" in bplint_test.go line 22 ------------------------
/// OK.
/// ...
/// ```
pub fn banner(tag: Option<&str>, file: &str, line: usize, report: &Report) -> String {
    let head = format!("--- Pic: \"{}\" in {file} line {line} -", tag.unwrap_or(UNNAMED));
    let widest = report.lines().iter().map(|l| columns(l)).max().unwrap_or(0);
    let head_width = columns(&head);
    let dashes = if head_width < widest { widest - head_width } else { 2 };
    format!("{head}{}\n{report}\n\n", "-".repeat(dashes))
}

/// Underlined message for run-level problems.
pub fn underlined(message: &str) -> String {
    format!("{}\n{message}", "_".repeat(columns(message)))
}
