//! Console rendering of statuses and summaries

use colored::Colorize;
use fcheck_core::{FileStatus, Reconciliation};

/// Column the path starts in, counted from the opening bracket.
const LABEL_COLUMN: usize = fcheck_core::MAX_LABEL_LEN + 1;

/// One `[LABEL]   path` line.
pub fn status_line(path: &str, status: FileStatus) -> String {
    let tag = format!("[{}]", status.label());
    let tag = if status.is_success() {
        tag.white().bold().on_green()
    } else {
        tag.white().bold().on_yellow()
    };
    let padding = " ".repeat(LABEL_COLUMN - status.label().len());
    format!("{tag}{padding} {path}")
}

/// Final summary of a check run.
pub fn summary(result: &Reconciliation) -> String {
    if result.is_clean() {
        return match result.pass_count {
            1 => "All 1 file matches.".to_string(),
            n => format!("All {n} files match."),
        };
    }
    format!(
        "\nPassed: {}\nMismatched: {}\nNot found: {}\nRedundant: {}",
        result.pass_count,
        result.diff.mismatching.len(),
        result.diff.missing.len(),
        result.diff.redundant.len()
    )
}
