//! Terminal rendering of page state
//!
//! Formatting helpers return strings so commands decide where they go.
//! Styling is configured once by [`init_styles`]; nothing else touches the
//! global color switch.

use crate::error::CliError;
use crate::forms::ChecklistItem;
use crate::health::HealthStatus;
use crate::progress::format_size_mb;
use crate::upload::SelectedFile;
use colored::{ColoredString, Colorize};
use portal_common::ValidationIssue;
use serde_json::Value;
use std::sync::Once;

static STYLES: Once = Once::new();

/// Apply the color choice for the whole process; later calls are no-ops
pub fn init_styles(no_color: bool) {
    STYLES.call_once(|| {
        if no_color {
            colored::control::set_override(false);
        }
    });
}

fn dot(ok: bool) -> ColoredString {
    if ok {
        "●".green()
    } else {
        "●".red()
    }
}

/// `● Backend: Online`
pub fn health_pill(status: HealthStatus) -> String {
    let dot = match status {
        HealthStatus::Unknown => "●".dimmed(),
        HealthStatus::Online => "●".green(),
        HealthStatus::Offline => "●".red(),
    };
    format!("{} Backend: {}", dot, status)
}

/// Readiness section, one dot per predicate
pub fn checklist(title: &str, items: &[ChecklistItem]) -> String {
    let mut out = format!("{}\n", format!("{} · Readiness", title).cyan().bold());
    for item in items {
        out.push_str(&format!("  {} {}\n", dot(item.ok), item.label));
    }
    out
}

/// Bulleted validation issues
pub fn issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(|issue| format!("• {}", issue))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Selected files with their sizes
pub fn selection(files: &[SelectedFile]) -> String {
    files
        .iter()
        .map(|f| format!("  {} {}", f.name, format_size_mb(f.size_bytes).dimmed()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Error panel text; validation issues become bullets
pub fn error(err: &CliError) -> String {
    match err {
        CliError::Validation(list) => issues(list),
        other => other.to_string(),
    }
}

/// Pretty-printed response payload
pub fn response(payload: &Value) -> String {
    serde_json::to_string_pretty(payload).unwrap_or_else(|_| payload.to_string())
}
