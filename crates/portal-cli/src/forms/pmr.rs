//! PMR ingestion page

use super::{ChecklistItem, PageForm};
use crate::api::{endpoints, PmrTriggerRequest};
use crate::error::Result;
use portal_common::validation::{is_present, is_range_valid, is_valid_iso_date};
use portal_common::ValidationIssue;
use serde_json::Value;

/// Inclusive date range of a PMR ingestion run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PmrForm {
    pub from: String,
    pub to: String,
}

impl PmrForm {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

fn date_issue(value: &str, label: &str) -> Option<ValidationIssue> {
    if !is_present(value) {
        Some(ValidationIssue::new(format!("{} date is required.", label)))
    } else if !is_valid_iso_date(value) {
        Some(ValidationIssue::new(format!("{} date must be YYYY-MM-DD.", label)))
    } else {
        None
    }
}

impl PageForm for PmrForm {
    fn title(&self) -> &'static str {
        "PMR"
    }

    fn issues(&self) -> Vec<ValidationIssue> {
        let (from, to) = (self.from.trim(), self.to.trim());
        let mut issues: Vec<_> = [date_issue(from, "From"), date_issue(to, "To")]
            .into_iter()
            .flatten()
            .collect();

        if is_present(from) && is_present(to) && !is_range_valid(from, to) {
            issues.push(ValidationIssue::new(
                "Date range is invalid (From must be on or before To).",
            ));
        }
        issues
    }

    fn checklist(&self) -> Vec<ChecklistItem> {
        let (from, to) = (self.from.trim(), self.to.trim());
        vec![
            ChecklistItem::new("From (YYYY-MM-DD)", is_valid_iso_date(from)),
            ChecklistItem::new("To (YYYY-MM-DD)", is_valid_iso_date(to)),
            ChecklistItem::new("Range valid (From ≤ To)", is_range_valid(from, to)),
        ]
    }

    fn endpoint(&self) -> &'static str {
        endpoints::PMR_TRIGGER
    }

    fn body(&self) -> Result<Value> {
        let request = PmrTriggerRequest {
            from: self.from.trim().to_string(),
            to: self.to.trim().to_string(),
        };
        Ok(serde_json::to_value(request)?)
    }

    fn clear(&mut self) {
        self.from.clear();
        self.to.clear();
    }
}
