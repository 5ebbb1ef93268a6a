//! POS ingestion page

use super::{ChecklistItem, PageForm};
use crate::api::{endpoints, PosTriggerRequest};
use crate::error::Result;
use portal_common::validation::{is_present, is_valid_iso_date};
use portal_common::ValidationIssue;
use serde_json::Value;

/// Start date of a POS ingestion run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PosForm {
    /// Inclusive, `YYYY-MM-DD`
    pub since: String,
}

impl PosForm {
    pub fn new(since: impl Into<String>) -> Self {
        Self {
            since: since.into(),
        }
    }
}

impl PageForm for PosForm {
    fn title(&self) -> &'static str {
        "POS"
    }

    fn issues(&self) -> Vec<ValidationIssue> {
        let since = self.since.trim();
        if !is_present(since) {
            vec![ValidationIssue::new("Start date is required.")]
        } else if !is_valid_iso_date(since) {
            vec![ValidationIssue::new("Start date must be YYYY-MM-DD.")]
        } else {
            Vec::new()
        }
    }

    fn checklist(&self) -> Vec<ChecklistItem> {
        vec![ChecklistItem::new(
            "Start date (YYYY-MM-DD)",
            is_valid_iso_date(self.since.trim()),
        )]
    }

    fn endpoint(&self) -> &'static str {
        endpoints::POS_TRIGGER
    }

    fn body(&self) -> Result<Value> {
        let request = PosTriggerRequest {
            since: self.since.trim().to_string(),
        };
        Ok(serde_json::to_value(request)?)
    }

    fn clear(&mut self) {
        self.since.clear();
    }
}
