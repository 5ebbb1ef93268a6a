//! IRI pages: Category-Brand mapping and Items
//!
//! Both share the same context fields. Category-Brand takes one workbook,
//! Items takes any number of them.

use super::{ChecklistItem, PageForm};
use crate::api::{endpoints, IriTriggerRequest};
use crate::error::Result;
use crate::upload::{ExtraFields, UploadConfig};
use portal_common::validation::{is_present, is_valid_year, normalize_month};
use portal_common::ValidationIssue;
use serde_json::Value;

/// Per-file limit for IRI workbooks
pub const IRI_MAX_SIZE_MB: u64 = 50;

/// Which IRI dataset a page targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IriKind {
    CategoryBrand,
    Items,
}

impl IriKind {
    /// `kind` discriminator in the trigger body
    pub fn as_str(&self) -> &'static str {
        match self {
            IriKind::CategoryBrand => "iri_category_brand",
            IriKind::Items => "iri_items",
        }
    }

    fn endpoint(&self) -> &'static str {
        match self {
            IriKind::CategoryBrand => endpoints::IRI_CATEGORY_BRAND,
            IriKind::Items => endpoints::IRI_ITEMS,
        }
    }
}

/// Context fields of an IRI upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IriForm {
    pub kind: IriKind,
    pub source: String,
    pub year: String,
    /// Month name or number; numbers 1-12 are sent as names
    pub month: String,
}

impl IriForm {
    pub fn new(kind: IriKind) -> Self {
        Self {
            kind,
            source: String::new(),
            year: String::new(),
            month: String::new(),
        }
    }

    pub fn with_fields(
        kind: IriKind,
        source: impl Into<String>,
        year: impl Into<String>,
        month: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            source: source.into(),
            year: year.into(),
            month: month.into(),
        }
    }

    fn request(&self) -> IriTriggerRequest {
        IriTriggerRequest {
            kind: self.kind.as_str().to_string(),
            source: self.source.trim().to_string(),
            year: self.year.trim().to_string(),
            month: normalize_month(&self.month),
        }
    }
}

impl PageForm for IriForm {
    fn title(&self) -> &'static str {
        match self.kind {
            IriKind::CategoryBrand => "IRI · Category-Brand",
            IriKind::Items => "IRI · Items",
        }
    }

    fn issues(&self) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        if !is_present(&self.source) {
            issues.push(ValidationIssue::new("Source is required."));
        }
        if !is_valid_year(self.year.trim()) {
            issues.push(ValidationIssue::new("Year must be YYYY (e.g., 2025)."));
        }
        if !is_present(&self.month) {
            issues.push(ValidationIssue::new("Month is required."));
        }
        issues
    }

    fn checklist(&self) -> Vec<ChecklistItem> {
        vec![
            ChecklistItem::new("Source", is_present(&self.source)),
            ChecklistItem::new("Year (YYYY)", is_valid_year(self.year.trim())),
            ChecklistItem::new("Month (e.g., January)", is_present(&self.month)),
        ]
    }

    fn endpoint(&self) -> &'static str {
        self.kind.endpoint()
    }

    fn body(&self) -> Result<Value> {
        Ok(serde_json::to_value(self.request())?)
    }

    fn upload_config(&self) -> Option<UploadConfig> {
        let config = match self.kind {
            IriKind::CategoryBrand => UploadConfig::single(self.kind.endpoint()),
            IriKind::Items => UploadConfig::multiple(self.kind.endpoint()),
        };
        Some(config.with_max_size_mb(IRI_MAX_SIZE_MB).with_accept(&[".xlsx"]))
    }

    fn upload_fields(&self) -> Result<ExtraFields> {
        let request = self.request();
        let mut fields = ExtraFields::new();
        fields.insert("source".to_string(), Value::String(request.source));
        fields.insert("year".to_string(), Value::String(request.year));
        fields.insert("month".to_string(), Value::String(request.month));
        Ok(fields)
    }

    fn clear(&mut self) {
        *self = Self::new(self.kind);
    }
}
