//! New table page
//!
//! Defines a table schema, creates it through the JSON endpoint and
//! optionally populates it from an uploaded `.csv` or `.xlsx` file.

use super::{ChecklistItem, PageForm};
use crate::api::{endpoints, ColumnDef, TableSchema};
use crate::error::{CliError, Result};
use crate::upload::{ExtraFields, UploadConfig};
use portal_common::validation::{find_duplicate, is_present, is_valid_identifier};
use portal_common::ValidationIssue;
use serde_json::Value;
use std::collections::HashSet;
use std::str::FromStr;

/// Column types offered by the type picker
pub const PG_TYPES: [&str; 23] = [
    "smallint",
    "integer",
    "bigint",
    "serial",
    "bigserial",
    "numeric",
    "decimal",
    "real",
    "double precision",
    "money",
    "boolean",
    "text",
    "varchar",
    "char",
    "bytea",
    "date",
    "timestamp",
    "timestamptz",
    "time",
    "timetz",
    "uuid",
    "json",
    "jsonb",
];

/// Per-file limit for row uploads
pub const NEW_TABLE_MAX_SIZE_MB: u64 = 100;

const IDENTIFIER_RULE: &str = "[A-Za-z_][A-Za-z0-9_]*";

pub fn is_supported_type(column_type: &str) -> bool {
    let wanted = column_type.trim().to_lowercase();
    PG_TYPES.iter().any(|t| *t == wanted)
}

impl ColumnDef {
    pub fn new(name: impl Into<String>, column_type: impl Into<String>, nullable: bool) -> Self {
        Self {
            name: name.into(),
            column_type: column_type.into(),
            nullable,
        }
    }

    /// `id uuid NOT NULL` and `created_at timestamptz NOT NULL`
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::new("id", "uuid", false),
            Self::new("created_at", "timestamptz", false),
        ]
    }
}

/// Parses `name:type[:nullable|not-null]`
///
/// A missing third segment means nullable. Name and type may be empty so
/// the form can report them.
impl FromStr for ColumnDef {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self> {
        let mut parts = s.splitn(3, ':');
        let name = parts.next().unwrap_or_default().trim();
        let column_type = parts
            .next()
            .ok_or_else(|| CliError::config(format!("Column '{}' must be written as name:type[:nullable]", s)))?
            .trim();

        let nullable = match parts.next().map(|n| n.trim().to_lowercase()) {
            None => true,
            Some(flag) => match flag.as_str() {
                "" | "null" | "nullable" | "true" => true,
                "not-null" | "notnull" | "not null" | "false" => false,
                other => {
                    return Err(CliError::config(format!(
                        "Column '{}': expected 'nullable' or 'not-null', got '{}'",
                        s, other
                    )))
                },
            },
        };

        Ok(Self::new(name, column_type.to_lowercase(), nullable))
    }
}

/// Table name plus column definitions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTableForm {
    pub table: String,
    pub columns: Vec<ColumnDef>,
}

impl Default for NewTableForm {
    fn default() -> Self {
        Self {
            table: String::new(),
            columns: ColumnDef::defaults(),
        }
    }
}

impl NewTableForm {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            ..Self::default()
        }
    }

    pub fn with_columns(table: impl Into<String>, columns: Vec<ColumnDef>) -> Self {
        Self {
            table: table.into(),
            columns,
        }
    }

    pub fn add_column(&mut self, column: ColumnDef) {
        self.columns.push(column);
    }

    pub fn remove_column(&mut self, index: usize) -> Option<ColumnDef> {
        (index < self.columns.len()).then(|| self.columns.remove(index))
    }

    pub fn schema(&self) -> TableSchema {
        TableSchema {
            table: self.table.trim().to_string(),
            columns: self.columns.clone(),
        }
    }

    fn named_columns(&self) -> impl Iterator<Item = &str> {
        self.columns
            .iter()
            .map(|c| c.name.as_str())
            .filter(|name| !name.is_empty())
    }
}

impl PageForm for NewTableForm {
    fn title(&self) -> &'static str {
        "New Table"
    }

    fn issues(&self) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        let table = self.table.trim();

        if !is_present(table) {
            issues.push(ValidationIssue::new("Table name is required."));
        } else if !is_valid_identifier(table) {
            issues.push(ValidationIssue::new(format!(
                "Table name must match {}.",
                IDENTIFIER_RULE
            )));
        }

        if self.columns.is_empty() {
            issues.push(ValidationIssue::new("Add at least one column."));
        }

        if self.named_columns().any(|name| !is_valid_identifier(name)) {
            issues.push(ValidationIssue::new(format!(
                "All column names must match {}.",
                IDENTIFIER_RULE
            )));
        }

        if let Some(duplicate) = find_duplicate(self.named_columns()) {
            issues.push(ValidationIssue::new(format!(
                "Duplicate column name: {}",
                duplicate
            )));
        }

        if self.columns.iter().any(|c| !is_present(&c.column_type)) {
            issues.push(ValidationIssue::new("Each column needs a type."));
        }

        if let Some(unsupported) = self
            .columns
            .iter()
            .map(|c| c.column_type.trim())
            .find(|t| !t.is_empty() && !is_supported_type(t))
        {
            issues.push(ValidationIssue::new(format!(
                "Unsupported column type: {}.",
                unsupported
            )));
        }

        issues
    }

    fn checklist(&self) -> Vec<ChecklistItem> {
        let table = self.table.trim();
        let distinct: HashSet<&str> = self.columns.iter().map(|c| c.name.as_str()).collect();

        vec![
            ChecklistItem::new(
                "Valid table name",
                is_present(table) && is_valid_identifier(table),
            ),
            ChecklistItem::new("At least one column", !self.columns.is_empty()),
            ChecklistItem::new(
                "Valid column names",
                self.columns.iter().all(|c| is_valid_identifier(&c.name)),
            ),
            ChecklistItem::new(
                "No duplicate column names",
                distinct.len() == self.columns.len(),
            ),
            ChecklistItem::new(
                "Types selected",
                self.columns.iter().all(|c| is_present(&c.column_type)),
            ),
        ]
    }

    fn endpoint(&self) -> &'static str {
        endpoints::TABLE_CREATE
    }

    fn body(&self) -> Result<Value> {
        Ok(serde_json::to_value(self.schema())?)
    }

    fn upload_config(&self) -> Option<UploadConfig> {
        Some(
            UploadConfig::single(endpoints::NEW_TABLE_UPLOAD)
                .with_max_size_mb(NEW_TABLE_MAX_SIZE_MB)
                .with_accept(&[".csv", ".xlsx"]),
        )
    }

    fn upload_fields(&self) -> Result<ExtraFields> {
        let schema = self.schema();
        let mut fields = ExtraFields::new();
        fields.insert("schema".to_string(), Value::String(serde_json::to_string(&schema)?));
        fields.insert("table".to_string(), Value::String(schema.table));
        Ok(fields)
    }

    /// Leaves one blank nullable `text` column, like the Clear button
    fn clear(&mut self) {
        self.table.clear();
        self.columns = vec![ColumnDef::new("", "text", true)];
    }
}
